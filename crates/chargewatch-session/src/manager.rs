//! The session manager: lifecycle transitions and activity summaries.
//!
//! This is the only code that writes to the store. It's responsible for:
//! - Validating and creating sessions
//! - Stopping sessions exactly once
//! - Counting recent start/stop events for the summary
//!
//! # Concurrency note
//!
//! `SessionManager` holds no locks and no session state of its own. Every
//! method takes `&self` and goes through the shared [`SessionStore`], whose
//! per-key atomicity is what makes concurrent `start_session` and
//! `stop_session` calls safe. Share the manager itself with
//! `Arc<SessionManager>`.

use std::sync::Arc;

use chargewatch_protocol::{Session, SessionId, SessionSummary};
use chargewatch_store::SessionStore;
use chrono::NaiveDateTime;

use crate::{Clock, LocalClock, SessionConfig, SessionError};

/// Entry point for every session operation.
///
/// ## Lifecycle
///
/// ```text
/// start_session() ──→ [IN_PROGRESS] ──stop_session()──→ [FINISHED]
///                                                          │
///                                     stop_session() again ┘ (no-op)
/// ```
///
/// Records are never removed; the store grows for the life of the process.
pub struct SessionManager<C: Clock = LocalClock> {
    /// Shared with anything else that needs read access to the records.
    store: Arc<SessionStore>,

    /// Source of `started_at` / `stopped_at` and of "now" for summaries.
    clock: C,

    config: SessionConfig,
}

impl SessionManager<LocalClock> {
    /// Creates a manager over `store` that reads the system clock.
    pub fn new(store: Arc<SessionStore>, config: SessionConfig) -> Self {
        Self::with_clock(store, config, LocalClock)
    }
}

impl<C: Clock> SessionManager<C> {
    /// Creates a manager over `store` with a custom time source.
    pub fn with_clock(
        store: Arc<SessionStore>,
        config: SessionConfig,
        clock: C,
    ) -> Self {
        Self {
            store,
            clock,
            config,
        }
    }

    /// Starts a new charging session at `station_id`.
    ///
    /// The session gets a freshly generated id, `IN_PROGRESS` status, and
    /// `started_at` set to the current time.
    ///
    /// # Errors
    /// Returns [`SessionError::InvalidInput`] if `station_id` is empty. No
    /// record is created in that case.
    pub fn start_session(
        &self,
        station_id: &str,
    ) -> Result<Session, SessionError> {
        if station_id.is_empty() {
            tracing::warn!("rejected session start: empty station id");
            return Err(SessionError::InvalidInput(
                "incorrect or missing stationId".into(),
            ));
        }

        let mut session = Session::start(station_id, self.clock.now());

        // Never overwrite an existing record, however unlikely a v4 clash is.
        while let Err(rejected) = self.store.insert_new(session.clone()) {
            tracing::warn!(session_id = %rejected.id, "session id collision, regenerating");
            session.id = SessionId::generate();
        }

        tracing::info!(
            session_id = %session.id,
            station_id = %session.station_id,
            "charging session started"
        );
        Ok(session)
    }

    /// Stops the session with the given id and returns the updated record.
    ///
    /// Sets `stopped_at` to the current time and the status to `FINISHED`.
    /// Stopping a session that is already finished succeeds and returns the
    /// record unchanged: `stopped_at` is never rewritten, so retried stop
    /// requests are harmless.
    ///
    /// # Errors
    /// Returns [`SessionError::NotFound`] if no session has this id.
    pub fn stop_session(&self, id: SessionId) -> Result<Session, SessionError> {
        let now = self.clock.now();
        let mut transitioned = false;

        // The check-and-set runs under the store's per-key lock, so two racing
        // stops can't both write a stop time.
        let session = self
            .store
            .update(&id, |session| transitioned = session.finish(now))
            .ok_or_else(|| {
                tracing::warn!(session_id = %id, "stop requested for unknown session");
                SessionError::NotFound(id)
            })?;

        if transitioned {
            tracing::info!(
                session_id = %id,
                station_id = %session.station_id,
                "charging session finished"
            );
        } else {
            tracing::debug!(session_id = %id, "session already finished, stop ignored");
        }

        Ok(session)
    }

    /// Returns every session, in no particular order.
    pub fn list_sessions(&self) -> Vec<Session> {
        let sessions = self.store.all();
        tracing::debug!(count = sessions.len(), "listing charging sessions");
        sessions
    }

    /// Looks up one session by id.
    ///
    /// Returns `None` if no session has this id.
    pub fn get_session(&self, id: &SessionId) -> Option<Session> {
        self.store.get(id)
    }

    /// Counts start and stop events inside the trailing summary window.
    ///
    /// The window is `(now - summary_window, now)`, open at both ends: an
    /// event stamped exactly at either bound is not counted. A session that
    /// both started and stopped inside the window counts once in each
    /// column, and `total_count` is the sum of the two.
    ///
    /// This scans the whole store, so it is linear in the number of sessions
    /// ever created.
    pub fn summarize(&self) -> SessionSummary {
        let now = self.clock.now();
        let since = now
            .checked_sub_signed(self.config.summary_window())
            .unwrap_or(NaiveDateTime::MIN);
        let in_window = |t: NaiveDateTime| since < t && t < now;

        let (started, stopped) =
            self.store.fold((0, 0), |(started, stopped), session| {
                (
                    started + u64::from(in_window(session.started_at)),
                    stopped + u64::from(session.stopped_at.is_some_and(in_window)),
                )
            });

        let summary = SessionSummary::new(started, stopped);
        tracing::debug!(
            started = summary.started_count,
            stopped = summary.stopped_count,
            "session summary computed"
        );
        summary
    }

    /// The store this manager writes to.
    pub fn store(&self) -> &Arc<SessionStore> {
        &self.store
    }

    /// The clock this manager reads.
    pub fn clock(&self) -> &C {
        &self.clock
    }
}

// =========================================================================
// Tests
// =========================================================================
