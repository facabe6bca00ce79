//! The concurrent session map.
//!
//! # Concurrency note
//!
//! `SessionStore` wraps a [`DashMap`], which splits its keys over a set of
//! internally locked shards. Each operation locks one shard (or walks them one
//! at a time for [`all`](SessionStore::all)), so:
//!
//! - writes to the same key are serialized, and a reader never sees half of a
//!   record;
//! - writes to different keys usually proceed in parallel;
//! - enumeration is weakly consistent: an insert racing with `all()` may or
//!   may not appear in its result.
//!
//! Records are handed out as clones. Callers never hold a shard lock after a
//! method returns, which rules out lock-order deadlocks between callers.

use chargewatch_protocol::{Session, SessionId};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

/// Thread-safe map from session id to session record.
///
/// Share one instance between callers with `Arc<SessionStore>`; every method
/// takes `&self`.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: DashMap<SessionId, Session>,
}

impl SessionStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            sessions: DashMap::new(),
        }
    }

    /// Inserts `session` under its own id, replacing any record already
    /// stored there.
    ///
    /// Returns the replaced record, if there was one.
    pub fn put(&self, session: Session) -> Option<Session> {
        let id = session.id;
        let previous = self.sessions.insert(id, session);
        tracing::trace!(session_id = %id, replaced = previous.is_some(), "session stored");
        previous
    }

    /// Inserts `session` only if its id is not taken yet.
    ///
    /// The check and the insert happen under one shard lock. On conflict the
    /// session is handed back untouched and the stored record is kept.
    pub fn insert_new(&self, session: Session) -> Result<(), Session> {
        match self.sessions.entry(session.id) {
            Entry::Occupied(_) => Err(session),
            Entry::Vacant(slot) => {
                slot.insert(session);
                Ok(())
            }
        }
    }

    /// Returns `true` if a record exists for `id`.
    pub fn exists(&self, id: &SessionId) -> bool {
        self.sessions.contains_key(id)
    }

    /// Returns a copy of the record for `id`, or `None` if it is unknown.
    pub fn get(&self, id: &SessionId) -> Option<Session> {
        self.sessions.get(id).map(|entry| entry.value().clone())
    }

    /// Applies `f` to the record for `id` while holding its shard lock, and
    /// returns a copy of the result.
    ///
    /// This is the read-modify-write primitive: no other `put`, `update`, or
    /// `get` on the same key can interleave with `f`. Returns `None` without
    /// calling `f` if `id` is unknown.
    ///
    /// The record stays keyed by `id`: if `f` rewrites the record's own id,
    /// the change is reverted.
    pub fn update<F>(&self, id: &SessionId, f: F) -> Option<Session>
    where
        F: FnOnce(&mut Session),
    {
        let mut entry = self.sessions.get_mut(id)?;
        let session = entry.value_mut();
        f(session);
        if session.id != *id {
            tracing::warn!(
                session_id = %id,
                attempted = %session.id,
                "update tried to change a session id, reverted"
            );
            session.id = *id;
        }
        Some(session.clone())
    }

    /// Folds over all records by reference, without cloning them.
    ///
    /// Shards are read-locked one at a time while `f` runs, so `f` must not
    /// write to this store. Like [`all`](Self::all), the view is weakly
    /// consistent with concurrent inserts.
    pub fn fold<B, F>(&self, init: B, mut f: F) -> B
    where
        F: FnMut(B, &Session) -> B,
    {
        let mut acc = init;
        for entry in self.sessions.iter() {
            acc = f(acc, entry.value());
        }
        acc
    }

    /// Returns copies of all records, in no particular order.
    pub fn all(&self) -> Vec<Session> {
        self.sessions
            .iter()
            .map(|entry| entry.value().clone())
            .collect()
    }

    /// Returns the number of stored records.
    pub fn count(&self) -> usize {
        self.sessions.len()
    }

    /// Returns `true` if the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

// =========================================================================
// Tests
// =========================================================================
