//! # Chargewatch
//!
//! In-memory tracking of electric-vehicle charging sessions.
//!
//! Chargewatch records when sessions start and stop at charging stations and
//! reports how many start/stop events happened in the last minute. State lives
//! in process memory only.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use chargewatch::prelude::*;
//!
//! let store = Arc::new(SessionStore::new());
//! let manager = SessionManager::new(store, SessionConfig::default());
//!
//! let session = manager.start_session("ABC-12345")?;
//! let stopped = manager.stop_session(session.id)?;
//! assert_eq!(stopped.status, SessionStatus::Finished);
//!
//! let summary = manager.summarize();
//! assert_eq!(summary.total_count, summary.started_count + summary.stopped_count);
//! # Ok::<(), ChargewatchError>(())
//! ```

mod error;
pub mod telemetry;

pub use error::ChargewatchError;
pub use telemetry::{init_tracing, init_tracing_with};

pub use chargewatch_protocol as protocol;
pub use chargewatch_session as session;
pub use chargewatch_store as store;

/// Everything needed to drive the session manager from an outer layer.
pub mod prelude {
    pub use crate::ChargewatchError;
    pub use chargewatch_protocol::{
        Session, SessionId, SessionList, SessionStatus, SessionSummary,
        StartSessionRequest, StopSessionRequest,
    };
    pub use chargewatch_session::{
        Clock, LocalClock, SessionConfig, SessionError, SessionManager,
    };
    pub use chargewatch_store::SessionStore;
}
