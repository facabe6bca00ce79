//! In-memory session store for Chargewatch.
//!
//! The store is the only shared mutable state in the system. It maps each
//! [`SessionId`](chargewatch_protocol::SessionId) to its
//! [`Session`](chargewatch_protocol::Session) record and may be called from
//! any number of threads at once.
//!
//! # How it fits in the stack
//!
//! ```text
//! Session layer (above)  ← owns lifecycle rules, the only writer
//!     ↕
//! Store layer (this crate)  ← concurrent map, no business rules
//!     ↕
//! Protocol layer (below)  ← provides Session, SessionId
//! ```
//!
//! Nothing is persisted: the contents live as long as the process.

mod store;

pub use store::SessionStore;
