//! Charging session lifecycle for Chargewatch.
//!
//! This crate owns the rules:
//!
//! 1. **Lifecycle**: starting and stopping sessions ([`SessionManager`])
//! 2. **Activity summary**: counting start/stop events in the trailing
//!    window ([`SessionManager::summarize`])
//! 3. **Time**: where "now" comes from ([`Clock`] trait)
//!
//! # How it fits in the stack
//!
//! ```text
//! HTTP layer (outside)  ← parses requests, maps SessionError to responses
//!     ↕
//! Session layer (this crate)  ← validates input, enforces transitions
//!     ↕
//! Store layer (below)  ← concurrent map of records
//! ```

mod clock;
mod config;
mod error;
mod manager;

pub use clock::{Clock, LocalClock};
pub use config::SessionConfig;
pub use error::SessionError;
pub use manager::SessionManager;
