//! Data model for Chargewatch.
//!
//! This crate defines the values every other layer passes around:
//!
//! - **Identity** ([`SessionId`]): system-generated UUIDs.
//! - **Records** ([`Session`], [`SessionStatus`]): one charging event and
//!   where it is in its lifecycle.
//! - **Aggregates** ([`SessionSummary`]): start/stop counts for the
//!   trailing window.
//! - **Payloads** ([`StartSessionRequest`], [`StopSessionRequest`],
//!   [`SessionList`]): the shapes an HTTP layer decodes and encodes.
//!
//! # Architecture
//!
//! ```text
//! Session layer (manager) → Store layer (map) → Protocol (this crate)
//! ```
//!
//! Nothing here knows about storage or concurrency.

mod error;
mod types;

pub use error::ProtocolError;
pub use types::{
    Session, SessionId, SessionList, SessionStatus, SessionSummary,
    StartSessionRequest, StopSessionRequest,
};
