//! Unified error type for Chargewatch.

use chargewatch_protocol::ProtocolError;
use chargewatch_session::SessionError;

/// Top-level error that wraps all crate-specific errors.
///
/// Callers using the `chargewatch` facade deal with this one type. Each
/// variant has a `#[from]` impl, so `?` converts sub-crate errors
/// automatically.
#[derive(Debug, thiserror::Error)]
pub enum ChargewatchError {
    /// Malformed external input, e.g. an unparseable session id.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// A rejected lifecycle operation (invalid input, unknown session).
    #[error(transparent)]
    Session(#[from] SessionError),
}

impl ChargewatchError {
    /// Returns `true` if the error means "no such session", which an HTTP
    /// layer typically maps to 404 rather than 400.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Session(SessionError::NotFound(_)))
    }
}
