//! Error types for the session layer.

use chargewatch_protocol::SessionId;

/// Errors returned by [`SessionManager`](crate::SessionManager) operations.
///
/// Neither kind is transient, so nothing here is worth retrying. Both leave
/// the store untouched.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The request failed validation, e.g. an empty station id.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// No session exists with the given id.
    #[error("charging session {0} does not exist")]
    NotFound(SessionId),
}
