//! Error types for the protocol layer.

/// Errors raised while turning external input into protocol types.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// The string is not a valid session identifier (a hyphenated UUID).
    #[error("invalid session id {input:?}: {source}")]
    InvalidSessionId {
        input: String,
        #[source]
        source: uuid::Error,
    },
}
