//! Error types used throughout the application

use thiserror::Error;

/// Main error type for Fakturo
#[derive(Error, Debug)]
pub enum FakturoError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for Fakturo operations
pub type Result<T> = std::result::Result<T, FakturoError>;

/// Failures reported by the remote API gateway.
///
/// Classification mirrors what the submitter needs to turn a failed
/// request into a per-item outcome: HTTP rejections keep their status
/// and the server-provided message, transport failures keep the
/// underlying description, and a 2xx body that does not match the
/// expected envelope is flagged separately so it is never mistaken for
/// a server-side rejection.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("{message}")]
    Http { status: u16, message: String },

    #[error("Network error: {message}")]
    Network { message: String },

    #[error("Malformed response from API")]
    MalformedResponse,

    /// The draft could not be converted to a wire request at all.
    /// Fatal to the single item only, never to the whole run.
    #[error("{0}")]
    InvalidDraft(String),
}

impl GatewayError {
    /// Human-readable reason suitable for a per-item outcome entry.
    pub fn reason(&self) -> String {
        self.to_string()
    }
}
