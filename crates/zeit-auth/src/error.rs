//! Error types for session handling.

/// Result type alias for this crate.
pub type Result<T> = std::result::Result<T, AuthError>;

/// Errors that can occur while storing or refreshing the session token.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Network/HTTP error.
    #[error("network error: {0}")]
    Network(String),

    /// The refresh endpoint rejected the exchange.
    #[error("token refresh rejected: {0}")]
    Refresh(String),

    /// Reading or writing the token storage failed.
    #[error("token storage error: {0}")]
    Storage(String),
}

impl From<reqwest::Error> for AuthError {
    fn from(e: reqwest::Error) -> Self {
        AuthError::Network(e.to_string())
    }
}
