//! Error types for Latchkey.

use thiserror::Error;

/// Primary error type for all Latchkey operations.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Auth API error (status {status}): {message}")]
    Api {
        status: u16,
        /// Machine-readable code from the server, when one was present
        /// (e.g. "invalid_credentials", "user_already_exists").
        code: Option<String>,
        message: String,
    },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Email confirmation required before signing in")]
    ConfirmationRequired,

    #[error("Session expired and no refresh token is available")]
    SessionExpired,
}

impl AuthError {
    /// Create an API error without a machine-readable code.
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            code: None,
            message: message.into(),
        }
    }

    /// Whether the server rejected the supplied credentials.
    pub fn is_invalid_credentials(&self) -> bool {
        match self {
            Self::Api { code: Some(c), .. } => {
                matches!(c.as_str(), "invalid_credentials" | "invalid_grant")
            }
            Self::Api { status, .. } => matches!(status, 400 | 401),
            _ => false,
        }
    }

    /// Whether this error is potentially retryable.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network(_) => true,
            Self::Api { status, .. } => matches!(status, 429 | 500..=599),
            _ => false,
        }
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, AuthError>;
