//! Error type shared by configuration validation and runtime lookups.

use thiserror::Error;

/// Result type alias using the sessiontron error type.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be loaded or failed validation.
    #[error("configuration error: {0}")]
    Config(String),

    /// A required credential is absent or empty.
    #[error("Missing {0}")]
    MissingCredential(&'static str),

    /// The key-value store rejected a command.
    #[error("Error executing Redis command: {0}")]
    Store(String),

    /// The HTTP transport failed before a response was received.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// A response or stored value was not the expected JSON.
    #[error("malformed payload: {0}")]
    Payload(#[from] serde_json::Error),

    /// A call against the OAuth provider failed.
    #[error("oauth {operation} failed: {detail}")]
    OAuth {
        operation: &'static str,
        detail: String,
    },

    /// The session token could not be signed or verified.
    #[error("session token error: {0}")]
    SessionToken(#[from] jsonwebtoken::errors::Error),
}

impl Error {
    /// Errors raised while validating configuration at startup.
    pub fn is_config_error(&self) -> bool {
        matches!(self, Self::Config(_) | Self::MissingCredential(_))
    }
}
