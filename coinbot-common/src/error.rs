// ================================================================
// File: coinbot-common/src/error.rs
// ================================================================

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Platform error: {0}")]
    Platform(String),

    /// The platform answered with a non-zero envelope code.
    #[error("API error {code}: {message}")]
    Api { code: i64, message: String },

    /// The session cookie or csrf token was rejected. Never retried.
    #[error("Credential invalid: {0}")]
    CredentialInvalid(String),
}

impl Error {
    pub fn is_credential_error(&self) -> bool {
        matches!(self, Error::CredentialInvalid(_))
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Parse(s)
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::Parse(s.to_string())
    }
}

impl From<anyhow::Error> for Error {
    fn from(e: anyhow::Error) -> Self {
        Error::Parse(e.to_string())
    }
}

impl From<std::num::ParseIntError> for Error {
    fn from(err: std::num::ParseIntError) -> Self {
        Error::Parse(err.to_string())
    }
}
