//! Error taxonomy shared by the catalog client and token decoding.

use thiserror::Error;

/// Errors surfaced by the core.
#[derive(Error, Debug)]
pub enum Error {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("catalog fetch failed: HTTP {status}: {message}")]
    Fetch { status: u16, message: String },

    #[error("invalid share token: {0}")]
    Token(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("network timeout")]
    Timeout,
}

/// Result alias for the core error type.
pub type Result<T> = std::result::Result<T, Error>;
