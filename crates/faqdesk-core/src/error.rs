//! Error types for FAQ Desk.

use thiserror::Error;

/// Unified error for all FAQ Desk crates.
#[derive(Debug, Error)]
pub enum FaqError {
    /// FAQ document unreadable, unwritable or corrupt.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Fallback text-generation call failed or returned a non-success status.
    #[error("Oracle error: {0}")]
    Oracle(String),

    /// Wrong or missing admin credentials.
    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Gateway error: {0}")]
    Gateway(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, FaqError>;
