//! Error types shared by the core and the browser glue.

use thiserror::Error;

/// Errors that can occur while running a page feature.
#[derive(Debug, Error)]
pub enum FxError {
    /// A drawing primitive failed on the host surface.
    #[error("surface error: {0}")]
    Surface(String),

    /// Configuration JSON could not be decoded.
    #[error("config parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),

    /// Configuration decoded but holds an unusable value.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// A required page element is absent.
    #[error("element not found: {0}")]
    MissingElement(String),

    /// The host environment rejected a call.
    #[error("host error: {0}")]
    Host(String),
}

pub type Result<T> = std::result::Result<T, FxError>;
