//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

// Re-export client error type
pub use cfdash_client::ClientError;

/// Core layer error type
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// API client error (converting from library)
    #[error("{0}")]
    Client(#[from] ClientError),

    /// Form or argument rejected before any network call
    #[error("Validation error: {0}")]
    Validation(String),

    /// The caller's cancellation token fired
    #[error("Operation cancelled")]
    Cancelled,

    /// No email / API key configured yet
    #[error("Cloudflare credentials are not configured")]
    MissingCredentials,

    /// Storage layer error
    #[error("Storage error: {0}")]
    Storage(String),

    /// serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl CoreError {
    /// Whether it is expected behavior (user input, rejected credentials, etc.), used for log classification.
    ///
    /// Level `warn` should be used when returning `true` and level `error` when returning `false`.
    /// **Please update this method simultaneously when new variants are added.**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::Validation(_) | Self::Cancelled | Self::MissingCredentials => true,
            Self::Client(e) => e.is_expected(),
            Self::Storage(_) | Self::Serialization(_) => false,
        }
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;
