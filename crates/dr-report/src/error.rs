//! Error types for HTML export.

use thiserror::Error;

/// Result type for export operations.
pub type Result<T> = std::result::Result<T, ExportError>;

/// Errors that can occur during export.
#[derive(Error, Debug)]
pub enum ExportError {
    /// Document model error.
    #[error(transparent)]
    Document(#[from] dr_common::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Asset fetch error (embed mode).
    #[error("failed to fetch asset '{url}': {reason}")]
    AssetFetchError { url: String, reason: String },

    /// Asset size limit exceeded.
    #[error("embedded assets exceed size limit ({size_mb:.1} MB > {limit_mb} MB)")]
    AssetSizeLimitExceeded { size_mb: f64, limit_mb: u64 },

    /// Invalid configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
