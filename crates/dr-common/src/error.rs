//! Error types for dynreport.
//!
//! Errors carry a stable numeric code and a coarse category so callers
//! (the CLI in particular) can map them to exit codes without matching on
//! every variant.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for dynreport operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error categories for grouping related errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Malformed or inconsistent report documents.
    Document,
    /// File I/O and serialization errors.
    Io,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCategory::Document => write!(f, "document"),
            ErrorCategory::Io => write!(f, "io"),
        }
    }
}

/// Unified error type for the document model.
#[derive(Error, Debug)]
pub enum Error {
    // Document errors (10-19)
    #[error("invalid document: {0}")]
    InvalidDocument(String),

    #[error("document validation failed with {count} error(s)")]
    Validation { count: usize },

    // I/O errors (60-69)
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Returns the stable error code.
    ///
    /// - 10-19: Document errors
    /// - 60-69: I/O errors
    pub fn code(&self) -> u32 {
        match self {
            Error::InvalidDocument(_) => 10,
            Error::Validation { .. } => 11,
            Error::Read { .. } => 60,
            Error::Write { .. } => 61,
            Error::Json(_) => 62,
        }
    }

    /// Returns the error category for grouping and filtering.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::InvalidDocument(_) | Error::Validation { .. } => ErrorCategory::Document,
            Error::Read { .. } | Error::Write { .. } | Error::Json(_) => ErrorCategory::Io,
        }
    }
}
