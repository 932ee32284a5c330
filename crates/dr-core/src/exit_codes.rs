//! Exit codes for the dynreport CLI.
//!
//! Exit code ranges:
//! - 0: Success
//! - 10-19: User/environment errors (recoverable by user action)
//! - 20-29: Internal errors (bugs, should be reported)

use dr_common::ErrorCategory;
use dr_report::ExportError;

/// Exit codes for dynreport operations.
///
/// These codes are a stable contract for scripts driving the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success.
    Clean = 0,

    /// Invalid arguments, unknown template/table, or a document that failed
    /// validation.
    ArgsError = 10,

    /// A file could not be read or written.
    IoError = 11,

    /// The configuration file is missing, unreadable, or invalid.
    ConfigError = 12,

    /// Internal error (bug - please report).
    InternalError = 20,
}

impl ExitCode {
    /// Convert to i32 for process exit.
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Check if this exit code is a user/environment error (codes 10-19).
    pub fn is_user_error(self) -> bool {
        (10..20).contains(&(self as i32))
    }

    /// Check if this exit code indicates any error.
    pub fn is_error(self) -> bool {
        (self as i32) >= 10
    }

    /// Get the error code name as a string constant (for JSON output).
    pub fn code_name(&self) -> &'static str {
        match self {
            ExitCode::Clean => "OK_CLEAN",
            ExitCode::ArgsError => "ERR_ARGS",
            ExitCode::IoError => "ERR_IO",
            ExitCode::ConfigError => "ERR_CONFIG",
            ExitCode::InternalError => "ERR_INTERNAL",
        }
    }
}

impl From<&dr_common::Error> for ExitCode {
    fn from(err: &dr_common::Error) -> Self {
        match err.category() {
            ErrorCategory::Document => ExitCode::ArgsError,
            ErrorCategory::Io => match err {
                // Malformed document JSON is the caller's input, not an I/O fault.
                dr_common::Error::Json(_) => ExitCode::ArgsError,
                _ => ExitCode::IoError,
            },
        }
    }
}

impl From<&ExportError> for ExitCode {
    fn from(err: &ExportError) -> Self {
        match err {
            ExportError::Document(inner) => ExitCode::from(inner),
            ExportError::InvalidConfig(_) => ExitCode::ConfigError,
            ExportError::AssetFetchError { .. } => ExitCode::IoError,
            ExportError::AssetSizeLimitExceeded { .. } => ExitCode::ArgsError,
            ExportError::JsonError(_) => ExitCode::InternalError,
        }
    }
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        std::process::ExitCode::from(code.as_i32() as u8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_exit_code_values() {
        assert_eq!(ExitCode::Clean.as_i32(), 0);
        assert_eq!(ExitCode::ArgsError.as_i32(), 10);
        assert_eq!(ExitCode::IoError.as_i32(), 11);
        assert_eq!(ExitCode::ConfigError.as_i32(), 12);
        assert_eq!(ExitCode::InternalError.as_i32(), 20);
    }

    #[test]
    fn test_exit_code_categories() {
        assert!(!ExitCode::Clean.is_error());
        assert!(ExitCode::ConfigError.is_user_error());
        assert!(ExitCode::InternalError.is_error());
        assert!(!ExitCode::InternalError.is_user_error());
    }

    #[test]
    fn test_error_mapping() {
        let read = dr_common::Error::Read {
            path: PathBuf::from("missing.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        assert_eq!(ExitCode::from(&read), ExitCode::IoError);

        let bad_json = dr_common::ReportDocument::from_json("{").unwrap_err();
        assert_eq!(ExitCode::from(&bad_json), ExitCode::ArgsError);

        let invalid = ExportError::InvalidConfig("empty".to_string());
        assert_eq!(ExitCode::from(&invalid), ExitCode::ConfigError);
    }
}
