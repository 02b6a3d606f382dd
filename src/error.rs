//! Error types shared by every module of the crate.
//!
//! All failures are fail-fast: a failed load, save, or construction yields
//! no usable instance or matching. Presentation and exit codes belong to the
//! caller.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Hospital/Resident operations
#[derive(Error, Debug)]
pub enum HrError {
    /// Malformed persisted instance (header, token counts, garbled ids)
    #[error("format error at line {line}: {message}")]
    Format { line: usize, message: String },

    /// `save` refuses to overwrite an existing file
    #[error("refusing to overwrite existing file: {}", path.display())]
    AlreadyExists { path: PathBuf },

    /// Non-positive capacity, zero hospitals/residents, mismatched lengths
    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    /// Preference lists that break the instance invariants
    #[error("invalid instance: {message}")]
    InvalidInstance { message: String },

    /// I/O errors while reading or writing instance files
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Type alias for Results using HrError
pub type Result<T> = std::result::Result<T, HrError>;

impl HrError {
    /// Create a format error for a (1-based) line number
    pub fn format(line: usize, message: impl Into<String>) -> Self {
        Self::Format {
            line,
            message: message.into(),
        }
    }

    /// Create an invalid argument error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create an invalid instance error
    pub fn invalid_instance(message: impl Into<String>) -> Self {
        Self::InvalidInstance {
            message: message.into(),
        }
    }

    /// Create an already-exists error
    pub fn already_exists(path: impl Into<PathBuf>) -> Self {
        Self::AlreadyExists { path: path.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_message_includes_line() {
        let err = HrError::format(3, "expected 4 tokens");
        assert_eq!(err.to_string(), "format error at line 3: expected 4 tokens");
    }

    #[test]
    fn test_already_exists_message() {
        let err = HrError::already_exists("/tmp/x.txt");
        assert!(err.to_string().contains("/tmp/x.txt"));
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: HrError = io.into();
        assert!(matches!(err, HrError::Io(_)));
    }
}
