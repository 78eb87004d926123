//! Error types and handling infrastructure for telelog.
//!
//! This module provides a centralized error handling system using `thiserror` for
//! the library error type. The binary wraps it in `anyhow` for top-level context.
//!
//! ## Design Principles
//!
//! - **User-friendly messages**: Errors should name the file, row or column involved
//! - **Recoverable by default**: Nothing in the query layer panics on bad data
//! - **Consistency**: Standardized Result type across all modules

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for telelog operations.
///
/// Covers source access, row shape problems surfaced by strict operations,
/// numeric conversion inside filter predicates, and configuration loading.
#[derive(Error, Debug)]
pub enum TelelogError {
    /// The telemetry source could not be opened for reading
    #[error("Unable to open file {path}")]
    IoUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File system related errors after the source was opened (read, decompress)
    #[error("File operation failed: {message}")]
    FileError {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Path exists but is not a regular file
    #[error("Path is not a regular file: {path}")]
    NotAFile { path: PathBuf },

    /// A row in a table is too short for the requested column
    #[error("Row {row} has {len} column(s), column {column} requested")]
    MalformedRow { row: usize, column: usize, len: usize },

    /// A single row has no token at the requested column
    #[error("Column {column} is missing from a row of {len} column(s)")]
    MissingColumn { column: usize, len: usize },

    /// A token could not be interpreted as a number
    #[error("Column {column} value '{token}' is not numeric")]
    Conversion { column: usize, token: String },

    /// Configuration related errors
    #[error("Configuration error: {message}")]
    ConfigError { message: String },
}

/// Standard Result type for telelog operations.
pub type Result<T> = std::result::Result<T, TelelogError>;

impl TelelogError {
    /// Create a FileError from an io::Error with additional context
    pub fn file_error(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::FileError {
            message: message.into(),
            source,
        }
    }

    /// Create an IoUnavailable error for the given path
    pub fn unavailable(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::IoUnavailable {
            path: path.into(),
            source,
        }
    }

    /// Create a ConfigError with a descriptive message
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// True when the error means the source could not be read at all.
    pub fn is_source_error(&self) -> bool {
        matches!(
            self,
            Self::IoUnavailable { .. } | Self::FileError { .. } | Self::NotAFile { .. }
        )
    }
}

// Automatic conversion from io::Error to TelelogError
impl From<std::io::Error> for TelelogError {
    fn from(err: std::io::Error) -> Self {
        let message = match err.kind() {
            std::io::ErrorKind::NotFound => "File not found",
            std::io::ErrorKind::PermissionDenied => "Permission denied",
            _ => "IO operation failed",
        };
        Self::FileError {
            message: message.to_string(),
            source: err,
        }
    }
}
