//! Error types for scene loading and RailML export.

use std::path::PathBuf;
use thiserror::Error;

/// Error codes for export processing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// File not found (-1)
    FileNotFound = -1,
    /// Empty file (-2)
    EmptyFile = -2,
    /// General parse error (-3)
    ParseError = -3,
    /// Track with an odd number of coordinates (E100)
    OddPointCount = 100,
    /// Document could not be serialized (E300)
    Serialize = 300,
}

/// Main error type for the exporter.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Empty file: {path}")]
    EmptyFile { path: PathBuf },

    #[error("Invalid scene JSON at line {line}, column {column}: {message}")]
    Json {
        line: usize,
        column: usize,
        message: String,
    },

    #[error("Track {track} has an odd number of coordinates ({count})")]
    OddPointCount { track: String, count: usize },

    #[error("Failed to serialize document: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ExportError {
    /// Get the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            ExportError::FileNotFound { .. } => ErrorCode::FileNotFound,
            ExportError::EmptyFile { .. } => ErrorCode::EmptyFile,
            ExportError::Json { .. } => ErrorCode::ParseError,
            ExportError::OddPointCount { .. } => ErrorCode::OddPointCount,
            ExportError::Serialize(_) => ErrorCode::Serialize,
            ExportError::Io(_) => ErrorCode::FileNotFound,
        }
    }

    /// Get the numeric error code value.
    pub fn code_value(&self) -> i32 {
        self.code() as i32
    }
}

impl From<serde_json::Error> for ExportError {
    fn from(err: serde_json::Error) -> Self {
        ExportError::Json {
            line: err.line(),
            column: err.column(),
            message: err.to_string(),
        }
    }
}

/// Result type alias for exporter operations.
pub type Result<T> = std::result::Result<T, ExportError>;
