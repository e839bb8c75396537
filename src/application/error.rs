//! Application-level errors
//!
//! Apart from rejected tree edits, everything here originates at the I/O,
//! configuration or serialization boundary.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::DomainError;

/// Application errors add path and operation context to boundary failures.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("input file not found: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("input is not valid UTF-8: {} (line {line})", .path.display())]
    InvalidEncoding { path: PathBuf, line: usize },

    #[error("cannot create output file: {}", .path.display())]
    OutputNotWritable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("config error: {message}")]
    Config { message: String },

    #[error("{context}")]
    Serialization {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("operation failed: {context}")]
    OperationFailed {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
