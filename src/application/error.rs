//! Application-level errors (wraps domain errors)

use std::path::PathBuf;
use thiserror::Error;

/// Kind of an [`ApplicationError`], used to select which failures an
/// [`ErrorLogger`](crate::application::ErrorLogger) records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    FileNotFound,
    FileCorrupted,
    Config,
}

/// Application errors seen by callers of the catalog store.
///
/// Every parse, serialization or write failure is reported as
/// `FileCorrupted` with a fixed message; the underlying cause is only
/// traced at debug level.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("File '{}' does not exist", .0.display())]
    FileNotFound(PathBuf),

    #[error("{message}")]
    FileCorrupted { message: &'static str },

    #[error("config error: {message}")]
    Config { message: String },
}

impl ApplicationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApplicationError::FileNotFound(_) => ErrorKind::FileNotFound,
            ApplicationError::FileCorrupted { .. } => ErrorKind::FileCorrupted,
            ApplicationError::Config { .. } => ErrorKind::Config,
        }
    }
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
