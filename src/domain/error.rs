//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors describe a catalog document that cannot be understood or written.
/// They carry no file paths; the application layer adds that context.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("malformed XML: {message}")]
    Malformed { message: String },

    #[error("unexpected root element <{found}>, expected <{expected}>")]
    WrongRoot {
        expected: &'static str,
        found: String,
    },

    #[error("cannot serialize XML: {message}")]
    Serialize { message: String },
}

impl DomainError {
    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed {
            message: message.into(),
        }
    }
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
