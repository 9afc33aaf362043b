//! Error conversion helpers
//!
//! Collapses any failure into [`ApplicationError::FileCorrupted`].

use std::fmt::Display;

use tracing::debug;

use crate::application::{ApplicationError, ApplicationResult};

/// Extension trait for turning arbitrary results into `FileCorrupted`.
pub trait CorruptionExt<T> {
    /// Replace the error with `FileCorrupted { message }`.
    ///
    /// The original error is traced at debug level and then dropped.
    ///
    /// # Example
    /// ```ignore
    /// fs.read_to_string(&path)
    ///     .or_corrupted("Unable to read the XML file.")?;
    /// ```
    fn or_corrupted(self, message: &'static str) -> ApplicationResult<T>;
}

impl<T, E: Display> CorruptionExt<T> for Result<T, E> {
    fn or_corrupted(self, message: &'static str) -> ApplicationResult<T> {
        self.map_err(|cause| {
            debug!(%cause, "{}", message);
            ApplicationError::FileCorrupted { message }
        })
    }
}
