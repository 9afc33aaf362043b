//! Error logging around store operations
//!
//! An [`ErrorLogger`] runs an operation and, if it fails with its target
//! [`ErrorKind`], writes one line to its [`LogSink`]:
//!
//! ```text
//! 2025-01-31 14:02:11,408 - ERROR - An exception occurred: File 'lab6.xml' does not exist
//! ```
//!
//! The error is then returned unchanged. Failures of other kinds pass through
//! without a log line.

use std::sync::Arc;

use chrono::{DateTime, Local};
use tracing::{debug, warn};

use crate::application::{ApplicationError, ApplicationResult, ErrorKind};
use crate::infrastructure::traits::LogSink;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S,%3f";
const LEVEL: &str = "ERROR";

/// Format a log line as `<timestamp> - <level> - <message>`.
pub fn format_log_line(timestamp: DateTime<Local>, level: &str, message: &str) -> String {
    format!(
        "{} - {} - {}",
        timestamp.format(TIMESTAMP_FORMAT),
        level,
        message
    )
}

/// Logs failures of one operation.
///
/// Holds exactly one sink, so every intercepted failure produces exactly one
/// line no matter how often the logger is used.
pub struct ErrorLogger {
    operation: &'static str,
    target: ErrorKind,
    sink: Arc<dyn LogSink>,
}

impl ErrorLogger {
    pub fn new(operation: &'static str, target: ErrorKind, sink: Arc<dyn LogSink>) -> Self {
        Self {
            operation,
            target,
            sink,
        }
    }

    pub fn operation(&self) -> &'static str {
        self.operation
    }

    pub fn target(&self) -> ErrorKind {
        self.target
    }

    /// Run `op`, logging its error if it is of the target kind.
    pub fn guard<T, F>(&self, op: F) -> ApplicationResult<T>
    where
        F: FnOnce() -> ApplicationResult<T>,
    {
        op().inspect_err(|e| {
            if e.kind() == self.target {
                self.record(e);
            }
        })
    }

    fn record(&self, e: &ApplicationError) {
        debug!(operation = self.operation, "intercepted: {}", e);
        let line = format_log_line(
            Local::now(),
            LEVEL,
            &format!("An exception occurred: {}", e),
        );
        // A broken log destination must not hide the error being reported.
        if let Err(write_err) = self.sink.write_line(&line) {
            warn!(
                operation = self.operation,
                "cannot write error log line: {}", write_err
            );
        }
    }
}

/// One [`ErrorLogger`] per catalog store operation, all sharing one sink.
///
/// `open` records missing files; `read`, `append` and `delete` record
/// corruption. A corrupt file at open time is returned but not logged.
pub struct OperationLoggers {
    pub open: ErrorLogger,
    pub read: ErrorLogger,
    pub append: ErrorLogger,
    pub delete: ErrorLogger,
}

impl OperationLoggers {
    pub fn new(sink: Arc<dyn LogSink>) -> Self {
        Self {
            open: ErrorLogger::new("open", ErrorKind::FileNotFound, Arc::clone(&sink)),
            read: ErrorLogger::new("read", ErrorKind::FileCorrupted, Arc::clone(&sink)),
            append: ErrorLogger::new("append_book", ErrorKind::FileCorrupted, Arc::clone(&sink)),
            delete: ErrorLogger::new("delete_book", ErrorKind::FileCorrupted, sink),
        }
    }
}
