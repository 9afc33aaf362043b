//! Application layer: services and use cases
//!
//! This layer orchestrates domain logic and depends on I/O boundary traits.

pub mod error;
pub mod error_ext;
pub mod guard;
pub mod services;

pub use error::{ApplicationError, ApplicationResult, ErrorKind};
pub use error_ext::CorruptionExt;
pub use guard::{format_log_line, ErrorLogger, OperationLoggers};
