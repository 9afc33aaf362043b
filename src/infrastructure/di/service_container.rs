//! Service container for dependency injection
//!
//! Wires up the catalog store with its filesystem and error log sink.

use std::path::Path;
use std::sync::Arc;

use tracing::debug;

use crate::application::services::CatalogStore;
use crate::application::ApplicationResult;
use crate::config::{LogMode, LogSettings, Settings};
use crate::infrastructure::traits::{ConsoleSink, FileSink, FileSystem, LogSink, RealFileSystem};

/// Container holding shared dependencies.
///
/// The log sink is created once here and shared by every store opened
/// through the container.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Filesystem abstraction
    pub fs: Arc<dyn FileSystem>,

    /// Error log destination
    pub log_sink: Arc<dyn LogSink>,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings) -> Self {
        let log_sink = sink_for(&settings.log);
        Self::with_deps(settings, Arc::new(RealFileSystem), log_sink)
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(
        settings: Settings,
        fs: Arc<dyn FileSystem>,
        log_sink: Arc<dyn LogSink>,
    ) -> Self {
        let settings = Arc::new(settings);

        Self {
            settings,
            fs,
            log_sink,
        }
    }

    /// Open a catalog store; `path` defaults to `settings.catalog_path`.
    pub fn open_catalog(&self, path: Option<&Path>) -> ApplicationResult<CatalogStore> {
        let path = path.unwrap_or(self.settings.catalog_path.as_path());
        debug!("open_catalog: {}", path.display());
        CatalogStore::open(path, Arc::clone(&self.fs), Arc::clone(&self.log_sink))
    }
}

/// Build the sink selected by the log settings.
pub fn sink_for(log: &LogSettings) -> Arc<dyn LogSink> {
    match log.mode {
        LogMode::Console => Arc::new(ConsoleSink),
        LogMode::File => Arc::new(FileSink::new(&log.file)),
    }
}
