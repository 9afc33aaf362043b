//! Catalog store service
//!
//! Binds a [`Catalog`] to a file. Every mutation rewrites the whole file, so
//! memory and disk agree after each call returns.

use std::collections::BTreeMap;
use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::{
    ApplicationError, ApplicationResult, CorruptionExt, OperationLoggers,
};
use crate::domain::{Book, Catalog};
use crate::infrastructure::traits::{FileSystem, LogSink};

const OPEN_FAILED: &str = "The XML file is corrupted or in an invalid format.";
const READ_FAILED: &str = "Unable to read the XML file.";
const APPEND_FAILED: &str = "Unable to add a new book to the XML file.";
const DELETE_FAILED: &str = "Unable to delete the book from the XML file.";

/// Read, append and delete books in an XML catalog file.
///
/// Nothing coordinates two stores on the same path; the last writer wins.
pub struct CatalogStore {
    path: PathBuf,
    catalog: Catalog,
    fs: Arc<dyn FileSystem>,
    loggers: OperationLoggers,
}

impl std::fmt::Debug for CatalogStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogStore")
            .field("path", &self.path)
            .field("books", &self.catalog.books().len())
            .finish()
    }
}

impl CatalogStore {
    /// Load the catalog at `path`.
    ///
    /// # Errors
    /// * `FileNotFound` if `path` does not exist (logged to `sink`)
    /// * `FileCorrupted` if it cannot be read or is not a `<catalog>` document
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(
        path: impl AsRef<Path>,
        fs: Arc<dyn FileSystem>,
        sink: Arc<dyn LogSink>,
    ) -> ApplicationResult<Self> {
        let path = path.as_ref().to_path_buf();
        let loggers = OperationLoggers::new(sink);
        let catalog = loggers.open.guard(|| load(fs.as_ref(), &path))?;
        debug!("open: loaded {} books", catalog.books().len());

        Ok(Self {
            path,
            catalog,
            fs,
            loggers,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Serialized `<catalog>` element of the in-memory document.
    pub fn read(&self) -> ApplicationResult<String> {
        self.loggers
            .read
            .guard(|| self.catalog.to_xml_string().or_corrupted(READ_FAILED))
    }

    /// Books in document order.
    pub fn books(&self) -> Vec<Book> {
        self.catalog.books()
    }

    /// Titles grouped by year text, years in ascending string order.
    pub fn books_by_year(&self) -> BTreeMap<String, Vec<String>> {
        self.catalog.books_by_year()
    }

    /// Append a book at the end of the catalog and rewrite the file.
    ///
    /// No validation: duplicate ids and empty fields are accepted.
    #[instrument(skip_all, fields(path = %self.path.display()))]
    pub fn append_book(
        &mut self,
        id: impl Display,
        title: &str,
        author: &str,
        year: impl Display,
    ) -> ApplicationResult<()> {
        let book = Book::new(id, title, author, year);

        self.loggers.append.guard(|| {
            self.catalog.append(&book);
            persist(self.fs.as_ref(), &self.path, &self.catalog).or_corrupted(APPEND_FAILED)
        })?;
        debug!("append_book: added id={}", book.id);
        Ok(())
    }

    /// Remove the first book whose id equals `id.to_string()` and rewrite the file.
    ///
    /// Returns `false` without touching the file if no book matches.
    #[instrument(skip_all, fields(path = %self.path.display()))]
    pub fn delete_book(&mut self, id: impl Display) -> ApplicationResult<bool> {
        let id = id.to_string();

        self.loggers.delete.guard(|| {
            if self.catalog.remove_first(&id).is_none() {
                debug!("delete_book: no book with id={}", id);
                return Ok(false);
            }
            persist(self.fs.as_ref(), &self.path, &self.catalog).or_corrupted(DELETE_FAILED)?;
            Ok(true)
        })
    }
}

fn load(fs: &dyn FileSystem, path: &Path) -> ApplicationResult<Catalog> {
    if !fs.exists(path) {
        return Err(ApplicationError::FileNotFound(path.to_path_buf()));
    }
    let content = fs.read_to_string(path).or_corrupted(OPEN_FAILED)?;
    Catalog::parse(&content).or_corrupted(OPEN_FAILED)
}

/// Serialize the full document and overwrite `path` with it.
fn persist(fs: &dyn FileSystem, path: &Path, catalog: &Catalog) -> Result<(), String> {
    let content = catalog.to_document_string().map_err(|e| e.to_string())?;
    fs.write(path, &content)
        .map_err(|e| format!("write {}: {}", path.display(), e))
}
