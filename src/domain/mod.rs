//! Domain layer: catalog document and book entities
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod catalog;
pub mod document;
pub mod entities;
pub mod error;

pub use catalog::{Catalog, BOOK_TAG, CATALOG_TAG, SAMPLE_CATALOG};
pub use document::{XmlDocument, XmlElement, XmlNode};
pub use entities::{group_titles_by_year, Book};
pub use error::{DomainError, DomainResult};
