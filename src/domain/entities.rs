//! Domain entities: core data structures

use std::collections::BTreeMap;
use std::fmt::Display;

/// A book record as stored in the catalog.
///
/// All fields are text. `year` is a decimal year written as text; nothing
/// checks that it parses, nor that `id` is unique within a catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    pub id: String,
    pub title: String,
    pub author: String,
    pub year: String,
}

impl Book {
    /// Create a book; `id` and `year` may be any displayable value (e.g. integers).
    pub fn new(
        id: impl Display,
        title: impl Into<String>,
        author: impl Into<String>,
        year: impl Display,
    ) -> Self {
        Self {
            id: id.to_string(),
            title: title.into(),
            author: author.into(),
            year: year.to_string(),
        }
    }
}

/// Group book titles by year.
///
/// Years are ordered by string comparison of their text. Titles within a year
/// keep the order of `books`.
pub fn group_titles_by_year(books: &[Book]) -> BTreeMap<String, Vec<String>> {
    let mut groups: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for book in books {
        groups
            .entry(book.year.clone())
            .or_default()
            .push(book.title.clone());
    }
    groups
}
