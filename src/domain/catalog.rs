//! Book catalog document
//!
//! Wraps an [`XmlDocument`] whose root is `<catalog>` and whose `<book>`
//! children are the records:
//!
//! ```xml
//! <catalog>
//!     <book id="1">
//!         <title>title_1</title>
//!         <author>name_1</author>
//!         <year>1991</year>
//!     </book>
//! </catalog>
//! ```

use std::collections::BTreeMap;

use crate::domain::document::{XmlDocument, XmlElement, XmlNode};
use crate::domain::entities::{group_titles_by_year, Book};
use crate::domain::error::{DomainError, DomainResult};

pub const CATALOG_TAG: &str = "catalog";
pub const BOOK_TAG: &str = "book";

/// Three-book catalog written by `bookcat demo --seed`.
pub const SAMPLE_CATALOG: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<catalog>
    <book id="1">
        <title>title_1</title>
        <author>name_1</author>
        <year>1991</year>
    </book>

    <book id="2">
        <title>title_2</title>
        <author>name_2</author>
        <year>2003</year>
    </book>

    <book id="3">
        <title>title_3</title>
        <author>name_3</author>
        <year>2010</year>
    </book>

</catalog>
"#;

const ID_ATTR: &str = "id";
const TITLE_TAG: &str = "title";
const AUTHOR_TAG: &str = "author";
const YEAR_TAG: &str = "year";

/// In-memory catalog. The document tree is the source of truth; [`Book`]s are
/// read out of it on demand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    document: XmlDocument,
}

impl Catalog {
    /// An empty `<catalog/>`.
    pub fn new() -> Self {
        Self {
            document: XmlDocument::new(XmlElement::new(CATALOG_TAG)),
        }
    }

    /// Parse catalog XML; the root element must be `<catalog>`.
    pub fn parse(input: &str) -> DomainResult<Self> {
        let document = XmlDocument::parse(input)?;
        let found = &document.root().name;
        if found != CATALOG_TAG {
            return Err(DomainError::WrongRoot {
                expected: CATALOG_TAG,
                found: found.clone(),
            });
        }
        Ok(Self { document })
    }

    /// Books in document order.
    pub fn books(&self) -> Vec<Book> {
        self.document
            .root()
            .child_elements()
            .filter(|element| element.name == BOOK_TAG)
            .map(book_from_element)
            .collect()
    }

    pub fn books_by_year(&self) -> BTreeMap<String, Vec<String>> {
        group_titles_by_year(&self.books())
    }

    /// Add `book` as the last child of the root.
    pub fn append(&mut self, book: &Book) {
        self.document
            .root_mut()
            .children
            .push(XmlNode::Element(book_to_element(book)));
    }

    /// Remove the first book whose `id` attribute equals `id`.
    pub fn remove_first(&mut self, id: &str) -> Option<Book> {
        self.document
            .root_mut()
            .remove_first_child(|element| {
                element.name == BOOK_TAG && element.attribute(ID_ATTR) == Some(id)
            })
            .map(|element| book_from_element(&element))
    }

    /// The `<catalog>` element serialized, without declaration.
    pub fn to_xml_string(&self) -> DomainResult<String> {
        self.document.to_xml_string()
    }

    /// The file content: declaration plus `<catalog>` element.
    pub fn to_document_string(&self) -> DomainResult<String> {
        self.document.to_document_string()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

// Missing attributes or child elements read as empty text.
fn book_from_element(element: &XmlElement) -> Book {
    let child_text = |name: &str| element.find(name).map(XmlElement::text).unwrap_or_default();
    Book {
        id: element.attribute(ID_ATTR).unwrap_or_default().to_string(),
        title: child_text(TITLE_TAG),
        author: child_text(AUTHOR_TAG),
        year: child_text(YEAR_TAG),
    }
}

fn book_to_element(book: &Book) -> XmlElement {
    XmlElement::new(BOOK_TAG)
        .with_attribute(ID_ATTR, book.id.as_str())
        .with_text_child(TITLE_TAG, book.title.as_str())
        .with_text_child(AUTHOR_TAG, book.author.as_str())
        .with_text_child(YEAR_TAG, book.year.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<catalog>
    <book id="1">
        <title>title_1</title>
        <author>name_1</author>
        <year>1991</year>
    </book>
    <book id="2">
        <title>title_2</title>
        <author>name_2</author>
        <year>2003</year>
    </book>
</catalog>
"#;

    #[test]
    fn given_catalog_xml_when_parsing_then_books_in_document_order() {
        let catalog = Catalog::parse(CATALOG).expect("parse");

        let books = catalog.books();

        assert_eq!(
            books,
            vec![
                Book::new(1, "title_1", "name_1", 1991),
                Book::new(2, "title_2", "name_2", 2003),
            ]
        );
    }

    #[test]
    fn given_other_root_when_parsing_then_wrong_root() {
        let result = Catalog::parse("<library><book id=\"1\"/></library>");

        match result {
            Err(DomainError::WrongRoot { expected, found }) => {
                assert_eq!(expected, "catalog");
                assert_eq!(found, "library");
            }
            other => panic!("expected WrongRoot, got {other:?}"),
        }
    }

    #[test]
    fn given_book_when_appending_then_written_compact_at_end() {
        let mut catalog = Catalog::parse(CATALOG).expect("parse");

        catalog.append(&Book::new(4, "title_4", "name_4", 2025));

        let xml = catalog.to_xml_string().expect("serialize");
        assert!(xml.ends_with(
            "</book>\n<book id=\"4\"><title>title_4</title><author>name_4</author><year>2025</year></book></catalog>"
        ));
        assert_eq!(catalog.books().last(), Some(&Book::new(4, "title_4", "name_4", 2025)));
    }

    #[test]
    fn given_duplicate_ids_when_removing_then_only_first_goes() {
        let mut catalog = Catalog::new();
        catalog.append(&Book::new(7, "first", "a", 2000));
        catalog.append(&Book::new(7, "second", "b", 2001));

        let removed = catalog.remove_first("7");

        assert_eq!(removed.map(|b| b.title), Some("first".to_string()));
        assert_eq!(catalog.books(), vec![Book::new(7, "second", "b", 2001)]);
    }

    #[test]
    fn given_unknown_id_when_removing_then_none() {
        let mut catalog = Catalog::parse(CATALOG).expect("parse");

        assert!(catalog.remove_first("999").is_none());
        assert_eq!(catalog.books().len(), 2);
    }

    #[test]
    fn given_book_without_children_when_reading_then_fields_empty() {
        let catalog = Catalog::parse("<catalog><book id=\"9\"/></catalog>").expect("parse");

        assert_eq!(catalog.books(), vec![Book::new(9, "", "", "")]);
    }

    #[test]
    fn given_non_book_children_when_reading_then_ignored() {
        let mut catalog =
            Catalog::parse("<catalog><note>hi</note><book id=\"1\"/></catalog>").expect("parse");

        assert_eq!(catalog.books().len(), 1);
        assert!(catalog.remove_first("1").is_some());
        assert!(catalog.to_xml_string().expect("serialize").contains("<note>hi</note>"));
    }
}
