//! bookcat: manage a catalog of book records stored in an XML file.
//!
//! [`CatalogStore`](application::services::CatalogStore) loads a `<catalog>`
//! document, exposes read/append/delete on its `<book>` entries and rewrites
//! the file after every change. Failures are recorded by an
//! [`ErrorLogger`](application::ErrorLogger) before they reach the caller.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
