//! Catalog sources for the shop: a JSON/YAML file on disk or the catalog
//! HTTP API. Either way the result is a list of [`CatalogItem`]s, or a
//! [`CatalogStatus`] for the shop controller.
//!
//! [`CatalogItem`]: shelf_core::CatalogItem
//! [`CatalogStatus`]: shelf_filter::CatalogStatus

pub mod client;
pub mod error;
pub mod file;
pub mod parse;
pub mod retry;
pub mod source;

pub use client::HttpCatalogSource;
pub use error::SourceError;
pub use file::load_catalog_file;
pub use parse::parse_catalog;
pub use retry::retry_with_backoff;
pub use source::CatalogSource;
