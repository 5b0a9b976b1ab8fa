//! Catalog module: the persisted URL → Link mapping
//!
//! This module contains:
//! - `Link` and `LinkKind`, the record shape persisted per URL
//! - `Catalog`, the in-memory mapping
//! - `CatalogStore` and its JSON file implementation

mod store;
mod types;

pub use store::{write_atomic, CatalogStore, JsonCatalogStore};
pub use types::{Catalog, Link, LinkKind};
