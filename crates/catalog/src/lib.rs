//! Catalog domain module.
//!
//! Holds the immutable product list loaded once at startup, plus the
//! `CatalogSource` seam the list is fetched through.

pub mod catalog;
pub mod product;
pub mod source;

pub use catalog::{Catalog, CatalogStatus};
pub use product::Product;
pub use source::{CatalogError, CatalogSource, StaticCatalogSource};

#[cfg(not(target_arch = "wasm32"))]
pub use source::FileCatalogSource;
