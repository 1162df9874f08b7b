//! Where the catalog comes from.
//!
//! The catalog is fetched exactly once at startup; there is no write path back
//! to the source.

use async_trait::async_trait;
use thiserror::Error;

use crate::product::Product;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog from {location}: {message}")]
    Io { location: String, message: String },

    #[error("failed to parse catalog: {0}")]
    Parse(String),

    #[error("catalog fetch failed: {0}")]
    Fetch(String),
}

impl From<serde_json::Error> for CatalogError {
    fn from(value: serde_json::Error) -> Self {
        CatalogError::Parse(value.to_string())
    }
}

/// Parse a catalog document: a JSON array of product records.
pub fn parse_products(json: &str) -> Result<Vec<Product>, CatalogError> {
    Ok(serde_json::from_str(json)?)
}

/// A read-only product feed.
///
/// Native sources run on tokio; the browser source wraps a JS promise and is
/// therefore not `Send`.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait CatalogSource {
    /// Human-readable location, used in logs.
    fn describe(&self) -> String;

    async fn fetch(&self) -> Result<Vec<Product>, CatalogError>;
}

/// Catalog served from an in-memory JSON document (embedded assets, tests).
#[derive(Debug, Clone)]
pub struct StaticCatalogSource {
    json: String,
}

impl StaticCatalogSource {
    pub fn new(json: impl Into<String>) -> Self {
        Self { json: json.into() }
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl CatalogSource for StaticCatalogSource {
    fn describe(&self) -> String {
        "static catalog".to_string()
    }

    async fn fetch(&self) -> Result<Vec<Product>, CatalogError> {
        parse_products(&self.json)
    }
}

/// Catalog read from a JSON file (e.g. `products.json`).
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct FileCatalogSource {
    path: std::path::PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl FileCatalogSource {
    pub fn new(path: impl Into<std::path::PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

#[cfg(not(target_arch = "wasm32"))]
#[async_trait]
impl CatalogSource for FileCatalogSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch(&self) -> Result<Vec<Product>, CatalogError> {
        let json = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| CatalogError::Io {
                location: self.describe(),
                message: e.to_string(),
            })?;
        parse_products(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn static_source_parses_products() {
        let source = StaticCatalogSource::new(
            r#"[{"id": 1, "name": "Apple", "description": "Red", "price": 1.0, "image": "a.png"}]"#,
        );
        let products = source.fetch().await.unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].name(), "Apple");
    }

    #[tokio::test]
    async fn static_source_reports_parse_errors() {
        let source = StaticCatalogSource::new("{ not json");
        let err = source.fetch().await.unwrap_err();
        assert!(matches!(err, CatalogError::Parse(_)));
    }

    #[tokio::test]
    async fn file_source_reads_products_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"id": 9, "name": "Mug", "description": "Ceramic", "price": 7.5, "image": "mug.png"}}]"#
        )
        .unwrap();

        let source = FileCatalogSource::new(file.path());
        let products = source.fetch().await.unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].price().cents(), 750);
    }

    #[tokio::test]
    async fn file_source_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let source = FileCatalogSource::new(dir.path().join("missing.json"));
        let err = source.fetch().await.unwrap_err();
        assert!(matches!(err, CatalogError::Io { .. }));
    }
}
