use std::collections::HashMap;

use storefront_core::ProductId;

use crate::product::Product;
use crate::source::{CatalogError, CatalogSource};

/// Outcome of the startup fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogStatus {
    /// The fetch has not resolved yet; the catalog is empty.
    Pending,
    /// The source was read and parsed.
    Loaded,
    /// The fetch or parse failed; the catalog degraded to empty.
    Failed,
}

/// The immutable product list, in source order, with an id index.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
    index: HashMap<ProductId, usize>,
    status: CatalogStatus,
}

impl Catalog {
    /// The catalog before the startup fetch resolves.
    pub fn pending() -> Self {
        Self {
            products: Vec::new(),
            index: HashMap::new(),
            status: CatalogStatus::Pending,
        }
    }

    fn failed() -> Self {
        Self {
            status: CatalogStatus::Failed,
            ..Self::pending()
        }
    }

    /// Build a loaded catalog. Later duplicates of an id are dropped.
    pub fn from_products(products: Vec<Product>) -> Self {
        let mut kept = Vec::with_capacity(products.len());
        let mut index = HashMap::with_capacity(products.len());

        for product in products {
            let id = product.id_typed();
            if index.contains_key(&id) {
                tracing::warn!(product_id = %id, "duplicate product id in catalog; keeping first");
                continue;
            }
            index.insert(id, kept.len());
            kept.push(product);
        }

        Self {
            products: kept,
            index,
            status: CatalogStatus::Loaded,
        }
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        crate::source::parse_products(json).map(Self::from_products)
    }

    /// Fetch the catalog once. Never fails: any error degrades to an empty
    /// catalog with [`CatalogStatus::Failed`].
    pub async fn load<S>(source: &S) -> Self
    where
        S: CatalogSource + ?Sized,
    {
        match source.fetch().await {
            Ok(products) => {
                let catalog = Self::from_products(products);
                tracing::info!(
                    source = %source.describe(),
                    products = catalog.len(),
                    "catalog loaded"
                );
                catalog
            }
            Err(err) => {
                tracing::warn!(
                    source = %source.describe(),
                    error = %err,
                    "catalog load failed; continuing with an empty catalog"
                );
                Self::failed()
            }
        }
    }

    pub fn status(&self) -> CatalogStatus {
        self.status
    }

    pub fn is_loaded(&self) -> bool {
        self.status == CatalogStatus::Loaded
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.index.get(&id).map(|&i| &self.products[i])
    }

    pub fn contains(&self, id: ProductId) -> bool {
        self.index.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::pending()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::StaticCatalogSource;
    use async_trait::async_trait;
    use storefront_core::Money;

    fn product(id: u64, name: &str) -> Product {
        Product::new(ProductId::new(id), name, "", Money::from_cents(100), "")
    }

    struct BrokenSource;

    #[async_trait]
    impl CatalogSource for BrokenSource {
        fn describe(&self) -> String {
            "broken".to_string()
        }

        async fn fetch(&self) -> Result<Vec<Product>, CatalogError> {
            Err(CatalogError::Fetch("connection refused".to_string()))
        }
    }

    #[test]
    fn indexes_products_by_id() {
        let catalog = Catalog::from_products(vec![product(1, "Apple"), product(2, "Banana")]);
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get(ProductId::new(2)).unwrap().name(), "Banana");
        assert!(catalog.get(ProductId::new(3)).is_none());
        assert!(catalog.is_loaded());
    }

    #[test]
    fn keeps_first_of_duplicate_ids() {
        let catalog = Catalog::from_products(vec![
            product(1, "Apple"),
            product(1, "Impostor"),
            product(2, "Banana"),
        ]);
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get(ProductId::new(1)).unwrap().name(), "Apple");
        assert_eq!(catalog.products()[1].name(), "Banana");
    }

    #[test]
    fn pending_catalog_is_empty() {
        let catalog = Catalog::pending();
        assert!(catalog.is_empty());
        assert_eq!(catalog.status(), CatalogStatus::Pending);
    }

    #[tokio::test]
    async fn load_degrades_to_empty_on_fetch_failure() {
        let catalog = Catalog::load(&BrokenSource).await;
        assert!(catalog.is_empty());
        assert_eq!(catalog.status(), CatalogStatus::Failed);
    }

    #[tokio::test]
    async fn load_degrades_to_empty_on_parse_failure() {
        let catalog = Catalog::load(&StaticCatalogSource::new(r#"[{"id": "x"}]"#)).await;
        assert!(catalog.is_empty());
        assert_eq!(catalog.status(), CatalogStatus::Failed);
    }

    #[tokio::test]
    async fn load_keeps_source_order() {
        let source = StaticCatalogSource::new(
            r#"[
                {"id": 3, "name": "Cherry", "description": "", "price": 3, "image": ""},
                {"id": 1, "name": "Apple", "description": "", "price": 1, "image": ""}
            ]"#,
        );
        let catalog = Catalog::load(&source).await;
        let names: Vec<_> = catalog.products().iter().map(|p| p.name()).collect();
        assert_eq!(names, ["Cherry", "Apple"]);
    }
}
