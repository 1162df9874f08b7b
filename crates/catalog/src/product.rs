use serde::{Deserialize, Serialize};

use storefront_core::{Entity, Money, ProductId};

/// A catalog product, exactly as the catalog source describes it.
///
/// Products are immutable after load; the only owner is [`crate::Catalog`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    id: ProductId,
    name: String,
    #[serde(default)]
    description: String,
    price: Money,
    #[serde(default)]
    image: String,
}

impl Product {
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        description: impl Into<String>,
        price: Money,
        image: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
            price,
            image: image.into(),
        }
    }

    pub fn id_typed(&self) -> ProductId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn price(&self) -> Money {
        self.price
    }

    /// Image resource locator (URL or relative path).
    pub fn image(&self) -> &str {
        &self.image
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> ProductId {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_catalog_record() {
        let json = r#"{
            "id": 4,
            "name": "Desk Lamp",
            "description": "Warm white LED",
            "price": 24.99,
            "image": "img/lamp.png"
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id_typed(), ProductId::new(4));
        assert_eq!(product.name(), "Desk Lamp");
        assert_eq!(product.description(), "Warm white LED");
        assert_eq!(product.price(), Money::from_cents(2499));
        assert_eq!(product.image(), "img/lamp.png");
    }

    #[test]
    fn description_and_image_are_optional() {
        let product: Product =
            serde_json::from_str(r#"{"id": 1, "name": "Apple", "price": 1}"#).unwrap();
        assert_eq!(product.description(), "");
        assert_eq!(product.image(), "");
    }

    #[test]
    fn rejects_negative_price() {
        let result =
            serde_json::from_str::<Product>(r#"{"id": 1, "name": "Apple", "price": -1}"#);
        assert!(result.is_err());
    }
}
