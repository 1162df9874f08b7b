//! Persisted cart payload.
//!
//! Written as `{"items": [1, 2], "saved_at": "..."}`. Older sessions left
//! either a bare id list or a list of full product records; both still load,
//! and only their ids are kept.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use storefront_core::ProductId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartSnapshot {
    pub items: Vec<ProductId>,
    pub saved_at: DateTime<Utc>,
}

impl CartSnapshot {
    pub fn new(items: Vec<ProductId>, saved_at: DateTime<Utc>) -> Self {
        Self { items, saved_at }
    }

    pub fn encode(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[derive(Debug, Deserialize)]
struct LegacyEntry {
    id: ProductId,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Persisted {
    Null,
    Snapshot(CartSnapshot),
    Ids(Vec<ProductId>),
    Records(Vec<LegacyEntry>),
}

/// What a stored payload decoded to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    pub items: Vec<ProductId>,
    /// `None` for formats that carried no timestamp.
    pub saved_at: Option<DateTime<Utc>>,
    /// The payload used a pre-snapshot format and should be rewritten.
    pub legacy: bool,
}

pub fn decode(raw: &str) -> Result<Decoded, serde_json::Error> {
    let decoded = match serde_json::from_str::<Persisted>(raw)? {
        Persisted::Null => Decoded {
            items: Vec::new(),
            saved_at: None,
            legacy: false,
        },
        Persisted::Snapshot(snapshot) => Decoded {
            items: snapshot.items,
            saved_at: Some(snapshot.saved_at),
            legacy: false,
        },
        Persisted::Ids(items) => Decoded {
            items,
            saved_at: None,
            legacy: true,
        },
        Persisted::Records(records) => Decoded {
            items: records.into_iter().map(|r| r.id).collect(),
            saved_at: None,
            legacy: true,
        },
    };
    Ok(decoded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ids(raw: &[u64]) -> Vec<ProductId> {
        raw.iter().copied().map(ProductId::new).collect()
    }

    #[test]
    fn decodes_current_snapshot() {
        let saved_at = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        let raw = CartSnapshot::new(ids(&[2, 1]), saved_at).encode().unwrap();
        let decoded = decode(&raw).unwrap();
        assert_eq!(decoded.items, ids(&[2, 1]));
        assert_eq!(decoded.saved_at, Some(saved_at));
        assert!(!decoded.legacy);
    }

    #[test]
    fn decodes_bare_id_list() {
        let decoded = decode("[3, 1]").unwrap();
        assert_eq!(decoded.items, ids(&[3, 1]));
        assert!(decoded.legacy);
    }

    #[test]
    fn decodes_full_product_records_keeping_ids_only() {
        let raw = r#"[
            {"id": 1, "name": "Apple", "description": "", "price": 1.0, "image": "a.png"},
            {"id": 7, "name": "Gone", "price": 9.99}
        ]"#;
        let decoded = decode(raw).unwrap();
        assert_eq!(decoded.items, ids(&[1, 7]));
        assert!(decoded.legacy);
    }

    #[test]
    fn null_payload_is_an_empty_cart() {
        let decoded = decode("null").unwrap();
        assert!(decoded.items.is_empty());
    }

    #[test]
    fn garbage_is_an_error() {
        assert!(decode("{\"items\": \"nope\"}").is_err());
        assert!(decode("not json").is_err());
        assert!(decode("[{\"name\": \"no id\"}]").is_err());
    }
}
