//! User actions, one variant per interaction the storefront offers.

use core::str::FromStr;

use serde::{Deserialize, Serialize};

use storefront_core::ProductId;
use storefront_query::SortKey;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Intent {
    /// Search box input.
    SetSearch(String),
    /// Sort selector change.
    SetSort(SortKey),
    /// Numbered pagination button.
    GoToPage(u32),
    PrevPage,
    NextPage,
    /// "Add to Cart" / "Added to Cart" on a card, or "Remove" in the panel.
    ToggleCart(ProductId),
    OpenCart,
    CloseCart,
}

/// Parses the `name=value` form used by the preview harness:
/// `search=an`, `sort=az`, `page=2`, `prev`, `next`, `toggle=3`, `open`, `close`.
impl FromStr for Intent {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, value) = match s.split_once('=') {
            Some((name, value)) => (name.trim(), Some(value)),
            None => (s.trim(), None),
        };

        match (name, value) {
            ("search", value) => Ok(Intent::SetSearch(value.unwrap_or_default().to_string())),
            ("sort", value) => value
                .unwrap_or_default()
                .parse::<SortKey>()
                .map(Intent::SetSort),
            ("page", Some(value)) => value
                .trim()
                .parse::<u32>()
                .map(Intent::GoToPage)
                .map_err(|e| format!("invalid page {value:?}: {e}")),
            ("prev", None) => Ok(Intent::PrevPage),
            ("next", None) => Ok(Intent::NextPage),
            ("toggle", Some(value)) => value
                .parse::<ProductId>()
                .map(Intent::ToggleCart)
                .map_err(|e| e.to_string()),
            ("open", None) => Ok(Intent::OpenCart),
            ("close", None) => Ok(Intent::CloseCart),
            _ => Err(format!("unknown intent: {s}")),
        }
    }
}
