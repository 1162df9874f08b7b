//! Transient query state owned by the presentation layer.

use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// Sort order selected in the storefront's sort selector.
///
/// Serialized with the selector's option values so a front-end can bind
/// `<option value=...>` directly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortKey {
    /// Catalog order (after filtering).
    #[default]
    #[serde(rename = "")]
    None,
    #[serde(rename = "low-high")]
    PriceAsc,
    #[serde(rename = "high-low")]
    PriceDesc,
    #[serde(rename = "az")]
    NameAsc,
}

impl SortKey {
    pub const ALL: [SortKey; 4] = [
        SortKey::None,
        SortKey::PriceAsc,
        SortKey::PriceDesc,
        SortKey::NameAsc,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::None => "",
            SortKey::PriceAsc => "low-high",
            SortKey::PriceDesc => "high-low",
            SortKey::NameAsc => "az",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortKey::None => "Sort by",
            SortKey::PriceAsc => "Price: Low to High",
            SortKey::PriceDesc => "Price: High to Low",
            SortKey::NameAsc => "Name: A-Z",
        }
    }

    /// Lenient parse of a selector value: anything unrecognised is `None`.
    pub fn from_selector(value: &str) -> SortKey {
        value.parse().unwrap_or_default()
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" | "none" => Ok(SortKey::None),
            "low-high" => Ok(SortKey::PriceAsc),
            "high-low" => Ok(SortKey::PriceDesc),
            "az" => Ok(SortKey::NameAsc),
            other => Err(format!("unknown sort key: {other}")),
        }
    }
}

/// Search text, sort key and current page (1-based).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryState {
    search: String,
    sort: SortKey,
    page: u32,
}

impl Default for QueryState {
    fn default() -> Self {
        Self {
            search: String::new(),
            sort: SortKey::None,
            page: 1,
        }
    }
}

impl QueryState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn sort(&self) -> SortKey {
        self.sort
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    /// Changing the search text always returns to page 1.
    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
        self.page = 1;
    }

    /// Changing the sort key always returns to page 1.
    pub fn set_sort(&mut self, sort: SortKey) {
        self.sort = sort;
        self.page = 1;
    }

    /// Set the requested page. Zero is raised to 1; the upper bound is
    /// enforced by the pipeline, which knows the result count.
    pub fn set_page(&mut self, page: u32) {
        self.page = page.max(1);
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.set_search(search);
        self
    }

    pub fn with_sort(mut self, sort: SortKey) -> Self {
        self.set_sort(sort);
        self
    }

    pub fn with_page(mut self, page: u32) -> Self {
        self.set_page(page);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_and_sort_changes_reset_page() {
        let mut query = QueryState::new().with_page(4);
        query.set_search("lamp");
        assert_eq!(query.page(), 1);

        query.set_page(3);
        query.set_sort(SortKey::PriceDesc);
        assert_eq!(query.page(), 1);
    }

    #[test]
    fn page_zero_is_raised_to_one() {
        assert_eq!(QueryState::new().with_page(0).page(), 1);
    }

    #[test]
    fn sort_key_uses_selector_values() {
        for key in SortKey::ALL {
            assert_eq!(SortKey::from_selector(key.as_str()), key);
            let json = serde_json::to_string(&key).unwrap();
            assert_eq!(json, format!("\"{}\"", key.as_str()));
        }
        assert_eq!(SortKey::from_selector("bogus"), SortKey::None);
    }
}
