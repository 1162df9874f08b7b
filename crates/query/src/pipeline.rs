//! Filter → sort → paginate.

use storefront_catalog::{Catalog, Product};

use crate::collation::NameCollator;
use crate::state::{QueryState, SortKey};

/// Products per page in the reference storefront.
pub const DEFAULT_PAGE_SIZE: usize = 5;

/// One page of pipeline output.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryPage<'a> {
    pub items: Vec<&'a Product>,
    /// The page actually shown, after clamping to `[1, total_pages]`.
    pub page: u32,
    /// Always at least 1, even when nothing matched.
    pub total_pages: u32,
    /// Number of products that passed the filter.
    pub matched: usize,
}

impl QueryPage<'_> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// Products whose name or description contains `search`, case-insensitively.
/// Catalog order is preserved.
pub fn filter<'a>(products: &'a [Product], search: &str) -> Vec<&'a Product> {
    if search.is_empty() {
        return products.iter().collect();
    }
    let needle = search.to_lowercase();
    products
        .iter()
        .filter(|p| {
            p.name().to_lowercase().contains(&needle)
                || p.description().to_lowercase().contains(&needle)
        })
        .collect()
}

/// Stable sort in place.
pub fn sort(items: &mut [&Product], key: SortKey) {
    match key {
        SortKey::None => {}
        SortKey::PriceAsc => items.sort_by_key(|p| p.price()),
        SortKey::PriceDesc => items.sort_by(|a, b| b.price().cmp(&a.price())),
        SortKey::NameAsc => {
            let collator = NameCollator::new();
            items.sort_by(|a, b| collator.compare(a.name(), b.name()));
        }
    }
}

/// `max(1, ceil(matched / page_size))`.
pub fn total_pages(matched: usize, page_size: usize) -> u32 {
    let page_size = page_size.max(1);
    let pages = matched.div_ceil(page_size).max(1);
    u32::try_from(pages).unwrap_or(u32::MAX)
}

pub fn clamp_page(page: u32, total_pages: u32) -> u32 {
    page.clamp(1, total_pages.max(1))
}

/// Run the full pipeline. `page_size` of 0 is treated as 1.
pub fn run<'a>(catalog: &'a Catalog, query: &QueryState, page_size: usize) -> QueryPage<'a> {
    let page_size = page_size.max(1);

    let mut matched = filter(catalog.products(), query.search());
    sort(&mut matched, query.sort());

    let total_pages = total_pages(matched.len(), page_size);
    let page = clamp_page(query.page(), total_pages);

    let start = (page as usize - 1).saturating_mul(page_size);
    let items: Vec<&Product> = matched.iter().skip(start).take(page_size).copied().collect();

    QueryPage {
        items,
        page,
        total_pages,
        matched: matched.len(),
    }
}

/// `(page items, total pages)` for the (clamped) requested page.
pub fn paginate<'a>(
    catalog: &'a Catalog,
    query: &QueryState,
    page_size: usize,
) -> (Vec<&'a Product>, u32) {
    let page = run(catalog, query, page_size);
    (page.items, page.total_pages)
}
