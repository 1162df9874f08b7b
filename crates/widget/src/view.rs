//! View models: everything a front-end needs to draw the widget, with no
//! reference back into the stores.

use serde::Serialize;

use storefront_cart::{CartStorage, CartStore};
use storefront_catalog::{Catalog, Product};
use storefront_core::{Money, ProductId};
use storefront_query::QueryPage;

use crate::storefront::CartPanel;

pub const ADD_LABEL: &str = "Add to Cart";
pub const ADDED_LABEL: &str = "Added to Cart";
pub const REMOVE_LABEL: &str = "Remove";
pub const NO_RESULTS: &str = "No products found.";
pub const UNAVAILABLE_LABEL: &str = "Unavailable item";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductCard {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price_label: String,
    pub image: String,
    pub in_cart: bool,
    pub button_label: &'static str,
}

impl ProductCard {
    fn build(product: &Product, in_cart: bool) -> Self {
        Self {
            id: product.id_typed(),
            name: product.name().to_string(),
            description: product.description().to_string(),
            price_label: product.price().to_string(),
            image: product.image().to_string(),
            in_cart,
            button_label: if in_cart { ADDED_LABEL } else { ADD_LABEL },
        }
    }
}

/// The product grid for the current page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogView {
    pub cards: Vec<ProductCard>,
    /// Nothing matched: show [`NO_RESULTS`] instead of a grid.
    pub empty: bool,
}

impl CatalogView {
    pub fn build<S: CartStorage>(page: &QueryPage<'_>, cart: &CartStore<S>) -> Self {
        let cards: Vec<ProductCard> = page
            .items
            .iter()
            .map(|p| ProductCard::build(p, cart.contains(p.id_typed())))
            .collect();
        Self {
            empty: cards.is_empty(),
            cards,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageButton {
    pub number: u32,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaginationView {
    pub current: u32,
    pub total_pages: u32,
    pub prev_disabled: bool,
    pub next_disabled: bool,
    pub pages: Vec<PageButton>,
}

impl PaginationView {
    pub fn build(current: u32, total_pages: u32) -> Self {
        let total_pages = total_pages.max(1);
        let current = current.clamp(1, total_pages);
        Self {
            current,
            total_pages,
            prev_disabled: current == 1,
            next_disabled: current == total_pages,
            pages: (1..=total_pages)
                .map(|number| PageButton {
                    number,
                    active: number == current,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartLine {
    pub id: ProductId,
    pub name: String,
    pub image: String,
    /// Empty for unavailable lines.
    pub price_label: String,
    /// `false` when the id has no product in the current catalog. The line
    /// still carries a remove control so the entry can be dropped.
    pub available: bool,
}

impl CartLine {
    fn resolved(product: &Product) -> Self {
        Self {
            id: product.id_typed(),
            name: product.name().to_string(),
            image: product.image().to_string(),
            price_label: product.price().to_string(),
            available: true,
        }
    }

    fn unavailable(id: ProductId) -> Self {
        Self {
            id,
            name: format!("{UNAVAILABLE_LABEL} #{id}"),
            image: String::new(),
            price_label: String::new(),
            available: false,
        }
    }
}

/// The cart panel, its toggle button badge and the running total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartView {
    pub open: bool,
    pub lines: Vec<CartLine>,
    pub total: Money,
    /// `Total: $x.xx`
    pub total_label: String,
    /// `Cart (n)`, or just `Cart` when empty.
    pub badge: String,
}

impl CartView {
    pub fn build<S: CartStorage>(cart: &CartStore<S>, catalog: &Catalog, panel: CartPanel) -> Self {
        let total = cart.total(catalog);
        let lines: Vec<CartLine> = cart
            .cart()
            .items()
            .iter()
            .map(|&id| match catalog.get(id) {
                Some(product) => CartLine::resolved(product),
                None => CartLine::unavailable(id),
            })
            .collect();

        let badge = if cart.is_empty() {
            "Cart".to_string()
        } else {
            format!("Cart ({})", cart.len())
        };

        Self {
            open: panel.is_open(),
            lines,
            total,
            total_label: format!("Total: {total}"),
            badge,
        }
    }
}
