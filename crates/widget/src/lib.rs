//! `storefront-widget`
//!
//! **Responsibility:** the storefront's presentation layer and controller.
//!
//! This crate provides:
//! - [`Storefront`]: application state and the intent reducer
//! - View models for the product grid, pagination and cart panel
//! - A static HTML renderer for those view models
//! - (wasm32) a Leptos front-end backed by `localStorage`

#[cfg(not(target_arch = "wasm32"))]
pub mod cli;
pub mod config;
pub mod intent;
pub mod render;
pub mod storefront;
pub mod view;

#[cfg(target_arch = "wasm32")]
pub mod frontend;

pub use config::{ConfigError, WidgetConfig};
pub use intent::Intent;
pub use storefront::{CartPanel, Rerender, Storefront};
pub use view::{CartLine, CartView, CatalogView, PageButton, PaginationView, ProductCard};

/// Render every view of `storefront` as one HTML document fragment.
pub fn render_html<S>(storefront: &Storefront<S>) -> String
where
    S: storefront_cart::CartStorage,
{
    render::render_widget(
        storefront.query().search(),
        storefront.query().sort(),
        &storefront.catalog_view(),
        &storefront.pagination_view(),
        &storefront.cart_view(),
    )
}
