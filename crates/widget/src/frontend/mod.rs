//! Leptos front-end for the browser build.

pub mod app;
pub mod fetch;
pub mod storage;

use wasm_bindgen::prelude::*;

/// WASM entry point, called automatically when the module loads.
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    storefront_observability::init_browser();
    tracing::info!("mounting storefront");

    leptos::mount_to_body(app::App);
}
