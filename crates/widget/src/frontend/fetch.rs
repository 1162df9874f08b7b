//! Catalog fetched over HTTP with `window.fetch`.

use async_trait::async_trait;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

use storefront_catalog::source::parse_products;
use storefront_catalog::{CatalogError, CatalogSource, Product};

#[derive(Debug, Clone)]
pub struct FetchCatalogSource {
    url: String,
}

impl FetchCatalogSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

fn js_error(context: &str, err: wasm_bindgen::JsValue) -> CatalogError {
    CatalogError::Fetch(format!("{context}: {err:?}"))
}

#[async_trait(?Send)]
impl CatalogSource for FetchCatalogSource {
    fn describe(&self) -> String {
        self.url.clone()
    }

    async fn fetch(&self) -> Result<Vec<Product>, CatalogError> {
        let window =
            web_sys::window().ok_or_else(|| CatalogError::Fetch("no window object".into()))?;

        let promise: js_sys::Promise = window.fetch_with_str(&self.url);
        let response: web_sys::Response = JsFuture::from(promise)
            .await
            .map_err(|e| js_error("request failed", e))?
            .dyn_into()
            .map_err(|e| js_error("fetch did not resolve to a Response", e))?;

        if !response.ok() {
            return Err(CatalogError::Fetch(format!(
                "{} answered HTTP {}",
                self.url,
                response.status()
            )));
        }

        let body = response
            .text()
            .map_err(|e| js_error("failed to read response body", e))?;
        let text = JsFuture::from(body)
            .await
            .map_err(|e| js_error("failed to read response body", e))?
            .as_string()
            .ok_or_else(|| CatalogError::Parse("response body is not text".into()))?;

        parse_products(&text)
    }
}
