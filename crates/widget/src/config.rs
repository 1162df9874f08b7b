//! Widget configuration.
//!
//! Defaults reproduce the reference storefront; every field can be overridden
//! from the environment.

use std::path::PathBuf;

use thiserror::Error;

use storefront_cart::DEFAULT_STORAGE_KEY;
use storefront_query::DEFAULT_PAGE_SIZE;

pub const ENV_PAGE_SIZE: &str = "STOREFRONT_PAGE_SIZE";
pub const ENV_STORAGE_KEY: &str = "STOREFRONT_STORAGE_KEY";
pub const ENV_CATALOG: &str = "STOREFRONT_CATALOG";
pub const ENV_CART_FILE: &str = "STOREFRONT_CART_FILE";
pub const ENV_LOG_FORMAT: &str = "STOREFRONT_LOG_FORMAT";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {var}: {message}")]
    InvalidValue { var: &'static str, message: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetConfig {
    /// Products per catalog page. Always at least 1.
    pub page_size: usize,
    /// Key the cart is persisted under.
    pub storage_key: String,
    /// Catalog document (a path natively, a URL in the browser).
    pub catalog_path: PathBuf,
    /// Native cart storage file; `None` means the OS data directory.
    pub cart_path: Option<PathBuf>,
    /// Log output format name (`json` or `compact`).
    pub log_format: String,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            catalog_path: PathBuf::from("products.json"),
            cart_path: None,
            log_format: "json".to_string(),
        }
    }
}

impl WidgetConfig {
    /// Read overrides from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read overrides through `lookup`; unset or blank variables keep defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(raw) = get(ENV_PAGE_SIZE) {
            let page_size = raw
                .trim()
                .parse::<usize>()
                .map_err(|e| ConfigError::InvalidValue {
                    var: ENV_PAGE_SIZE,
                    message: e.to_string(),
                })?;
            if page_size == 0 {
                return Err(ConfigError::InvalidValue {
                    var: ENV_PAGE_SIZE,
                    message: "page size must be at least 1".to_string(),
                });
            }
            config.page_size = page_size;
        }
        if let Some(key) = get(ENV_STORAGE_KEY) {
            config.storage_key = key;
        }
        if let Some(path) = get(ENV_CATALOG) {
            config.catalog_path = PathBuf::from(path);
        }
        if let Some(path) = get(ENV_CART_FILE) {
            config.cart_path = Some(PathBuf::from(path));
        }
        if let Some(format) = get(ENV_LOG_FORMAT) {
            config.log_format = format;
        }

        Ok(config)
    }
}
