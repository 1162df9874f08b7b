//! Tracing and logging setup shared by every storefront entry point.

/// Tracing configuration (filters, output format).
pub mod tracing;

pub use crate::tracing::{LogFormat, init_with};
#[cfg(target_arch = "wasm32")]
pub use crate::tracing::init_browser;
