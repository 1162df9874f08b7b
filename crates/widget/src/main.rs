//! Preview harness: bootstrap the widget natively, replay intents, print HTML.
//!
//! ```text
//! storefront-preview search=an sort=az toggle=2 open
//! ```

#[cfg(not(target_arch = "wasm32"))]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    use anyhow::Context;
    use clap::Parser;

    use storefront_cart::FileStorage;
    use storefront_catalog::FileCatalogSource;
    use storefront_widget::cli::PreviewArgs;
    use storefront_widget::{Storefront, WidgetConfig};

    let args = PreviewArgs::parse();

    let config = WidgetConfig::from_env().context("invalid storefront configuration")?;
    storefront_observability::init_with(storefront_observability::LogFormat::from_name(
        &config.log_format,
    ));

    let storage = match &config.cart_path {
        Some(path) => FileStorage::new(path),
        None => FileStorage::default_location().context("failed to locate cart storage")?,
    };
    tracing::info!(
        catalog = %config.catalog_path.display(),
        storage = %storage.path().display(),
        page_size = config.page_size,
        "starting storefront preview"
    );

    let source = FileCatalogSource::new(&config.catalog_path);
    let mut storefront = Storefront::bootstrap(&source, storage, &config).await;

    for intent in args.intents {
        let rerender = storefront.dispatch(intent);
        tracing::debug!(?rerender, "applied intent");
    }

    println!("{}", storefront_widget::render_html(&storefront));
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The browser entry point is `frontend::main`, started by wasm-bindgen.
}
