//! Tracing/logging initialization.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

/// Default filter when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "info";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// One JSON object per event, for log collectors.
    #[default]
    Json,
    /// Human-readable single-line output, for local development.
    Compact,
}

impl LogFormat {
    /// `"json"` or `"compact"`; anything else falls back to JSON.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "compact" | "pretty" | "text" => LogFormat::Compact,
            _ => LogFormat::Json,
        }
    }
}

/// Initialize tracing/logging for the process, filtered by `RUST_LOG`.
///
/// Logs go to stderr so stdout stays free for rendered output. Safe to call
/// multiple times (subsequent calls are no-ops).
pub fn init_with(format: LogFormat) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    let _ = match format {
        LogFormat::Json => builder
            .json()
            .with_timer(tracing_subscriber::fmt::time::SystemTime)
            .try_init(),
        LogFormat::Compact => builder.compact().try_init(),
    };
}

/// Console verbosity for the browser build.
pub fn browser_level(debug_build: bool) -> LevelFilter {
    if debug_build {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    }
}

/// Initialize tracing for the browser build: events go to the devtools
/// console. There is no `RUST_LOG` in a page, so debug builds log at `debug`
/// and release builds at [`DEFAULT_FILTER`].
#[cfg(target_arch = "wasm32")]
pub fn init_browser() {
    use tracing_subscriber::prelude::*;

    let level = browser_level(cfg!(debug_assertions));
    let console = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .without_time()
        .with_target(false)
        .with_writer(tracing_web::MakeWebConsoleWriter::new())
        .with_filter(level);

    let _ = tracing_subscriber::registry().with(console).try_init();
}
