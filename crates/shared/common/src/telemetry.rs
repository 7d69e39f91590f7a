//! Tracing subscriber setup.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when nothing else is configured.
const DEFAULT_FILTER: &str = "info,tower_http=debug";

/// Initialize the global tracing subscriber.
///
/// `verbose` forces debug level. Otherwise `LOG_LEVEL` (debug, info, warn,
/// error) wins over `RUST_LOG`.
pub fn init_tracing(service_name: &str, verbose: bool) {
    let filter = resolve_filter(
        verbose,
        std::env::var("LOG_LEVEL").ok().as_deref(),
        std::env::var("RUST_LOG").ok().as_deref(),
    );

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(EnvFilter::new(filter))
        .init();

    tracing::debug!(service = service_name, "Tracing initialized");
}

fn resolve_filter(verbose: bool, log_level: Option<&str>, rust_log: Option<&str>) -> String {
    if verbose {
        return "debug".to_string();
    }

    match log_level.map(str::trim) {
        Some(level @ ("debug" | "info" | "warn" | "error")) => level.to_string(),
        _ => rust_log
            .filter(|f| !f.trim().is_empty())
            .unwrap_or(DEFAULT_FILTER)
            .to_string(),
    }
}
