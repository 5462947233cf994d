//! Telemetry setup
//!
//! Configures structured logging with tracing and tracing-subscriber. Logs go
//! to stderr so `init` output on stdout stays clean.

use std::sync::Once;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

static INIT: Once = Once::new();

/// Initialize tracing subscriber for structured logging
///
/// This can only be called once per process. Subsequent calls are silently ignored.
///
/// Reads the filter from the RUST_LOG environment variable, defaulting to
/// `default_level` for this crate.
///
/// # Examples
///
/// ```no_run
/// archcfg::telemetry::init("info");
/// tracing::info!("Generator started");
/// ```
pub fn init(default_level: &str) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(format!("archcfg={default_level}")));

        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    });
}
