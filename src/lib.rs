pub mod calculator;
pub mod config;
pub mod error;
pub mod format;
pub mod metrics;
pub mod rates;
pub mod tier;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize tracing/logging
///
/// Note: This function can only be called once. Host applications that
/// install their own subscriber should skip it and rely on the
/// library's `tracing::` events being picked up there.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .init();
}
