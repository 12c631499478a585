use std::io;

use tracing_subscriber::{EnvFilter, fmt::SubscriberBuilder};

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over `default_filter`. Events go to stderr so
/// that CSV and JSON written to stdout stay machine-readable.
pub fn init(default_filter: &str) -> anyhow::Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    SubscriberBuilder::default()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {e}"))
}
