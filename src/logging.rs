//! Tracing subscriber setup shared by the binary

use tracing_subscriber::{fmt::SubscriberBuilder, EnvFilter};

/// Install the global subscriber, writing to stderr
///
/// `RUST_LOG` takes precedence; `default_filter` applies when it is unset.
pub fn init_tracing(default_filter: &str) -> miette::Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    SubscriberBuilder::default()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| miette::miette!("failed to initialize tracing: {}", e))
}
