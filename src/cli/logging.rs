//! Tracing setup for the `evitaql` binary.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize tracing on stderr.
///
/// `RUST_LOG` wins when set; otherwise `verbose` selects between `debug`
/// and `warn`.
pub fn init(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    init_with_filter(default_filter);
}

/// Initialize tracing with a custom default filter.
pub fn init_with_filter(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .init();
}
