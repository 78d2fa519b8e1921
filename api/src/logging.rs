use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::args::LogArgs;

/// Installs the global subscriber. `RUST_LOG` wins over the configured filter.
pub fn init_logger(args: &LogArgs) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(args.filter.as_str()));

    let registry = tracing_subscriber::registry().with(filter);

    if args.json {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer()).init();
    }
}
