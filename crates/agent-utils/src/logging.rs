//! Logging and tracing utilities

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing subscriber with default configuration
pub fn init_tracing() {
    init_tracing_with_default("info");
}

/// Initialize tracing, using `default_filter` when `RUST_LOG` is unset or invalid
///
/// Log lines go to stderr so they never interleave with console answers on
/// stdout. Calling this twice is harmless; the second call is ignored.
pub fn init_tracing_with_default(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_double_init_is_ignored() {
        init_tracing_with_default("warn");
        init_tracing_with_default("debug");
        tracing::info!("still alive");
    }
}
