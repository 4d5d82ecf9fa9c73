//! Tracing subscriber setup for the heron binary.

use tracing_subscriber::EnvFilter;

/// Initialise the stdout tracing layer.
///
/// `RUST_LOG` controls filtering and defaults to `info`;
/// `RUST_LOG_FORMAT=json` switches to JSON output.
pub fn init_telemetry() {
    let log_env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let json_fmt = std::env::var("RUST_LOG_FORMAT")
        .map(|val| val == "json")
        .unwrap_or(false);

    if json_fmt {
        tracing_subscriber::fmt()
            .with_ansi(false)
            .with_target(true)
            .json()
            .with_env_filter(log_env_filter)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(log_env_filter)
            .init();
    }
}
