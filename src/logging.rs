//! Tracing subscriber setup for console diagnostics.
use tracing_subscriber::EnvFilter;

/// Install the global console subscriber.
///
/// Messages are filtered at `info` level by default and `debug` when
/// `verbose` is set; an explicit `RUST_LOG` environment filter takes
/// precedence over both. Installing twice is a no-op, which keeps the
/// function safe to call from tests.
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .try_init()
        .ok();
}
