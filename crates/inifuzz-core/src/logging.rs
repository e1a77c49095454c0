//! `tracing` subscriber setup shared by the fuzz targets and the CLI.
//!
//! Events go to stderr so they never mix with libFuzzer's own stdout status
//! lines or with CLI output meant for pipes. `RUST_LOG` always takes
//! precedence over the configured level.

use tracing_subscriber::EnvFilter;

/// Install the global subscriber with `level` as the default filter.
///
/// Returns `false` when a global subscriber was already installed; the
/// existing one is left untouched.
pub fn init(level: &str) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok()
}

/// Raise `base` according to a `-v` count: one step to `debug`, two or more
/// to `trace`.
pub fn verbosity_level(base: &str, verbose: u8) -> &str {
    match verbose {
        0 => base,
        1 => "debug",
        _ => "trace",
    }
}
