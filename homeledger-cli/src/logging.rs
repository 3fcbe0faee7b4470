//! Logging setup on `tracing-subscriber`.
//!
//! Logs go to stderr so JSON written to stdout stays machine-readable.
//! `RUST_LOG` takes precedence over the config level and `-v` flags.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

/// Filter directive for a configured level and a `-v` count.
///
/// - 0: the configured level
/// - 1 (`-v`): debug
/// - 2+ (`-vv`): trace
pub fn level_for(configured: &str, verbosity: u8) -> String {
    match verbosity {
        0 => configured.to_string(),
        1 => "debug".to_string(),
        _ => "trace".to_string(),
    }
}

pub fn init_logging(configured: &str, verbosity: u8) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_for(configured, verbosity)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("init logging: {e}"))
}
