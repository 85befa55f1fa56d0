//! Diagnostic logging
//!
//! Log records go to stderr so stdout stays clean for rendered output.
//! `RUST_LOG` directives take precedence over the level derived from flags.

use tracing_subscriber::EnvFilter;

use crate::config::Verbosity;

/// Default filter level for a `-v` count and configured verbosity
pub fn level_for(verbose: u8, verbosity: Verbosity) -> &'static str {
    match (verbose, verbosity) {
        (0, Verbosity::Quiet) => "error",
        (0, Verbosity::Normal) => "warn",
        (0, Verbosity::Verbose) | (1, _) => "info",
        (0, Verbosity::Debug) | (2, _) => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber; a second call is a no-op
pub fn init(verbose: u8, verbosity: Verbosity) -> anyhow::Result<()> {
    let filter = EnvFilter::builder()
        .with_default_directive(level_for(verbose, verbosity).parse()?)
        .from_env_lossy();

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
    Ok(())
}
