//! Logging setup using the `tracing` ecosystem.
//!
//! `--verbose` enables debug output for this crate, `--quiet` limits output
//! to errors, otherwise `RUST_LOG` is honored with an `info` fallback.
//! Logs go to stderr so stdout stays reserved for the run summary.

use std::io;

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

fn filter(verbose: bool, quiet: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new("uigraph=debug")
    } else if quiet {
        EnvFilter::new("uigraph=error")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("uigraph=info"))
    }
}

/// Initialize the global subscriber. Call once, before any logging.
pub fn init_logger(verbose: bool, quiet: bool) {
    let fmt_layer = fmt::layer()
        .with_writer(io::stderr)
        .with_target(false)
        .with_level(true)
        .without_time()
        .with_ansi(colored::control::SHOULD_COLORIZE.should_colorize())
        .compact();

    // A second init (e.g. from tests) keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(filter(verbose, quiet))
        .with(fmt_layer)
        .try_init();
}

