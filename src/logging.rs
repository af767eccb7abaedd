//! Logging setup on top of `tracing-subscriber`.
//!
//! Log records go to stderr, so stdout carries nothing but Newick trees.
//! The level is taken from `RUST_LOG` and defaults to `warn`.

use std::sync::Once;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

/// Filter used when `RUST_LOG` is not set.
const DEFAULT_FILTER: &str = "warn";

static TEST_SETUP: Once = Once::new();

/// Builds the filter from `RUST_LOG`, falling back to `default`.
fn env_filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

/// Installs the global subscriber for the command line tool.
///
/// # Errors
/// Returns an error if a global subscriber is already set.
pub fn init() -> Result<(), tracing_subscriber::util::TryInitError> {
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_filter(env_filter(DEFAULT_FILTER)),
        )
        .try_init()
}

/// Installs a verbose subscriber once per test binary; later calls are no-ops.
pub fn init_for_tests() {
    TEST_SETUP.call_once(|| {
        let subscriber = tracing_subscriber::registry().with(
            fmt::layer()
                .with_test_writer()
                .with_target(true)
                .with_span_events(FmtSpan::CLOSE)
                .with_filter(env_filter("debug")),
        );

        if tracing::dispatcher::has_been_set() {
            tracing::debug!("tracing subscriber already set");
        } else if let Err(e) = subscriber.try_init() {
            eprintln!("Error: Failed to set up logging: {e}");
        }
    });
}
