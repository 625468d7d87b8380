//! Logging and observability for kitlabel
//!
//! Structured logging through `tracing`. The engine emits events; the CLI
//! installs the subscriber once at startup via [`init_tracing`].

use std::io::IsTerminal;
use tracing::{Level, error, info, span};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Check if colored output should be used.
///
/// Returns true only if stderr is a terminal and `NO_COLOR` is not set.
fn use_color() -> bool {
    std::io::stderr().is_terminal() && std::env::var_os("NO_COLOR").is_none()
}

/// Initialize the tracing subscriber.
///
/// `RUST_LOG` takes precedence. Otherwise the default filter is
/// `kitlabel=info,warn`, or `kitlabel=debug,info` when `verbose` is set.
/// Log output goes to stderr so that `--json` output on stdout stays parseable.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_tracing(verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| {
            if verbose {
                EnvFilter::try_new("kitlabel=debug,info")
            } else {
                EnvFilter::try_new("kitlabel=info,warn")
            }
        })
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(use_color())
                .with_target(verbose)
                .with_thread_ids(false)
                .with_thread_names(false)
                .with_line_number(false)
                .with_file(false)
                .compact(),
        )
        .try_init()?;

    Ok(())
}

/// Span covering one batch generation.
pub fn batch_span(entry_count: usize) -> tracing::Span {
    span!(Level::INFO, "generate_batch", entries = entry_count)
}

/// Log batch start with structured fields
pub fn log_batch_start(entry_count: usize, kit_units: u64) {
    info!(
        entries = entry_count,
        kit_units = kit_units,
        "Starting label batch generation"
    );
}

/// Log batch completion with document counts and duration
pub fn log_batch_complete(big: u64, small: u64, duration_ms: u128) {
    info!(
        big = big,
        small = small,
        duration_ms = %duration_ms,
        "Label batch generated"
    );
}

/// Log batch failure with the failing entry
pub fn log_batch_error(entry_id: u64, error: &str) {
    error!(
        entry_id = entry_id,
        error = %error,
        "Label batch aborted; no documents produced"
    );
}
