//! Logging infrastructure for vidbundle
//!
//! Structured `tracing` events are emitted by the engine at every pipeline
//! step. This module owns subscriber setup for the binary.

use std::io::IsTerminal;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Check if colored output should be used.
///
/// Returns true only if stderr is a terminal and `NO_COLOR` is not set.
fn use_color() -> bool {
    std::io::stderr().is_terminal() && std::env::var_os("NO_COLOR").is_none()
}

/// Build the default filter used when `RUST_LOG` is not set.
fn default_filter(verbose: bool) -> EnvFilter {
    let directives = if verbose {
        "vidbundle=debug,vidbundle_engine=debug,vidbundle_config=debug,warn"
    } else {
        "vidbundle=info,vidbundle_engine=info,vidbundle_config=info,warn"
    };
    EnvFilter::try_new(directives).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Initialize the tracing subscriber.
///
/// `RUST_LOG` takes precedence over the built-in filter. Events go to stderr so
/// stdout stays clean for status lines and `--json` output.
///
/// # Arguments
/// * `verbose` - If true, raise vidbundle crates to `debug` and include targets
pub fn init_tracing(verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(verbose));

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
