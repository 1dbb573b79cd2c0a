//! CLI entry point and dispatch logic
//!
//! This module owns the `run()` function which:
//! - Parses CLI arguments
//! - Initializes tracing
//! - Builds CliArgs and discovers Config
//! - Dispatches to command handlers
//! - Handles all error output

use clap::Parser;

use super::args::{Cli, Commands};
use super::commands;

use crate::logging::init_tracing;
use crate::{BundleError, Config, ExitCode};

/// Main CLI execution function.
///
/// This function handles ALL output including errors. It returns `Result<(), ExitCode>`:
/// - On success: returns `Ok(())` after printing any output
/// - On a soft outcome (nothing to pack): returns the outcome's exit code
/// - On error: prints the error report to stderr and returns its exit code
///
/// main.rs only calls `std::process::exit(code.as_i32())` on error - it does NOT print.
pub fn run() -> Result<(), ExitCode> {
    let cli = Cli::parse();

    // A second init (e.g. in tests) is harmless; keep whichever subscriber won.
    let _ = init_tracing(cli.verbose);

    let cli_args = cli.cli_args();
    let config = match Config::discover(&cli_args) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{}", err.display_for_user());
            return Err(err.to_exit_code());
        }
    };
    tracing::debug!(
        source_dir = %config.source_dir(),
        target_dir = %config.target_dir(),
        completed_dir = %config.completed_dir(),
        "configuration loaded"
    );

    let result = match cli.command {
        Commands::Pack { dry_run, json } => commands::execute_pack_command(&config, dry_run, json),
        Commands::NextName { json } => commands::execute_next_name_command(&config, json),
        Commands::Config { json } => commands::execute_config_command(&config, json),
    };

    match result {
        Ok(code) if code.is_success() => Ok(()),
        Ok(code) => Err(code),
        Err(error) => {
            if let Some(bundle_error) = error.downcast_ref::<BundleError>() {
                eprintln!("{}", bundle_error.display_for_user());
                Err(bundle_error.to_exit_code())
            } else {
                eprintln!("✗ Unexpected error: {error:#}");
                eprintln!("\n  Run with --verbose for more detailed output");
                Err(ExitCode::INTERNAL)
            }
        }
    }
}
