//! Pack command implementation
//!
//! Handles `vidbundle pack`, `vidbundle pack --dry-run`, and their `--json`
//! variants.

use anyhow::Result;
use chrono::Local;
use serde::Serialize;

use super::json_emit::{emit_decision_json, emit_outcome_json};

use crate::engine::context::bytes_to_gib;
use crate::engine::pipeline::next_bundle_name;
use crate::{BundleName, Config, Decision, ExitCode, Outcome, RunContext, plan, run};

/// JSON shape of `pack --dry-run --json`
#[derive(Debug, Serialize)]
pub struct DryRunJson<'a> {
    pub dry_run: bool,
    pub bundle: String,
    #[serde(flatten)]
    pub decision: &'a Decision,
}

/// Execute the pack command
pub fn execute_pack_command(config: &Config, dry_run: bool, json: bool) -> Result<ExitCode> {
    let ctx = RunContext::from_config(config, Local::now());

    if !json {
        print_run_header(&ctx);
    }

    if dry_run {
        let decision = plan(&ctx)?;
        let name = next_bundle_name(&ctx)?;
        if json {
            let output = DryRunJson {
                dry_run: true,
                bundle: name.to_string(),
                decision: &decision,
            };
            println!("{}", emit_decision_json(&output)?);
        } else {
            print_decision(&ctx, &decision, &name);
        }
        return Ok(decision.exit_code());
    }

    let outcome = run(&ctx)?;
    if json {
        println!("{}", emit_outcome_json(&outcome)?);
    } else {
        print_outcome(&ctx, &outcome);
    }
    Ok(outcome.exit_code())
}

fn print_run_header(ctx: &RunContext) {
    println!("Source directory: {}", ctx.source_dir);
    println!("Target directory: {}", ctx.target_dir);
    println!("Completed directory: {}", ctx.completed_dir);
    println!("Maximum size: {} GiB", ctx.max_size_gib);
    println!("Minimum size: {} GiB", ctx.min_size_gib);
    println!("Date prefix: {}", ctx.date_prefix());
    println!(
        "Age cutoff: {}",
        ctx.cutoff().format("%Y-%m-%d %H:%M:%S")
    );
}

fn print_outcome(ctx: &RunContext, outcome: &Outcome) {
    match outcome {
        Outcome::NoFilesSelected => println!("No files selected."),
        Outcome::InsufficientSize { total_bytes } => print_insufficient(ctx, *total_bytes),
        Outcome::Packed(bundle) => {
            println!(
                "Total size: {} bytes ({:.3} GiB)",
                bundle.total_bytes,
                bytes_to_gib(bundle.total_bytes)
            );
            println!("Bundle: {}", bundle.name);
            println!("Archive path: {}", bundle.paths.archive);
            println!("Completed subdirectory: {}", bundle.paths.completed_dir);
            println!("Archive {} created.", bundle.paths.archive);
            println!("Log {} written.", bundle.paths.log);
            println!(
                "Moved {} file(s) to {}.",
                bundle.files.len(),
                bundle.paths.completed_dir
            );
        }
    }
}

fn print_decision(ctx: &RunContext, decision: &Decision, name: &BundleName) {
    match decision {
        Decision::NoFilesSelected => println!("No files selected."),
        Decision::InsufficientSize { total_bytes } => print_insufficient(ctx, *total_bytes),
        Decision::Ready(selection) => {
            println!(
                "Would pack {} file(s), {} bytes ({:.3} GiB), as {}:",
                selection.files.len(),
                selection.total_bytes,
                bytes_to_gib(selection.total_bytes),
                name
            );
            for file in &selection.files {
                println!("  {} ({} bytes)", file.file_name, file.size_bytes);
            }
            println!("Dry run: nothing was written or moved.");
        }
    }
}

fn print_insufficient(ctx: &RunContext, total_bytes: u64) {
    println!(
        "Not enough files collected: {total_bytes} bytes (minimum {} bytes).",
        ctx.window.min_bytes
    );
}
