//! CLI argument definitions and parsing structures
//!
//! This module defines the command-line interface structure using clap,
//! including the main `Cli` struct and the subcommand enum.

use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::{CliArgs, ListingOrder};

/// vidbundle - pack aged video files into numbered tar bundles
#[derive(Parser, Debug)]
#[command(name = "vidbundle")]
#[command(about = "Pack aged video files into size-bounded, numbered tar bundles")]
#[command(long_about = r#"
vidbundle scans a source directory for media files, greedily selects files older
than the age cutoff until their combined size falls inside the size window, packs
them into {YYYYMMDD}-{NNNN}.tar in the target directory, writes a matching .log,
and moves the originals into {completed-dir}/{YYYYMMDD}-{NNNN}/.

EXAMPLES:
  # Pack one bundle with the configured directories
  vidbundle pack

  # See what would be packed without touching anything
  vidbundle pack --dry-run

  # Override the size window for one run
  vidbundle --min-size-gib 4.2 --max-size-gib 4.7 pack

  # Show the name the next bundle would get
  vidbundle next-name

EXIT CODES:
  0   bundle packed (or informational command succeeded)
  2   invalid arguments or configuration
  3   no eligible file fit under the maximum size
  4   selected files stayed below the minimum size
  74  filesystem failure

CONFIGURATION:
  Configuration is loaded with precedence: CLI flags > config file > defaults
  Config file is discovered by searching upward from CWD for .vidbundle/config.toml
  Use --config to specify an explicit config file path

Only one vidbundle run may use a given set of directories at a time.
"#)]
#[command(version)]
pub struct Cli {
    /// Path to configuration file (overrides discovery)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Directory scanned for media files
    #[arg(long, global = true)]
    pub source_dir: Option<Utf8PathBuf>,

    /// Directory receiving archives and logs
    #[arg(long, global = true)]
    pub target_dir: Option<Utf8PathBuf>,

    /// Directory receiving one subdirectory of moved originals per bundle
    #[arg(long, global = true)]
    pub completed_dir: Option<Utf8PathBuf>,

    /// Upper bound of the size window in GiB (inclusive)
    #[arg(long, global = true)]
    pub max_size_gib: Option<f64>,

    /// Lower bound of the size window in GiB (inclusive)
    #[arg(long, global = true)]
    pub min_size_gib: Option<f64>,

    /// Files modified within this many hours are left alone
    #[arg(long, global = true)]
    pub age_cutoff_hours: Option<u64>,

    /// Media file extension (with or without leading dot)
    #[arg(long, global = true)]
    pub extension: Option<String>,

    /// Candidate order for selection: name, mtime, or listing
    #[arg(long, global = true)]
    pub order: Option<ListingOrder>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Select, archive, log, and move one bundle
    ///
    /// Prints the configuration in effect and each decision. Exits 3 when
    /// nothing was selected and 4 when the selection stayed below the minimum.
    Pack {
        /// Scan and select only; create, write, and move nothing
        #[arg(long)]
        dry_run: bool,

        /// Output the outcome as canonical JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the bundle name the next run today would use
    NextName {
        /// Output as canonical JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the effective configuration and where each value came from
    Config {
        /// Output as canonical JSON
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    /// Configuration overrides carried by the global flags.
    #[must_use]
    pub fn cli_args(&self) -> CliArgs {
        CliArgs {
            config_path: self.config.clone(),
            source_dir: self.source_dir.clone(),
            target_dir: self.target_dir.clone(),
            completed_dir: self.completed_dir.clone(),
            extension: self.extension.clone(),
            max_size_gib: self.max_size_gib,
            min_size_gib: self.min_size_gib,
            age_cutoff_hours: self.age_cutoff_hours,
            order: self.order,
        }
    }
}

/// Build the clap command (for completions and tests)
#[must_use]
pub fn build_cli() -> clap::Command {
    <Cli as clap::CommandFactory>::command()
}
