//! vidbundle - pack aged video files into numbered tar bundles
//!
//! vidbundle watches a flat directory of media files. Each run picks files
//! older than an age cutoff, greedily, until their combined size lands inside
//! a size window, then:
//!
//! - writes them into `{target}/{YYYYMMDD}-{NNNN}.tar`, each under its bare name
//! - writes a plain-text log next to the archive
//! - moves the originals into `{completed}/{YYYYMMDD}-{NNNN}/`
//!
//! Sequence numbers continue from the archives already present for the day,
//! so repeated runs never reuse a name.
//!
//! vidbundle can be used in two ways:
//! - **CLI**: `vidbundle pack`, `vidbundle pack --dry-run`, `vidbundle next-name`,
//!   `vidbundle config`
//! - **Library**: build a [`Config`], turn it into a [`RunContext`], and call
//!   [`plan`] or [`run`]
//!
//! # Quick Start (Library)
//!
//! ```rust,no_run
//! use chrono::Local;
//! use vidbundle::{Config, Outcome, RunContext, run};
//!
//! let config = Config::builder()
//!     .source_dir("/storage/incoming")
//!     .target_dir("/storage/incoming/0_TAR")
//!     .completed_dir("/storage/incoming/0_COMPLETED")
//!     .size_window_gib(4.2, 4.7)
//!     .build()?;
//!
//! let ctx = RunContext::from_config(&config, Local::now());
//! match run(&ctx)? {
//!     Outcome::Packed(bundle) => println!("packed {}", bundle.name),
//!     other => println!("nothing packed: {other:?}"),
//! }
//! # Ok::<(), vidbundle::BundleError>(())
//! ```
//!
//! # Concurrency
//!
//! Runs are single-threaded and take no locks. Two runs against the same
//! target directory at the same time may pick the same bundle name; callers
//! must serialize them.
//!
//! # JSON Contracts
//!
//! `--json` output is canonical JSON (JCS, RFC 8785). Use [`emit_jcs`] for the
//! same form in your own integrations.

// ============================================================================
// Stable Public API
// ============================================================================

pub use vidbundle_config::{CliArgs, Config, ConfigBuilder, ConfigSource, ListingOrder};
pub use vidbundle_engine::{
    BundleName, CandidateFile, Decision, Outcome, PackedBundle, RunContext, Selection,
    SizeWindow, next_sequence_number, plan, run,
};
pub use vidbundle_utils::canonicalization::emit_jcs;
pub use vidbundle_utils::error::{BundleError, ConfigError, UserFriendlyError};
pub use vidbundle_utils::exit_codes::ExitCode;

// ============================================================================
// Internal modules (not covered by semver)
// ============================================================================

#[doc(hidden)]
pub use vidbundle_engine as engine;
#[doc(hidden)]
pub use vidbundle_utils::logging;

#[doc(hidden)]
pub mod cli;
