//! Selection and packing pipeline for vidbundle
//!
//! A run scans a flat source directory for media files, greedily selects a
//! set whose combined size lands inside a byte window, writes the set into a
//! numbered tar archive, records a plain-text log, and moves the originals
//! into a per-bundle completion directory.
//!
//! Runs assume a single writer per directory set. Two concurrent runs against
//! the same target directory can compute the same bundle name.

// Re-export shared crates to keep `crate::` paths short in engine modules.
pub use vidbundle_config as config;

pub use vidbundle_utils::atomic_write;
pub use vidbundle_utils::error;
pub use vidbundle_utils::exit_codes;

pub mod archive;
pub mod context;
pub mod manifest;
pub mod numbering;
pub mod pipeline;
pub mod relocate;
pub mod scan;
pub mod select;
#[cfg(any(test, feature = "test-utils"))]
pub mod test_support;

pub use context::{RunContext, SizeWindow};
pub use numbering::{BundleName, next_sequence_number};
pub use pipeline::{Outcome, PackedBundle, plan, run};
pub use scan::CandidateFile;
pub use select::{Decision, Selection};
