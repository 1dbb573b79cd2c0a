//! JSON emit functions for CLI output
//!
//! All `--json` output is canonical JSON (JCS, RFC 8785) so scripts can diff
//! and hash it.

use anyhow::{Context, Result};
use serde::Serialize;

use crate::{Outcome, emit_jcs};

/// Emit a pack outcome as canonical JSON
pub fn emit_outcome_json(outcome: &Outcome) -> Result<String> {
    emit_jcs(outcome).context("Failed to emit pack outcome JSON")
}

/// Emit a dry-run decision as canonical JSON
pub fn emit_decision_json<T: Serialize>(output: &T) -> Result<String> {
    emit_jcs(output).context("Failed to emit dry-run JSON")
}

/// Emit the next bundle name as canonical JSON
pub fn emit_next_name_json<T: Serialize>(output: &T) -> Result<String> {
    emit_jcs(output).context("Failed to emit next-name JSON")
}

/// Emit the effective configuration as canonical JSON
pub fn emit_config_json<T: Serialize>(output: &T) -> Result<String> {
    emit_jcs(output).context("Failed to emit config JSON")
}
