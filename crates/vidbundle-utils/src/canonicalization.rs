//! Canonical JSON emission for machine-readable CLI output
//!
//! `--json` output is emitted in JCS (RFC 8785) canonical form so that two runs
//! reporting the same outcome print byte-identical JSON.

use anyhow::{Context, Result};
use serde::Serialize;

/// Emit a serializable value as JCS (RFC 8785) canonical JSON.
///
/// # Example
///
/// ```rust
/// use serde::Serialize;
/// use vidbundle_utils::canonicalization::emit_jcs;
///
/// #[derive(Serialize)]
/// struct Summary {
///     total_bytes: u64,
///     bundle: String,
/// }
///
/// let json = emit_jcs(&Summary { total_bytes: 3, bundle: "20240305-0001".into() }).unwrap();
/// assert_eq!(json, r#"{"bundle":"20240305-0001","total_bytes":3}"#);
/// ```
pub fn emit_jcs<T: Serialize>(value: &T) -> Result<String> {
    let json_value =
        serde_json::to_value(value).with_context(|| "Failed to serialize value to JSON")?;
    let json_bytes = serde_json_canonicalizer::to_vec(&json_value)
        .with_context(|| "Failed to canonicalize JSON using JCS")?;
    String::from_utf8(json_bytes).with_context(|| "JCS output contained invalid UTF-8")
}
