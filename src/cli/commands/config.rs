//! Config command implementation
//!
//! Prints every configuration key with its effective value and source.

use anyhow::Result;
use serde::Serialize;
use std::collections::BTreeMap;

use super::json_emit::emit_config_json;

use crate::{Config, ExitCode};

#[derive(Debug, Serialize)]
struct ConfigValueJson {
    value: String,
    source: String,
}

/// Execute the config command
pub fn execute_config_command(config: &Config, json: bool) -> Result<ExitCode> {
    let effective = config.effective_config();

    if json {
        let output: BTreeMap<String, ConfigValueJson> = effective
            .into_iter()
            .map(|(key, (value, source))| (key, ConfigValueJson { value, source }))
            .collect();
        println!("{}", emit_config_json(&output)?);
    } else {
        let width = effective.keys().map(String::len).max().unwrap_or(0);
        for (key, (value, source)) in &effective {
            println!("{key:<width$}  {value}  ({source})");
        }
    }
    Ok(ExitCode::SUCCESS)
}
