//! Next-name command implementation

use anyhow::Result;
use chrono::Local;
use serde::Serialize;

use super::json_emit::emit_next_name_json;

use crate::engine::pipeline::next_bundle_name;
use crate::{Config, ExitCode, RunContext};

#[derive(Debug, Serialize)]
struct NextNameJson {
    bundle: String,
    prefix: String,
    sequence: u32,
    archive: String,
    log: String,
}

/// Execute the next-name command
pub fn execute_next_name_command(config: &Config, json: bool) -> Result<ExitCode> {
    let ctx = RunContext::from_config(config, Local::now());
    let name = next_bundle_name(&ctx)?;

    if json {
        let output = NextNameJson {
            bundle: name.to_string(),
            archive: ctx.target_dir.join(name.archive_file_name()).to_string(),
            log: ctx.target_dir.join(name.log_file_name()).to_string(),
            prefix: name.prefix,
            sequence: name.sequence,
        };
        println!("{}", emit_next_name_json(&output)?);
    } else {
        println!("{name}");
    }
    Ok(ExitCode::SUCCESS)
}
