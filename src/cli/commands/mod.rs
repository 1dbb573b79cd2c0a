//! CLI command implementations (facade).
//!
//! Each handler returns the exit code its outcome maps to; `run.rs` turns
//! errors into reports.

mod config;
mod json_emit;
mod next_name;
mod pack;

pub use config::execute_config_command;
pub use next_name::execute_next_name_command;
pub use pack::execute_pack_command;
