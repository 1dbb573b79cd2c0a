//! Configuration for vidbundle
//!
//! Hierarchical configuration with discovery and precedence:
//! CLI > config file > built-in defaults.

mod config;

pub use config::*;
pub use vidbundle_utils::error;
