//! CLI command implementations
//!
//! This module re-exports all CLI command functions.

pub mod config_management;
mod link_management;
mod logs;

pub use config_management::{config_generate, run_config_command};
pub use link_management::*;
pub use logs::show_logs;
