//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the taleforge binary.

mod commands;
mod config;
mod extract;

pub use commands::{Cli, Commands};
pub use config::show_config;
pub use extract::handle_extract;
