//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the aign binary.

mod commands;
mod run;

pub use commands::{Cli, Commands};
pub use run::{print_config, run_step, show_memory};
