//! CLI module for cheatsheeter
//!
//! Provides command-line interface for:
//! - serve: Run the HTTP API
//! - init: Create data directory and default config
//! - list: Print stored cheat sheet names

mod args;
mod commands;
mod config;
mod errors;

pub use args::{Cli, Command, ConfigArgs, DEFAULT_CONFIG_PATH};
pub use commands::{init, list, run, run_command, serve};
pub use config::Config;
pub use errors::{CliError, CliErrorCode, CliResult};
