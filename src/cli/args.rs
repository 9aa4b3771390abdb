//! CLI argument definitions using clap
//!
//! Commands:
//! - cheatsheeter serve [--config <path>] [--data-dir <dir>] [--host <host>] [--port <port>]
//! - cheatsheeter init [--config <path>] [--data-dir <dir>]
//! - cheatsheeter list [--config <path>] [--data-dir <dir>]

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Default configuration file, used when `--config` is not given
pub const DEFAULT_CONFIG_PATH: &str = "./cheatsheeter.json";

/// Cheatsheeter - store and serve cheat sheets as YAML files
#[derive(Parser, Debug)]
#[command(name = "cheatsheeter")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Options shared by every command
#[derive(Args, Debug, Clone, Default)]
pub struct ConfigArgs {
    /// Path to configuration file [default: ./cheatsheeter.json]
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Directory holding the cheat sheet YAML files
    #[arg(long)]
    pub data_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP server
    Serve {
        #[command(flatten)]
        config: ConfigArgs,

        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to
        #[arg(long)]
        port: Option<u16>,

        /// Increase log verbosity (-v debug, -vv trace)
        #[arg(short, long, action = clap::ArgAction::Count)]
        verbose: u8,
    },

    /// Create the data directory and a default configuration file
    Init {
        #[command(flatten)]
        config: ConfigArgs,
    },

    /// Print the names of all stored cheat sheets
    List {
        #[command(flatten)]
        config: ConfigArgs,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
