//! CLI command implementations

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::info;

use super::args::{Command, ConfigArgs, DEFAULT_CONFIG_PATH};
use super::config::Config;
use super::errors::{CliError, CliResult};
use crate::document_store::CheatSheetStore;
use crate::http_server::{CheatSheetState, HttpServer};
use crate::observability::init_logging;

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Serve {
            config,
            host,
            port,
            verbose,
        } => serve(&config, host, port, verbose),
        Command::Init { config } => init(&config).map(|_| ()),
        Command::List { config } => {
            let config = Config::resolve(&config)?;
            list(&config, &mut io::stdout())
        }
    }
}

/// Start the HTTP server
///
/// 1. Resolve configuration and apply command-line overrides
/// 2. Install the log subscriber
/// 3. Create the data directory if absent
/// 4. Serve until Ctrl-C
pub fn serve(
    args: &ConfigArgs,
    host: Option<String>,
    port: Option<u16>,
    verbose: u8,
) -> CliResult<()> {
    let mut config = Config::resolve(args)?;
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }
    config.validate()?;

    let mut logging = config.logging.clone();
    logging.level = logging.level.raised(verbose);
    init_logging(&logging)
        .map_err(|e| CliError::boot_failed(format!("Failed to initialise logging: {}", e)))?;

    let store = CheatSheetStore::open(config.data_path())?;
    info!(data_dir = %store.backend().root().display(), "cheat sheet store ready");

    let state = Arc::new(CheatSheetState::new(store));
    let server = HttpServer::new(config.server.clone(), state);

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::boot_failed(format!("HTTP server failed: {}", e)))
    })
}

/// Create the data directory and write a default configuration file.
///
/// Fails if the configuration file already exists. Returns the path written.
pub fn init(args: &ConfigArgs) -> CliResult<PathBuf> {
    let config_path = args
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));

    if config_path.exists() {
        return Err(CliError::config_error(format!(
            "Config file {} already exists",
            config_path.display()
        )));
    }

    let mut config = Config::default();
    if let Some(dir) = &args.data_dir {
        config.data_dir = dir.to_string_lossy().into_owned();
    }
    config.validate()?;

    CheatSheetStore::open(config.data_path())?;
    write_config(&config_path, &config)?;

    println!(
        "Initialized {} (data directory: {})",
        config_path.display(),
        config.data_dir
    );
    Ok(config_path)
}

fn write_config(path: &Path, config: &Config) -> CliResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let mut json = config.to_json_pretty()?;
    json.push('\n');
    fs::write(path, json).map_err(|e| {
        CliError::io_error(format!("Failed to write config {}: {}", path.display(), e))
    })
}

/// Write the names of all stored cheat sheets, one per line
pub fn list<W: Write>(config: &Config, out: &mut W) -> CliResult<()> {
    let store = CheatSheetStore::open(config.data_path())?;
    for name in store.list_all()? {
        writeln!(out, "{}", name)?;
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_init_creates_config_and_directory() {
        let temp = TempDir::new().unwrap();
        let args = ConfigArgs {
            config: Some(temp.path().join("conf/cheatsheeter.json")),
            data_dir: Some(temp.path().join("sheets")),
        };

        let written = init(&args).unwrap();
        assert!(written.is_file());
        assert!(temp.path().join("sheets").is_dir());

        let config = Config::load(&written).unwrap();
        assert_eq!(config.data_path(), temp.path().join("sheets"));
    }

    #[test]
    fn test_init_refuses_existing_config() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("cheatsheeter.json");
        fs::write(&path, "{}").unwrap();

        let args = ConfigArgs {
            config: Some(path),
            data_dir: Some(temp.path().join("sheets")),
        };
        assert!(init(&args).is_err());
        assert!(!temp.path().join("sheets").exists());
    }

    #[test]
    fn test_list_prints_sorted_names() {
        let temp = TempDir::new().unwrap();
        let config = Config {
            data_dir: temp.path().to_string_lossy().into_owned(),
            ..Default::default()
        };

        let store = CheatSheetStore::open(temp.path()).unwrap();
        for name in ["vim", "git", "docker"] {
            let content = json!({"columns": 1}).as_object().cloned().unwrap();
            store.save(name, content).unwrap();
        }

        let mut out = Vec::new();
        list(&config, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "docker\ngit\nvim\n");
    }
}
