//! ontoapp CLI - accounts and taxonomies from the terminal

mod commands;
mod config;
mod logging;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use commands::{App, Commands};
use std::path::PathBuf;
use tracing::{Level, error, info};

#[derive(Parser)]
#[command(name = "ontoapp")]
#[command(about = "Manage ontoapp accounts and taxonomies")]
#[command(version)]
struct Cli {
    /// Set logging level
    #[arg(short = 'l', long, global = true, default_value = "warn")]
    log_level: LogLevel,

    /// Data directory for the session, config file and logs
    #[arg(short = 'd', long, global = true)]
    data_dir: Option<PathBuf>,

    /// Configuration file (defaults to <data-dir>/config.toml)
    #[arg(short = 'c', long, global = true)]
    config: Option<PathBuf>,

    /// Request timeout in seconds (0 = no timeout); overrides the config file
    #[arg(short = 't', long, global = true)]
    timeout: Option<u64>,

    /// Disable file logging (only log to stderr)
    #[arg(long, global = true)]
    no_file_log: bool,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let data_dir = config::resolve_data_dir(cli.data_dir);
    logging::init_logging(cli.log_level.into(), &data_dir, cli.no_file_log)?;

    let mut settings = config::CliConfig::load(cli.config.as_deref(), &data_dir)?;
    if let Some(timeout) = cli.timeout {
        settings.timeout_secs = timeout;
    }
    info!(base_url = %settings.base_url, "Starting ontoapp CLI");

    let app = App::new(&settings, &data_dir)?;
    match cli.command.execute(&app).await {
        Ok(()) => {
            info!("Command completed successfully");
        }
        Err(e) => {
            error!("Command failed: {e}");
            commands::report_failure(&app, &e);
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }

    Ok(())
}

#[derive(Clone, Debug, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for Level {
    fn from(log_level: LogLevel) -> Self {
        match log_level {
            LogLevel::Error => Level::ERROR,
            LogLevel::Warn => Level::WARN,
            LogLevel::Info => Level::INFO,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Trace => Level::TRACE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use commands::TaxonomyCommands;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from([
            "ontoapp",
            "whoami",
            "--data-dir",
            "/tmp/onto",
            "--timeout",
            "0",
            "--no-file-log",
        ])
        .unwrap();

        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/onto")));
        assert_eq!(cli.timeout, Some(0));
        assert!(cli.no_file_log);
        assert!(matches!(cli.command, Commands::Whoami));
    }

    #[test]
    fn taxonomy_delete_keeps_raw_id() {
        let cli = Cli::try_parse_from([
            "ontoapp", "taxonomy", "delete", "12", "--password", "pw",
        ])
        .unwrap();

        match cli.command {
            Commands::Taxonomy {
                command: TaxonomyCommands::Delete { id, password },
            } => {
                assert_eq!(id, "12");
                assert_eq!(password, "pw");
            }
            _ => panic!("expected taxonomy delete"),
        }
    }

    #[test]
    fn taxonomy_get_requires_numeric_id() {
        assert!(Cli::try_parse_from(["ontoapp", "taxonomy", "get", "abc"]).is_err());
    }
}
