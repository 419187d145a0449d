use anyhow::Result;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use tracing::Level;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize logging for the CLI
///
/// Logs go to stderr so command output on stdout stays machine-readable.
pub fn init_logging(log_level: Level, data_dir: &Path, no_file_log: bool) -> Result<()> {
    if no_file_log {
        init_stderr_logging(log_level)
    } else {
        init_file_logging(log_level, data_dir)
    }
}

fn env_filter(level: Level) -> EnvFilter {
    let level_str = level.as_str().to_lowercase();
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("ontoapp={level_str},ontoapp_frontend_common={level_str},ontoapp_http={level_str}")
            .into()
    })
}

fn init_file_logging(level: Level, data_dir: &Path) -> Result<()> {
    let log_file_path = log_file_path(data_dir);
    if let Some(parent) = log_file_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let log_file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(&log_file_path)?;

    tracing_subscriber::registry()
        .with(env_filter(level))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(log_file)
                .with_ansi(false),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(true),
        )
        .init();

    Ok(())
}

fn init_stderr_logging(level: Level) -> Result<()> {
    tracing_subscriber::registry()
        .with(env_filter(level))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    Ok(())
}

fn log_file_path(data_dir: &Path) -> PathBuf {
    data_dir.join("cli.log")
}
