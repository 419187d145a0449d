//! CLI configuration utilities

use anyhow::Result;
use ontoapp_http::client::DEFAULT_BASE_URL;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the optional config file inside the data directory
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Name of the file holding the persisted session tokens
pub const SESSION_FILE_NAME: &str = "session.json";

/// Client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CliConfig {
    /// Backend base URL
    pub base_url: String,

    /// Per-request timeout in seconds (0 = no timeout)
    pub timeout_secs: u64,

    /// Override for the HTTP user agent
    pub user_agent: Option<String>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
            user_agent: None,
        }
    }
}

impl CliConfig {
    /// Load configuration: defaults, then the config file, then `ONTOAPP_*`
    /// environment variables
    ///
    /// An explicitly given file must exist; the default one in the data
    /// directory is optional.
    pub fn load(explicit: Option<&Path>, data_dir: &Path) -> Result<Self> {
        let defaults = Self::default();

        let (file, required) = match explicit {
            Some(path) => (path.to_path_buf(), true),
            None => (data_dir.join(CONFIG_FILE_NAME), false),
        };

        let settings = config::Config::builder()
            .set_default("base_url", defaults.base_url)?
            .set_default("timeout_secs", defaults.timeout_secs)?
            .add_source(config::File::from(file).required(required))
            .add_source(config::Environment::with_prefix("ONTOAPP"))
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}

/// Data directory: flag, then `ONTOAPP_STATE_DIR`, then the platform data dir
pub fn resolve_data_dir(data_dir: Option<PathBuf>) -> PathBuf {
    data_dir.unwrap_or_else(|| {
        if let Ok(dir) = std::env::var("ONTOAPP_STATE_DIR") {
            PathBuf::from(dir)
        } else {
            dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("ontoapp")
        }
    })
}
