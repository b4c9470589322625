//! Configuration file
//!
//! Optional JSON file; every field has a default:
//!
//! ```json
//! {
//!   "data_file": "public/data.xml",
//!   "server": { "host": "0.0.0.0", "port": 5000, "cors_origins": [] }
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::args::StorageArgs;
use super::errors::{CliError, CliResult};
use crate::http_server::HttpServerConfig;

/// Service configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Path to the XML data document (default: "public/data.xml")
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,

    /// HTTP server settings
    #[serde(default)]
    pub server: HttpServerConfig,
}

fn default_data_file() -> PathBuf {
    PathBuf::from("public/data.xml")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            server: HttpServerConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            CliError::config_error(format!("Failed to read config {}: {}", path.display(), e))
        })?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    /// Load the configuration named by `args`, or the defaults, then
    /// apply the data file override.
    pub fn resolve(args: &StorageArgs) -> CliResult<Self> {
        let mut config = match &args.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };

        if let Some(data_file) = &args.data_file {
            config.data_file = data_file.clone();
        }

        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> CliResult<()> {
        if self.data_file.as_os_str().is_empty() {
            return Err(CliError::config_error("data_file must not be empty"));
        }

        if self.server.host.trim().is_empty() {
            return Err(CliError::config_error("server.host must not be empty"));
        }

        Ok(())
    }
}
