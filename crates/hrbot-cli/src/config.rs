//! `hrbot.toml` loading.
//!
//! Every table and field is optional; a missing file yields the defaults.

use hrbot_agent::ModelConfig;
use hrbot_memory::{EmbeddingConfig, SearchConfig};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct HrbotConfig {
    /// Roster JSON document.
    #[serde(default = "default_data_path")]
    pub data_path: PathBuf,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub embedding: EmbeddingConfig,
    #[serde(default)]
    pub search: SearchConfig,
}

/// Listen address for `hrbot serve`.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for HrbotConfig {
    fn default() -> Self {
        Self {
            data_path: default_data_path(),
            server: ServerConfig::default(),
            model: ModelConfig::default(),
            embedding: EmbeddingConfig::default(),
            search: SearchConfig::default(),
        }
    }
}

fn default_data_path() -> PathBuf {
    PathBuf::from("data/employees.json")
}
fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    8000
}

impl HrbotConfig {
    /// Parse a TOML document.
    pub fn from_toml(data: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(data)?)
    }

    /// Read `path`, falling back to defaults when it does not exist.
    pub async fn load(path: &Path) -> anyhow::Result<Self> {
        match tokio::fs::read_to_string(path).await {
            Ok(data) => Self::from_toml(&data).map_err(|e| {
                anyhow::anyhow!("Invalid config file '{}': {}", path.display(), e)
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!(path = %path.display(), "Config file not found, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(anyhow::anyhow!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            )),
        }
    }
}
