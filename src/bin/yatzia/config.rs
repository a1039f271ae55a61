use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Optional TOML configuration (`yatzia.toml`); command-line flags and the
/// environment take precedence over anything here.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub redis: RedisSettings,
    #[serde(default)]
    pub yatzia: AppSettings,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RedisSettings {
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppSettings {
    pub prefix: Option<String>,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("failed to parse config file {}", path.display()))
    }
}
