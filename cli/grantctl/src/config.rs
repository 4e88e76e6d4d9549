//! CLI configuration.
//!
//! Read from `config.json` in the platform config directory, then
//! overridden by `GRANTCTL_*` environment variables.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::output::OutputFormat;

/// Configuration file name.
const CONFIG_FILE: &str = "config.json";

const FORMAT_ENV: &str = "GRANTCTL_FORMAT";
const LOG_LEVEL_ENV: &str = "GRANTCTL_LOG_LEVEL";

/// Get the config directory path.
fn config_dir() -> Result<PathBuf> {
    ProjectDirs::from("com", "snowgrant", "grantctl")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
}

/// CLI configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Output format used when `--format` is not given.
    #[serde(default)]
    pub default_format: OutputFormat,

    /// Log filter used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_format: OutputFormat::default(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Load config from disk and the environment.
    pub fn load() -> Result<Self> {
        let path = config_dir()?.join(CONFIG_FILE);
        let config = Self::load_from(&path)?;
        config.with_overrides(|key| std::env::var(key).ok())
    }

    /// Load config from `path`, or return default if it does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;

        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config from {:?}", path))
    }

    /// Apply environment overrides looked up through `var`.
    fn with_overrides(mut self, var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(format) = var(FORMAT_ENV) {
            self.default_format = format
                .parse()
                .with_context(|| format!("Invalid {FORMAT_ENV}"))?;
        }
        if let Some(level) = var(LOG_LEVEL_ENV) {
            self.log_level = level;
        }
        Ok(self)
    }
}
