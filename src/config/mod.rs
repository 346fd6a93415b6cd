use crate::error::AskbotError;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::num::NonZeroUsize;
use std::path::PathBuf;

/// Defaults read from the `[askbot]` table of the config file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AskbotSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub askbot: AskbotSection,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    config_file: PathBuf,
}

impl AppConfig {
    pub fn new() -> Result<Self> {
        let proj_dirs =
            ProjectDirs::from("", "", "askbot").context("Failed to get project directories")?;

        let config_file = proj_dirs.config_dir().join("config.toml");

        Ok(AppConfig { config_file })
    }

    pub fn at(config_file: impl Into<PathBuf>) -> Self {
        AppConfig {
            config_file: config_file.into(),
        }
    }

    /// Reads the config file; a missing file is not an error.
    pub fn load(&self) -> Result<Option<Config>> {
        if !self.config_file.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&self.config_file).with_context(|| {
            format!("Failed to read config file {}", self.config_file.display())
        })?;

        let config: Config = toml::from_str(&contents).with_context(|| {
            format!("Failed to parse config file {}", self.config_file.display())
        })?;

        Ok(Some(config))
    }

    pub fn config_file_path(&self) -> &PathBuf {
        &self.config_file
    }
}

/// Endpoint and limit after merging command-line flags over the config file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Settings {
    pub endpoint: Option<String>,
    pub limit: Option<NonZeroUsize>,
}

impl Settings {
    pub fn resolve(
        endpoint: Option<String>,
        limit: Option<NonZeroUsize>,
        file: Option<Config>,
    ) -> std::result::Result<Self, AskbotError> {
        let section = file.map(|c| c.askbot).unwrap_or_default();

        let limit = match limit {
            Some(limit) => Some(limit),
            None => section
                .limit
                .map(|n| NonZeroUsize::new(n).ok_or_else(|| AskbotError::invalid("limit", "0")))
                .transpose()?,
        };

        Ok(Settings {
            endpoint: endpoint.or(section.endpoint),
            limit,
        })
    }
}
