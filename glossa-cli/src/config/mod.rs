//! Configuration module

use crate::error::CliError;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// CLI configuration structure
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
pub struct CliConfig {
    /// Processing configuration
    #[serde(default)]
    pub processing: ProcessingConfig,

    /// Statistics configuration
    #[serde(default)]
    pub stats: StatsConfig,

    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

/// Processing-related configuration
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct ProcessingConfig {
    /// Language used when `--language` is not given
    pub default_language: String,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            default_language: "en".to_string(),
        }
    }
}

/// Statistics-related configuration
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct StatsConfig {
    /// Target chunk size in tokens
    pub chunk_tokens: usize,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            chunk_tokens: glossa_engine::ChunkPolicy::default().target_tokens,
        }
    }
}

/// Output-related configuration
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format used when `--format` is not given
    pub default_format: String,

    /// Pretty print JSON output
    pub pretty_json: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            default_format: "text".to_string(),
            pretty_json: true,
        }
    }
}

impl CliConfig {
    /// Load a configuration file, or the defaults when no path is given
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: CliConfig = toml::from_str(&content)
            .map_err(|e| CliError::ConfigError(format!("{} ({})", e, path.display())))?;

        if config.stats.chunk_tokens == 0 {
            return Err(CliError::ConfigError("stats.chunk_tokens must be positive".to_string()).into());
        }
        log::debug!("Loaded config from {}: {:?}", path.display(), config);
        Ok(config)
    }
}
