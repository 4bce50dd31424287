use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use thiserror::Error;

use crate::domain::models::Config;

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Collection name cannot be empty")]
    EmptyCollectionName,

    #[error("Chroma host cannot be empty")]
    EmptyChromaHost,

    #[error("Document path cannot be empty")]
    EmptyDocumentPath,

    #[error("Invalid chunking configuration: {0}")]
    InvalidChunking(String),

    #[error("Invalid top_k: {0}. Must be at least 1")]
    InvalidTopK(usize),

    #[error("Invalid max_tokens: {0}. Must be at least 1")]
    InvalidMaxTokens(u32),

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. docask.yaml in the working directory
    /// 3. Environment variables (`DOCASK_*` prefix, `__` separator)
    pub fn load() -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file("docask.yaml"))
            .merge(Env::prefixed("DOCASK_").split("__"))
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file, still honoring
    /// environment overrides.
    pub fn load_from_file(path: impl AsRef<std::path::Path>) -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path.as_ref()))
            .merge(Env::prefixed("DOCASK_").split("__"))
            .extract()
            .context(format!(
                "Failed to load config from {}",
                path.as_ref().display()
            ))?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        if config.collection.is_empty() {
            return Err(ConfigError::EmptyCollectionName);
        }

        if config.chroma.host.is_empty() {
            return Err(ConfigError::EmptyChromaHost);
        }

        if config.document.path.is_empty() {
            return Err(ConfigError::EmptyDocumentPath);
        }

        config
            .chunking
            .validate()
            .map_err(ConfigError::InvalidChunking)?;

        if config.query.top_k == 0 {
            return Err(ConfigError::InvalidTopK(config.query.top_k));
        }

        if config.anthropic.max_tokens == 0 {
            return Err(ConfigError::InvalidMaxTokens(config.anthropic.max_tokens));
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        Ok(())
    }
}
