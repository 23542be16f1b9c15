//! Configuration loading utilities

use crate::{Config, ConfigValidator};
use sentiment_common::{Result, SentimentError};
use std::env;
use std::path::Path;
use tracing::{debug, info};

/// Environment variable naming an explicit configuration file.
pub const CONFIG_PATH_ENV: &str = "SENTIMENT_DASHBOARD_CONFIG";

/// Configuration file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "dashboard.toml";

/// Configuration loader for the dashboard
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from the environment and well-known files.
    ///
    /// Resolution order: the file named by `SENTIMENT_DASHBOARD_CONFIG`,
    /// then `dashboard.toml`, then built-in defaults. Environment overrides
    /// are applied on top and the result is validated.
    pub fn load() -> Result<Config> {
        let mut config = if let Ok(path) = env::var(CONFIG_PATH_ENV) {
            Self::read_file(&path)?
        } else if Path::new(DEFAULT_CONFIG_FILE).exists() {
            Self::read_file(DEFAULT_CONFIG_FILE)?
        } else {
            debug!("No configuration file found, using defaults");
            Config::default()
        };

        Self::apply_env_overrides(&mut config)?;
        ConfigValidator::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific TOML or YAML file, applying
    /// environment overrides and validation.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Config> {
        let mut config = Self::read_file(path)?;
        Self::apply_env_overrides(&mut config)?;
        ConfigValidator::validate(&config)?;
        Ok(config)
    }

    /// Parse configuration text in the given format without touching the
    /// environment.
    pub fn parse(content: &str, format: ConfigFormat) -> Result<Config> {
        let config: Config = match format {
            ConfigFormat::Toml => toml::from_str(content)?,
            ConfigFormat::Yaml => serde_yaml::from_str(content)?,
        };
        Ok(config)
    }

    fn read_file<P: AsRef<Path>>(path: P) -> Result<Config> {
        let path = path.as_ref();
        let format = ConfigFormat::from_path(path)?;
        let content = std::fs::read_to_string(path).map_err(|e| {
            SentimentError::config_with_source(
                format!("Failed to read configuration file {}", path.display()),
                e,
            )
        })?;
        let config = Self::parse(&content, format)?;
        info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Apply environment variable overrides to configuration
    fn apply_env_overrides(config: &mut Config) -> Result<()> {
        if let Ok(title) = env::var("SENTIMENT_DASHBOARD_TITLE") {
            config.chart.title = title;
        }

        if let Ok(top_k) = env::var("SENTIMENT_TOP_K") {
            config.aggregation.top_k = top_k.trim().parse().map_err(|e| {
                SentimentError::config_with_source(
                    "Failed to parse environment variable 'SENTIMENT_TOP_K'",
                    e,
                )
            })?;
        }

        if let Ok(level) = env::var("SENTIMENT_LOG_LEVEL") {
            config.logging.level = level;
        }

        Ok(())
    }
}

/// Supported configuration file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// `.toml`
    Toml,
    /// `.yaml` or `.yml`
    Yaml,
}

impl ConfigFormat {
    /// Picks the format from a file extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Ok(Self::Toml),
            Some("yaml" | "yml") => Ok(Self::Yaml),
            _ => Err(SentimentError::config(format!(
                "Unsupported configuration file type: {}",
                path.display()
            ))),
        }
    }
}
