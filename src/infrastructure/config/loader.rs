use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use std::path::Path;
use thiserror::Error;

use crate::domain::models::Config;

/// Configuration file read from the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "epic-cloner.yaml";

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required setting {0}. Set JIRA_BASE_URL, JIRA_USER_EMAIL, JIRA_API_TOKEN.")]
    MissingSetting(&'static str),

    #[error("Invalid Jira base URL {0:?}: {1}")]
    InvalidBaseUrl(String, String),

    #[error("Invalid port: {0}. Must be between 1 and 65535")]
    InvalidPort(u16),

    #[error("Invalid timeout_secs: {0}. Must be at least 1")]
    InvalidTimeout(u64),

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
    /// 2. YAML file at `path` (optional)
    /// 3. `EPIC_CLONER_*` environment variables, `__` separating sections
    /// 4. `JIRA_BASE_URL`, `JIRA_USER_EMAIL`, `JIRA_API_TOKEN` and `PORT`
    pub fn load(path: impl AsRef<Path>) -> Result<Config> {
        let config: Config = Self::figment(path.as_ref())
            .extract()
            .context(format!(
                "Failed to load configuration ({})",
                path.as_ref().display()
            ))?;

        Self::validate(&config)?;
        Ok(config)
    }

    fn figment(path: &Path) -> Figment {
        Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path))
            .merge(Env::prefixed("EPIC_CLONER_").split("__"))
            .merge(
                Env::prefixed("JIRA_")
                    .only(&["base_url", "user_email", "api_token"])
                    .map(|key| format!("jira.{}", key.as_str().to_ascii_lowercase()).into()),
            )
            .merge(Env::raw().only(&["port"]).map(|_| "server.port".into()))
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        let jira = &config.jira;
        if jira.base_url.trim().is_empty() {
            return Err(ConfigError::MissingSetting("JIRA_BASE_URL"));
        }
        if jira.user_email.trim().is_empty() {
            return Err(ConfigError::MissingSetting("JIRA_USER_EMAIL"));
        }
        if jira.api_token.trim().is_empty() {
            return Err(ConfigError::MissingSetting("JIRA_API_TOKEN"));
        }

        let url = reqwest::Url::parse(&jira.base_url)
            .map_err(|e| ConfigError::InvalidBaseUrl(jira.base_url.clone(), e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidBaseUrl(
                jira.base_url.clone(),
                format!("unsupported scheme {}", url.scheme()),
            ));
        }

        if jira.timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout(jira.timeout_secs));
        }

        if config.server.port == 0 {
            return Err(ConfigError::InvalidPort(config.server.port));
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.to_lowercase().as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        Ok(())
    }
}
