use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs as async_fs;
use validator::Validate;

use crate::common::error::SumanError;
use crate::domain::entities::Config;

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = "config.yaml";

/// Config store related errors
#[derive(Debug, Error)]
pub enum ConfigStoreError {
    #[error("Configuration file not found at path: {0}")]
    ConfigFileNotFound(String),

    #[error("Configuration file read failed: {path}: {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("YAML parsing failed: {0}")]
    YamlParsingFailed(#[from] serde_yaml::Error),

    #[error("Configuration validation failed: {0}")]
    ValidationFailed(#[from] validator::ValidationErrors),
}

impl From<ConfigStoreError> for SumanError {
    fn from(error: ConfigStoreError) -> Self {
        SumanError::config_error_with_source(error.to_string(), error)
    }
}

/// Loads and validates the YAML configuration file
#[derive(Debug, Clone, Default)]
pub struct ConfigStore {
    /// Password taken from the command line / environment instead of the file
    password_override: Option<String>,
}

impl ConfigStore {
    /// Create a new config store
    pub fn new() -> Self {
        Self::default()
    }

    /// Use this password instead of the one in the file
    pub fn with_password_override(mut self, password: Option<String>) -> Self {
        self.password_override = password.filter(|p| !p.is_empty());
        self
    }

    /// Read, parse and validate the configuration file
    pub async fn read_config<P: AsRef<Path>>(&self, path: P) -> Result<Config, ConfigStoreError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigStoreError::ConfigFileNotFound(
                path.display().to_string(),
            ));
        }

        let content = async_fs::read_to_string(path)
            .await
            .map_err(|source| ConfigStoreError::ReadFailed {
                path: path.display().to_string(),
                source,
            })?;

        self.parse_config(&content)
    }

    /// Parse and validate configuration from a YAML string
    pub fn parse_config(&self, content: &str) -> Result<Config, ConfigStoreError> {
        let mut config: Config = serde_yaml::from_str(content)?;

        if let Some(password) = &self.password_override {
            config.suman.password = password.clone();
        }

        config.validate()?;

        tracing::debug!(
            server = %config.suman.server,
            user = %config.suman.user,
            timeout = config.suman.timeout,
            retry_count = config.suman.retry_count,
            "Configuration loaded"
        );

        Ok(config)
    }

    /// Resolve the configuration path, falling back to the default file name
    pub fn resolve_path(path: Option<&str>) -> PathBuf {
        path.map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
    }
}
