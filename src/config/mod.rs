#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::adapters::omdb::DEFAULT_BASE_URL;
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_non_empty_string, validate_path, validate_required_field, validate_url, Validate,
};
use toml_config::TomlConfig;

pub const DEFAULT_STORAGE_PATH: &str = "./.shoppies";
pub const DEFAULT_ORIGIN: &str = "http://localhost:3000";
pub const API_KEY_ENV: &str = "OMDB_API_KEY";

/// Values given explicitly (flags or environment); each one wins over the file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub api_key: Option<String>,
    pub api_base_url: Option<String>,
    pub storage_path: Option<String>,
    pub origin: Option<String>,
}

/// Fully resolved settings.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_key: String,
    pub api_base_url: String,
    pub storage_path: String,
    pub origin: String,
}

impl AppConfig {
    /// Explicit value > TOML file > built-in default. The API key has no
    /// default.
    pub fn resolve(overrides: ConfigOverrides, file: Option<TomlConfig>) -> Result<Self> {
        let file = file.unwrap_or_default();

        let api_key = overrides.api_key.or(file.omdb.api_key);
        let api_key = validate_required_field("omdb.api_key", &api_key)?.clone();

        let config = Self {
            api_key,
            api_base_url: overrides
                .api_base_url
                .or(file.omdb.base_url)
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            storage_path: overrides
                .storage_path
                .or(file.storage.path)
                .unwrap_or_else(|| DEFAULT_STORAGE_PATH.to_string()),
            origin: overrides
                .origin
                .or(file.share.origin)
                .unwrap_or_else(|| DEFAULT_ORIGIN.to_string()),
        };

        config.validate()?;
        tracing::debug!(
            "Resolved config: base_url={}, storage={}, origin={}",
            config.api_base_url,
            config.storage_path,
            config.origin
        );
        Ok(config)
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("omdb.api_key", &self.api_key)?;
        validate_url("omdb.base_url", &self.api_base_url)?;
        validate_path("storage.path", &self.storage_path)?;
        validate_url("share.origin", &self.origin)?;
        Ok(())
    }
}

impl ConfigProvider for AppConfig {
    fn api_key(&self) -> &str {
        &self.api_key
    }

    fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    fn storage_path(&self) -> &str {
        &self.storage_path
    }

    fn share_origin(&self) -> &str {
        &self.origin
    }
}
