use crate::utils::error::{Result, ShoppiesError};
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Optional settings file. Every section and key may be left out.
///
/// ```toml
/// [omdb]
/// api_key = "${OMDB_API_KEY}"
/// base_url = "https://www.omdbapi.com/"
///
/// [storage]
/// path = "~/.local/share/shoppies"
///
/// [share]
/// origin = "https://shoppies.example"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub omdb: OmdbSection,
    #[serde(default)]
    pub storage: StorageSection,
    #[serde(default)]
    pub share: ShareSection,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OmdbSection {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageSection {
    pub path: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShareSection {
    pub origin: Option<String>,
}

impl TomlConfig {
    /// Loads settings from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ShoppiesError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// Parses settings from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ShoppiesError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Substitutes environment variables such as `${OMDB_API_KEY}`.
    ///
    /// Unset variables are left as written so the error points at them.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ShoppiesError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_is_all_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert!(config.omdb.api_key.is_none());
        assert!(config.storage.path.is_none());
        assert!(config.share.origin.is_none());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("SHOPPIES_TEST_TOML_KEY", "from-env");
        let config = TomlConfig::from_toml_str(
            r#"
[omdb]
api_key = "${SHOPPIES_TEST_TOML_KEY}"

[share]
origin = "https://shoppies.example"
"#,
        )
        .unwrap();

        assert_eq!(config.omdb.api_key.as_deref(), Some("from-env"));
        assert_eq!(config.share.origin.as_deref(), Some("https://shoppies.example"));
    }

    #[test]
    fn test_unset_env_var_is_left_verbatim() {
        let config = TomlConfig::from_toml_str(
            r#"
[omdb]
api_key = "${SHOPPIES_TEST_SURELY_UNSET}"
"#,
        )
        .unwrap();
        assert_eq!(
            config.omdb.api_key.as_deref(),
            Some("${SHOPPIES_TEST_SURELY_UNSET}")
        );
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let result = TomlConfig::from_toml_str("[omdb\napi_key = 1");
        assert!(matches!(result, Err(ShoppiesError::ConfigError { .. })));
    }
}
