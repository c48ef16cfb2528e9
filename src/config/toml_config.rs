use crate::core::cart_store::DEFAULT_CART_KEY;
use crate::core::ConfigProvider;
use crate::utils::error::{CartError, Result};
use crate::utils::validation::{validate_path, validate_storage_key, validate_url, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartConfig {
    pub catalog: CatalogConfig,
    pub storage: StorageConfig,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    pub base_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub path: String,
    #[serde(default = "default_key")]
    pub key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub json: Option<bool>,
}

fn default_key() -> String {
    DEFAULT_CART_KEY.to_string()
}

impl CartConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(CartError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| CartError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the variable's value; unknown variables stay as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| CartError::ConfigError {
            message: format!("env pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures<'_>| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn log_level(&self) -> Option<&str> {
        self.logging.as_ref().and_then(|l| l.level.as_deref())
    }

    pub fn json_logs(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.json).unwrap_or(false)
    }
}

impl ConfigProvider for CartConfig {
    fn catalog_url(&self) -> &str {
        &self.catalog.base_url
    }

    fn storage_path(&self) -> &str {
        &self.storage.path
    }

    fn storage_key(&self) -> &str {
        &self.storage.key
    }
}

impl Validate for CartConfig {
    fn validate(&self) -> Result<()> {
        validate_url("catalog.base_url", &self.catalog.base_url)?;
        validate_path("storage.path", &self.storage.path)?;
        validate_storage_key("storage.key", &self.storage.key)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_basic_toml_config() {
        let toml_content = r#"
[catalog]
base_url = "http://localhost:3333"

[storage]
path = "./cart.json"

[logging]
level = "debug"
"#;

        let config = CartConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.catalog_url(), "http://localhost:3333");
        assert_eq!(config.storage_key(), DEFAULT_CART_KEY);
        assert_eq!(config.log_level(), Some("debug"));
        assert!(!config.json_logs());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("CART_TEST_CATALOG_URL", "https://catalog.example.com");

        let toml_content = r#"
[catalog]
base_url = "${CART_TEST_CATALOG_URL}"

[storage]
path = "./cart.json"
key = "${CART_TEST_UNSET_KEY}"
"#;

        let config = CartConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.catalog.base_url, "https://catalog.example.com");
        assert_eq!(config.storage.key, "${CART_TEST_UNSET_KEY}");

        std::env::remove_var("CART_TEST_CATALOG_URL");
    }

    #[test]
    fn test_config_validation() {
        let toml_content = r#"
[catalog]
base_url = "invalid-url"

[storage]
path = "./cart.json"
"#;

        let config = CartConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_section_is_a_config_error() {
        let result = CartConfig::from_toml_str("[catalog]\nbase_url = \"http://x\"\n");
        assert!(matches!(result, Err(CartError::ConfigError { .. })));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[catalog]
base_url = "https://api.example.com"

[storage]
path = "/var/lib/cart/storage.json"
key = "@Shop:cart"
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = CartConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.storage_key(), "@Shop:cart");
    }
}
