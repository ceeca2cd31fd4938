use crate::core::controller::{DEFAULT_DETAIL_PATH, DEFAULT_SUGGESTION_LIMIT};
use crate::core::ConfigProvider;
use crate::utils::error::{DirectoryError, Result};
use crate::utils::validation::{
    validate_path_prefix, validate_positive_number, validate_timeout, validate_url, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub api: ApiConfig,
    pub listing: Option<ListingConfig>,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingConfig {
    pub page_url: Option<String>,
    pub detail_path: Option<String>,
    pub suggestion_limit: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub verbose: Option<bool>,
    pub json: Option<bool>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(DirectoryError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| DirectoryError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${REHBER_API}) ；未設定的變數原樣保留
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| DirectoryError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn verbose(&self) -> bool {
        self.logging
            .as_ref()
            .and_then(|l| l.verbose)
            .unwrap_or(false)
    }

    pub fn json_logs(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.json).unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn api_base_url(&self) -> &str {
        &self.api.base_url
    }

    fn page_url(&self) -> &str {
        self.listing
            .as_ref()
            .and_then(|l| l.page_url.as_deref())
            .unwrap_or(&self.api.base_url)
    }

    fn detail_path(&self) -> &str {
        self.listing
            .as_ref()
            .and_then(|l| l.detail_path.as_deref())
            .unwrap_or(DEFAULT_DETAIL_PATH)
    }

    fn timeout_seconds(&self) -> Option<u64> {
        self.api.timeout_seconds
    }

    fn suggestion_limit(&self) -> usize {
        self.listing
            .as_ref()
            .and_then(|l| l.suggestion_limit)
            .unwrap_or(DEFAULT_SUGGESTION_LIMIT)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_url("api.base_url", &self.api.base_url)?;
        validate_timeout("api.timeout_seconds", self.api.timeout_seconds)?;
        validate_url("listing.page_url", self.page_url())?;
        validate_path_prefix("listing.detail_path", self.detail_path())?;
        validate_positive_number("listing.suggestion_limit", self.suggestion_limit(), 1)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[api]
base_url = "https://rehber.example.com/"
timeout_seconds = 15

[listing]
page_url = "https://rehber.example.com/liste"
detail_path = "/detay"
suggestion_limit = 5

[logging]
verbose = true
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.api_base_url(), "https://rehber.example.com/");
        assert_eq!(config.page_url(), "https://rehber.example.com/liste");
        assert_eq!(config.timeout_seconds(), Some(15));
        assert_eq!(config.suggestion_limit(), 5);
        assert!(config.verbose());
        assert!(!config.json_logs());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config = TomlConfig::from_toml_str("[api]\nbase_url = \"http://localhost:10000\"\n").unwrap();

        assert_eq!(config.page_url(), "http://localhost:10000");
        assert_eq!(config.detail_path(), "/detay");
        assert_eq!(config.suggestion_limit(), 10);
        assert_eq!(config.timeout_seconds(), None);
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("REHBER_TEST_API", "https://test.rehber.com");

        let config =
            TomlConfig::from_toml_str("[api]\nbase_url = \"${REHBER_TEST_API}\"\n").unwrap();
        assert_eq!(config.api.base_url, "https://test.rehber.com");

        std::env::remove_var("REHBER_TEST_API");
    }

    #[test]
    fn test_config_validation() {
        let config = TomlConfig::from_toml_str(
            "[api]\nbase_url = \"invalid-url\"\n\n[listing]\nsuggestion_limit = 0\n",
        )
        .unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let config = TomlConfig::from_toml_str(
            "[api]\nbase_url = \"http://localhost:10000\"\ntimeout_seconds = 0\n",
        )
        .unwrap();

        let err = config.validate().unwrap_err();
        assert!(matches!(
            err,
            DirectoryError::InvalidConfigValueError { ref field, .. } if field == "api.timeout_seconds"
        ));
    }

    #[test]
    fn test_empty_base_url_is_missing_config() {
        let config = TomlConfig::from_toml_str("[api]\nbase_url = \"\"\n").unwrap();
        assert!(matches!(
            config.validate(),
            Err(DirectoryError::MissingConfigError { .. })
        ));
    }

    #[test]
    fn test_missing_api_section_is_a_parse_error() {
        let result = TomlConfig::from_toml_str("[listing]\nsuggestion_limit = 3\n");
        assert!(matches!(
            result,
            Err(DirectoryError::ConfigValidationError { .. })
        ));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[api]\nbase_url = \"https://api.example.com\"\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.api_base_url(), "https://api.example.com");
    }
}
