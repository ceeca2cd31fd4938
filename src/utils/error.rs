use thiserror::Error;

#[derive(Error, Debug)]
pub enum DirectoryError {
    #[error("API request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("URL error: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrlError { url: String, reason: String },

    #[error("Template rendering failed: {0}")]
    TemplateError(#[from] askama::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Configuration,
    Data,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl DirectoryError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            DirectoryError::HttpError(_) => ErrorCategory::Network,
            DirectoryError::UrlError(_) | DirectoryError::InvalidUrlError { .. } => {
                ErrorCategory::Data
            }
            DirectoryError::SerializationError(_) => ErrorCategory::Data,
            DirectoryError::IoError(_) | DirectoryError::TemplateError(_) => ErrorCategory::System,
            DirectoryError::ConfigError { .. }
            | DirectoryError::ConfigValidationError { .. }
            | DirectoryError::InvalidConfigValueError { .. }
            | DirectoryError::MissingConfigError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // 網路錯誤通常重試即可
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Data => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// 給終端使用者看的訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            DirectoryError::HttpError(e) if e.is_timeout() => {
                "The directory API did not answer in time".to_string()
            }
            DirectoryError::HttpError(e) => match e.status() {
                Some(status) => format!("The directory API answered with HTTP {}", status),
                None => "Could not reach the directory API".to_string(),
            },
            DirectoryError::SerializationError(_) => {
                "The directory API returned data in an unexpected shape".to_string()
            }
            DirectoryError::MissingConfigError { field } => {
                format!("Missing configuration value: {}", field)
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => "Check that the backend is running and --api-base-url points at it",
            ErrorCategory::Configuration => "Review the command line flags or the TOML config file",
            ErrorCategory::Data => "Check the listing URL and the API response format",
            ErrorCategory::System => "Check file permissions and available disk space",
        }
    }
}

pub type Result<T> = std::result::Result<T, DirectoryError>;
