//! Centralized error types for LazyArt.
//!
//! Fetch failures inside the table never reach this type; they are logged
//! and the table keeps what it had. `AppError` covers what can stop the
//! application: bad configuration, an unusable client, or a terminal that
//! cannot be set up.

use thiserror::Error;

use crate::api::error::ApiError;
use crate::config::ConfigError;

/// The main application error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration-related errors.
    #[error("{0}")]
    Config(#[from] ConfigError),

    /// API-related errors.
    #[error("{0}")]
    Api(#[from] ApiError),

    /// IO errors (file system, etc.).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Terminal-related errors.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// Generic errors with a message.
    #[error("{0}")]
    Other(String),
}

impl AppError {
    /// Create a terminal error.
    pub fn terminal(msg: impl Into<String>) -> Self {
        AppError::Terminal(msg.into())
    }

    /// Create a generic error.
    pub fn other(msg: impl Into<String>) -> Self {
        AppError::Other(msg.into())
    }

    /// Get a user-friendly message for display.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Config(e) => match e {
                ConfigError::NoConfigDir => {
                    "Could not find the configuration directory. Use --config to pass a file."
                        .to_string()
                }
                ConfigError::CreateDirError(_) => {
                    "Could not create the configuration directory. Check file permissions."
                        .to_string()
                }
                ConfigError::ReadError(_) => {
                    "Could not read the configuration file. Check that it is readable.".to_string()
                }
                ConfigError::WriteError(_) => {
                    "Could not save the configuration. Check file permissions.".to_string()
                }
                ConfigError::ParseError(_) => {
                    "The configuration file is not valid TOML.".to_string()
                }
                ConfigError::SerializeError(_) => {
                    "Could not save the configuration. Internal error.".to_string()
                }
                ConfigError::ValidationError(msg) => format!("Configuration error: {}", msg),
            },
            AppError::Api(e) => match e {
                ApiError::NotFound(resource) => format!("'{}' was not found.", resource),
                ApiError::RateLimited => {
                    "Too many requests. Please wait a moment and try again.".to_string()
                }
                ApiError::ServerError(_) => {
                    "The catalog server returned an error. Please try again later.".to_string()
                }
                ApiError::Network(_) => {
                    "Connection failed. Please check your internet connection.".to_string()
                }
                ApiError::InvalidUrl(url) => format!("Invalid catalog URL: {}", url),
                ApiError::InvalidResponse(_) => {
                    "Unexpected response from the catalog. Please try again.".to_string()
                }
            },
            AppError::Io(_) => "A file operation failed. Please check file permissions.".to_string(),
            AppError::Terminal(msg) => format!("Terminal error: {}", msg),
            AppError::Other(msg) => msg.clone(),
        }
    }

    /// Check if this error prevents the application from starting.
    pub fn is_critical(&self) -> bool {
        matches!(
            self,
            AppError::Config(_) | AppError::Api(ApiError::InvalidUrl(_)) | AppError::Terminal(_)
        )
    }

    /// Get a suggested action for the user.
    pub fn suggested_action(&self) -> Option<&'static str> {
        match self {
            AppError::Config(ConfigError::ParseError(_))
            | AppError::Config(ConfigError::ValidationError(_)) => {
                Some("Fix the file, or delete it to fall back to the defaults.")
            }
            AppError::Api(ApiError::InvalidUrl(_)) => {
                Some("Pass --api-url https://api.artic.edu/api/v1 or fix api_url in config.toml.")
            }
            AppError::Api(ApiError::RateLimited) => Some("Wait a few seconds and press 'r' to reload."),
            AppError::Api(e) if e.is_transport() => {
                Some("Check your internet connection and the catalog URL.")
            }
            _ => None,
        }
    }
}

/// Result type for application operations.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_from_config_error() {
        let app_err: AppError = ConfigError::NoConfigDir.into();
        assert!(matches!(app_err, AppError::Config(ConfigError::NoConfigDir)));
    }

    #[test]
    fn test_app_error_from_api_error() {
        let app_err: AppError = ApiError::RateLimited.into();
        assert!(matches!(app_err, AppError::Api(ApiError::RateLimited)));
    }

    #[test]
    fn test_user_message_not_found() {
        let err = AppError::Api(ApiError::NotFound("artworks page 12".to_string()));
        let msg = err.user_message();
        assert!(msg.contains("artworks page 12"));
        assert!(msg.contains("not found"));
    }

    #[test]
    fn test_user_message_config_validation() {
        let err = AppError::Config(ConfigError::ValidationError(
            "tick_rate_ms must be greater than zero".to_string(),
        ));
        assert!(err.user_message().contains("tick_rate_ms"));
    }

    #[test]
    fn test_user_message_invalid_url() {
        let err = AppError::Api(ApiError::InvalidUrl("ftp://nowhere".to_string()));
        assert_eq!(err.user_message(), "Invalid catalog URL: ftp://nowhere");
    }

    #[test]
    fn test_is_critical() {
        assert!(AppError::Config(ConfigError::NoConfigDir).is_critical());
        assert!(AppError::Api(ApiError::InvalidUrl("x".to_string())).is_critical());
        assert!(AppError::terminal("raw mode").is_critical());
        assert!(!AppError::Api(ApiError::RateLimited).is_critical());
    }

    #[test]
    fn test_suggested_action_rate_limited() {
        let err = AppError::Api(ApiError::RateLimited);
        assert!(err.suggested_action().unwrap().contains("reload"));
    }

    #[test]
    fn test_suggested_action_invalid_config() {
        let err = AppError::Config(ConfigError::ValidationError("bad".to_string()));
        assert!(err.suggested_action().unwrap().contains("defaults"));
        assert!(AppError::other("x").suggested_action().is_none());
    }

    #[test]
    fn test_terminal_error() {
        let err = AppError::terminal("test error");
        assert!(matches!(err, AppError::Terminal(_)));
        assert_eq!(err.user_message(), "Terminal error: test error");
    }

    #[test]
    fn test_other_error() {
        let err = AppError::other("something went wrong");
        assert_eq!(err.user_message(), "something went wrong");
    }
}
