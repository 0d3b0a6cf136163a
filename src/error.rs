//! Application-level error type.
//!
//! Module errors (`ApiError`, `ConfigError`, `InvariantViolation`) are
//! aggregated here with user-facing wording for the status bar and for the
//! message printed after the terminal is restored.

use thiserror::Error;

use crate::api::ApiError;
use crate::config::ConfigError;
use crate::nav::InvariantViolation;

/// The main application error type.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Api(#[from] ApiError),

    /// Drawing to or reading from the terminal failed.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// Navigation reached a state valid transitions cannot produce.
    #[error("Internal navigation error: {0}")]
    Invariant(#[from] InvariantViolation),
}

impl AppError {
    /// Wrap a terminal I/O failure.
    pub fn terminal(msg: impl Into<String>) -> Self {
        AppError::Terminal(msg.into())
    }

    /// A message suitable for showing to users.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Config(e) => match e {
                ConfigError::NoConfigDir => {
                    "Could not find the configuration directory; pass --config.".to_string()
                }
                ConfigError::ReadError { path, .. } => format!(
                    "Could not read {}. Create it with a [[profiles]] entry.",
                    path.display()
                ),
                ConfigError::ParseError { path, source } => {
                    format!("{} is not valid: {}", path.display(), source.message())
                }
                ConfigError::ValidationError(msg) => format!("Configuration error: {}", msg),
                ConfigError::ProfileNotFound(name) => format!("Profile '{}' not found.", name),
                ConfigError::NoProfiles(path) => {
                    format!("No profiles configured in {}.", path.display())
                }
            },
            AppError::Api(e) => match e {
                ApiError::Unauthorized => {
                    "Authentication failed. Check your email and API token.".to_string()
                }
                ApiError::Forbidden => "Access denied.".to_string(),
                ApiError::NotFound(what) => format!("{} was not found.", what),
                ApiError::RateLimited => "Too many requests. Wait a moment and retry.".to_string(),
                ApiError::ServerError(detail) | ApiError::UnexpectedStatus(detail) => {
                    format!("Jira returned an error ({}). Try again later.", detail)
                }
                ApiError::Network(_) => "Connection failed. Check your network.".to_string(),
                ApiError::Keyring(msg) => format!("No API token available: {}", msg),
                ApiError::InvalidResponse(_) => "Unexpected response from Jira.".to_string(),
                ApiError::ConnectionFailed(msg) => format!("Could not connect to Jira: {}", msg),
            },
            AppError::Terminal(msg) => format!("Terminal error: {}", msg),
            AppError::Invariant(e) => format!(
                "Navigation reached an impossible state ({}). This is a bug; see the log file.",
                e
            ),
        }
    }
}

/// Result type for application operations.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nav::Level;

    #[test]
    fn test_invariant_message() {
        let err: AppError = InvariantViolation::MissingSelector(Level::SprintList).into();
        assert!(err.user_message().contains("impossible state"));
    }

    #[test]
    fn test_api_messages_are_friendly() {
        assert_eq!(
            AppError::from(ApiError::NotFound("sprint 42".to_string())).user_message(),
            "sprint 42 was not found."
        );
        assert_eq!(
            AppError::from(ApiError::RateLimited).user_message(),
            "Too many requests. Wait a moment and retry."
        );
        assert_eq!(
            AppError::from(ApiError::ConnectionFailed("timed out".to_string())).user_message(),
            "Could not connect to Jira: timed out"
        );
    }

    #[test]
    fn test_config_messages() {
        assert_eq!(
            AppError::from(ConfigError::ProfileNotFound("work".to_string())).user_message(),
            "Profile 'work' not found."
        );
        assert!(AppError::from(ConfigError::NoConfigDir)
            .user_message()
            .contains("--config"));
    }

    #[test]
    fn test_terminal_message() {
        assert_eq!(
            AppError::terminal("broken pipe").user_message(),
            "Terminal error: broken pipe"
        );
    }
}
