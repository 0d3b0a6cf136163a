//! API error types for the Jira client.

use thiserror::Error;

/// Errors that can occur when talking to Jira.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Invalid email or API token.
    #[error("Authentication failed: check your email and API token")]
    Unauthorized,

    /// The user lacks access to the resource.
    #[error("Permission denied: you don't have access to this resource")]
    Forbidden,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Rate limited: please wait before retrying")]
    RateLimited,

    #[error("Jira server error: {0}")]
    ServerError(String),

    /// A status the client has no specific handling for.
    #[error("Unexpected response: {0}")]
    UnexpectedStatus(String),

    /// Transport failure (DNS, connect, timeout).
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// No token could be obtained from the keyring.
    #[error("Keyring error: {0}")]
    Keyring(String),

    /// The body could not be decoded.
    #[error("Invalid API response: {0}")]
    InvalidResponse(String),

    /// The startup identity check failed.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
}

/// Result type for API operations.
pub type Result<T> = std::result::Result<T, ApiError>;

impl ApiError {
    /// Map an HTTP status to an error, with `context` describing the request.
    pub fn from_status(status: reqwest::StatusCode, context: &str) -> Self {
        match status.as_u16() {
            401 => ApiError::Unauthorized,
            403 => ApiError::Forbidden,
            404 => ApiError::NotFound(context.to_string()),
            429 => ApiError::RateLimited,
            500..=599 => ApiError::ServerError(format!("HTTP {}: {}", status, context)),
            _ => ApiError::UnexpectedStatus(format!("HTTP {}: {}", status, context)),
        }
    }

    /// Whether the request may succeed if sent again.
    pub fn is_retryable(&self) -> bool {
        match self {
            ApiError::RateLimited | ApiError::ServerError(_) => true,
            ApiError::Network(err) => !err.is_decode() && !err.is_builder(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_error_from_status() {
        assert!(matches!(
            ApiError::from_status(StatusCode::UNAUTHORIZED, "x"),
            ApiError::Unauthorized
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::FORBIDDEN, "x"),
            ApiError::Forbidden
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::TOO_MANY_REQUESTS, "x"),
            ApiError::RateLimited
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::BAD_GATEWAY, "x"),
            ApiError::ServerError(_)
        ));
    }

    #[test]
    fn test_not_found_keeps_context() {
        match ApiError::from_status(StatusCode::NOT_FOUND, "board 7") {
            ApiError::NotFound(msg) => assert_eq!(msg, "board 7"),
            other => panic!("Expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_unexpected_status_not_retryable() {
        let err = ApiError::from_status(StatusCode::BAD_REQUEST, "x");
        assert!(matches!(err, ApiError::UnexpectedStatus(_)));
        assert!(err.to_string().contains("HTTP 400"));
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_retryable_classification() {
        assert!(ApiError::RateLimited.is_retryable());
        assert!(ApiError::ServerError("boom".to_string()).is_retryable());
        assert!(!ApiError::Unauthorized.is_retryable());
        assert!(!ApiError::NotFound("x".to_string()).is_retryable());
        assert!(!ApiError::InvalidResponse("x".to_string()).is_retryable());
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            ApiError::Unauthorized.to_string(),
            "Authentication failed: check your email and API token"
        );
        assert_eq!(
            ApiError::NotFound("issue 10001".to_string()).to_string(),
            "Not found: issue 10001"
        );
    }
}
