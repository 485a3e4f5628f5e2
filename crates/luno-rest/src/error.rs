//! Error types for REST API operations

use luno_types::{LunoErrorCode, PairParseError};
use std::fmt;

/// Error reported by Luno in a well-formed JSON response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// HTTP status the error arrived with
    pub status: u16,
    /// `error_code` from the response body, when present
    pub code: Option<String>,
    /// `error` from the response body
    pub message: String,
    /// Calls in the rolling window when a rate-limit rejection was received
    pub call_rate: Option<usize>,
}

impl ApiError {
    /// Parsed form of [`ApiError::code`]
    pub fn luno_code(&self) -> Option<LunoErrorCode> {
        self.code.as_deref().map(LunoErrorCode::parse)
    }

    /// Whether Luno rejected the call for exceeding its rate limit
    pub fn is_rate_limit(&self) -> bool {
        self.call_rate.is_some()
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.status == 200 {
            return match &self.code {
                Some(code) => write!(f, "{} ({})", self.message, code),
                None => write!(f, "{}", self.message),
            };
        }

        let code = self.code.as_deref().unwrap_or_default();
        match self.call_rate {
            Some(rate) => write!(f, "luno API error {}: ({}) {}", code, rate, self.message),
            None => write!(f, "luno API error {}: {}", code, self.message),
        }
    }
}

impl std::error::Error for ApiError {}

/// Client configuration problems detected at construction
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Hostname is empty
    #[error("hostname must not be empty")]
    EmptyHostname,

    /// Port 0 cannot be connected to
    #[error("port must be non-zero")]
    InvalidPort,

    /// Default trading pair is malformed
    #[error("invalid default pair: {0}")]
    InvalidPair(#[from] PairParseError),

    /// User agent is empty
    #[error("user agent must not be empty")]
    EmptyUserAgent,
}

/// Errors that can occur during REST API operations
#[derive(Debug, thiserror::Error)]
pub enum RestError {
    /// Request never produced a complete response (connect, TLS, DNS, body read)
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Response body could not be interpreted
    #[error("luno API error {status}: {body}")]
    Malformed {
        /// HTTP status code
        status: u16,
        /// Raw response body
        body: String,
    },

    /// Luno rejected the request
    #[error("{0}")]
    Api(ApiError),

    /// Invalid API credentials
    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    /// Custom trust anchor could not be loaded
    #[error("Invalid CA certificate: {0}")]
    InvalidCertificate(#[source] reqwest::Error),

    /// Client configuration rejected
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Parameters could not be encoded
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Environment variable not set
    #[error("Environment variable not set: {0}")]
    EnvVarNotSet(String),

    /// Request was aborted before it produced a result
    #[error("request cancelled before completion")]
    Cancelled,
}

impl RestError {
    /// Check if this error indicates rate limiting
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::Api(error) if error.is_rate_limit())
    }

    /// Rolling call count attached to a rate-limit rejection
    pub fn call_rate(&self) -> Option<usize> {
        match self {
            Self::Api(error) => error.call_rate,
            _ => None,
        }
    }

    /// Luno error code, if this is an API error carrying one
    pub fn error_code(&self) -> Option<LunoErrorCode> {
        match self {
            Self::Api(error) => error.luno_code(),
            _ => None,
        }
    }

    /// HTTP status, when a response was received
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api(error) => Some(error.status),
            Self::Malformed { status, .. } => Some(*status),
            Self::Transport(error) => error.status().map(|status| status.as_u16()),
            _ => None,
        }
    }

    /// Check if the request failed before any response arrived
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// Whether sending the same request again later might succeed
    ///
    /// The client never retries; this only informs the caller's policy.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport(_) => true,
            Self::Api(error) => {
                error.is_rate_limit()
                    || error.status >= 500
                    || error.luno_code().map_or(false, |code| code.is_transient())
            }
            Self::Malformed { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

/// Result type for REST operations
pub type RestResult<T> = Result<T, RestError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn api_error(status: u16, code: Option<&str>, call_rate: Option<usize>) -> RestError {
        RestError::Api(ApiError {
            status,
            code: code.map(str::to_string),
            message: "Too many requests".to_string(),
            call_rate,
        })
    }

    #[test]
    fn test_rate_limited_message_embeds_call_rate() {
        let err = api_error(429, Some("ErrTooManyRequests"), Some(7));
        assert_eq!(
            err.to_string(),
            "luno API error ErrTooManyRequests: (7) Too many requests"
        );
        assert!(err.is_rate_limited());
        assert!(err.is_retryable());
        assert_eq!(err.call_rate(), Some(7));
        assert_eq!(err.error_code(), Some(LunoErrorCode::TooManyRequests));
    }

    #[test]
    fn test_application_error_message() {
        let err = api_error(401, Some("ErrUnauthorised"), None);
        assert_eq!(err.to_string(), "luno API error ErrUnauthorised: Too many requests");
        assert!(!err.is_rate_limited());
        assert!(!err.is_retryable());
        assert_eq!(err.status(), Some(401));
    }

    #[test]
    fn test_business_error_keeps_message() {
        let err = RestError::Api(ApiError {
            status: 200,
            code: None,
            message: "order would exceed limits".to_string(),
            call_rate: None,
        });
        assert_eq!(err.to_string(), "order would exceed limits");
        assert_eq!(err.error_code(), None);
    }

    #[test]
    fn test_business_error_appends_code() {
        let err = RestError::Api(ApiError {
            status: 200,
            code: Some("ErrInsufficientBalance".to_string()),
            message: "Insufficient balance".to_string(),
            call_rate: None,
        });
        assert_eq!(
            err.to_string(),
            "Insufficient balance (ErrInsufficientBalance)"
        );
        assert_eq!(err.error_code(), Some(LunoErrorCode::InsufficientBalance));
    }

    #[test]
    fn test_cancelled_is_not_retryable() {
        let err = RestError::Cancelled;
        assert_eq!(err.to_string(), "request cancelled before completion");
        assert!(!err.is_retryable());
        assert_eq!(err.status(), None);
    }

    #[test]
    fn test_malformed_message() {
        let err = RestError::Malformed {
            status: 502,
            body: "<html>Bad Gateway</html>".to_string(),
        };
        assert_eq!(err.to_string(), "luno API error 502: <html>Bad Gateway</html>");
        assert!(err.is_retryable());
        assert!(!err.is_transport());
    }

    #[test]
    fn test_config_error_display() {
        let err = RestError::from(ConfigError::EmptyHostname);
        assert!(err.to_string().contains("hostname"));
    }
}
