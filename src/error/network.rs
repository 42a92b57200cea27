//! Network-related error types.
//!
//! Every failure of a remote call is classified into a [`NetworkError`] so the
//! error screen can phrase connection, timeout and status failures distinctly.

use std::fmt;

use crate::traits::HttpError;

/// Network-specific error variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NetworkError {
    /// Connection to the server failed (refused, unreachable, DNS).
    ConnectionFailed { url: String, message: String },

    /// Request timed out.
    Timeout { operation: String },

    /// HTTP status error (non-2xx response).
    HttpStatus { status: u16, message: String },

    /// Generic network error.
    Other { message: String },
}

impl NetworkError {
    /// Check if this error is likely transient and can be retried.
    pub fn is_retryable(&self) -> bool {
        match self {
            NetworkError::ConnectionFailed { .. } => true,
            NetworkError::Timeout { .. } => true,
            NetworkError::HttpStatus { status, .. } => {
                *status >= 500 || *status == 429 || *status == 408
            }
            NetworkError::Other { .. } => false,
        }
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            NetworkError::ConnectionFailed { .. } => {
                "Could not connect to the puzzle server. Check your internet connection and try again.".to_string()
            }
            NetworkError::Timeout { operation } => {
                format!(
                    "The puzzle server took too long to respond while trying to {}.",
                    operation
                )
            }
            NetworkError::HttpStatus { status, .. } => match *status {
                404 => "The puzzle server could not find what was requested (HTTP 404).".to_string(),
                429 => "Too many requests. Please wait a moment and try again.".to_string(),
                500..=599 => format!(
                    "The puzzle server is having trouble (HTTP {}). Please try again later.",
                    status
                ),
                _ => format!("The puzzle server returned an error (HTTP {}).", status),
            },
            NetworkError::Other { message } => format!("Network error: {}", message),
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            NetworkError::ConnectionFailed { .. } => "E_NET_CONN",
            NetworkError::Timeout { .. } => "E_NET_TIMEOUT",
            NetworkError::HttpStatus { .. } => "E_NET_HTTP",
            NetworkError::Other { .. } => "E_NET_OTHER",
        }
    }

    /// Classify a transport-level [`HttpError`].
    pub fn from_http_error(err: HttpError, url: &str, operation: &str) -> Self {
        match err {
            HttpError::ConnectionFailed(message) => NetworkError::ConnectionFailed {
                url: url.to_string(),
                message,
            },
            HttpError::Timeout(_) => NetworkError::Timeout {
                operation: operation.to_string(),
            },
            HttpError::InvalidUrl(message) | HttpError::Other(message) => {
                NetworkError::Other { message }
            }
        }
    }
}

impl fmt::Display for NetworkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkError::ConnectionFailed { url, message } => {
                write!(f, "Connection failed to '{}': {}", url, message)
            }
            NetworkError::Timeout { operation } => {
                write!(f, "{} timed out", operation)
            }
            NetworkError::HttpStatus { status, message } => {
                write!(f, "HTTP {} error: {}", status, message)
            }
            NetworkError::Other { message } => {
                write!(f, "Network error: {}", message)
            }
        }
    }
}

impl std::error::Error for NetworkError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages_are_distinct_per_class() {
        let conn = NetworkError::ConnectionFailed {
            url: "http://localhost".to_string(),
            message: "refused".to_string(),
        };
        let timeout = NetworkError::Timeout {
            operation: "load the puzzle".to_string(),
        };
        let status = NetworkError::HttpStatus {
            status: 502,
            message: "bad gateway".to_string(),
        };

        let messages = [conn.user_message(), timeout.user_message(), status.user_message()];
        assert!(messages[0].contains("connect"));
        assert!(messages[1].contains("too long"));
        assert!(messages[2].contains("HTTP 502"));
        assert_ne!(messages[0], messages[1]);
        assert_ne!(messages[1], messages[2]);
    }

    #[test]
    fn test_is_retryable() {
        assert!(NetworkError::Timeout {
            operation: "x".to_string()
        }
        .is_retryable());
        assert!(!NetworkError::HttpStatus {
            status: 400,
            message: String::new()
        }
        .is_retryable());
        assert!(NetworkError::HttpStatus {
            status: 503,
            message: String::new()
        }
        .is_retryable());
    }

    #[test]
    fn test_from_http_error_classification() {
        let err = NetworkError::from_http_error(
            HttpError::ConnectionFailed("refused".to_string()),
            "http://x",
            "check",
        );
        assert_eq!(err.error_code(), "E_NET_CONN");

        let err = NetworkError::from_http_error(
            HttpError::Timeout("slow".to_string()),
            "http://x",
            "check your solution",
        );
        assert_eq!(
            err,
            NetworkError::Timeout {
                operation: "check your solution".to_string()
            }
        );
    }
}
