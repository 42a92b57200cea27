//! Errors returned by the puzzle and stats backend client.

use thiserror::Error;

use super::network::NetworkError;

/// Failure of a backend call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Transport or HTTP-level failure
    #[error(transparent)]
    Network(#[from] NetworkError),

    /// The server does not know this puzzle id
    #[error("puzzle '{game_id}' is not recognized by the server")]
    PuzzleNotFound { game_id: String },

    /// The response body did not match the expected shape
    #[error("malformed response from {endpoint}: {message}")]
    Decode { endpoint: String, message: String },
}

impl ApiError {
    /// Message suitable for the error screen.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Network(err) => err.user_message(),
            ApiError::PuzzleNotFound { .. } => {
                "This puzzle is no longer available on the server.".to_string()
            }
            ApiError::Decode { .. } => {
                "Received an unexpected response from the puzzle server.".to_string()
            }
        }
    }

    /// Whether trying again later might succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            ApiError::Network(err) => err.is_retryable(),
            ApiError::PuzzleNotFound { .. } | ApiError::Decode { .. } => false,
        }
    }

    /// Short code for log fields.
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::Network(err) => err.error_code(),
            ApiError::PuzzleNotFound { .. } => "E_API_NOT_FOUND",
            ApiError::Decode { .. } => "E_API_DECODE",
        }
    }
}
