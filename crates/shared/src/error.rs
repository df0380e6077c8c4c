//! Application-wide error types.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types.
///
/// `Network`, `Server`, and `Validation` are the three user-facing failure
/// classes; the remaining variants cover local concerns of the client.
#[derive(Debug, Error)]
pub enum AppError {
    /// The request never reached the server (connect, DNS, timeout, I/O).
    #[error("Network error: {0}")]
    Network(String),

    /// The server answered with a non-success status code.
    #[error("Server error ({status}): {message}")]
    Server {
        /// HTTP status code returned by the backend.
        status: u16,
        /// Message extracted from the response body, if any.
        message: String,
    },

    /// A required form field is missing or invalid.
    #[error("Validation error: {0}")]
    Validation(String),

    /// No session, or the backend rejected the session token.
    #[error("Authentication failed: {0}")]
    Unauthorized(String),

    /// The response body did not match any known shape.
    #[error("Invalid response: {0}")]
    Decode(String),

    /// Reading or writing the persisted session failed.
    #[error("Session storage error: {0}")]
    Session(String),

    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A write for the same view is still in flight.
    #[error("Busy: {0}")]
    Busy(String),
}

impl AppError {
    /// Returns the HTTP status code when the error came from the backend.
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Server { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns a stable machine-readable error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Network(_) => "NETWORK_ERROR",
            Self::Server { .. } => "SERVER_ERROR",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Unauthorized(_) => "UNAUTHORIZED",
            Self::Decode(_) => "DECODE_ERROR",
            Self::Session(_) => "SESSION_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Busy(_) => "BUSY",
        }
    }

    /// Whether a failed read should keep the previous data on screen.
    ///
    /// Transport and server failures are stale-but-available; everything
    /// else is a caller mistake and is reported as-is.
    #[must_use]
    pub const fn keeps_stale_data(&self) -> bool {
        matches!(
            self,
            Self::Network(_) | Self::Server { .. } | Self::Decode(_)
        )
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        let server = AppError::Server {
            status: 503,
            message: String::new(),
        };
        assert_eq!(server.status_code(), Some(503));
        assert_eq!(AppError::Network(String::new()).status_code(), None);
        assert_eq!(AppError::Validation(String::new()).status_code(), None);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(AppError::Network(String::new()).error_code(), "NETWORK_ERROR");
        assert_eq!(
            AppError::Server {
                status: 500,
                message: String::new()
            }
            .error_code(),
            "SERVER_ERROR"
        );
        assert_eq!(
            AppError::Validation(String::new()).error_code(),
            "VALIDATION_ERROR"
        );
        assert_eq!(
            AppError::Unauthorized(String::new()).error_code(),
            "UNAUTHORIZED"
        );
        assert_eq!(AppError::Decode(String::new()).error_code(), "DECODE_ERROR");
        assert_eq!(AppError::Session(String::new()).error_code(), "SESSION_ERROR");
        assert_eq!(AppError::Config(String::new()).error_code(), "CONFIG_ERROR");
        assert_eq!(AppError::Busy(String::new()).error_code(), "BUSY");
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            AppError::Network("connection refused".into()).to_string(),
            "Network error: connection refused"
        );
        assert_eq!(
            AppError::Server {
                status: 404,
                message: "not found".into()
            }
            .to_string(),
            "Server error (404): not found"
        );
        assert_eq!(
            AppError::Validation("name is required".into()).to_string(),
            "Validation error: name is required"
        );
        assert_eq!(
            AppError::Busy("budgets".into()).to_string(),
            "Busy: budgets"
        );
    }

    #[test]
    fn test_stale_data_policy() {
        assert!(AppError::Network(String::new()).keeps_stale_data());
        assert!(
            AppError::Server {
                status: 500,
                message: String::new()
            }
            .keeps_stale_data()
        );
        assert!(!AppError::Validation(String::new()).keeps_stale_data());
        assert!(!AppError::Unauthorized(String::new()).keeps_stale_data());
    }
}
