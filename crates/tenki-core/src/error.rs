//! Centralized error types for the Tenki application.
//!
//! This module provides a typed error hierarchy that:
//! - Separates transport failures from unexpected payload shapes
//! - Provides user-friendly messages suitable for display
//! - Preserves full error context for logging

use thiserror::Error;

/// Error shown for a failed fetch.
///
/// Use `user_message()` to get a display-appropriate message.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),
}

impl AppError {
    /// Returns a user-friendly message suitable for display.
    pub fn user_message(&self) -> &'static str {
        match self {
            AppError::Network(e) => e.user_message(),
            AppError::Parse(e) => e.user_message(),
        }
    }
}

/// Network-related errors (HTTP, connectivity).
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Server error: {status} - {message}")]
    ServerError { status: u16, message: String },

    #[error("TLS/SSL error: {0}")]
    TlsError(String),
}

impl NetworkError {
    pub fn user_message(&self) -> &'static str {
        match self {
            NetworkError::ConnectionFailed(_) => {
                "Unable to connect. Check your internet connection."
            }
            NetworkError::Timeout => "The request timed out. Please try again.",
            NetworkError::ServerError { status, .. } if *status >= 500 => {
                "The weather service is experiencing issues. Please try again later."
            }
            NetworkError::ServerError { status, .. } if *status == 404 => {
                "No forecast is published for this region."
            }
            NetworkError::ServerError { .. } => "The request failed. Please try again.",
            NetworkError::TlsError(_) => "Secure connection failed. Check your network settings.",
        }
    }
}

/// The weather service answered with something other than the expected JSON shape.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Malformed JSON: {0}")]
    MalformedJson(String),

    #[error("Unexpected document shape: {0}")]
    UnexpectedShape(String),
}

impl ParseError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ParseError::MalformedJson(_) => "The weather service returned unreadable data.",
            ParseError::UnexpectedShape(_) => "The forecast data was not in the expected format.",
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Configuration parse error: {0}")]
    ParseError(String),
}

impl ConfigError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ConfigError::Invalid(_) => "Invalid configuration. Check your settings.",
            ConfigError::ParseError(_) => "Configuration file is malformed. Check your settings.",
        }
    }
}

/// Extension trait for converting reqwest errors to our error types.
pub trait ReqwestErrorExt {
    fn into_network_error(self) -> NetworkError;
}

impl ReqwestErrorExt for reqwest::Error {
    fn into_network_error(self) -> NetworkError {
        if self.is_timeout() {
            NetworkError::Timeout
        } else if let Some(status) = self.status() {
            NetworkError::ServerError {
                status: status.as_u16(),
                message: self.to_string(),
            }
        } else if self.is_connect() && self.to_string().to_lowercase().contains("tls") {
            NetworkError::TlsError(self.to_string())
        } else {
            NetworkError::ConnectionFailed(self.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages_are_non_empty() {
        let errors: Vec<AppError> = vec![
            NetworkError::Timeout.into(),
            NetworkError::ConnectionFailed("refused".into()).into(),
            ParseError::UnexpectedShape("timeSeries".into()).into(),
            ParseError::MalformedJson("eof".into()).into(),
        ];

        for err in errors {
            assert!(!err.user_message().is_empty(), "{err} has no user message");
        }

        let config = ConfigError::ParseError("expected `]`".into());
        assert!(config.user_message().contains("malformed"));
    }

    #[test]
    fn test_server_error_messages_by_status() {
        let server = NetworkError::ServerError {
            status: 500,
            message: "boom".into(),
        };
        assert!(server.user_message().contains("experiencing issues"));

        let missing = NetworkError::ServerError {
            status: 404,
            message: "not found".into(),
        };
        assert!(missing.user_message().contains("region"));
    }

    #[test]
    fn test_app_error_conversion() {
        let app_err: AppError = ParseError::MalformedJson("eof".into()).into();
        assert!(matches!(
            app_err,
            AppError::Parse(ParseError::MalformedJson(_))
        ));
    }

    #[test]
    fn test_user_message_propagation() {
        let app_err = AppError::Network(NetworkError::Timeout);
        assert_eq!(
            app_err.user_message(),
            "The request timed out. Please try again."
        );
    }
}
