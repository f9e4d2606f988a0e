//! Network-related error types.

use std::fmt;

use crate::traits::HttpError;

/// Failures reaching the completion service.
#[derive(Debug, Clone, PartialEq)]
pub enum NetworkError {
    /// Connection to the server failed.
    ConnectionFailed { url: String, message: String },

    /// Request timed out.
    Timeout { message: String },

    /// Non-success HTTP status.
    HttpStatus { status: u16, message: String },

    /// Invalid endpoint URL.
    InvalidUrl { url: String },

    /// Generic transport error.
    Other { message: String },
}

impl NetworkError {
    /// Build from a transport error raised while requesting `url`.
    pub fn from_http(err: HttpError, url: &str) -> Self {
        match err {
            HttpError::ConnectionFailed(message) => NetworkError::ConnectionFailed {
                url: url.to_string(),
                message,
            },
            HttpError::Timeout(message) => NetworkError::Timeout { message },
            HttpError::ServerError { status, message } => {
                NetworkError::HttpStatus { status, message }
            }
            HttpError::InvalidUrl(_) => NetworkError::InvalidUrl {
                url: url.to_string(),
            },
            HttpError::Io(message) | HttpError::Other(message) => NetworkError::Other { message },
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            NetworkError::ConnectionFailed { url, .. } => {
                format!("Unable to connect to {}. Please check your internet connection.", url)
            }
            NetworkError::Timeout { .. } => {
                "The request timed out. The service may be slow or unreachable.".to_string()
            }
            NetworkError::HttpStatus { status, message } => match *status {
                401 => "The API key was rejected (HTTP 401).".to_string(),
                403 => "Access denied (HTTP 403).".to_string(),
                404 => "The completion endpoint was not found (HTTP 404).".to_string(),
                429 => "Too many requests (HTTP 429). Please wait a moment and try again."
                    .to_string(),
                500..=599 => format!("The service returned HTTP {}. Please try again later.", status),
                _ if message.is_empty() => format!("The service returned HTTP {}.", status),
                _ => format!("The service returned HTTP {}: {}", status, message),
            },
            NetworkError::InvalidUrl { url } => format!("Invalid API URL: {}", url),
            NetworkError::Other { message } => format!("Network error: {}", message),
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            NetworkError::ConnectionFailed { .. } => "E_NET_CONN",
            NetworkError::Timeout { .. } => "E_NET_TIMEOUT",
            NetworkError::HttpStatus { .. } => "E_NET_HTTP",
            NetworkError::InvalidUrl { .. } => "E_NET_URL",
            NetworkError::Other { .. } => "E_NET_OTHER",
        }
    }
}

impl fmt::Display for NetworkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkError::ConnectionFailed { url, message } => {
                write!(f, "Connection failed to '{}': {}", url, message)
            }
            NetworkError::Timeout { message } => write!(f, "Request timed out: {}", message),
            NetworkError::HttpStatus { status, message } => {
                write!(f, "HTTP {} error: {}", status, message)
            }
            NetworkError::InvalidUrl { url } => write!(f, "Invalid URL: {}", url),
            NetworkError::Other { message } => write!(f, "Network error: {}", message),
        }
    }
}

impl std::error::Error for NetworkError {}
