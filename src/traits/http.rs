//! HTTP client trait abstraction.
//!
//! The completion service is reached only through [`HttpClient`], so the
//! streaming pipeline can be driven by canned byte chunks in tests.

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;
use std::collections::HashMap;
use std::pin::Pin;

/// HTTP headers represented as a key-value map.
pub type Headers = HashMap<String, String>;

/// Incrementally received response body.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, HttpError>> + Send>>;

/// Transport-level failures reported by an [`HttpClient`].
///
/// These are mapped to [`NetworkError`](crate::error::NetworkError) or
/// [`StreamError`](crate::error::StreamError) by the chat client depending
/// on whether the body had started streaming.
#[derive(Debug, Clone, PartialEq)]
pub enum HttpError {
    /// No connection could be made
    ConnectionFailed(String),
    /// Connecting or reading timed out
    Timeout(String),
    /// Non-success status, with the (truncated) response body
    ServerError { status: u16, message: String },
    /// Body read failed after the response started
    Io(String),
    /// URL could not be used to build a request
    InvalidUrl(String),
    /// Anything else
    Other(String),
}

impl std::fmt::Display for HttpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HttpError::ConnectionFailed(msg) => write!(f, "connect failed: {}", msg),
            HttpError::Timeout(msg) => write!(f, "timed out: {}", msg),
            HttpError::ServerError { status, message } if message.is_empty() => {
                write!(f, "HTTP {}", status)
            }
            HttpError::ServerError { status, message } => write!(f, "HTTP {}: {}", status, message),
            HttpError::Io(msg) => write!(f, "body read failed: {}", msg),
            HttpError::InvalidUrl(msg) => write!(f, "invalid URL: {}", msg),
            HttpError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for HttpError {}

/// Trait for HTTP client operations.
///
/// Implementations include the production reqwest-based client and a mock
/// client that replays configured chunks.
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Perform a POST request and return the response body as a stream.
    ///
    /// A non-success status must be reported as [`HttpError::ServerError`]
    /// before any body bytes are yielded.
    ///
    /// # Arguments
    /// * `url` - The URL to request
    /// * `body` - Request body as a string
    /// * `headers` - Request headers
    async fn post_stream(
        &self,
        url: &str,
        body: &str,
        headers: &Headers,
    ) -> Result<ByteStream, HttpError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_error_display() {
        assert_eq!(
            HttpError::ConnectionFailed("refused".to_string()).to_string(),
            "connect failed: refused"
        );
        assert_eq!(
            HttpError::ServerError {
                status: 503,
                message: "overloaded".to_string()
            }
            .to_string(),
            "HTTP 503: overloaded"
        );
        assert_eq!(
            HttpError::ServerError {
                status: 502,
                message: String::new()
            }
            .to_string(),
            "HTTP 502"
        );
        assert_eq!(HttpError::Io("reset".to_string()).to_string(), "body read failed: reset");
    }
}
