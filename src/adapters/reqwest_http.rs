//! Reqwest-based HTTP client adapter.

use std::time::Duration;

use async_trait::async_trait;
use futures_util::StreamExt;
use tracing::debug;

use crate::traits::{ByteStream, Headers, HttpClient, HttpError};

/// Time allowed to establish a connection. Replies themselves may stream for
/// as long as the service keeps sending, so there is no overall timeout.
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(15);

/// Longest error body kept in [`HttpError::ServerError`].
const MAX_ERROR_BODY: usize = 512;

/// Streaming HTTP client backed by reqwest.
///
/// # Example
///
/// ```ignore
/// use chatstream::adapters::ReqwestHttpClient;
/// use chatstream::traits::HttpClient;
///
/// let client = ReqwestHttpClient::new();
/// let body = client.post_stream(url, &json, &headers).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ReqwestHttpClient {
    client: reqwest::Client,
}

impl ReqwestHttpClient {
    /// Client with [`CONNECT_TIMEOUT`] and otherwise default settings.
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self { client }
    }

    /// Wrap a preconfigured reqwest::Client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Default for ReqwestHttpClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Map a failure before any response arrived.
fn request_error(err: reqwest::Error) -> HttpError {
    if err.is_timeout() {
        HttpError::Timeout(err.to_string())
    } else if err.is_connect() {
        HttpError::ConnectionFailed(err.to_string())
    } else if err.is_builder() {
        HttpError::InvalidUrl(err.to_string())
    } else {
        HttpError::Other(err.to_string())
    }
}

/// Map a failure while the body was streaming.
fn body_error(err: reqwest::Error) -> HttpError {
    if err.is_timeout() {
        HttpError::Timeout(err.to_string())
    } else {
        HttpError::Io(err.to_string())
    }
}

/// Error bodies are often JSON blobs; keep a bounded prefix on a char boundary.
fn truncate_error_body(mut body: String) -> String {
    if body.len() > MAX_ERROR_BODY {
        let mut end = MAX_ERROR_BODY;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        body.truncate(end);
    }
    body.trim().to_string()
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn post_stream(
        &self,
        url: &str,
        body: &str,
        headers: &Headers,
    ) -> Result<ByteStream, HttpError> {
        let mut request = self.client.post(url).body(body.to_string());
        for (name, value) in headers {
            request = request.header(name, value);
        }

        let response = request.send().await.map_err(request_error)?;
        let status = response.status();
        debug!(status = status.as_u16(), "Completion response received");

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(HttpError::ServerError {
                status: status.as_u16(),
                message: truncate_error_body(message),
            });
        }

        let chunks = response
            .bytes_stream()
            .map(|chunk| chunk.map_err(body_error));
        Ok(Box::pin(chunks))
    }
}
