//! Mock HTTP client for testing.
//!
//! Replays configured byte chunks so the streaming pipeline can be exercised
//! without network access.

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::{self, StreamExt};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use crate::traits::{ByteStream, Headers, HttpClient, HttpError};

/// A recorded HTTP request for verification in tests.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// Request URL
    pub url: String,
    /// Request headers
    pub headers: Headers,
    /// Request body
    pub body: String,
}

/// Configuration for a mock response.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Fail the request before any body is returned
    Error(HttpError),
    /// Return these chunks, then end the stream
    Stream(Vec<Bytes>),
    /// Return these chunks, then fail mid-stream
    StreamThenError(Vec<Bytes>, HttpError),
    /// Return these chunks, then never finish
    Stalled(Vec<Bytes>),
}

/// Mock HTTP client for testing.
///
/// Responses are taken from the queue first (one per request), then by
/// URL (exact, then prefix), then the default.
///
/// # Example
///
/// ```ignore
/// let client = MockHttpClient::new();
/// client.set_default_response(MockResponse::Stream(vec![Bytes::from("data: [DONE]\n")]));
/// let body = client.post_stream(url, "{}", &Headers::new()).await?;
/// assert_eq!(client.get_requests().len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockHttpClient {
    /// Responses consumed in order, one per request
    queued: Arc<Mutex<VecDeque<MockResponse>>>,
    /// Configured responses by URL pattern
    responses: Arc<Mutex<HashMap<String, MockResponse>>>,
    /// Default response when no specific match
    default_response: Arc<Mutex<Option<MockResponse>>>,
    /// Recorded requests for verification
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockHttpClient {
    /// Create a new mock HTTP client.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response for the next unanswered request.
    pub fn queue_response(&self, response: MockResponse) {
        self.queued.lock().unwrap().push_back(response);
    }

    /// Set a response for a specific URL.
    pub fn set_response(&self, url: &str, response: MockResponse) {
        let mut responses = self.responses.lock().unwrap();
        responses.insert(url.to_string(), response);
    }

    /// Set a default response for URLs without specific matches.
    pub fn set_default_response(&self, response: MockResponse) {
        let mut default = self.default_response.lock().unwrap();
        *default = Some(response);
    }

    /// Get all recorded requests.
    pub fn get_requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Clear all recorded requests.
    pub fn clear_requests(&self) {
        self.requests.lock().unwrap().clear();
    }

    fn record_request(&self, url: &str, headers: &Headers, body: &str) {
        let mut requests = self.requests.lock().unwrap();
        requests.push(RecordedRequest {
            url: url.to_string(),
            headers: headers.clone(),
            body: body.to_string(),
        });
    }

    fn get_response(&self, url: &str) -> Option<MockResponse> {
        if let Some(response) = self.queued.lock().unwrap().pop_front() {
            return Some(response);
        }

        let responses = self.responses.lock().unwrap();
        if let Some(response) = responses.get(url) {
            return Some(response.clone());
        }
        for (pattern, response) in responses.iter() {
            if url.starts_with(pattern) {
                return Some(response.clone());
            }
        }

        self.default_response.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn post_stream(
        &self,
        url: &str,
        body: &str,
        headers: &Headers,
    ) -> Result<ByteStream, HttpError> {
        self.record_request(url, headers, body);

        match self.get_response(url) {
            Some(MockResponse::Error(err)) => Err(err),
            Some(MockResponse::Stream(chunks)) => {
                Ok(Box::pin(stream::iter(chunks.into_iter().map(Ok))))
            }
            Some(MockResponse::StreamThenError(chunks, err)) => {
                let items = chunks.into_iter().map(Ok).chain(std::iter::once(Err(err)));
                Ok(Box::pin(stream::iter(items)))
            }
            Some(MockResponse::Stalled(chunks)) => {
                let items = stream::iter(chunks.into_iter().map(Ok)).chain(stream::pending());
                Ok(Box::pin(items))
            }
            None => Err(HttpError::Other(format!("No mock response for URL: {}", url))),
        }
    }
}
