//! Chat-completions API client.
//!
//! Sends a conversation to an OpenAI-compatible `/chat/completions` endpoint
//! with `stream: true` and turns the streamed body into text deltas.

use std::collections::VecDeque;
use std::pin::Pin;
use std::sync::Arc;

use futures_util::stream::{self, Stream};
use futures_util::StreamExt;
use tracing::debug;

use crate::config::Config;
use crate::error::{ChatError, NetworkError, StreamError};
use crate::models::{ChatRequest, RequestMessage};
use crate::sse::FrameDecoder;
use crate::traits::{ByteStream, CredentialsProvider, Headers, HttpClient};

/// Text deltas of one reply, in arrival order.
///
/// Ends after the `[DONE]` sentinel or when the body ends. A transport
/// failure is yielded once as an error and ends the stream.
pub type DeltaStream = Pin<Box<dyn Stream<Item = Result<String, ChatError>> + Send>>;

/// Client for the chat-completions API
pub struct ChatClient {
    http: Arc<dyn HttpClient>,
    credentials: Arc<dyn CredentialsProvider>,
    completions_url: String,
    model: String,
}

impl ChatClient {
    pub fn new(
        http: Arc<dyn HttpClient>,
        credentials: Arc<dyn CredentialsProvider>,
        config: &Config,
    ) -> Self {
        Self {
            http,
            credentials,
            completions_url: config.completions_url(),
            model: config.model.clone(),
        }
    }

    pub fn completions_url(&self) -> &str {
        &self.completions_url
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Request a streamed reply to `messages`.
    ///
    /// The API key is resolved first; without one this fails with
    /// [`CredentialError::Missing`](crate::error::CredentialError::Missing)
    /// and no request is made.
    pub async fn stream_reply(
        &self,
        messages: Vec<RequestMessage>,
    ) -> Result<DeltaStream, ChatError> {
        let api_key = self.credentials.resolve_api_key().await?;

        let request = ChatRequest::new(self.model.clone(), messages);
        let body = serde_json::to_string(&request).map_err(|e| NetworkError::Other {
            message: format!("Failed to encode request: {}", e),
        })?;

        let mut headers = Headers::new();
        headers.insert("Authorization".to_string(), format!("Bearer {}", api_key));
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        headers.insert("Accept".to_string(), "text/event-stream".to_string());

        debug!(
            url = %self.completions_url,
            model = %self.model,
            messages = request.messages.len(),
            "Requesting streamed completion"
        );
        let body = self
            .http
            .post_stream(&self.completions_url, &body, &headers)
            .await
            .map_err(|e| NetworkError::from_http(e, &self.completions_url))?;

        Ok(decode_deltas(body))
    }
}

struct DecodeState {
    body: ByteStream,
    decoder: FrameDecoder,
    ready: VecDeque<String>,
    received_bytes: usize,
    ended: bool,
}

/// Turn a response body into text deltas.
pub fn decode_deltas(body: ByteStream) -> DeltaStream {
    let state = DecodeState {
        body,
        decoder: FrameDecoder::new(),
        ready: VecDeque::new(),
        received_bytes: 0,
        ended: false,
    };

    let deltas = stream::unfold(state, |mut state| async move {
        loop {
            if let Some(delta) = state.ready.pop_front() {
                return Some((Ok(delta), state));
            }
            if state.ended {
                return None;
            }
            // Anything after the sentinel is not read
            if state.decoder.is_done() {
                state.ended = true;
                continue;
            }

            match state.body.next().await {
                Some(Ok(chunk)) => {
                    state.received_bytes += chunk.len();
                    state.ready.extend(state.decoder.feed(&chunk));
                }
                Some(Err(e)) => {
                    state.ended = true;
                    let err = StreamError::ConnectionLost {
                        message: e.to_string(),
                    };
                    return Some((Err(err.into()), state));
                }
                None => {
                    state.ended = true;
                    if state.received_bytes == 0 {
                        return Some((Err(StreamError::MissingBody.into()), state));
                    }
                    state.ready.extend(state.decoder.finish());
                }
            }
        }
    });

    Box::pin(deltas)
}
