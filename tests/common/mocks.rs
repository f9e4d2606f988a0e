//! Mock implementations and SSE frame builders for test fixtures.
//!
//! This module re-exports the mock implementations from
//! `chatstream::adapters::mock` and provides helpers for building
//! chat-completions stream bodies.

#![allow(dead_code)]

pub use chatstream::adapters::mock::{
    InMemoryCredentials, InMemoryStorage, MockHttpClient, MockResponse, RecordedRequest,
};
pub use chatstream::traits::{Headers, HttpClient, HttpError};

use bytes::Bytes;

/// A `data:` line carrying one content delta.
pub fn delta_line(text: &str) -> String {
    format!(
        "data: {}\n",
        serde_json::json!({"choices": [{"index": 0, "delta": {"content": text}}]})
    )
}

/// One content delta as a chunk.
pub fn delta_frame(text: &str) -> Bytes {
    Bytes::from(delta_line(text))
}

/// The end-of-stream sentinel as a chunk.
pub fn done_frame() -> Bytes {
    Bytes::from_static(b"data: [DONE]\n")
}

/// A complete body for `deltas`, split into chunks of at most `chunk_size`
/// bytes regardless of line or character boundaries.
pub fn chunked_body(deltas: &[&str], chunk_size: usize) -> Vec<Bytes> {
    let mut body = String::new();
    for delta in deltas {
        body.push_str(&delta_line(delta));
    }
    body.push_str("data: [DONE]\n");
    body.as_bytes()
        .chunks(chunk_size.max(1))
        .map(Bytes::copy_from_slice)
        .collect()
}

/// A successful streamed reply made of `deltas`, one frame per chunk.
pub fn stream_of(deltas: &[&str]) -> MockResponse {
    let mut chunks: Vec<Bytes> = deltas.iter().map(|d| delta_frame(d)).collect();
    chunks.push(done_frame());
    MockResponse::Stream(chunks)
}
