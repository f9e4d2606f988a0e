//! Mock implementations for testing.
//!
//! # Available Mocks
//!
//! - [`MockHttpClient`] - HTTP client replaying configured chunks
//! - [`InMemoryCredentials`] - In-memory API key storage
//! - [`InMemoryStorage`] - In-memory key/value store with a quota

pub mod credentials;
pub mod http;
pub mod storage;

pub use credentials::InMemoryCredentials;
pub use http::{MockHttpClient, MockResponse, RecordedRequest};
pub use storage::InMemoryStorage;
