//! Trait abstractions for dependency injection and testability.
//!
//! # Traits
//!
//! - [`HttpClient`] - Streaming HTTP POST
//! - [`CredentialsProvider`] - API key storage and resolution
//! - [`KeyValueStore`] - Durable key/value persistence

pub mod credentials;
pub mod http;
pub mod storage;

pub use credentials::{ApiCredentials, CredentialsError, CredentialsProvider, DEFAULT_API_KEY_ENV};
pub use http::{ByteStream, Headers, HttpClient, HttpError};
pub use storage::KeyValueStore;
