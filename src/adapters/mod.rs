//! Concrete implementations of trait abstractions.
//!
//! # Adapters
//!
//! - [`ReqwestHttpClient`] - HTTP client using reqwest
//! - [`FileCredentialsProvider`] - File-based API key storage
//! - [`FileStorage`] - One JSON file per key under the data directory
//!
//! The [`mock`] submodule provides test doubles for each of them.

pub mod file_credentials;
pub mod file_storage;
pub mod mock;
pub mod reqwest_http;

pub use file_credentials::FileCredentialsProvider;
pub use file_storage::FileStorage;
pub use mock::{InMemoryCredentials, InMemoryStorage, MockHttpClient};
pub use reqwest_http::ReqwestHttpClient;
