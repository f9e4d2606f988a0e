//! Common test utilities for integration tests.
//!
//! This module provides reusable fixtures for driving the streaming
//! pipeline end to end against mock adapters.
//!
//! # Example
//!
//! ```ignore
//! let fixture = TestAppBuilder::new()
//!     .with_response(MockResponse::Stream(vec![delta_frame("Hi"), done_frame()]))
//!     .build();
//! ```

#![allow(dead_code)]

pub mod mocks;

pub use mocks::*;

use std::sync::Arc;
use std::time::Duration;

use chatstream::app::App;
use chatstream::config::Config;

/// Base URL used by every test app.
pub const TEST_API_BASE: &str = "https://api.test.invalid/v1";

/// URL the client posts to under [`TEST_API_BASE`].
pub fn test_completions_url() -> String {
    format!("{}/chat/completions", TEST_API_BASE)
}

/// Config pointing at the mock endpoint, publishing every delta.
pub fn test_config() -> Config {
    Config::new()
        .with_api_base_url(TEST_API_BASE)
        .with_model("test-model")
        .with_publish_interval(Duration::ZERO)
}

/// An App wired to mock adapters, with handles to inspect them.
pub struct TestFixture {
    pub app: App,
    pub http: MockHttpClient,
    pub credentials: InMemoryCredentials,
    pub storage: InMemoryStorage,
}

/// Builder for creating test App instances with various configurations.
pub struct TestAppBuilder {
    config: Config,
    http: MockHttpClient,
    credentials: InMemoryCredentials,
    storage: InMemoryStorage,
}

impl TestAppBuilder {
    pub fn new() -> Self {
        Self {
            config: test_config(),
            http: MockHttpClient::new(),
            credentials: InMemoryCredentials::with_api_key("sk-test-key"),
            storage: InMemoryStorage::new(),
        }
    }

    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Queue a response for the next request.
    pub fn with_response(self, response: MockResponse) -> Self {
        self.http.queue_response(response);
        self
    }

    pub fn with_credentials(mut self, credentials: InMemoryCredentials) -> Self {
        self.credentials = credentials;
        self
    }

    /// No user key and no environment default.
    pub fn without_api_key(self) -> Self {
        self.credentials.set_credentials(None);
        self.credentials.set_default_key(None);
        self
    }

    /// Stand-in for `OPENAI_API_KEY`.
    pub fn with_default_key(self, key: &str) -> Self {
        self.credentials.set_default_key(Some(key));
        self
    }

    pub fn with_storage(mut self, storage: InMemoryStorage) -> Self {
        self.storage = storage;
        self
    }

    pub fn build(self) -> TestFixture {
        let app = App::new(
            self.config,
            Arc::new(self.http.clone()),
            Arc::new(self.credentials.clone()),
            Arc::new(self.storage.clone()),
        )
        .expect("loading from empty storage succeeds");
        TestFixture {
            app,
            http: self.http,
            credentials: self.credentials,
            storage: self.storage,
        }
    }
}

impl Default for TestAppBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Contents of every message in a session, in order.
pub fn contents(app: &App, session_id: &str) -> Vec<String> {
    app.store
        .get_session(session_id)
        .map(|s| s.messages().iter().map(|m| m.content.clone()).collect())
        .unwrap_or_default()
}
