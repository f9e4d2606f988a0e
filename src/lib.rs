//! chatstream - a streaming chat-completions client
//!
//! This library exposes modules for use in integration tests.

pub mod adapters;
pub mod app;
pub mod cache;
pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod exchange;
pub mod models;
pub mod sse;
pub mod storage;
pub mod traits;
