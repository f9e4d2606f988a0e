//! Per-exchange streaming state.
//!
//! An exchange is one user-message-to-assistant-reply round trip. Everything
//! here lives only as long as the task that drives the exchange's stream:
//! the [`DeltaAccumulator`] grows the reply, the [`ThrottledPublisher`]
//! decides when the growing reply is worth merging into the conversation
//! store. Every value that leaves this module is tagged with the
//! [`ExchangeId`] it belongs to, so the store can refuse writes from an
//! exchange that has been superseded.

mod accumulator;
mod publisher;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use accumulator::DeltaAccumulator;
pub use publisher::{Publication, PublisherState, ThrottledPublisher, PUBLISH_INTERVAL};

/// Prefix marking an assistant message that reports a failed exchange.
pub const ERROR_PREFIX: &str = "Error:";

/// Identity token of one exchange.
///
/// Allocated by the conversation store from a monotonically increasing
/// counter, so ids are never reused within a process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ExchangeId(pub u64);

impl fmt::Display for ExchangeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "exchange-{}", self.0)
    }
}

/// How an exchange ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExchangeOutcome {
    /// Stream ended normally; carries the full accumulated reply
    Completed(String),
    /// Exchange failed; carries a human-readable description
    Failed(String),
}

impl ExchangeOutcome {
    /// Content the placeholder message is frozen with.
    pub fn into_content(self) -> String {
        match self {
            ExchangeOutcome::Completed(text) => text,
            ExchangeOutcome::Failed(message) => format_error_content(&message),
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, ExchangeOutcome::Failed(_))
    }
}

/// Render an error description as visible assistant content.
pub fn format_error_content(message: &str) -> String {
    format!("{} {}", ERROR_PREFIX, message)
}
