//! Rate-limited propagation of the growing reply.
//!
//! Merging a snapshot into the store also persists it, so publishing on
//! every delta would rewrite storage dozens of times per second. The
//! publisher lets at most one snapshot through per interval and always lets
//! the final value through, whenever the stream ends.

use std::time::{Duration, Instant};

use tracing::trace;

use super::{DeltaAccumulator, ExchangeId, ExchangeOutcome};

/// Minimum time between two snapshot publications of one exchange.
pub const PUBLISH_INTERVAL: Duration = Duration::from_millis(100);

/// Lifecycle of a publisher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublisherState {
    /// No delta seen yet for the current exchange
    Idle,
    /// Deltas are arriving
    Streaming,
    /// Final value produced; further deltas are ignored until [`ThrottledPublisher::reset`]
    Finalizing,
}

/// A value the publisher decided to propagate to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Publication {
    /// Intermediate full snapshot of the reply
    Snapshot { exchange: ExchangeId, text: String },
    /// Final value of the exchange; always produced exactly once
    Final {
        exchange: ExchangeId,
        outcome: ExchangeOutcome,
    },
}

impl Publication {
    pub fn exchange(&self) -> ExchangeId {
        match self {
            Publication::Snapshot { exchange, .. } | Publication::Final { exchange, .. } => {
                *exchange
            }
        }
    }

    pub fn is_final(&self) -> bool {
        matches!(self, Publication::Final { .. })
    }
}

/// Decides, per delta, whether the current snapshot is published now or deferred.
#[derive(Debug, Clone)]
pub struct ThrottledPublisher {
    exchange: ExchangeId,
    interval: Duration,
    state: PublisherState,
    last_publish: Option<Instant>,
    published_len: usize,
}

impl ThrottledPublisher {
    /// Create a publisher for `exchange` with the default interval.
    pub fn new(exchange: ExchangeId) -> Self {
        Self::with_interval(exchange, PUBLISH_INTERVAL)
    }

    pub fn with_interval(exchange: ExchangeId, interval: Duration) -> Self {
        Self {
            exchange,
            interval,
            state: PublisherState::Idle,
            last_publish: None,
            published_len: 0,
        }
    }

    pub fn exchange(&self) -> ExchangeId {
        self.exchange
    }

    pub fn state(&self) -> PublisherState {
        self.state
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Length of the last snapshot let through.
    pub fn published_len(&self) -> usize {
        self.published_len
    }

    /// Called after each delta has been appended to `acc`.
    pub fn on_delta(&mut self, acc: &DeltaAccumulator) -> Option<Publication> {
        self.on_delta_at(acc, Instant::now())
    }

    /// Same as [`on_delta`](Self::on_delta) with an explicit clock reading.
    pub fn on_delta_at(&mut self, acc: &DeltaAccumulator, now: Instant) -> Option<Publication> {
        match self.state {
            PublisherState::Idle => self.state = PublisherState::Streaming,
            PublisherState::Streaming => {}
            PublisherState::Finalizing => return None,
        }

        let due = self
            .last_publish
            .map_or(true, |last| now.saturating_duration_since(last) >= self.interval);
        if !due {
            trace!(exchange = %self.exchange, "Deferring snapshot ({} bytes)", acc.len());
            return None;
        }

        // Snapshots only grow; never publish one shorter than what is already out
        if acc.len() < self.published_len {
            return None;
        }

        self.last_publish = Some(now);
        self.published_len = acc.len();
        Some(Publication::Snapshot {
            exchange: self.exchange,
            text: acc.snapshot().to_string(),
        })
    }

    /// Stream ended normally: publish the full reply regardless of timing.
    pub fn finish(&mut self, acc: &DeltaAccumulator) -> Publication {
        self.finalize(ExchangeOutcome::Completed(acc.snapshot().to_string()))
    }

    /// Exchange failed: publish the error description regardless of timing.
    pub fn fail(&mut self, message: impl Into<String>) -> Publication {
        self.finalize(ExchangeOutcome::Failed(message.into()))
    }

    /// Return to `Idle` for the next exchange.
    pub fn reset(&mut self, exchange: ExchangeId) {
        self.exchange = exchange;
        self.state = PublisherState::Idle;
        self.last_publish = None;
        self.published_len = 0;
    }

    fn finalize(&mut self, outcome: ExchangeOutcome) -> Publication {
        self.state = PublisherState::Finalizing;
        if let ExchangeOutcome::Completed(text) = &outcome {
            self.published_len = text.len();
        }
        Publication::Final {
            exchange: self.exchange,
            outcome,
        }
    }
}
