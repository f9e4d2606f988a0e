//! Messages sent from exchange tasks to the app loop.

use crate::exchange::{ExchangeId, ExchangeOutcome, Publication};

/// Messages that can be sent to the App from async tasks
#[derive(Debug, Clone, PartialEq)]
pub enum AppMessage {
    /// Full reply so far
    StreamSnapshot {
        session_id: String,
        exchange: ExchangeId,
        text: String,
    },
    /// Stream ended normally with the full reply
    StreamComplete {
        session_id: String,
        exchange: ExchangeId,
        text: String,
    },
    /// Exchange failed
    StreamError {
        session_id: String,
        exchange: ExchangeId,
        error: String,
    },
}

impl AppMessage {
    pub fn from_publication(session_id: &str, publication: Publication) -> Self {
        let session_id = session_id.to_string();
        match publication {
            Publication::Snapshot { exchange, text } => AppMessage::StreamSnapshot {
                session_id,
                exchange,
                text,
            },
            Publication::Final {
                exchange,
                outcome: ExchangeOutcome::Completed(text),
            } => AppMessage::StreamComplete {
                session_id,
                exchange,
                text,
            },
            Publication::Final {
                exchange,
                outcome: ExchangeOutcome::Failed(error),
            } => AppMessage::StreamError {
                session_id,
                exchange,
                error,
            },
        }
    }

    pub fn session_id(&self) -> &str {
        match self {
            AppMessage::StreamSnapshot { session_id, .. }
            | AppMessage::StreamComplete { session_id, .. }
            | AppMessage::StreamError { session_id, .. } => session_id,
        }
    }

    pub fn exchange(&self) -> ExchangeId {
        match self {
            AppMessage::StreamSnapshot { exchange, .. }
            | AppMessage::StreamComplete { exchange, .. }
            | AppMessage::StreamError { exchange, .. } => *exchange,
        }
    }

    /// True for the message that ends an exchange.
    pub fn is_final(&self) -> bool {
        !matches!(self, AppMessage::StreamSnapshot { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_publication() {
        let snapshot = AppMessage::from_publication(
            "s1",
            Publication::Snapshot {
                exchange: ExchangeId(3),
                text: "Hel".to_string(),
            },
        );
        assert_eq!(snapshot.session_id(), "s1");
        assert_eq!(snapshot.exchange(), ExchangeId(3));
        assert!(!snapshot.is_final());

        let failed = AppMessage::from_publication(
            "s1",
            Publication::Final {
                exchange: ExchangeId(3),
                outcome: ExchangeOutcome::Failed("boom".to_string()),
            },
        );
        assert_eq!(
            failed,
            AppMessage::StreamError {
                session_id: "s1".to_string(),
                exchange: ExchangeId(3),
                error: "boom".to_string()
            }
        );
        assert!(failed.is_final());
    }
}
