//! Message handlers for the App.

use tracing::{debug, warn};

use crate::error::ChatError;
use crate::exchange::ExchangeOutcome;
use crate::storage::{save_store, SaveOutcome};

use super::{App, AppMessage};

impl App {
    /// Apply a message from an exchange task to the store.
    ///
    /// Returns `false` if the store refused it (session deleted or exchange
    /// superseded). Accepted messages are persisted immediately.
    pub fn handle_message(&mut self, msg: AppMessage) -> bool {
        let applied = match msg {
            AppMessage::StreamSnapshot {
                session_id,
                exchange,
                text,
            } => self.store.merge_assistant_delta(&session_id, exchange, &text),
            AppMessage::StreamComplete {
                session_id,
                exchange,
                text,
            } => self.store.finalize_exchange(
                &session_id,
                exchange,
                ExchangeOutcome::Completed(text),
            ),
            AppMessage::StreamError {
                session_id,
                exchange,
                error,
            } => self
                .store
                .finalize_exchange(&session_id, exchange, ExchangeOutcome::Failed(error)),
        };

        if applied {
            self.persist();
        } else {
            debug!("Ignored message for an inactive exchange");
        }
        applied
    }

    /// Save the store, recording the outcome.
    ///
    /// Failures are logged and kept in [`App::save_error`]; they never
    /// interrupt the conversation.
    pub fn persist(&mut self) {
        match save_store(&self.store, self.storage.as_ref()) {
            Ok(outcome) => {
                if outcome == SaveOutcome::Reduced && self.last_save != Some(SaveOutcome::Reduced) {
                    warn!("History saved in reduced form: only the current session fits");
                }
                self.last_save = Some(outcome);
                self.save_error = None;
            }
            Err(err) => {
                let err = ChatError::from(err);
                warn!(
                    category = %err.category(),
                    code = err.error_code(),
                    "Failed to save history: {}",
                    err
                );
                self.save_error = Some(format!("{} {}.", err.user_message(), err.recovery_hint()));
            }
        }
    }
}
