//! Exchange lifecycle and guarded merges for ConversationStore

use tracing::{debug, info};

use crate::exchange::{ExchangeId, ExchangeOutcome};
use crate::models::{derive_title, Attachment, ChatSession, Message};

use super::ConversationStore;

impl ConversationStore {
    /// Start a new exchange in a session.
    ///
    /// Appends the user message and an empty assistant placeholder owned by
    /// the returned exchange. If another exchange is still streaming into the
    /// session it is superseded first: its placeholder is frozen with whatever
    /// content it had, and its later merges are refused.
    ///
    /// The session title is derived from the first user message only.
    ///
    /// Returns `None` if the session does not exist.
    pub fn begin_exchange(
        &mut self,
        session_id: &str,
        content: &str,
        attachments: Vec<Attachment>,
    ) -> Option<ExchangeId> {
        if !self.sessions.contains_key(session_id) {
            return None;
        }
        self.last_exchange_id += 1;
        let exchange = ExchangeId(self.last_exchange_id);

        let session = self.sessions.get_mut(session_id)?;
        supersede_in_flight(session);

        if !session.has_user_messages() {
            session.title = derive_title(content);
        }
        session.push_message(Message::user(content, attachments));
        session.push_message(Message::placeholder(exchange));

        self.touch(session_id);
        info!(session_id, %exchange, "Exchange started");
        Some(exchange)
    }

    /// Exchange currently streaming into a session, if any.
    pub fn in_flight_exchange(&self, session_id: &str) -> Option<ExchangeId> {
        self.sessions
            .get(session_id)
            .and_then(ChatSession::in_flight_exchange)
    }

    /// Replace the placeholder's content with a full snapshot of the reply.
    ///
    /// `text` is the whole reply so far, not a delta. The merge is a no-op
    /// (returns `false`) if the session is gone or `exchange` is not the
    /// exchange currently streaming into it.
    pub fn merge_assistant_delta(
        &mut self,
        session_id: &str,
        exchange: ExchangeId,
        text: &str,
    ) -> bool {
        let Some((session, index)) = self.placeholder_for(session_id, exchange) else {
            return false;
        };
        let updated = session.messages[index].with_content(text);
        session.replace_message_at(index, updated)
    }

    /// Freeze the placeholder with the exchange's final content.
    ///
    /// A failure is rendered as visible `Error: ...` content. Guarded like
    /// [`merge_assistant_delta`](Self::merge_assistant_delta).
    pub fn finalize_exchange(
        &mut self,
        session_id: &str,
        exchange: ExchangeId,
        outcome: ExchangeOutcome,
    ) -> bool {
        let failed = outcome.is_failure();
        let Some((session, index)) = self.placeholder_for(session_id, exchange) else {
            return false;
        };
        let frozen = session.messages[index].finalized(outcome.into_content());
        let replaced = session.replace_message_at(index, frozen);
        session.updated_at = chrono::Utc::now();
        info!(session_id, %exchange, failed, "Exchange finalized");
        replaced
    }

    /// Resolve the placeholder `exchange` may write to, enforcing the supersession guard.
    fn placeholder_for(
        &mut self,
        session_id: &str,
        exchange: ExchangeId,
    ) -> Option<(&mut ChatSession, usize)> {
        let Some(session) = self.sessions.get_mut(session_id) else {
            debug!(session_id, %exchange, "Dropping merge for missing session");
            return None;
        };
        if session.in_flight_exchange() != Some(exchange) {
            debug!(session_id, %exchange, "Dropping merge from superseded exchange");
            return None;
        }
        let index = session.messages.len().checked_sub(1)?;
        Some((session, index))
    }
}

/// Freeze a still-pending placeholder so a new exchange can take over.
fn supersede_in_flight(session: &mut ChatSession) {
    let Some(previous) = session.in_flight_exchange() else {
        return;
    };
    let index = session.messages.len() - 1;
    let content = session.messages[index].content.clone();
    let frozen = session.messages[index].finalized(content);
    session.replace_message_at(index, frozen);
    debug!(session_id = %session.id, exchange = %previous, "Superseded in-flight exchange");
}
