use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::text_utils::DEFAULT_SESSION_TITLE;
use super::{Message, MessageRole, RequestMessage};
use crate::exchange::ExchangeId;

/// A conversation: an ordered, append-only list of messages.
///
/// The only in-place change ever made to `messages` is the replacement of
/// the in-flight assistant placeholder, which is always the last element.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatSession {
    /// Unique session identifier
    pub id: String,
    /// Project this session is filed under (None = unorganized)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    /// Title derived from the first user message
    pub title: String,
    /// Messages in insertion order
    #[serde(default)]
    pub(crate) messages: Vec<Message>,
    /// When the session was created
    pub created_at: DateTime<Utc>,
    /// Last activity
    pub updated_at: DateTime<Utc>,
}

impl ChatSession {
    /// Create an empty, unorganized session
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            project_id: None,
            title: DEFAULT_SESSION_TITLE.to_string(),
            messages: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn message_count(&self) -> usize {
        self.messages.len()
    }

    pub fn has_user_messages(&self) -> bool {
        self.messages.iter().any(|m| m.role == MessageRole::User)
    }

    /// Exchange currently streaming into this session, if any.
    ///
    /// A pending placeholder is only ever the last message, so only the last
    /// message is inspected.
    pub fn in_flight_exchange(&self) -> Option<ExchangeId> {
        self.messages.last().and_then(Message::pending_exchange)
    }

    /// Append a message and bump the activity timestamp.
    pub(crate) fn push_message(&mut self, message: Message) {
        self.messages.push(message);
        self.updated_at = Utc::now();
    }

    /// Replace the message at `index`, returning `false` if out of range.
    pub(crate) fn replace_message_at(&mut self, index: usize, message: Message) -> bool {
        match self.messages.get_mut(index) {
            Some(slot) => {
                *slot = message;
                true
            }
            None => false,
        }
    }

    /// Copy suitable for storage (image attachment content dropped).
    pub fn to_persisted(&self) -> Self {
        Self {
            messages: self.messages.iter().map(Message::to_persisted).collect(),
            ..self.clone()
        }
    }

    /// History sent to the service for the next reply.
    ///
    /// The in-flight placeholder and empty assistant messages (replies that
    /// were superseded before any text arrived) are left out.
    pub fn to_request_messages(&self) -> Vec<RequestMessage> {
        self.messages
            .iter()
            .filter(|m| !m.is_pending())
            .filter(|m| !(m.role == MessageRole::Assistant && m.content.is_empty()))
            .map(RequestMessage::from_message)
            .collect()
    }
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}
