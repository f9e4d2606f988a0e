use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Attachment;
use crate::exchange::ExchangeId;

/// Role of a message in a conversation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
    System,
}

/// Whether a message may still change.
///
/// Only the assistant placeholder of the exchange currently streaming into a
/// session is `Pending`; every other message is `Final` and never mutated.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(tag = "status", content = "exchange", rename_all = "lowercase")]
pub enum MessageState {
    /// In-flight placeholder owned by the given exchange
    Pending(ExchangeId),
    #[default]
    Final,
}

/// A message within a chat session
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Message {
    /// Unique message identifier
    pub id: String,
    /// Role of the message sender
    pub role: MessageRole,
    /// Text content of the message
    pub content: String,
    /// Files attached to the message (user messages only)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<Attachment>,
    /// When the message was created
    pub created_at: DateTime<Utc>,
    /// Pending (in-flight placeholder) or final
    #[serde(default)]
    pub state: MessageState,
}

impl Message {
    fn new(role: MessageRole, content: String, state: MessageState) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role,
            content,
            attachments: Vec::new(),
            created_at: Utc::now(),
            state,
        }
    }

    /// A final user message with its attachments
    pub fn user(content: impl Into<String>, attachments: Vec<Attachment>) -> Self {
        Self {
            attachments,
            ..Self::new(MessageRole::User, content.into(), MessageState::Final)
        }
    }

    /// A final assistant message
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Assistant, content.into(), MessageState::Final)
    }

    /// A final system message
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(MessageRole::System, content.into(), MessageState::Final)
    }

    /// Empty assistant placeholder owned by `exchange`
    pub fn placeholder(exchange: ExchangeId) -> Self {
        Self::new(
            MessageRole::Assistant,
            String::new(),
            MessageState::Pending(exchange),
        )
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.state, MessageState::Pending(_))
    }

    /// Exchange this message is the in-flight placeholder of, if any
    pub fn pending_exchange(&self) -> Option<ExchangeId> {
        match self.state {
            MessageState::Pending(exchange) => Some(exchange),
            MessageState::Final => None,
        }
    }

    /// Same message with its content replaced; the state is kept.
    pub fn with_content(&self, content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..self.clone()
        }
    }

    /// Same message with its content replaced and the state frozen.
    pub fn finalized(&self, content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            state: MessageState::Final,
            ..self.clone()
        }
    }

    /// Copy suitable for storage (image attachment content dropped).
    pub fn to_persisted(&self) -> Self {
        Self {
            attachments: self
                .attachments
                .iter()
                .map(Attachment::stripped_for_storage)
                .collect(),
            ..self.clone()
        }
    }
}
