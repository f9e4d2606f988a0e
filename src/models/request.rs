use serde::{Deserialize, Serialize};

use super::{AttachmentKind, Message, MessageRole};

/// Request body for a streamed chat completion
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatRequest {
    /// Model identifier
    pub model: String,
    /// Conversation history, oldest first
    pub messages: Vec<RequestMessage>,
    /// Always `true`; the client only consumes streamed replies
    pub stream: bool,
}

impl ChatRequest {
    /// Create a streaming request
    pub fn new(model: impl Into<String>, messages: Vec<RequestMessage>) -> Self {
        Self {
            model: model.into(),
            messages,
            stream: true,
        }
    }
}

/// One entry of the request history
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RequestMessage {
    pub role: MessageRole,
    pub content: RequestContent,
}

/// Plain text, or multi-part content when images are attached
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum RequestContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ImageUrl {
    pub url: String,
}

impl RequestMessage {
    pub fn text(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: RequestContent::Text(content.into()),
        }
    }

    /// Build the wire form of a stored message.
    ///
    /// Document attachments are appended to the text as `[File: name]`
    /// blocks. Images become `image_url` parts carrying a data URL; an image
    /// whose content was dropped by storage is skipped.
    pub fn from_message(message: &Message) -> Self {
        let mut text = message.content.clone();
        for doc in message
            .attachments
            .iter()
            .filter(|a| a.kind() == AttachmentKind::Document)
        {
            text.push_str(&format!("\n\n[File: {}]\n{}", doc.name(), doc.content()));
        }

        let images: Vec<ContentPart> = message
            .attachments
            .iter()
            .filter_map(|a| a.data_url())
            .map(|url| ContentPart::ImageUrl {
                image_url: ImageUrl { url },
            })
            .collect();

        if images.is_empty() {
            return Self::text(message.role, text);
        }

        let mut parts = Vec::with_capacity(images.len() + 1);
        parts.push(ContentPart::Text { text });
        parts.extend(images);
        Self {
            role: message.role,
            content: RequestContent::Parts(parts),
        }
    }
}
