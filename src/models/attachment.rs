use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// What an attachment carries
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AttachmentKind {
    /// Binary image, stored as base64 text
    Image,
    /// Extracted plain text of a document
    Document,
}

/// A file attached to a user message.
///
/// Attachments are immutable once created; all fields are read through
/// accessors. Image content is never written to storage (see
/// [`Attachment::stripped_for_storage`]), so an image loaded back from disk
/// has an empty `content`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Attachment {
    id: String,
    name: String,
    kind: AttachmentKind,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    media_type: Option<String>,
}

impl Attachment {
    /// Attach extracted document text.
    pub fn document(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            kind: AttachmentKind::Document,
            content: text.into(),
            media_type: Some("text/plain".to_string()),
        }
    }

    /// Attach raw image bytes; they are base64-encoded here.
    pub fn image(name: impl Into<String>, bytes: &[u8], media_type: impl Into<String>) -> Self {
        Self::image_base64(name, BASE64.encode(bytes), media_type)
    }

    /// Attach an image that is already base64-encoded.
    pub fn image_base64(
        name: impl Into<String>,
        base64: impl Into<String>,
        media_type: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            kind: AttachmentKind::Image,
            content: base64.into(),
            media_type: Some(media_type.into()),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> AttachmentKind {
        self.kind
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn media_type(&self) -> Option<&str> {
        self.media_type.as_deref()
    }

    pub fn is_image(&self) -> bool {
        self.kind == AttachmentKind::Image
    }

    /// `data:` URL for an image attachment, if it still has content.
    pub fn data_url(&self) -> Option<String> {
        if !self.is_image() || self.content.is_empty() {
            return None;
        }
        let media_type = self.media_type.as_deref().unwrap_or("image/png");
        Some(format!("data:{};base64,{}", media_type, self.content))
    }

    /// Copy suitable for storage: image content is dropped, documents are kept.
    pub fn stripped_for_storage(&self) -> Self {
        if self.is_image() {
            Self {
                content: String::new(),
                ..self.clone()
            }
        } else {
            self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_attachment() {
        let doc = Attachment::document("notes.txt", "hello");
        assert_eq!(doc.kind(), AttachmentKind::Document);
        assert_eq!(doc.name(), "notes.txt");
        assert_eq!(doc.content(), "hello");
        assert!(!doc.id().is_empty());
        assert!(doc.data_url().is_none());
    }

    #[test]
    fn test_image_attachment_is_base64() {
        let img = Attachment::image("dot.png", &[0x89, 0x50, 0x4E, 0x47], "image/png");
        assert!(img.is_image());
        assert_eq!(img.content(), "iVBORw==");
        assert_eq!(
            img.data_url().as_deref(),
            Some("data:image/png;base64,iVBORw==")
        );
    }

    #[test]
    fn test_ids_are_unique() {
        let a = Attachment::document("a", "x");
        let b = Attachment::document("a", "x");
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_stripped_for_storage() {
        let img = Attachment::image_base64("a.png", "AAAA", "image/png");
        let doc = Attachment::document("b.txt", "keep me");

        let stripped_img = img.stripped_for_storage();
        assert_eq!(stripped_img.content(), "");
        assert_eq!(stripped_img.name(), "a.png");
        assert_eq!(stripped_img.id(), img.id());

        assert_eq!(doc.stripped_for_storage(), doc);
    }

    #[test]
    fn test_stripped_image_serializes_without_content() {
        let img = Attachment::image_base64("a.png", "SECRETBYTES", "image/png");
        let json = serde_json::to_string(&img.stripped_for_storage()).unwrap();
        assert!(!json.contains("SECRETBYTES"));
        assert!(!json.contains("\"content\""));
        assert!(json.contains("\"kind\":\"image\""));
    }
}
