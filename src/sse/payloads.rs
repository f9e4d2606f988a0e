//! Completion chunk deserialization structs
//!
//! Only `choices[0].delta.content` is consumed; every other field the
//! service sends (`id`, `model`, `finish_reason`, usage, ...) is ignored.

use serde::Deserialize;

/// One `data:` payload of a streamed chat completion
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ChunkPayload {
    #[serde(default)]
    pub choices: Vec<ChoicePayload>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ChoicePayload {
    #[serde(default)]
    pub delta: Option<DeltaPayload>,
}

/// Nested delta object (OpenAI style)
#[derive(Debug, Clone, Deserialize, Default)]
pub(crate) struct DeltaPayload {
    #[serde(default)]
    pub content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunk_payload_full() {
        let payload: ChunkPayload = serde_json::from_str(
            r#"{"id":"chatcmpl-1","object":"chat.completion.chunk","choices":[{"index":0,"delta":{"role":"assistant","content":"Hi"},"finish_reason":null}]}"#,
        )
        .unwrap();
        assert_eq!(payload.choices.len(), 1);
        assert_eq!(
            payload.choices[0].delta.as_ref().unwrap().content.as_deref(),
            Some("Hi")
        );
    }

    #[test]
    fn test_chunk_payload_missing_choices_defaults_to_empty() {
        let payload: ChunkPayload = serde_json::from_str(r#"{"id":"x"}"#).unwrap();
        assert!(payload.choices.is_empty());
    }

    #[test]
    fn test_chunk_payload_null_content() {
        let payload: ChunkPayload =
            serde_json::from_str(r#"{"choices":[{"delta":{"content":null}}]}"#).unwrap();
        assert!(payload.choices[0].delta.as_ref().unwrap().content.is_none());
    }
}
