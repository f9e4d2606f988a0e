//! Error handling for chatstream.
//!
//! - **Error Categories**: high-level classification for logs and recovery hints
//! - **Domain-specific Errors**: network, stream, credential and storage errors
//! - **Unified Error Type**: `ChatError` consolidates all of them
//!
//! Malformed frames are not errors here: the decoder skips them
//! (see [`crate::sse::FrameParseError`]). Exchange failures never propagate
//! out of the exchange task; they become visible `Error: ...` replies.

mod category;
mod chat_error;
mod credential;
mod network;
mod storage;
mod stream;

pub use category::ErrorCategory;
pub use chat_error::ChatError;
pub use credential::CredentialError;
pub use network::NetworkError;
pub use storage::StorageError;
pub use stream::StreamError;

#[cfg(test)]
mod integration_tests {
    use super::*;

    fn fails_with_missing_key() -> Result<String, ChatError> {
        Err(CredentialError::Missing)?
    }

    #[test]
    fn test_question_mark_conversion() {
        let err = fails_with_missing_key().unwrap_err();
        assert!(matches!(err, ChatError::Credential(CredentialError::Missing)));
    }

    #[test]
    fn test_every_variant_has_user_message() {
        let errors: Vec<ChatError> = vec![
            NetworkError::Timeout {
                message: "30s".to_string(),
            }
            .into(),
            StreamError::MissingBody.into(),
            CredentialError::Missing.into(),
            StorageError::NoDataDirectory.into(),
        ];
        for err in errors {
            assert!(!err.user_message().is_empty());
            assert!(err.error_code().starts_with("E_"));
        }
    }
}
