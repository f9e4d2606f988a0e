//! Unified error type for chatstream.

use std::fmt;

use super::category::ErrorCategory;
use super::credential::CredentialError;
use super::network::NetworkError;
use super::storage::StorageError;
use super::stream::StreamError;

/// Every failure an exchange or a save can run into.
#[derive(Debug)]
pub enum ChatError {
    Network(NetworkError),
    Stream(StreamError),
    Credential(CredentialError),
    Storage(StorageError),
}

impl ChatError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ChatError::Network(NetworkError::HttpStatus { status, .. }) => match *status {
                401 | 403 => ErrorCategory::Auth,
                500..=599 => ErrorCategory::Server,
                _ => ErrorCategory::Client,
            },
            ChatError::Network(NetworkError::InvalidUrl { .. }) => ErrorCategory::Configuration,
            ChatError::Network(_) => ErrorCategory::Network,
            ChatError::Stream(StreamError::MissingBody) => ErrorCategory::Server,
            ChatError::Stream(StreamError::ConnectionLost { .. }) => ErrorCategory::Network,
            ChatError::Credential(_) => ErrorCategory::Auth,
            ChatError::Storage(StorageError::NoDataDirectory) => ErrorCategory::Configuration,
            ChatError::Storage(_) => ErrorCategory::Storage,
        }
    }

    /// Message shown to the user (and stored as `Error: ...` content).
    pub fn user_message(&self) -> String {
        match self {
            ChatError::Network(err) => err.user_message(),
            ChatError::Stream(err) => err.user_message(),
            ChatError::Credential(err) => err.user_message(),
            ChatError::Storage(err) => err.user_message(),
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            ChatError::Network(err) => err.error_code(),
            ChatError::Stream(err) => err.error_code(),
            ChatError::Credential(err) => err.error_code(),
            ChatError::Storage(err) => err.error_code(),
        }
    }

    /// What the user can do about it, shown next to save failures.
    pub fn recovery_hint(&self) -> &'static str {
        self.category().recovery_hint()
    }
}

impl fmt::Display for ChatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChatError::Network(err) => write!(f, "{}", err),
            ChatError::Stream(err) => write!(f, "{}", err),
            ChatError::Credential(err) => write!(f, "{}", err),
            ChatError::Storage(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for ChatError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ChatError::Network(err) => Some(err),
            ChatError::Stream(err) => Some(err),
            ChatError::Credential(err) => Some(err),
            ChatError::Storage(err) => Some(err),
        }
    }
}

impl From<NetworkError> for ChatError {
    fn from(err: NetworkError) -> Self {
        ChatError::Network(err)
    }
}

impl From<StreamError> for ChatError {
    fn from(err: StreamError) -> Self {
        ChatError::Stream(err)
    }
}

impl From<CredentialError> for ChatError {
    fn from(err: CredentialError) -> Self {
        ChatError::Credential(err)
    }
}

impl From<StorageError> for ChatError {
    fn from(err: StorageError) -> Self {
        ChatError::Storage(err)
    }
}
