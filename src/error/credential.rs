//! API key resolution errors.

use std::fmt;

use crate::traits::CredentialsError;

#[derive(Debug, Clone, PartialEq)]
pub enum CredentialError {
    /// Neither a stored key nor a process default is available.
    Missing,

    /// A stored key exists but could not be read.
    Unreadable { message: String },
}

impl CredentialError {
    pub fn user_message(&self) -> String {
        match self {
            CredentialError::Missing => {
                "No API key configured. Run `chatstream login` or set OPENAI_API_KEY.".to_string()
            }
            CredentialError::Unreadable { message } => {
                format!("The stored API key could not be read: {}", message)
            }
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            CredentialError::Missing => "E_CRED_MISSING",
            CredentialError::Unreadable { .. } => "E_CRED_READ",
        }
    }
}

impl fmt::Display for CredentialError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CredentialError::Missing => write!(f, "API key missing"),
            CredentialError::Unreadable { message } => {
                write!(f, "API key unreadable: {}", message)
            }
        }
    }
}

impl std::error::Error for CredentialError {}

impl From<CredentialsError> for CredentialError {
    fn from(err: CredentialsError) -> Self {
        CredentialError::Unreadable {
            message: err.to_string(),
        }
    }
}
