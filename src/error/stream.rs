//! Streaming-related error types.

use std::fmt;

/// Failures of the reply stream once the request was accepted.
#[derive(Debug, Clone, PartialEq)]
pub enum StreamError {
    /// The response carried no body bytes at all.
    MissingBody,

    /// The byte stream broke mid-reply.
    ConnectionLost { message: String },
}

impl StreamError {
    pub fn user_message(&self) -> String {
        match self {
            StreamError::MissingBody => "The service returned an empty response.".to_string(),
            StreamError::ConnectionLost { message } => {
                format!("The connection was lost while streaming the reply: {}", message)
            }
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            StreamError::MissingBody => "E_STREAM_EMPTY",
            StreamError::ConnectionLost { .. } => "E_STREAM_LOST",
        }
    }
}

impl fmt::Display for StreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamError::MissingBody => write!(f, "Response body missing"),
            StreamError::ConnectionLost { message } => {
                write!(f, "Stream connection lost: {}", message)
            }
        }
    }
}

impl std::error::Error for StreamError {}
