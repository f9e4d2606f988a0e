//! Frame line types and parse errors for the chat-completions stream.

/// Prefix every payload-carrying frame starts with.
pub const DATA_PREFIX: &str = "data: ";

/// Payload that marks the end of the stream.
pub const DONE_SENTINEL: &str = "[DONE]";

/// Classification of a single (already trimmed) line of the stream.
#[derive(Debug, Clone, PartialEq)]
pub enum FrameLine {
    /// Blank line between frames
    Empty,
    /// `data: <payload>` frame, payload not yet interpreted
    Data(String),
    /// `data: [DONE]`
    Done,
    /// Anything else (comments, `event:` lines, garbage)
    Other(String),
}

/// Reasons a `data:` frame contributed no delta.
///
/// These never abort a stream; the decoder logs them and moves on.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FrameParseError {
    /// Payload was not valid JSON for a completion chunk
    #[error("Invalid JSON in frame: {message}")]
    InvalidJson { message: String },
    /// Chunk parsed but `choices` was empty
    #[error("Frame has no choices")]
    NoChoices,
    /// First choice carried no `delta.content`
    #[error("Frame has no delta content")]
    MissingContent,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_parse_error_display() {
        let err = FrameParseError::InvalidJson {
            message: "expected value".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid JSON in frame: expected value");
        // The parser message is text, not a chained cause
        assert!(std::error::Error::source(&err).is_none());
        assert_eq!(FrameParseError::NoChoices.to_string(), "Frame has no choices");
        assert_eq!(
            FrameParseError::MissingContent.to_string(),
            "Frame has no delta content"
        );
    }

    #[test]
    fn test_frame_parse_error_implements_error_trait() {
        let err = FrameParseError::NoChoices;
        let _: &dyn std::error::Error = &err;
    }
}
