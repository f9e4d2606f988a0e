//! Chat-completions stream decoder
//!
//! Decodes the newline-delimited frame format used by OpenAI-compatible
//! chat-completions endpoints when `stream: true` is requested:
//! - `data: <json>` - one completion chunk
//! - `data: [DONE]` - end of stream sentinel
//! - Any other line - ignored
//!
//! # Module structure
//! - `events` - Line classification and parse errors (FrameLine, FrameParseError)
//! - `payloads` - Internal payload deserialization structs
//! - `parser` - Decoding logic (FrameDecoder, parse_frame_line)

mod events;
mod parser;
mod payloads;

// Re-export public types
pub use events::{FrameLine, FrameParseError, DATA_PREFIX, DONE_SENTINEL};
pub use parser::{extract_delta, parse_frame_line, FrameDecoder};
