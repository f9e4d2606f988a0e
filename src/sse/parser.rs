//! Stream decoding logic
//!
//! Contains the stateful FrameDecoder that turns raw byte chunks into text
//! deltas, as well as the line and payload parsing functions it is built on.

use tracing::{debug, trace, warn};

use crate::sse::events::{FrameLine, FrameParseError, DATA_PREFIX, DONE_SENTINEL};
use crate::sse::payloads::ChunkPayload;

/// Classify a single line of the stream.
///
/// The line is trimmed first, so `\r\n` line endings and stray indentation
/// are tolerated. Only the exact prefix `data: ` marks a frame.
pub fn parse_frame_line(line: &str) -> FrameLine {
    let line = line.trim();
    if line.is_empty() {
        return FrameLine::Empty;
    }

    match line.strip_prefix(DATA_PREFIX) {
        Some(DONE_SENTINEL) => FrameLine::Done,
        Some(payload) => FrameLine::Data(payload.to_string()),
        None => FrameLine::Other(line.to_string()),
    }
}

/// Extract `choices[0].delta.content` from a frame payload.
///
/// The returned string may be empty; callers decide whether to drop it.
pub fn extract_delta(payload: &str) -> Result<String, FrameParseError> {
    let chunk: ChunkPayload =
        serde_json::from_str(payload).map_err(|e| FrameParseError::InvalidJson {
            message: e.to_string(),
        })?;

    let choice = chunk.choices.into_iter().next().ok_or(FrameParseError::NoChoices)?;

    choice
        .delta
        .and_then(|delta| delta.content)
        .ok_or(FrameParseError::MissingContent)
}

/// Stateful decoder for a chat-completions byte stream.
///
/// Bytes may be split anywhere, including inside a multi-byte UTF-8 sequence
/// or inside a line. Complete lines are decoded as soon as they arrive; the
/// trailing partial line waits for the next `feed` (or for `finish`).
#[derive(Debug, Default)]
pub struct FrameDecoder {
    /// Decoded text not yet terminated by a newline
    buffer: String,
    /// Tail bytes of an incomplete UTF-8 sequence from the previous chunk
    pending_bytes: Vec<u8>,
    /// Set once the `[DONE]` sentinel has been seen
    done: bool,
}

impl FrameDecoder {
    /// Create a new decoder
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the `[DONE]` sentinel has been seen.
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Feed a chunk of bytes, returning the non-empty deltas it completed, in order.
    ///
    /// Once the sentinel has been seen every further call returns nothing.
    pub fn feed(&mut self, bytes: &[u8]) -> Vec<String> {
        if self.done {
            return Vec::new();
        }

        self.decode_utf8(bytes);
        self.drain_lines()
    }

    /// Signal that the transport closed.
    ///
    /// Decodes whatever is left in the buffer as a final line, even without a
    /// terminating newline. Incomplete UTF-8 left over at this point can never
    /// be completed and is replaced with U+FFFD.
    pub fn finish(&mut self) -> Vec<String> {
        if self.done {
            return Vec::new();
        }

        if !self.pending_bytes.is_empty() {
            let tail = std::mem::take(&mut self.pending_bytes);
            self.buffer.push_str(&String::from_utf8_lossy(&tail));
        }

        let mut deltas = self.drain_lines();
        if !self.done && !self.buffer.is_empty() {
            let last = std::mem::take(&mut self.buffer);
            if handle_line(&last, &mut deltas) {
                self.done = true;
            }
        }
        deltas
    }

    /// Reset the decoder so it can be reused for another stream.
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.pending_bytes.clear();
        self.done = false;
    }

    /// Append `bytes` to the text buffer, holding back an incomplete trailing sequence.
    fn decode_utf8(&mut self, bytes: &[u8]) {
        let joined;
        let mut rest: &[u8] = if self.pending_bytes.is_empty() {
            bytes
        } else {
            let mut carried = std::mem::take(&mut self.pending_bytes);
            carried.extend_from_slice(bytes);
            joined = carried;
            &joined
        };

        loop {
            match std::str::from_utf8(rest) {
                Ok(text) => {
                    self.buffer.push_str(text);
                    return;
                }
                Err(err) => {
                    let (valid, tail) = rest.split_at(err.valid_up_to());
                    if let Ok(text) = std::str::from_utf8(valid) {
                        self.buffer.push_str(text);
                    }
                    match err.error_len() {
                        Some(invalid_len) => {
                            trace!("Replacing {} invalid UTF-8 byte(s)", invalid_len);
                            self.buffer.push(char::REPLACEMENT_CHARACTER);
                            rest = &tail[invalid_len..];
                        }
                        None => {
                            // Sequence continues in the next chunk
                            self.pending_bytes = tail.to_vec();
                            return;
                        }
                    }
                }
            }
        }
    }

    /// Decode every complete line in the buffer, keeping the partial tail.
    fn drain_lines(&mut self) -> Vec<String> {
        let mut deltas = Vec::new();
        let mut consumed = 0;

        while let Some(offset) = self.buffer[consumed..].find('\n') {
            let end = consumed + offset;
            let done = handle_line(&self.buffer[consumed..end], &mut deltas);
            consumed = end + 1;
            if done {
                self.done = true;
                break;
            }
        }

        if self.done {
            self.buffer.clear();
            self.pending_bytes.clear();
        } else {
            self.buffer.drain(..consumed);
        }
        deltas
    }
}

/// Decode one line into `deltas`. Returns `true` when the line is the sentinel.
fn handle_line(line: &str, deltas: &mut Vec<String>) -> bool {
    match parse_frame_line(line) {
        FrameLine::Empty => false,
        FrameLine::Done => {
            debug!("Stream sentinel received");
            true
        }
        FrameLine::Other(other) => {
            debug!("Ignoring non-frame line: {}", truncate_for_log(&other));
            false
        }
        FrameLine::Data(payload) => {
            match extract_delta(&payload) {
                Ok(delta) if delta.is_empty() => {}
                Ok(delta) => deltas.push(delta),
                Err(err @ FrameParseError::InvalidJson { .. }) => {
                    warn!("Skipping malformed frame: {} ({})", err, truncate_for_log(&payload));
                }
                Err(err) => {
                    debug!("Skipping frame without content: {}", err);
                }
            }
            false
        }
    }
}

fn truncate_for_log(s: &str) -> &str {
    const MAX: usize = 120;
    match s.char_indices().nth(MAX) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
