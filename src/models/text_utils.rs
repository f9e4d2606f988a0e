//! Text processing utilities for session titles.

/// Title given to a session before it has a usable user message.
pub const DEFAULT_SESSION_TITLE: &str = "New Chat";

/// Maximum number of characters taken from a message for a title.
pub const TITLE_MAX_CHARS: usize = 30;

/// Derive a session title from the first user message.
///
/// Takes the first [`TITLE_MAX_CHARS`] characters (not bytes) of the trimmed
/// text, or [`DEFAULT_SESSION_TITLE`] if nothing is left after trimming.
pub fn derive_title(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return DEFAULT_SESSION_TITLE.to_string();
    }
    trimmed.chars().take(TITLE_MAX_CHARS).collect()
}
