//! Conversation store
//!
//! Authoritative in-memory state: sessions, their messages and the projects
//! they are filed under. Streaming replies reach it only through the guarded
//! merge operations in `message.rs`.

mod message;
mod project;
mod session;

use std::collections::HashMap;

use crate::models::{ChatSession, Project};

/// Sessions, projects and the current selection
#[derive(Debug, Default)]
pub struct ConversationStore {
    /// Sessions indexed by session ID
    pub(crate) sessions: HashMap<String, ChatSession>,
    /// Order of session IDs (most recent activity first)
    pub(crate) session_order: Vec<String>,
    /// Projects in creation order
    pub(crate) projects: Vec<Project>,
    /// Currently selected session
    pub(crate) current_session: Option<String>,
    /// Last exchange ID handed out
    pub(crate) last_exchange_id: u64,
}

impl ConversationStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all state. Exchange IDs keep counting so old ones stay invalid.
    pub fn clear(&mut self) {
        self.sessions.clear();
        self.session_order.clear();
        self.projects.clear();
        self.current_session = None;
    }
}
