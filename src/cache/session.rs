//! Session management methods for ConversationStore

use tracing::info;

use crate::models::ChatSession;

use super::ConversationStore;

impl ConversationStore {
    /// Create an empty session and select it as current.
    pub fn create_session(&mut self) -> String {
        let session = ChatSession::new();
        let id = session.id.clone();
        self.insert_session(session);
        self.current_session = Some(id.clone());
        info!(session_id = %id, "Created session");
        id
    }

    /// Insert (or overwrite) a session and move it to the front of the order.
    pub(crate) fn insert_session(&mut self, session: ChatSession) {
        let id = session.id.clone();
        self.sessions.insert(id.clone(), session);
        self.touch(&id);
    }

    /// Move a session to the front of the activity order.
    pub(crate) fn touch(&mut self, session_id: &str) {
        self.session_order.retain(|id| id != session_id);
        self.session_order.insert(0, session_id.to_string());
    }

    /// Select an existing session. Returns `false` if it does not exist.
    pub fn select_session(&mut self, session_id: &str) -> bool {
        if !self.sessions.contains_key(session_id) {
            return false;
        }
        self.current_session = Some(session_id.to_string());
        true
    }

    pub fn current_session_id(&self) -> Option<&str> {
        self.current_session.as_deref()
    }

    pub fn current_session(&self) -> Option<&ChatSession> {
        self.current_session
            .as_deref()
            .and_then(|id| self.sessions.get(id))
    }

    pub fn get_session(&self, session_id: &str) -> Option<&ChatSession> {
        self.sessions.get(session_id)
    }

    /// Sessions ordered by last activity, most recent first.
    pub fn sessions(&self) -> Vec<&ChatSession> {
        self.session_order
            .iter()
            .filter_map(|id| self.sessions.get(id))
            .collect()
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    /// Delete a session.
    ///
    /// If it was current, the most recently active remaining session becomes
    /// current (or none). Late stream merges for it become no-ops.
    pub fn delete_session(&mut self, session_id: &str) -> bool {
        if self.sessions.remove(session_id).is_none() {
            return false;
        }
        self.session_order.retain(|id| id != session_id);

        if self.current_session.as_deref() == Some(session_id) {
            self.current_session = self.session_order.first().cloned();
        }
        info!(session_id, "Deleted session");
        true
    }

    /// Rename a session. Blank titles are rejected.
    pub fn rename_session(&mut self, session_id: &str, title: &str) -> bool {
        let title = title.trim();
        if title.is_empty() {
            return false;
        }
        match self.sessions.get_mut(session_id) {
            Some(session) => {
                session.title = title.to_string();
                true
            }
            None => false,
        }
    }
}
