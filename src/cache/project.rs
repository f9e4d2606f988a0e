//! Project methods for ConversationStore

use tracing::info;

use crate::models::{ChatSession, Project};

use super::ConversationStore;

impl ConversationStore {
    /// Create a project and return its ID.
    pub fn create_project(&mut self, name: &str) -> String {
        let project = Project::new(name.trim());
        let id = project.id.clone();
        info!(project_id = %id, name = %project.name, "Created project");
        self.projects.push(project);
        id
    }

    /// Projects in creation order.
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn get_project(&self, project_id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == project_id)
    }

    /// Look up a project by name (case-insensitive).
    pub fn find_project_by_name(&self, name: &str) -> Option<&Project> {
        let name = name.trim();
        self.projects
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
    }

    pub fn rename_project(&mut self, project_id: &str, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() {
            return false;
        }
        match self.projects.iter_mut().find(|p| p.id == project_id) {
            Some(project) => {
                project.name = name.to_string();
                true
            }
            None => false,
        }
    }

    /// Delete a project. Its sessions are kept and become unorganized.
    pub fn delete_project(&mut self, project_id: &str) -> bool {
        let before = self.projects.len();
        self.projects.retain(|p| p.id != project_id);
        if self.projects.len() == before {
            return false;
        }

        let mut released = 0usize;
        for session in self.sessions.values_mut() {
            if session.project_id.as_deref() == Some(project_id) {
                session.project_id = None;
                released += 1;
            }
        }
        info!(project_id, released, "Deleted project");
        true
    }

    /// File a session under a project, or unorganize it with `None`.
    ///
    /// Fails if the session or the named project does not exist.
    pub fn assign_session_to_project(
        &mut self,
        session_id: &str,
        project_id: Option<&str>,
    ) -> bool {
        if let Some(pid) = project_id {
            if self.get_project(pid).is_none() {
                return false;
            }
        }
        match self.sessions.get_mut(session_id) {
            Some(session) => {
                session.project_id = project_id.map(str::to_string);
                true
            }
            None => false,
        }
    }

    /// Sessions filed under `project_id` (or unorganized sessions for `None`),
    /// most recent activity first.
    pub fn sessions_in_project(&self, project_id: Option<&str>) -> Vec<&ChatSession> {
        self.sessions()
            .into_iter()
            .filter(|s| s.project_id.as_deref() == project_id)
            .collect()
    }
}
