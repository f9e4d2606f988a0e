//! User actions on sessions, projects and attachments.

use std::path::Path;

use thiserror::Error;
use tracing::info;

use crate::models::Attachment;

use super::App;

/// Why a file could not be attached.
#[derive(Debug, Error)]
pub enum AttachError {
    #[error("Could not read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{path} is neither an image nor a UTF-8 text document")]
    Unsupported { path: String },
}

/// Media type for image files, by extension.
fn image_media_type(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        _ => None,
    }
}

impl App {
    /// Start an empty session, filed under the active project if any.
    pub fn new_session(&mut self) -> String {
        let id = self.store.create_session();
        if let Some(project_id) = self.active_project.clone() {
            self.store.assign_session_to_project(&id, Some(&project_id));
        }
        self.persist();
        id
    }

    /// Select the session at `index` in activity order (0 = most recent).
    pub fn switch_session(&mut self, index: usize) -> bool {
        let Some(id) = self.store.sessions().get(index).map(|s| s.id.clone()) else {
            return false;
        };
        let switched = self.store.select_session(&id);
        if switched {
            self.persist();
        }
        switched
    }

    /// Make `name` the active project, creating it if needed, and file the
    /// current session under it.
    pub fn use_project(&mut self, name: &str) -> Option<String> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        let project_id = match self.store.find_project_by_name(name) {
            Some(project) => project.id.clone(),
            None => self.store.create_project(name),
        };
        if let Some(session_id) = self.store.current_session_id().map(str::to_string) {
            self.store
                .assign_session_to_project(&session_id, Some(&project_id));
        }
        self.active_project = Some(project_id.clone());
        self.persist();
        Some(project_id)
    }

    /// Stage a file to be sent with the next message.
    ///
    /// Images are sent as base64, anything else must be UTF-8 text.
    pub fn attach_file(&mut self, path: &Path) -> Result<&Attachment, AttachError> {
        let display = path.display().to_string();
        let bytes = std::fs::read(path).map_err(|source| AttachError::Read {
            path: display.clone(),
            source,
        })?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| display.clone());

        let attachment = match image_media_type(path) {
            Some(media_type) => Attachment::image(name, &bytes, media_type),
            None => {
                let text = String::from_utf8(bytes)
                    .map_err(|_| AttachError::Unsupported { path: display })?;
                Attachment::document(name, text)
            }
        };
        info!(name = attachment.name(), kind = ?attachment.kind(), "Attachment staged");
        self.pending_attachments.push(attachment);
        Ok(&self.pending_attachments[self.pending_attachments.len() - 1])
    }
}
