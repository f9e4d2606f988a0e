//! Persistence of the conversation store.
//!
//! Layout: three keys in a [`KeyValueStore`]:
//! - `sessions`: JSON array of sessions, most recent activity first
//! - `projects`: JSON array of projects
//! - `current_session`: JSON string or null
//!
//! Image attachment content is never written. When the store reports the
//! quota is exhausted, the sessions key is rewritten with the current session
//! only.

use serde::Serialize;
use tracing::{debug, warn};

use crate::cache::ConversationStore;
use crate::error::StorageError;
use crate::models::{ChatSession, Project};
use crate::traits::KeyValueStore;

pub const SESSIONS_KEY: &str = "sessions";
pub const PROJECTS_KEY: &str = "projects";
pub const CURRENT_SESSION_KEY: &str = "current_session";

/// How much of the history a save managed to write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Every session was written.
    Full,
    /// Storage was full; only the current session was written.
    Reduced,
}

/// Serialize sessions for storage.
///
/// The output depends only on the sessions' contents and order, and never
/// contains image attachment content.
pub fn serialize_sessions<'a, I>(sessions: I) -> Result<String, serde_json::Error>
where
    I: IntoIterator<Item = &'a ChatSession>,
{
    let persisted: Vec<ChatSession> = sessions.into_iter().map(ChatSession::to_persisted).collect();
    serde_json::to_string(&persisted)
}

fn to_json<T: Serialize + ?Sized>(key: &str, value: &T) -> Result<String, StorageError> {
    serde_json::to_string(value).map_err(|source| StorageError::Serialization {
        key: key.to_string(),
        source,
    })
}

/// Save the whole store.
///
/// Falls back to a reduced save if the full sessions list does not fit. A
/// quota failure of the reduced write is returned as an error.
pub fn save_store(
    store: &ConversationStore,
    kv: &dyn KeyValueStore,
) -> Result<SaveOutcome, StorageError> {
    let sessions = store.sessions();
    let full = serialize_sessions(sessions.iter().copied()).map_err(|source| {
        StorageError::Serialization {
            key: SESSIONS_KEY.to_string(),
            source,
        }
    })?;

    let outcome = match kv.write(SESSIONS_KEY, &full) {
        Ok(()) => SaveOutcome::Full,
        Err(err) if err.is_quota_exceeded() => {
            warn!(
                sessions = sessions.len(),
                bytes = full.len(),
                "Storage full, saving current session only"
            );
            let reduced = serialize_sessions(store.current_session()).map_err(|source| {
                StorageError::Serialization {
                    key: SESSIONS_KEY.to_string(),
                    source,
                }
            })?;
            kv.write(SESSIONS_KEY, &reduced)?;
            SaveOutcome::Reduced
        }
        Err(err) => return Err(err),
    };

    kv.write(PROJECTS_KEY, &to_json(PROJECTS_KEY, store.projects())?)?;
    kv.write(
        CURRENT_SESSION_KEY,
        &to_json(CURRENT_SESSION_KEY, &store.current_session_id())?,
    )?;

    debug!(?outcome, "Saved conversation store");
    Ok(outcome)
}

fn read_json<T: serde::de::DeserializeOwned>(
    kv: &dyn KeyValueStore,
    key: &str,
) -> Result<Option<T>, StorageError> {
    match kv.read(key)? {
        Some(raw) => serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| StorageError::Serialization {
                key: key.to_string(),
                source,
            }),
        None => Ok(None),
    }
}

/// Load a store previously written by [`save_store`].
///
/// Missing keys load as empty. A message still pending when it was saved is
/// finalized with the content it had, since its exchange did not survive.
/// Project references to unknown projects are cleared.
pub fn load_store(kv: &dyn KeyValueStore) -> Result<ConversationStore, StorageError> {
    let sessions: Vec<ChatSession> = read_json(kv, SESSIONS_KEY)?.unwrap_or_default();
    let projects: Vec<Project> = read_json(kv, PROJECTS_KEY)?.unwrap_or_default();
    let current: Option<String> = read_json(kv, CURRENT_SESSION_KEY)?.flatten();

    let mut store = ConversationStore::new();
    store.projects = projects;

    // Stored most recent first; inserting moves each to the front
    for mut session in sessions.into_iter().rev() {
        for message in session.messages.iter_mut() {
            if message.is_pending() {
                *message = message.finalized(message.content.clone());
            }
        }
        if let Some(pid) = session.project_id.as_deref() {
            if store.get_project(pid).is_none() {
                session.project_id = None;
            }
        }
        store.insert_session(session);
    }

    let selected = current.is_some_and(|id| store.select_session(&id));
    if !selected {
        if let Some(first) = store.session_order.first().cloned() {
            store.select_session(&first);
        }
    }

    debug!(sessions = store.session_count(), "Loaded conversation store");
    Ok(store)
}
