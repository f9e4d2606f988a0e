//! Application state and the single loop that owns the conversation store.
//!
//! Exchange tasks never touch the store. They report through
//! [`AppMessage`]s on an unbounded channel, and the owner of the [`App`]
//! applies them with [`App::handle_message`].

mod actions;
mod handlers;
mod messages;
mod stream;

pub use actions::AttachError;
pub use messages::AppMessage;

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::cache::ConversationStore;
use crate::client::ChatClient;
use crate::config::Config;
use crate::error::StorageError;
use crate::models::Attachment;
use crate::storage::{load_store, SaveOutcome};
use crate::traits::{CredentialsProvider, HttpClient, KeyValueStore};

/// Main application state
pub struct App {
    /// Sessions, messages and projects
    pub store: ConversationStore,
    /// Runtime configuration
    pub config: Config,
    /// Completion API client shared with exchange tasks
    client: Arc<ChatClient>,
    /// Durable storage for the store
    storage: Arc<dyn KeyValueStore>,
    /// Sender handed to exchange tasks
    pub message_tx: mpsc::UnboundedSender<AppMessage>,
    /// Receiver for messages from exchange tasks
    message_rx: mpsc::UnboundedReceiver<AppMessage>,
    /// Attachments staged for the next message
    pending_attachments: Vec<Attachment>,
    /// Project new sessions are filed under
    active_project: Option<String>,
    /// Outcome of the last successful save
    last_save: Option<SaveOutcome>,
    /// Description of the last failed save
    save_error: Option<String>,
}

impl App {
    /// Create the app, loading any previously saved history from `storage`.
    pub fn new(
        config: Config,
        http: Arc<dyn HttpClient>,
        credentials: Arc<dyn CredentialsProvider>,
        storage: Arc<dyn KeyValueStore>,
    ) -> Result<Self, StorageError> {
        let store = load_store(storage.as_ref())?;
        Ok(Self::with_store(store, config, http, credentials, storage))
    }

    /// Create the app around an existing store.
    pub fn with_store(
        store: ConversationStore,
        config: Config,
        http: Arc<dyn HttpClient>,
        credentials: Arc<dyn CredentialsProvider>,
        storage: Arc<dyn KeyValueStore>,
    ) -> Self {
        let client = Arc::new(ChatClient::new(http, credentials, &config));
        let (message_tx, message_rx) = mpsc::unbounded_channel();
        Self {
            store,
            config,
            client,
            storage,
            message_tx,
            message_rx,
            pending_attachments: Vec::new(),
            active_project: None,
            last_save: None,
            save_error: None,
        }
    }

    /// Wait for the next message from an exchange task.
    pub async fn next_message(&mut self) -> Option<AppMessage> {
        self.message_rx.recv().await
    }

    /// Receive and apply messages until `exchange` in `session_id` is no
    /// longer in flight.
    ///
    /// `on_applied` runs after every accepted message.
    pub async fn drive_exchange<F>(
        &mut self,
        session_id: &str,
        exchange: crate::exchange::ExchangeId,
        mut on_applied: F,
    ) where
        F: FnMut(&App),
    {
        while self.store.in_flight_exchange(session_id) == Some(exchange) {
            let Some(msg) = self.next_message().await else {
                break;
            };
            if self.handle_message(msg) {
                on_applied(self);
            }
        }
    }

    pub fn last_save(&self) -> Option<SaveOutcome> {
        self.last_save
    }

    pub fn save_error(&self) -> Option<&str> {
        self.save_error.as_deref()
    }

    pub fn active_project(&self) -> Option<&str> {
        self.active_project.as_deref()
    }

    pub fn pending_attachments(&self) -> &[Attachment] {
        &self.pending_attachments
    }
}
