//! Exchange submission and stream processing for the App.

use std::sync::Arc;
use std::time::Duration;

use futures_util::StreamExt;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::client::ChatClient;
use crate::exchange::{DeltaAccumulator, ExchangeId, ThrottledPublisher};
use crate::models::RequestMessage;

use super::{App, AppMessage};

impl App {
    /// Submit user input to the current session and start streaming the reply.
    ///
    /// Creates a session first if none is selected. Staged attachments are
    /// sent with this message. Any exchange still streaming into the session
    /// is superseded.
    ///
    /// Returns the session and exchange the reply belongs to, or `None` for
    /// blank input.
    pub fn submit_message(&mut self, content: &str) -> Option<(String, ExchangeId)> {
        if content.trim().is_empty() && self.pending_attachments.is_empty() {
            return None;
        }

        let session_id = match self.store.current_session_id() {
            Some(id) => id.to_string(),
            None => self.new_session(),
        };

        let attachments = std::mem::take(&mut self.pending_attachments);
        let exchange = self
            .store
            .begin_exchange(&session_id, content, attachments)?;
        let history = self
            .store
            .get_session(&session_id)
            .map(|s| s.to_request_messages())
            .unwrap_or_default();
        self.persist();

        let client = Arc::clone(&self.client);
        let message_tx = self.message_tx.clone();
        let interval = self.config.publish_interval;
        let session_for_task = session_id.clone();

        tokio::spawn(async move {
            Self::process_stream(
                client,
                history,
                session_for_task,
                exchange,
                interval,
                message_tx,
            )
            .await;
        });

        Some((session_id, exchange))
    }

    /// Drive one exchange: request, decode, accumulate, throttle, report.
    ///
    /// Always ends with exactly one final message on `message_tx`.
    pub(super) async fn process_stream(
        client: Arc<ChatClient>,
        history: Vec<RequestMessage>,
        session_id: String,
        exchange: ExchangeId,
        interval: Duration,
        message_tx: mpsc::UnboundedSender<AppMessage>,
    ) {
        let mut acc = DeltaAccumulator::new();
        let mut publisher = ThrottledPublisher::with_interval(exchange, interval);

        let result = async {
            let mut deltas = client.stream_reply(history).await?;
            while let Some(delta) = deltas.next().await {
                acc.append(&delta?);
                if let Some(publication) = publisher.on_delta(&acc) {
                    // Receiver gone means the app is shutting down
                    if message_tx
                        .send(AppMessage::from_publication(&session_id, publication))
                        .is_err()
                    {
                        break;
                    }
                }
            }
            Ok::<(), crate::error::ChatError>(())
        }
        .await;

        let publication = match result {
            Ok(()) => {
                debug!(%exchange, bytes = acc.len(), deltas = acc.delta_count(), "Stream finished");
                publisher.finish(&acc)
            }
            Err(err) => {
                warn!(
                    %exchange,
                    category = %err.category(),
                    code = err.error_code(),
                    "Exchange failed: {}",
                    err
                );
                publisher.fail(err.user_message())
            }
        };
        let _ = message_tx.send(AppMessage::from_publication(&session_id, publication));
    }
}
