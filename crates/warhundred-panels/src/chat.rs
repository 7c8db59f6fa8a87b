//! Chat panel: message history plus the player's unsent draft.

use std::sync::{Arc, Mutex, PoisonError};

use chrono::{Local, NaiveTime};
use tokio::sync::watch;
use warhundred_protocol::ChatMessage;
use warhundred_session::ApiClient;
use warhundred_transport::Transport;

use crate::panel::{ListPanel, fetch_list};
use crate::{PanelSource, PanelState, Refresh};

pub const CHAT_MESSAGES_PATH: &str = "/chat/messages";

pub const LOAD_FAILED: &str = "Error loading chat messages";

/// Sender name of messages typed locally.
pub const LOCAL_SENDER: &str = "You";

pub struct ChatPanel<T> {
    client: ApiClient<T>,
    list: ListPanel<ChatMessage>,
    draft: Arc<Mutex<String>>,
}

impl<T> Clone for ChatPanel<T> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            list: self.list.clone(),
            draft: Arc::clone(&self.draft),
        }
    }
}

impl<T: Transport> ChatPanel<T> {
    pub fn new(client: ApiClient<T>, source: PanelSource<ChatMessage>) -> Self {
        Self {
            client,
            list: ListPanel::new(source),
            draft: Arc::default(),
        }
    }

    pub fn snapshot(&self) -> PanelState<ChatMessage> {
        self.list.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<PanelState<ChatMessage>> {
        self.list.subscribe()
    }

    pub fn draft(&self) -> String {
        self.lock_draft().clone()
    }

    pub fn set_draft(&self, text: impl Into<String>) {
        *self.lock_draft() = text.into();
    }

    /// Whether the send button is enabled.
    pub fn can_send(&self) -> bool {
        !self.list.snapshot().is_loading && !self.lock_draft().trim().is_empty()
    }

    /// Appends the draft as a message from [`LOCAL_SENDER`], stamped with
    /// the local time, and clears it. A blank draft is left alone.
    pub fn send_draft(&self) -> Option<ChatMessage> {
        self.send_draft_at(Local::now().time())
    }

    /// [`send_draft`](Self::send_draft) with an explicit clock reading.
    pub fn send_draft_at(&self, at: NaiveTime) -> Option<ChatMessage> {
        let content = {
            let mut draft = self.lock_draft();
            if draft.trim().is_empty() {
                return None;
            }
            std::mem::take(&mut *draft)
        };

        let mut sent = None;
        self.list.modify(|state| {
            let message = ChatMessage {
                id: state.items.len() as u64 + 1,
                sender: LOCAL_SENDER.to_string(),
                content,
                timestamp: at.format("%H:%M").to_string(),
            };
            state.items.push(message.clone());
            sent = Some(message);
        });
        tracing::debug!(id = sent.as_ref().map(|m| m.id), "chat message appended");
        sent
    }

    fn lock_draft(&self) -> std::sync::MutexGuard<'_, String> {
        self.draft.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T: Transport> Refresh for ChatPanel<T> {
    fn name(&self) -> &'static str {
        "chat"
    }

    async fn refresh(&self) {
        if self.list.is_fixture() {
            return;
        }
        self.list.begin_fetch();

        let outcome = fetch_list::<ChatMessage, _>(&self.client, CHAT_MESSAGES_PATH)
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "chat fetch failed");
                LOAD_FAILED.to_string()
            });
        self.list.finish_fetch(outcome);
    }
}
