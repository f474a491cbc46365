//! Chat session state machine.
//!
//! `ChatSession` owns the live state of one mounted chat view: the ordered
//! timeline, the active conversation id, and the loading/error flags. All
//! mutations happen on completion of transport calls, which may interleave,
//! so every in-flight operation carries a staleness tag (see below).

use std::sync::Arc;

use serde_json::json;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::timeline::{self, DisplayEntry};
use super::transport::ChatTransport;

/// Read-only copy of the session state, taken for rendering.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SessionSnapshot {
    /// The ordered timeline of display entries.
    pub messages: Vec<DisplayEntry>,
    /// The active conversation, if one has been opened or created.
    pub current_conversation_id: Option<String>,
    /// Whether a send or history load is in flight.
    pub is_loading: bool,
    /// The last user-facing failure, until cleared.
    pub error: Option<String>,
}

#[derive(Debug, Default)]
struct SessionState {
    messages: Vec<DisplayEntry>,
    current_conversation_id: Option<String>,
    is_loading: bool,
    error: Option<String>,
    // Staleness tag. Bumped by every conversation switch and every history
    // load issuance; an in-flight operation whose captured epoch no longer
    // matches must not apply its result.
    epoch: u64,
}

/// The client-side state bundle for one chat mount.
///
/// One session exists per active UI mount (single-user, single-view). The
/// session never throws transport failures past its boundary: they are
/// classified, logged, and stored as a user-facing string in `error`.
pub struct ChatSession {
    transport: Arc<dyn ChatTransport>,
    state: RwLock<SessionState>,
}

impl ChatSession {
    /// Creates an empty session bound to a transport.
    pub fn new(transport: Arc<dyn ChatTransport>) -> Self {
        Self {
            transport,
            state: RwLock::new(SessionState::default()),
        }
    }

    /// Sends a user message into the active conversation.
    ///
    /// A message that is empty after trimming is a silent no-op: no transport
    /// call, no state change. On success the user entry (stamped with local
    /// time) and the assistant entry (stamped with the server timestamp) are
    /// appended in that order, and a server-minted conversation id is adopted
    /// as the current one. On failure the timeline is left untouched and the
    /// classified message lands in `error`. The loading flag always clears.
    pub async fn send(&self, user_id: &str, text: &str) {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return;
        }

        let (conversation_id, epoch) = {
            let mut state = self.state.write().await;
            state.is_loading = true;
            state.error = None;
            (state.current_conversation_id.clone(), state.epoch)
        };

        let result = self
            .transport
            .send(trimmed, user_id, conversation_id.as_deref())
            .await;

        let mut state = self.state.write().await;
        state.is_loading = false;

        if state.epoch != epoch {
            // The user switched conversations while the send was in flight.
            tracing::debug!(target: "chat", "discarding send result for a superseded conversation");
            return;
        }

        match result {
            Ok(reply) => {
                let sent_at = chrono::Utc::now().to_rfc3339();
                state.messages.push(DisplayEntry::user(
                    format!("user-{}", Uuid::new_v4()),
                    trimmed,
                    sent_at,
                ));
                state.messages.push(DisplayEntry::assistant(
                    format!("ai-{}", Uuid::new_v4()),
                    reply.response,
                    reply.timestamp,
                    Some(json!({ "conversation_id": reply.conversation_id })),
                ));
                if !reply.conversation_id.is_empty() {
                    state.current_conversation_id = Some(reply.conversation_id);
                }
            }
            Err(err) => {
                tracing::warn!(target: "chat", error = %err, "send failed");
                state.error = Some(err.user_message("Failed to send message"));
            }
        }
    }

    /// Replaces the timeline with the stored history of a conversation.
    ///
    /// Each fetched turn is projected into its display entries in order. If a
    /// conversation id is given it becomes the current one on success. A
    /// response that resolves after a newer switch or load is discarded.
    pub async fn load_history(&self, user_id: &str, conversation_id: Option<&str>) {
        let epoch = {
            let mut state = self.state.write().await;
            state.is_loading = true;
            state.error = None;
            state.epoch += 1;
            state.epoch
        };

        let result = self
            .transport
            .fetch_history(user_id, conversation_id, crate::config::DEFAULT_HISTORY_LIMIT)
            .await;

        let mut state = self.state.write().await;
        state.is_loading = false;

        if state.epoch != epoch {
            tracing::debug!(
                target: "chat",
                conversation_id = conversation_id.unwrap_or("<all>"),
                "discarding stale history response"
            );
            return;
        }

        match result {
            Ok(turns) => {
                state.messages = timeline::project_history(&turns);
                if let Some(id) = conversation_id {
                    state.current_conversation_id = Some(id.to_string());
                }
            }
            Err(err) => {
                tracing::warn!(target: "chat", error = %err, "history load failed");
                state.error = Some(err.user_message("Failed to load history"));
            }
        }
    }

    /// Switches the active conversation, discarding the stale timeline.
    ///
    /// The timeline stays empty until the next history load. Passing `None`
    /// starts a brand-new, not-yet-persisted conversation; the server assigns
    /// its id on the first successful send.
    pub async fn set_conversation(&self, conversation_id: Option<String>) {
        let mut state = self.state.write().await;
        state.current_conversation_id = conversation_id;
        state.messages.clear();
        state.epoch += 1;
    }

    /// Starts a brand-new conversation. Equivalent to `set_conversation(None)`.
    pub async fn new_conversation(&self) {
        self.set_conversation(None).await;
    }

    /// Clears the stored error, leaving everything else untouched.
    pub async fn clear_error(&self) {
        self.state.write().await.error = None;
    }

    /// Returns a copy of the current state for rendering.
    pub async fn snapshot(&self) -> SessionSnapshot {
        let state = self.state.read().await;
        SessionSnapshot {
            messages: state.messages.clone(),
            current_conversation_id: state.current_conversation_id.clone(),
            is_loading: state.is_loading,
            error: state.error.clone(),
        }
    }

    /// Returns the active conversation id, if any.
    pub async fn current_conversation_id(&self) -> Option<String> {
        self.state.read().await.current_conversation_id.clone()
    }
}
