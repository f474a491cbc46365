//! Conversation registry.
//!
//! Holds the cached, server-refreshed list of a user's conversations. The
//! list is best-effort UI chrome: a failed refresh is logged and rendered as
//! an empty list rather than blocking the chat itself.

use std::sync::Arc;

use tokio::sync::RwLock;

use super::model::ConversationSummary;
use super::session::ChatSession;
use super::transport::ChatTransport;

/// The cached conversation list for one user.
pub struct ConversationRegistry {
    transport: Arc<dyn ChatTransport>,
    summaries: RwLock<Vec<ConversationSummary>>,
}

impl ConversationRegistry {
    /// Creates an empty registry bound to a transport.
    pub fn new(transport: Arc<dyn ChatTransport>) -> Self {
        Self {
            transport,
            summaries: RwLock::new(Vec::new()),
        }
    }

    /// Rebuilds the list from the server.
    ///
    /// Never fails: any transport problem is logged and yields an empty list,
    /// leaving the previous cache in place so the UI can keep showing it.
    pub async fn refresh(&self, user_id: &str) -> Vec<ConversationSummary> {
        match self.transport.fetch_summaries(user_id).await {
            Ok(list) => {
                *self.summaries.write().await = list.clone();
                list
            }
            Err(err) => {
                tracing::warn!(target: "registry", error = %err, "conversation list refresh failed");
                Vec::new()
            }
        }
    }

    /// Returns the cached list from the last successful refresh.
    pub async fn summaries(&self) -> Vec<ConversationSummary> {
        self.summaries.read().await.clone()
    }

    /// Toggles a conversation's pin, then reconciles against the server.
    ///
    /// No local mutation is trusted as final; the refresh after the toggle is
    /// what the UI renders.
    pub async fn toggle_pin(
        &self,
        user_id: &str,
        conversation_id: &str,
        currently_pinned: bool,
    ) -> Vec<ConversationSummary> {
        let result = if currently_pinned {
            self.transport
                .unpin_conversation(user_id, conversation_id)
                .await
        } else {
            self.transport
                .pin_conversation(user_id, conversation_id)
                .await
        };

        if let Err(err) = result {
            tracing::warn!(target: "registry", error = %err, conversation_id, "pin toggle failed");
        }

        self.refresh(user_id).await
    }

    /// Deletes a conversation and reconciles session and list state.
    ///
    /// If the deleted conversation is the one currently open, the session is
    /// reset to a fresh conversation first, so the UI never keeps displaying
    /// a timeline for a conversation that no longer exists.
    pub async fn delete(
        &self,
        user_id: &str,
        conversation_id: &str,
        session: &ChatSession,
    ) -> Vec<ConversationSummary> {
        match self
            .transport
            .delete_conversation(user_id, conversation_id)
            .await
        {
            Ok(()) => {
                if session.current_conversation_id().await.as_deref() == Some(conversation_id) {
                    session.set_conversation(None).await;
                }
            }
            Err(err) => {
                tracing::warn!(target: "registry", error = %err, conversation_id, "delete failed");
            }
        }

        self.refresh(user_id).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::chat::model::{ChatReply, Turn};
    use crate::error::{CompanionError, Result};

    const USER: &str = "00000000-0000-0000-0000-000000000000";

    #[derive(Default)]
    struct RecordingTransport {
        summaries: Mutex<Option<Result<Vec<ConversationSummary>>>>,
        pins: Mutex<Vec<String>>,
        unpins: Mutex<Vec<String>>,
        deletes: Mutex<Vec<String>>,
        refreshes: Mutex<usize>,
    }

    impl RecordingTransport {
        fn with_summaries(self, summaries: Result<Vec<ConversationSummary>>) -> Self {
            *self.summaries.lock().unwrap() = Some(summaries);
            self
        }
    }

    #[async_trait]
    impl ChatTransport for RecordingTransport {
        async fn send(
            &self,
            _text: &str,
            _user_id: &str,
            _conversation_id: Option<&str>,
        ) -> Result<ChatReply> {
            Err(CompanionError::internal("not used"))
        }

        async fn fetch_history(
            &self,
            _user_id: &str,
            _conversation_id: Option<&str>,
            _limit: u32,
        ) -> Result<Vec<Turn>> {
            Ok(Vec::new())
        }

        async fn fetch_summaries(&self, _user_id: &str) -> Result<Vec<ConversationSummary>> {
            *self.refreshes.lock().unwrap() += 1;
            self.summaries
                .lock()
                .unwrap()
                .clone()
                .unwrap_or_else(|| Ok(Vec::new()))
        }

        async fn delete_conversation(&self, _user_id: &str, conversation_id: &str) -> Result<()> {
            self.deletes.lock().unwrap().push(conversation_id.to_string());
            Ok(())
        }

        async fn pin_conversation(&self, _user_id: &str, conversation_id: &str) -> Result<()> {
            self.pins.lock().unwrap().push(conversation_id.to_string());
            Ok(())
        }

        async fn unpin_conversation(&self, _user_id: &str, conversation_id: &str) -> Result<()> {
            self.unpins.lock().unwrap().push(conversation_id.to_string());
            Ok(())
        }

        async fn probe_health(&self) -> bool {
            true
        }
    }

    fn summary(id: &str, pinned: bool) -> ConversationSummary {
        ConversationSummary {
            conversation_id: id.to_string(),
            first_message: "Hello...".to_string(),
            last_message_time: "2024-01-01T00:00:00Z".to_string(),
            message_count: 2,
            pinned,
        }
    }

    #[tokio::test]
    async fn refresh_failure_yields_empty_list() {
        let transport = Arc::new(
            RecordingTransport::default()
                .with_summaries(Err(CompanionError::Unreachable)),
        );
        let registry = ConversationRegistry::new(transport);

        let list = registry.refresh(USER).await;

        assert!(list.is_empty());
    }

    #[tokio::test]
    async fn refresh_failure_keeps_previous_cache() {
        let transport = Arc::new(
            RecordingTransport::default().with_summaries(Ok(vec![summary("abc", false)])),
        );
        let registry = ConversationRegistry::new(transport.clone());

        registry.refresh(USER).await;
        *transport.summaries.lock().unwrap() = Some(Err(CompanionError::Unreachable));
        registry.refresh(USER).await;

        assert_eq!(registry.summaries().await, vec![summary("abc", false)]);
    }

    #[tokio::test]
    async fn toggle_pin_picks_the_right_endpoint_and_refreshes() {
        let transport = Arc::new(RecordingTransport::default());
        let registry = ConversationRegistry::new(transport.clone());

        registry.toggle_pin(USER, "abc", false).await;
        registry.toggle_pin(USER, "abc", true).await;

        assert_eq!(*transport.pins.lock().unwrap(), vec!["abc"]);
        assert_eq!(*transport.unpins.lock().unwrap(), vec!["abc"]);
        assert_eq!(*transport.refreshes.lock().unwrap(), 2);
    }

    #[tokio::test]
    async fn deleting_the_open_conversation_resets_the_session() {
        let transport = Arc::new(RecordingTransport::default());
        let registry = ConversationRegistry::new(transport.clone());
        let session = ChatSession::new(transport.clone());

        session.set_conversation(Some("abc".to_string())).await;
        registry.delete(USER, "abc", &session).await;

        assert_eq!(session.current_conversation_id().await, None);
        assert!(session.snapshot().await.messages.is_empty());
        assert_eq!(*transport.deletes.lock().unwrap(), vec!["abc"]);
    }

    #[tokio::test]
    async fn deleting_another_conversation_leaves_the_session_alone() {
        let transport = Arc::new(RecordingTransport::default());
        let registry = ConversationRegistry::new(transport.clone());
        let session = ChatSession::new(transport.clone());

        session.set_conversation(Some("abc".to_string())).await;
        registry.delete(USER, "other", &session).await;

        assert_eq!(session.current_conversation_id().await.as_deref(), Some("abc"));
    }
}
