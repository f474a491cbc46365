//! Chat transport trait.
//!
//! Defines the interface between the session layer and the remote
//! conversation service, decoupling state management from the concrete HTTP
//! client so tests can substitute mocks.

use async_trait::async_trait;

use super::model::{ChatReply, ConversationSummary, Turn};
use crate::error::Result;

/// An abstract client for the remote conversation service.
///
/// # Error classification
///
/// Implementations must classify failures before returning them: a call that
/// never produced a response fails with `CompanionError::Unreachable`, while
/// an error status from the server fails with `CompanionError::Rejected`
/// carrying the server-supplied detail when one is present.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Sends a user message, optionally into an existing conversation.
    ///
    /// When `conversation_id` is `None` the server mints a new conversation
    /// and returns its id in the reply.
    async fn send(
        &self,
        text: &str,
        user_id: &str,
        conversation_id: Option<&str>,
    ) -> Result<ChatReply>;

    /// Fetches stored turns in chronological order, optionally filtered to
    /// one conversation.
    async fn fetch_history(
        &self,
        user_id: &str,
        conversation_id: Option<&str>,
        limit: u32,
    ) -> Result<Vec<Turn>>;

    /// Fetches the user's conversation summaries, most recent first.
    ///
    /// Implementations must coerce a malformed or non-array payload to an
    /// empty list instead of failing; an absent conversation list is not a
    /// fatal condition.
    async fn fetch_summaries(&self, user_id: &str) -> Result<Vec<ConversationSummary>>;

    /// Deletes a conversation and all of its turns.
    async fn delete_conversation(&self, user_id: &str, conversation_id: &str) -> Result<()>;

    /// Pins a conversation to the top of the list.
    async fn pin_conversation(&self, user_id: &str, conversation_id: &str) -> Result<()>;

    /// Removes a conversation's pin.
    async fn unpin_conversation(&self, user_id: &str, conversation_id: &str) -> Result<()>;

    /// Probes backend reachability. Any non-error response counts as healthy.
    async fn probe_health(&self) -> bool;
}
