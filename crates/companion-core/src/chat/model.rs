//! Chat domain model.
//!
//! These are the wire-level records owned by the backend. The client only
//! ever reads or appends them; it never mutates a stored turn in place.

use serde::{Deserialize, Serialize};

/// One server-persisted user/assistant exchange.
///
/// A turn is the atomic unit of conversation storage: the user's message and,
/// once the assistant has replied, the paired response. An empty `response`
/// means the turn is still pending (or models a not-yet-replied user emission
/// in the client-side projection).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    /// Unique turn identifier (UUID format).
    pub id: String,
    /// Owning user identifier.
    pub user_id: String,
    /// The user's message text.
    pub message: String,
    /// The assistant's response text; empty while pending.
    #[serde(default)]
    pub response: String,
    /// Timestamp when the turn was stored (ISO 8601 format).
    pub timestamp: String,
    /// Free-form server metadata (e.g. the owning conversation id).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

/// Response payload of a successful send.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatReply {
    /// The assistant's response text.
    pub response: String,
    /// The conversation the turn was stored under. For a brand-new
    /// conversation this is the id the server just minted.
    pub conversation_id: String,
    /// Server-side timestamp of the reply (ISO 8601 format).
    pub timestamp: String,
}

/// One row of the conversation list.
///
/// Summaries are rebuilt from the server on every registry refresh; the
/// client never treats a locally mutated summary as authoritative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationSummary {
    /// Conversation identifier.
    pub conversation_id: String,
    /// Preview text (the opening message, possibly truncated server-side).
    pub first_message: String,
    /// Timestamp of the most recent activity (ISO 8601 format).
    pub last_message_time: String,
    /// Number of turns stored under this conversation.
    pub message_count: u64,
    /// Whether the user pinned this conversation. Older backends omit the
    /// field entirely, so absence decodes as unpinned.
    #[serde(default)]
    pub pinned: bool,
}
