//! Timeline projection.
//!
//! Stored turns hold both sides of an exchange in one record. The UI renders
//! a flat, ordered timeline instead, so each turn is expanded into one entry
//! per role here. The role is decided once, at projection time; downstream
//! code never re-infers it from an empty response.

use serde::{Deserialize, Serialize};

use super::model::Turn;

/// The author of a timeline entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryRole {
    /// Entry authored by the user.
    User,
    /// Entry authored by the assistant.
    Assistant,
}

/// One renderable timeline item derived from a [`Turn`].
///
/// Display entries are ephemeral: they are produced only by projection (or by
/// a successful send) and are never persisted or sent back to the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayEntry {
    /// Unique entry identifier, derived from the turn id plus a role suffix.
    pub id: String,
    /// Who authored this entry.
    pub role: EntryRole,
    /// The text to render.
    pub text: String,
    /// Timestamp of the entry (ISO 8601 format).
    pub timestamp: String,
    /// Metadata carried over from the turn (assistant entries only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

impl DisplayEntry {
    /// Creates a user-authored entry.
    pub fn user(id: impl Into<String>, text: impl Into<String>, timestamp: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            role: EntryRole::User,
            text: text.into(),
            timestamp: timestamp.into(),
            metadata: None,
        }
    }

    /// Creates an assistant-authored entry.
    pub fn assistant(
        id: impl Into<String>,
        text: impl Into<String>,
        timestamp: impl Into<String>,
        metadata: Option<serde_json::Value>,
    ) -> Self {
        Self {
            id: id.into(),
            role: EntryRole::Assistant,
            text: text.into(),
            timestamp: timestamp.into(),
            metadata,
        }
    }
}

/// Expands one turn into its display entries.
///
/// A completed turn projects to `[user, assistant]` in that order, both
/// stamped with the turn's timestamp; the assistant entry carries the turn's
/// metadata. A turn whose response is blank projects to the user entry alone,
/// which is how an in-flight send can be rendered optimistically.
pub fn project_turn(turn: &Turn) -> Vec<DisplayEntry> {
    let mut entries = vec![DisplayEntry::user(
        format!("{}-user", turn.id),
        turn.message.clone(),
        turn.timestamp.clone(),
    )];

    if !turn.response.trim().is_empty() {
        entries.push(DisplayEntry::assistant(
            format!("{}-ai", turn.id),
            turn.response.clone(),
            turn.timestamp.clone(),
            turn.metadata.clone(),
        ));
    }

    entries
}

/// Projects a history of turns into one flat timeline, preserving order.
pub fn project_history(turns: &[Turn]) -> Vec<DisplayEntry> {
    turns.iter().flat_map(|turn| project_turn(turn)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn turn(id: &str, message: &str, response: &str) -> Turn {
        Turn {
            id: id.to_string(),
            user_id: "user-1".to_string(),
            message: message.to_string(),
            response: response.to_string(),
            timestamp: "2024-01-01T00:00:00Z".to_string(),
            metadata: Some(serde_json::json!({ "conversation_id": "abc" })),
        }
    }

    #[test]
    fn completed_turn_projects_to_user_then_assistant() {
        let entries = project_turn(&turn("t1", "Hello", "Hi there"));

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].role, EntryRole::User);
        assert_eq!(entries[0].text, "Hello");
        assert_eq!(entries[0].id, "t1-user");
        assert_eq!(entries[1].role, EntryRole::Assistant);
        assert_eq!(entries[1].text, "Hi there");
        assert_eq!(entries[1].id, "t1-ai");
        assert!(entries[1].metadata.is_some());
    }

    #[test]
    fn pending_turn_projects_to_single_user_entry() {
        let entries = project_turn(&turn("t1", "Hello", ""));

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].role, EntryRole::User);
    }

    #[test]
    fn whitespace_response_counts_as_pending() {
        let entries = project_turn(&turn("t1", "Hello", "   "));

        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn history_projection_preserves_turn_order() {
        let turns = vec![turn("t1", "first", "one"), turn("t2", "second", "two")];

        let entries = project_history(&turns);

        let texts: Vec<&str> = entries.iter().map(|e| e.text.as_str()).collect();
        assert_eq!(texts, vec!["first", "one", "second", "two"]);
    }
}
