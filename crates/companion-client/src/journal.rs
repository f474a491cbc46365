//! Journal API client.
//!
//! Two journal surfaces exist: entries the user writes themselves, and
//! reflections the assistant writes after conversations. Both are plain
//! CRUD/list reads; all state lives on the server.

use companion_core::Result;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::ClientConfig;
use crate::http::{classify, expect_json, expect_ok};

/// A journal entry written by the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserJournal {
    #[serde(default)]
    pub id: Option<String>,
    pub user_id: String,
    pub content: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

/// A reflection the assistant wrote after a conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiJournal {
    #[serde(default)]
    pub id: Option<String>,
    pub user_id: String,
    pub conversation_id: String,
    pub reflection: String,
    #[serde(default)]
    pub learnings: Vec<String>,
    #[serde(default)]
    pub questions_raised: Vec<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Serialize)]
struct CreateUserJournalRequest<'a> {
    user_id: &'a str,
    content: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    tags: Option<&'a [String]>,
}

/// Client for the journal endpoints.
#[derive(Clone)]
pub struct JournalClient {
    http: Client,
    base_url: String,
}

impl JournalClient {
    /// Creates a client from connection settings.
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            http: Client::new(),
            base_url: config.base_url.clone(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Creates a user journal entry.
    pub async fn create_user_journal(
        &self,
        user_id: &str,
        content: &str,
        tags: Option<&[String]>,
    ) -> Result<UserJournal> {
        let response = self
            .http
            .post(self.url("/api/journal/user"))
            .json(&CreateUserJournalRequest {
                user_id,
                content,
                tags,
            })
            .send()
            .await
            .map_err(classify)?;
        expect_json(response).await
    }

    /// Lists user journal entries, newest first.
    pub async fn user_journals(
        &self,
        user_id: &str,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<UserJournal>> {
        let response = self
            .http
            .get(self.url(&format!("/api/journal/user/{user_id}")))
            .query(&[("limit", limit), ("offset", offset)])
            .send()
            .await
            .map_err(classify)?;
        expect_json(response).await
    }

    /// Full-text search over user journal entries.
    pub async fn search_user_journals(&self, user_id: &str, query: &str) -> Result<Vec<UserJournal>> {
        let response = self
            .http
            .get(self.url(&format!("/api/journal/user/{user_id}/search")))
            .query(&[("q", query)])
            .send()
            .await
            .map_err(classify)?;
        expect_json(response).await
    }

    /// Updates a user journal entry's content and tags.
    ///
    /// The backend takes the tags as one comma-joined query parameter.
    pub async fn update_user_journal(
        &self,
        journal_id: &str,
        user_id: &str,
        content: &str,
        tags: Option<&[String]>,
    ) -> Result<UserJournal> {
        let mut query: Vec<(&str, String)> = vec![
            ("user_id", user_id.to_string()),
            ("content", content.to_string()),
        ];
        if let Some(tags) = tags {
            query.push(("tags", tags.join(",")));
        }

        let response = self
            .http
            .put(self.url(&format!("/api/journal/user/entry/{journal_id}")))
            .query(&query)
            .send()
            .await
            .map_err(classify)?;
        expect_json(response).await
    }

    /// Deletes a user journal entry.
    pub async fn delete_user_journal(&self, journal_id: &str, user_id: &str) -> Result<()> {
        let response = self
            .http
            .delete(self.url(&format!("/api/journal/user/entry/{journal_id}")))
            .query(&[("user_id", user_id)])
            .send()
            .await
            .map_err(classify)?;
        expect_ok(response).await
    }

    /// Lists the assistant's journal entries for a user, newest first.
    pub async fn ai_journals(&self, user_id: &str, limit: u32, offset: u32) -> Result<Vec<AiJournal>> {
        let response = self
            .http
            .get(self.url(&format!("/api/journal/ai/{user_id}")))
            .query(&[("limit", limit), ("offset", offset)])
            .send()
            .await
            .map_err(classify)?;
        expect_json(response).await
    }

    /// Fetches one assistant journal entry.
    pub async fn ai_journal(&self, journal_id: &str, user_id: &str) -> Result<AiJournal> {
        let response = self
            .http
            .get(self.url(&format!("/api/journal/ai/entry/{journal_id}")))
            .query(&[("user_id", user_id)])
            .send()
            .await
            .map_err(classify)?;
        expect_json(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ai_journal_decodes_with_missing_optionals() {
        let journal: AiJournal = serde_json::from_str(
            r#"{
                "user_id": "u1",
                "conversation_id": "abc",
                "reflection": "A good talk."
            }"#,
        )
        .expect("decode");

        assert!(journal.id.is_none());
        assert!(journal.learnings.is_empty());
        assert!(journal.questions_raised.is_empty());
    }

    #[test]
    fn user_journal_round_trips_tags() {
        let journal = UserJournal {
            id: Some("j1".to_string()),
            user_id: "u1".to_string(),
            content: "Wrote some Rust.".to_string(),
            created_at: Some("2024-01-01T00:00:00Z".to_string()),
            tags: Some(vec!["rust".to_string(), "work".to_string()]),
        };

        let encoded = serde_json::to_string(&journal).expect("encode");
        let decoded: UserJournal = serde_json::from_str(&encoded).expect("decode");
        assert_eq!(decoded, journal);
    }
}
