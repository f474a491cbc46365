//! Memory API client.
//!
//! The backend distills long-term memories out of conversations; the client
//! only lists, queries, and deletes them.

use companion_core::Result;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::ClientConfig;
use crate::http::{classify, expect_json, expect_ok};

/// One long-term memory distilled from past conversations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Memory {
    #[serde(default)]
    pub id: Option<String>,
    pub user_id: String,
    pub content: String,
    pub importance_score: f64,
    pub category: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub last_accessed: Option<String>,
    #[serde(default)]
    pub access_count: u64,
}

/// Result of a relevance query.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MemoryRetrieval {
    pub memories: Vec<Memory>,
    pub count: u64,
}

/// Client for the memory endpoints.
#[derive(Clone)]
pub struct MemoryClient {
    http: Client,
    base_url: String,
}

impl MemoryClient {
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

    /// Lists all memories for a user.
    pub async fn memories(&self, user_id: &str) -> Result<Vec<Memory>> {
        let response = self
            .http
            .get(self.url(&format!("/api/memory/{user_id}")))
            .send()
            .await
            .map_err(classify)?;
        expect_json(response).await
    }

    /// Fetches the memories most relevant to a query.
    pub async fn relevant(&self, user_id: &str, query: &str, limit: u32) -> Result<MemoryRetrieval> {
        let response = self
            .http
            .get(self.url(&format!("/api/memory/{user_id}/relevant")))
            .query(&[("query", query.to_string()), ("limit", limit.to_string())])
            .send()
            .await
            .map_err(classify)?;
        expect_json(response).await
    }

    /// Deletes a memory.
    pub async fn delete(&self, memory_id: &str, user_id: &str) -> Result<()> {
        let response = self
            .http
            .delete(self.url(&format!("/api/memory/{memory_id}")))
            .query(&[("user_id", user_id)])
            .send()
            .await
            .map_err(classify)?;
        expect_ok(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_decodes_with_missing_optionals() {
        let memory: Memory = serde_json::from_str(
            r#"{
                "user_id": "u1",
                "content": "Prefers green tea.",
                "importance_score": 0.8,
                "category": "preferences"
            }"#,
        )
        .expect("decode");

        assert_eq!(memory.access_count, 0);
        assert!(memory.created_at.is_none());
    }

    #[test]
    fn retrieval_decodes_count() {
        let retrieval: MemoryRetrieval = serde_json::from_str(
            r#"{
                "memories": [],
                "count": 0
            }"#,
        )
        .expect("decode");

        assert_eq!(retrieval.count, 0);
        assert!(retrieval.memories.is_empty());
    }
}
