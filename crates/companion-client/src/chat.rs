//! HTTP implementation of the chat transport.

use async_trait::async_trait;
use companion_core::chat::{ChatReply, ChatTransport, ConversationSummary, Turn};
use companion_core::Result;
use reqwest::Client;
use serde::Serialize;

use crate::config::ClientConfig;
use crate::http::{classify, expect_json, expect_ok};

/// Chat client talking to the companion backend over HTTP/JSON.
#[derive(Clone)]
pub struct HttpChatClient {
    http: Client,
    base_url: String,
}

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    message: &'a str,
    user_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    conversation_id: Option<&'a str>,
}

impl HttpChatClient {
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

    /// Coerces the conversation-list payload to a list.
    ///
    /// The conversation list is non-critical chrome, so a malformed or
    /// non-array body degrades to an empty list instead of an error.
    fn coerce_summaries(value: serde_json::Value) -> Vec<ConversationSummary> {
        if !value.is_array() {
            tracing::warn!(target: "transport", "conversation list payload was not an array");
            return Vec::new();
        }
        match serde_json::from_value(value) {
            Ok(summaries) => summaries,
            Err(err) => {
                tracing::warn!(target: "transport", error = %err, "could not decode conversation list");
                Vec::new()
            }
        }
    }
}

#[async_trait]
impl ChatTransport for HttpChatClient {
    async fn send(
        &self,
        text: &str,
        user_id: &str,
        conversation_id: Option<&str>,
    ) -> Result<ChatReply> {
        let response = self
            .http
            .post(self.url("/api/chat/"))
            .json(&SendMessageRequest {
                message: text,
                user_id,
                conversation_id,
            })
            .send()
            .await
            .map_err(classify)?;
        expect_json(response).await
    }

    async fn fetch_history(
        &self,
        user_id: &str,
        conversation_id: Option<&str>,
        limit: u32,
    ) -> Result<Vec<Turn>> {
        let mut query: Vec<(&str, String)> = vec![("limit", limit.to_string())];
        if let Some(id) = conversation_id {
            query.push(("conversation_id", id.to_string()));
        }

        let response = self
            .http
            .get(self.url(&format!("/api/chat/history/{user_id}")))
            .query(&query)
            .send()
            .await
            .map_err(classify)?;
        expect_json(response).await
    }

    async fn fetch_summaries(&self, user_id: &str) -> Result<Vec<ConversationSummary>> {
        let response = self
            .http
            .get(self.url(&format!("/api/chat/conversations/{user_id}")))
            .send()
            .await
            .map_err(classify)?;
        let value: serde_json::Value = expect_json(response).await?;
        Ok(Self::coerce_summaries(value))
    }

    async fn delete_conversation(&self, user_id: &str, conversation_id: &str) -> Result<()> {
        let response = self
            .http
            .delete(self.url(&format!("/api/chat/conversations/{user_id}/{conversation_id}")))
            .send()
            .await
            .map_err(classify)?;
        expect_ok(response).await
    }

    async fn pin_conversation(&self, user_id: &str, conversation_id: &str) -> Result<()> {
        let response = self
            .http
            .post(self.url(&format!(
                "/api/chat/conversations/{user_id}/{conversation_id}/pin"
            )))
            .send()
            .await
            .map_err(classify)?;
        expect_ok(response).await
    }

    async fn unpin_conversation(&self, user_id: &str, conversation_id: &str) -> Result<()> {
        let response = self
            .http
            .delete(self.url(&format!(
                "/api/chat/conversations/{user_id}/{conversation_id}/pin"
            )))
            .send()
            .await
            .map_err(classify)?;
        expect_ok(response).await
    }

    async fn probe_health(&self) -> bool {
        match self.http.get(self.url("/health")).send().await {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }
}
