//! Minimal Telegram Bot API client: long-poll `getUpdates` plus
//! `sendMessage`. Only text messages are surfaced; everything else
//! (stickers, photos, joins) is dropped at this layer.

use crate::domain::model::ChatUpdate;
use crate::domain::ports::ChatApi;
use crate::utils::error::{BotError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_API_BASE: &str = "https://api.telegram.org";

pub struct TelegramClient {
    client: Client,
    /// `{api_base}/bot{token}`, precomputed.
    bot_url: String,
    poll_timeout_seconds: u64,
}

impl TelegramClient {
    pub fn new(api_base: &str, token: &str, poll_timeout_seconds: u64) -> Result<Self> {
        // The HTTP timeout must outlast the server-side long-poll window.
        let client = Client::builder()
            .timeout(Duration::from_secs(poll_timeout_seconds + 10))
            .build()
            .map_err(|e| BotError::config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            bot_url: format!("{}/bot{}", api_base.trim_end_matches('/'), token),
            poll_timeout_seconds,
        })
    }

    async fn call<T: serde::de::DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        method: &str,
    ) -> Result<T> {
        let response = request
            .send()
            .await
            .map_err(|e| BotError::telegram(format!("{} request failed: {}", method, e)))?;

        let envelope: ApiResponse<T> = response
            .json()
            .await
            .map_err(|e| BotError::telegram(format!("{} response invalid: {}", method, e)))?;

        if !envelope.ok {
            return Err(BotError::telegram(format!(
                "{} rejected: {}",
                method,
                envelope.description.unwrap_or_else(|| "no description".to_string())
            )));
        }
        envelope
            .result
            .ok_or_else(|| BotError::telegram(format!("{} returned ok without a result", method)))
    }
}

#[async_trait]
impl ChatApi for TelegramClient {
    async fn next_updates(&self, offset: i64) -> Result<Vec<ChatUpdate>> {
        let request = self
            .client
            .get(format!("{}/getUpdates", self.bot_url))
            .query(&[
                ("offset", offset.to_string()),
                ("timeout", self.poll_timeout_seconds.to_string()),
            ]);

        let updates: Vec<Update> = self.call(request, "getUpdates").await?;
        debug!("received {} raw updates", updates.len());

        Ok(updates
            .into_iter()
            .filter_map(|u| {
                let message = u.message?;
                let text = message.text?;
                Some(ChatUpdate {
                    update_id: u.update_id,
                    chat_id: message.chat.id,
                    text,
                })
            })
            .collect())
    }

    async fn send_text(&self, chat_id: i64, text: &str) -> Result<()> {
        let request = self
            .client
            .post(format!("{}/sendMessage", self.bot_url))
            .json(&serde_json::json!({ "chat_id": chat_id, "text": text }));

        let _sent: Message = self.call(request, "sendMessage").await?;
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    result: Option<T>,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Update {
    update_id: i64,
    message: Option<Message>,
}

#[derive(Debug, Deserialize)]
struct Message {
    chat: Chat,
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Chat {
    id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn client(server: &MockServer) -> TelegramClient {
        TelegramClient::new(&server.base_url(), "TOKEN", 0).unwrap()
    }

    #[tokio::test]
    async fn test_next_updates_decodes_text_messages_only() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/botTOKEN/getUpdates")
                .query_param("offset", "7");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({
                    "ok": true,
                    "result": [
                        {
                            "update_id": 7,
                            "message": {"chat": {"id": 42}, "text": "/start"}
                        },
                        {
                            "update_id": 8,
                            "message": {"chat": {"id": 42}}
                        },
                        {"update_id": 9}
                    ]
                }));
        });

        let updates = client(&server).next_updates(7).await.unwrap();

        mock.assert();
        assert_eq!(updates.len(), 1);
        assert_eq!(
            updates[0],
            ChatUpdate {
                update_id: 7,
                chat_id: 42,
                text: "/start".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_send_text_posts_chat_id_and_text() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/botTOKEN/sendMessage")
                .json_body(serde_json::json!({"chat_id": 42, "text": "⛽ Top 3 en Madrid:"}));
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({
                    "ok": true,
                    "result": {"chat": {"id": 42}, "text": "⛽ Top 3 en Madrid:"}
                }));
        });

        client(&server)
            .send_text(42, "⛽ Top 3 en Madrid:")
            .await
            .unwrap();

        mock.assert();
    }

    #[tokio::test]
    async fn test_rejected_call_is_telegram_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/botTOKEN/getUpdates");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({
                    "ok": false,
                    "description": "Unauthorized"
                }));
        });

        let err = client(&server).next_updates(0).await.unwrap_err();
        match err {
            BotError::Telegram { message } => assert!(message.contains("Unauthorized")),
            other => panic!("expected Telegram error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_transport_failure_is_telegram_error() {
        // Point at a port nothing listens on.
        let client = TelegramClient::new("http://127.0.0.1:1", "TOKEN", 0).unwrap();
        let err = client.next_updates(0).await.unwrap_err();
        assert!(matches!(err, BotError::Telegram { .. }));
    }
}
