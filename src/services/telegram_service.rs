use crate::error::{Error, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;

/// Delivers notification texts to the configured chat.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send_message(&self, text: &str) -> Result<()>;
}

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct TelegramReply {
    ok: bool,
    description: Option<String>,
}

#[derive(Clone)]
pub struct TelegramService {
    client: Client,
    api_url: Url,
    bot_token: String,
    chat_id: String,
}

impl TelegramService {
    pub fn new(client: Client, api_url: Url, bot_token: String, chat_id: String) -> Self {
        Self {
            client,
            api_url,
            bot_token,
            chat_id,
        }
    }

    fn send_message_url(&self) -> String {
        format!(
            "{}/bot{}/sendMessage",
            self.api_url.as_str().trim_end_matches('/'),
            self.bot_token
        )
    }
}

#[async_trait]
impl Notifier for TelegramService {
    async fn send_message(&self, text: &str) -> Result<()> {
        tracing::debug!(chat_id = %self.chat_id, "Sending Telegram message");

        let body = SendMessageRequest {
            chat_id: &self.chat_id,
            text,
        };
        let response = self
            .client
            .post(self.send_message_url())
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                // Strip the URL: it carries the bot token.
                let e = e.without_url();
                tracing::error!(error = %e, "Could not reach Telegram");
                Error::Notification(e.to_string())
            })?;

        let status = response.status();
        let reply = response.json::<TelegramReply>().await.ok();
        match reply {
            Some(TelegramReply { ok: true, .. }) if status.is_success() => {
                tracing::debug!("Telegram message sent");
                Ok(())
            }
            other => {
                let description = other
                    .and_then(|r| r.description)
                    .unwrap_or_else(|| format!("status {}", status));
                tracing::error!(status = status.as_u16(), "Telegram rejected the message: {}", description);
                Err(Error::Notification(description))
            }
        }
    }
}
