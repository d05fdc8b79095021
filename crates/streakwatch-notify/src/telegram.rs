//! Telegram Bot API text channel.

use serde::Deserialize;

use crate::error::NotifyError;

const CHANNEL: &str = "Telegram";

#[derive(Debug, Deserialize)]
struct TelegramApiResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

pub struct TelegramChannel {
    bot_token: String,
    chat_id: String,
    api_base: String,
    client: reqwest::Client,
}

impl TelegramChannel {
    /// Fails unless both the token and the chat id are set.
    pub fn new(
        bot_token: Option<String>,
        chat_id: Option<String>,
        api_base: impl Into<String>,
    ) -> Result<Self, NotifyError> {
        let bot_token = bot_token
            .filter(|t| !t.is_empty())
            .ok_or(NotifyError::MissingCredentials("TELEGRAM_BOT_TOKEN"))?;
        let chat_id = chat_id
            .filter(|c| !c.is_empty())
            .ok_or(NotifyError::MissingCredentials("TELEGRAM_CHAT_ID"))?;
        Ok(Self {
            bot_token,
            chat_id,
            api_base: api_base.into(),
            client: reqwest::Client::new(),
        })
    }

    fn api_url(&self, method: &str) -> String {
        format!(
            "{}/bot{}/{method}",
            self.api_base.trim_end_matches('/'),
            self.bot_token
        )
    }

    /// Sends a Markdown message to the configured chat.
    pub async fn send_message(&self, text: &str) -> Result<(), NotifyError> {
        let body = serde_json::json!({
            "chat_id": self.chat_id,
            "text": text,
            "parse_mode": "Markdown",
        });

        let resp = self
            .client
            .post(self.api_url("sendMessage"))
            .json(&body)
            .send()
            .await
            .map_err(|source| NotifyError::Request {
                channel: CHANNEL,
                source,
            })?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(NotifyError::Status {
                channel: CHANNEL,
                status,
                body,
            });
        }

        let result: TelegramApiResponse =
            resp.json().await.map_err(|source| NotifyError::Request {
                channel: CHANNEL,
                source,
            })?;
        if !result.ok {
            return Err(NotifyError::Api {
                channel: CHANNEL,
                description: result.description.unwrap_or_default(),
            });
        }

        Ok(())
    }
}
