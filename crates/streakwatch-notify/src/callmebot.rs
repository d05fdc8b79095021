//! CallMeBot voice call channel.

use crate::error::NotifyError;

const CHANNEL: &str = "CallMeBot";

pub struct CallMeBotChannel {
    api_base: String,
    lang: String,
    client: reqwest::Client,
}

impl CallMeBotChannel {
    pub fn new(api_base: impl Into<String>, lang: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into(),
            lang: lang.into(),
            client: reqwest::Client::new(),
        }
    }

    /// Calls `user` (a Telegram handle or phone number) and reads `text` aloud.
    pub async fn make_call(&self, user: &str, text: &str) -> Result<(), NotifyError> {
        if user.is_empty() {
            return Err(NotifyError::MissingCredentials("CallMeBot user"));
        }

        let url = format!("{}/start.php", self.api_base.trim_end_matches('/'));
        log::info!("Initiating CallMeBot call to {user}...");
        let resp = self
            .client
            .get(url)
            .query(&[("user", user), ("text", text), ("lang", self.lang.as_str())])
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

        Ok(())
    }
}
