use async_trait::async_trait;
use streakwatch_runner::Notifier;

use crate::callmebot::CallMeBotChannel;
use crate::config::NotifyConfig;
use crate::telegram::TelegramChannel;

/// Routes alerts to Telegram (text) and CallMeBot (voice).
pub struct Dispatcher {
    telegram: Option<TelegramChannel>,
    callmebot: CallMeBotChannel,
}

impl Dispatcher {
    pub fn new(config: &NotifyConfig) -> Self {
        let telegram = match TelegramChannel::new(
            config.telegram_bot_token.clone(),
            config.telegram_chat_id.clone(),
            &config.telegram_api,
        ) {
            Ok(channel) => Some(channel),
            Err(e) => {
                log::warn!("Telegram credentials incomplete ({e}), messages will be skipped");
                None
            }
        };

        Self {
            telegram,
            callmebot: CallMeBotChannel::new(&config.callmebot_api, &config.callmebot_lang),
        }
    }
}

#[async_trait]
impl Notifier for Dispatcher {
    async fn send_message(&self, text: &str) -> bool {
        let Some(telegram) = &self.telegram else {
            log::warn!("Skipping Telegram message: credentials missing");
            return false;
        };
        match telegram.send_message(text).await {
            Ok(()) => {
                log::info!("Telegram message sent successfully");
                true
            }
            Err(e) => {
                log::error!("Error sending Telegram message: {e}");
                false
            }
        }
    }

    async fn make_call(&self, recipient: &str, text: &str) -> bool {
        match self.callmebot.make_call(recipient, text).await {
            Ok(()) => {
                log::info!("CallMeBot request sent successfully");
                true
            }
            Err(e) => {
                log::error!("Error initiating CallMeBot call: {e}");
                false
            }
        }
    }
}
