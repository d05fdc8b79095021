use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotifyConfig {
    #[serde(default)]
    pub telegram_bot_token: Option<String>,

    #[serde(default)]
    pub telegram_chat_id: Option<String>,

    #[serde(default = "default_telegram_api")]
    pub telegram_api: String,

    #[serde(default = "default_callmebot_api")]
    pub callmebot_api: String,

    /// CallMeBot text-to-speech voice
    #[serde(default = "default_callmebot_lang")]
    pub callmebot_lang: String,
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            telegram_bot_token: None,
            telegram_chat_id: None,
            telegram_api: default_telegram_api(),
            callmebot_api: default_callmebot_api(),
            callmebot_lang: default_callmebot_lang(),
        }
    }
}

fn default_telegram_api() -> String {
    String::from("https://api.telegram.org")
}

fn default_callmebot_api() -> String {
    String::from("http://api.callmebot.com")
}

fn default_callmebot_lang() -> String {
    String::from("en-US-Standard-C")
}
