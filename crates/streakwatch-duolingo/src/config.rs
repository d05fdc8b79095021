use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DuolingoConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// How long a profile page may take to load, in seconds
    #[serde(default = "default_wait_window_secs")]
    pub wait_window_secs: f32,
}

impl Default for DuolingoConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            user_agent: default_user_agent(),
            wait_window_secs: default_wait_window_secs(),
        }
    }
}

impl DuolingoConfig {
    pub fn wait_window(&self) -> Duration {
        Duration::try_from_secs_f32(self.wait_window_secs)
            .unwrap_or_else(|_| Duration::from_secs_f32(default_wait_window_secs()))
    }
}

fn default_base_url() -> String {
    String::from("https://www.duolingo.com")
}

fn default_user_agent() -> String {
    String::from("Mozilla/5.0 (X11; Linux x86_64; rv:121.0) Gecko/20100101 Firefox/121.0")
}

fn default_wait_window_secs() -> f32 {
    15.0
}
