use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A profile scraper, registered under its `name`.
///
/// Implementors only provide `scrape`. Errors returned from it never leave
/// [`run_task`](crate::run_task), which turns them into a
/// [`ScrapeOutcome::Failure`].
#[async_trait]
pub trait Scrapable: Send + Sync {
    fn name(&self) -> &'static str;

    /// Title used in alert messages.
    fn title(&self) -> &str {
        self.name()
    }

    async fn scrape(&self, target: &Target) -> anyhow::Result<StreakReport>;
}

/// A profile to check, as configured for one scraper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Target {
    pub username: String,

    #[serde(default)]
    pub last_streak: u32,

    #[serde(default)]
    pub last_streak_date: Option<NaiveDate>,

    #[serde(default)]
    pub telegram_username: Option<String>,

    #[serde(default)]
    pub make_call: bool,

    #[serde(default)]
    pub phone_number: Option<String>,
}

impl Target {
    /// A target given on the command line, with no prior observation.
    pub fn adhoc(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            last_streak: 0,
            last_streak_date: None,
            telegram_username: None,
            make_call: false,
            phone_number: None,
        }
    }

    pub fn notification_handle(&self) -> &str {
        self.telegram_username
            .as_deref()
            .filter(|h| !h.is_empty())
            .unwrap_or(&self.username)
    }

    /// The date `last_streak` was observed on, `today` if never observed.
    pub fn reference_date(&self, today: NaiveDate) -> NaiveDate {
        self.last_streak_date.unwrap_or(today)
    }

    /// Where to place a voice call, if one is requested and possible.
    pub fn voice_destination(&self) -> Option<&str> {
        if !self.make_call {
            return None;
        }
        self.phone_number.as_deref().filter(|p| !p.trim().is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakReport {
    pub username: String,
    pub display_name: String,
    pub streak: u32,
    pub total_xp: String,
    pub completed_today: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScrapeOutcome {
    Success(StreakReport),
    Failure { username: String, error: String },
}

impl ScrapeOutcome {
    pub fn username(&self) -> &str {
        match self {
            Self::Success(report) => &report.username,
            Self::Failure { username, .. } => username,
        }
    }

    pub fn report(&self) -> Option<&StreakReport> {
        match self {
            Self::Success(report) => Some(report),
            Self::Failure { .. } => None,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}
