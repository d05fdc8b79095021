use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Local, NaiveDate};
use reqwest::Url;
use streakwatch_runner::{streak, Scrapable, StreakReport, Target};
use tokio::time::timeout;

use crate::config::DuolingoConfig;
use crate::error::ExtractionError;
use crate::profile::ProfilePage;
use crate::session::PageSession;

pub struct DuolingoScraper {
    config: DuolingoConfig,
    today: Option<NaiveDate>,
    open_sessions: Arc<AtomicUsize>,
}

impl DuolingoScraper {
    pub fn new(config: DuolingoConfig) -> Self {
        Self {
            config,
            today: None,
            open_sessions: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Pins the date streaks are checked against.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    pub fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }

    /// Number of page sessions currently open.
    pub fn open_sessions(&self) -> usize {
        self.open_sessions.load(Ordering::SeqCst)
    }

    pub fn profile_url(&self, username: &str) -> Result<Url, ExtractionError> {
        let invalid = || ExtractionError::InvalidBaseUrl(self.config.base_url.clone());
        let mut url = Url::parse(&self.config.base_url).map_err(|_| invalid())?;
        url.path_segments_mut()
            .map_err(|_| invalid())?
            .pop_if_empty()
            .push("profile")
            .push(username);
        Ok(url)
    }

    async fn load_profile(&self, username: &str) -> Result<ProfilePage, ExtractionError> {
        let url = self.profile_url(username)?;
        let session = PageSession::open(&self.config.user_agent, self.open_sessions.clone())?;

        let waited = self.config.wait_window();
        let page = timeout(waited, session.goto(&url, username))
            .await
            .map_err(|_| ExtractionError::Timeout {
                url: url.to_string(),
                waited,
            })??;

        ProfilePage::parse(&page)?.ok_or_else(|| ExtractionError::NotRendered {
            url: url.to_string(),
        })
    }
}

impl Default for DuolingoScraper {
    fn default() -> Self {
        Self::new(DuolingoConfig::default())
    }
}

#[async_trait]
impl Scrapable for DuolingoScraper {
    fn name(&self) -> &'static str {
        "duolingo"
    }

    fn title(&self) -> &str {
        "Duolingo"
    }

    async fn scrape(&self, target: &Target) -> anyhow::Result<StreakReport> {
        let username = target.username.trim();
        if username.is_empty() {
            return Err(ExtractionError::MissingUsername.into());
        }

        let profile = self.load_profile(username).await?;

        let today = self.today();
        let last_date = target.reference_date(today);
        let check = streak::check(profile.streak, target.last_streak, last_date, today);
        log::info!(
            "Streak calc for {username}: last {} on {last_date}, today {today} (gap {}), \
             current {}, diff {}, completed: {}",
            target.last_streak,
            check.days_elapsed,
            profile.streak,
            check.delta,
            check.completed,
        );
        if target.last_streak_date.is_none() {
            log::info!("No previous observation for {username}, assuming completed");
        }

        Ok(StreakReport {
            username: target.username.clone(),
            display_name: profile.display_name,
            streak: profile.streak,
            total_xp: profile.total_xp,
            completed_today: check.completed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_url_encodes_username() {
        let scraper = DuolingoScraper::new(DuolingoConfig {
            base_url: "http://localhost:8080/".into(),
            ..Default::default()
        });
        assert_eq!(
            scraper.profile_url("a b").unwrap().as_str(),
            "http://localhost:8080/profile/a%20b"
        );
        assert_eq!(
            DuolingoScraper::default().profile_url("pepsi").unwrap().as_str(),
            "https://www.duolingo.com/profile/pepsi"
        );
    }

    #[test]
    fn invalid_base_url() {
        let scraper = DuolingoScraper::new(DuolingoConfig {
            base_url: "not a url".into(),
            ..Default::default()
        });
        assert!(matches!(
            scraper.profile_url("pepsi"),
            Err(ExtractionError::InvalidBaseUrl(_))
        ));
    }
}
