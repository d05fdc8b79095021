//! Sequential run over all targets of one scraper, then alerting.
//!
//! A run is [`collect`] followed by [`notify_incomplete`] on the outcomes; the
//! caller reports the successful outcomes in between.

use std::fmt;

use crate::executor::run_task;
use crate::notifier::Notifier;
use crate::scrapable::{ScrapeOutcome, Scrapable, StreakReport, Target};

/// What was sent for one incomplete target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertRecord {
    pub username: String,
    pub handle: String,
    pub text_sent: bool,
    /// `None` when no call was requested.
    pub call_sent: Option<bool>,
}

impl fmt::Display for AlertRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = |sent: bool| if sent { "sent" } else { "failed" };
        write!(f, "{}: message {}", self.handle, status(self.text_sent))?;
        if let Some(call) = self.call_sent {
            write!(f, ", call {}", status(call))?;
        }
        Ok(())
    }
}

/// Scrapes every target in order, one at a time.
pub async fn collect(scraper: &dyn Scrapable, targets: &[Target]) -> Vec<ScrapeOutcome> {
    let mut outcomes = Vec::with_capacity(targets.len());
    for target in targets {
        let outcome = run_task(scraper, target).await;
        if let ScrapeOutcome::Failure { username, error } = &outcome {
            log::error!("Scrape failed for {username}: {error}");
        }
        outcomes.push(outcome);
    }
    outcomes
}

pub fn successful_reports(outcomes: &[ScrapeOutcome]) -> Vec<&StreakReport> {
    outcomes.iter().filter_map(ScrapeOutcome::report).collect()
}

/// Telegram Markdown treats `_` as italics.
fn escape_markdown(handle: &str) -> String {
    handle.replace('_', "\\_")
}

pub fn text_alert(title: &str, handle: &str, streak: u32) -> String {
    format!(
        "{} 🚨 *{title} Incomplete!* \nStreak: {streak}",
        escape_markdown(handle)
    )
}

pub fn voice_alert(title: &str, display_name: &str, streak: u32) -> String {
    format!(
        "Hello {display_name}. Your {title} streak of {streak} days is at risk. \
         Please complete today's lesson."
    )
}

/// Alerts every successfully scraped target that has not completed today.
///
/// Failed scrapes are never alerted. Delivery failures are recorded and the
/// pass goes on with the next target.
pub async fn notify_incomplete(
    title: &str,
    notifier: &dyn Notifier,
    targets: &[Target],
    outcomes: &[ScrapeOutcome],
) -> Vec<AlertRecord> {
    let mut alerts = vec![];

    for report in successful_reports(outcomes) {
        if report.completed_today {
            continue;
        }

        let target = targets.iter().find(|t| t.username == report.username);
        let handle = target
            .map(Target::notification_handle)
            .unwrap_or(report.username.as_str());

        log::info!("Sending alert for {handle}...");
        let text_sent = notifier
            .send_message(&text_alert(title, handle, report.streak))
            .await;
        if !text_sent {
            log::warn!("Text alert for {} was not delivered", report.username);
        }

        let call_sent = match target.and_then(Target::voice_destination) {
            Some(recipient) => {
                log::info!("Calling {recipient} for {}", report.username);
                let message = voice_alert(title, &report.display_name, report.streak);
                let sent = notifier.make_call(recipient, &message).await;
                if !sent {
                    log::warn!("Voice alert for {} was not delivered", report.username);
                }
                Some(sent)
            }
            None => None,
        };

        alerts.push(AlertRecord {
            username: report.username.clone(),
            handle: handle.to_string(),
            text_sent,
            call_sent,
        });
    }

    alerts
}
