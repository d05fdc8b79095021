use std::collections::HashMap;
use std::sync::Mutex;

use chrono::NaiveDate;
use streakwatch_runner::coordinator::{collect, notify_incomplete, successful_reports};
use streakwatch_runner::{
    async_trait, streak, AlertRecord, Notifier, ScrapeOutcome, Scrapable, StreakReport, Target,
};

/// Serves fixed streak values as of a fixed day.
struct StubScraper {
    today: NaiveDate,
    streaks: HashMap<&'static str, u32>,
    calls: Mutex<Vec<String>>,
}

impl StubScraper {
    fn new(streaks: &[(&'static str, u32)]) -> Self {
        Self {
            today: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            streaks: streaks.iter().copied().collect(),
            calls: Mutex::new(vec![]),
        }
    }
}

#[async_trait]
impl Scrapable for StubScraper {
    fn name(&self) -> &'static str {
        "duolingo"
    }

    fn title(&self) -> &str {
        "Duolingo"
    }

    async fn scrape(&self, target: &Target) -> anyhow::Result<StreakReport> {
        self.calls.lock().unwrap().push(target.username.clone());
        let streak = *self
            .streaks
            .get(target.username.as_str())
            .ok_or_else(|| anyhow::anyhow!("Profile not found: {}", target.username))?;
        let completed_today = streak::is_completed(
            streak,
            target.last_streak,
            target.reference_date(self.today),
            self.today,
        );
        Ok(StreakReport {
            username: target.username.clone(),
            display_name: target.username.to_uppercase(),
            streak,
            total_xp: "1000".into(),
            completed_today,
        })
    }
}

#[derive(Default)]
struct RecordingNotifier {
    fail_messages: bool,
    messages: Mutex<Vec<String>>,
    calls: Mutex<Vec<(String, String)>>,
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send_message(&self, text: &str) -> bool {
        self.messages.lock().unwrap().push(text.to_string());
        !self.fail_messages
    }

    async fn make_call(&self, recipient: &str, text: &str) -> bool {
        self.calls
            .lock()
            .unwrap()
            .push((recipient.to_string(), text.to_string()));
        true
    }
}

/// Scrapes every target, then alerts the incomplete ones.
async fn run(
    scraper: &StubScraper,
    notifier: &RecordingNotifier,
    targets: &[Target],
) -> (Vec<ScrapeOutcome>, Vec<AlertRecord>) {
    let outcomes = collect(scraper, targets).await;
    let alerts = notify_incomplete(scraper.title(), notifier, targets, &outcomes).await;
    (outcomes, alerts)
}

fn pepsi() -> Target {
    Target {
        username: "pepsi".into(),
        last_streak: 773,
        last_streak_date: NaiveDate::from_ymd_opt(2024, 1, 1),
        telegram_username: Some("@pepsi_tg".into()),
        make_call: false,
        phone_number: None,
    }
}

#[tokio::test]
async fn completed_target_is_not_alerted() {
    let scraper = StubScraper::new(&[("pepsi", 774)]);
    let notifier = RecordingNotifier::default();

    let (outcomes, alerts) = run(&scraper, &notifier, &[pepsi()]).await;

    assert_eq!(successful_reports(&outcomes).len(), 1);
    assert!(successful_reports(&outcomes)[0].completed_today);
    assert!(alerts.is_empty());
    assert!(notifier.messages.lock().unwrap().is_empty());
}

#[tokio::test]
async fn incomplete_target_gets_text_alert() {
    let scraper = StubScraper::new(&[("pepsi", 773)]);
    let notifier = RecordingNotifier::default();

    let (outcomes, alerts) = run(&scraper, &notifier, &[pepsi()]).await;

    assert!(!successful_reports(&outcomes)[0].completed_today);
    assert_eq!(
        *notifier.messages.lock().unwrap(),
        vec!["@pepsi\\_tg 🚨 *Duolingo Incomplete!* \nStreak: 773".to_string()]
    );
    assert!(notifier.calls.lock().unwrap().is_empty());
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].handle, "@pepsi_tg");
    assert_eq!(alerts[0].call_sent, None);
}

#[tokio::test]
async fn incomplete_target_with_call_gets_both_alerts() {
    let scraper = StubScraper::new(&[("pepsi", 773)]);
    let notifier = RecordingNotifier::default();
    let target = Target {
        make_call: true,
        phone_number: Some("@pepsi_call".into()),
        ..pepsi()
    };

    let (_, alerts) = run(&scraper, &notifier, &[target]).await;

    assert_eq!(notifier.messages.lock().unwrap().len(), 1);
    let calls = notifier.calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, "@pepsi_call");
    assert!(calls[0].1.contains("773"));
    assert_eq!(alerts[0].call_sent, Some(true));
}

#[tokio::test]
async fn failed_target_does_not_stop_the_run() {
    let scraper = StubScraper::new(&[("pepsi", 773), ("cola", 10)]);
    let notifier = RecordingNotifier::default();
    let targets = vec![Target::adhoc("ghost"), pepsi(), Target::adhoc("cola")];

    let (outcomes, alerts) = run(&scraper, &notifier, &targets).await;

    assert_eq!(*scraper.calls.lock().unwrap(), vec!["ghost", "pepsi", "cola"]);
    assert_eq!(
        outcomes[0],
        ScrapeOutcome::Failure {
            username: "ghost".into(),
            error: "Profile not found: ghost".into(),
        }
    );
    let usernames: Vec<_> = successful_reports(&outcomes)
        .iter()
        .map(|r| r.username.as_str())
        .collect();
    assert_eq!(usernames, vec!["pepsi", "cola"]);

    // only pepsi is incomplete, cola is a first run
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].username, "pepsi");
}

#[tokio::test]
async fn delivery_failure_does_not_stop_notifying() {
    let scraper = StubScraper::new(&[("pepsi", 773), ("cola", 5)]);
    let notifier = RecordingNotifier {
        fail_messages: true,
        ..Default::default()
    };
    let cola = Target {
        username: "cola".into(),
        last_streak: 5,
        last_streak_date: NaiveDate::from_ymd_opt(2023, 12, 30),
        ..Target::adhoc("cola")
    };
    let targets = vec![pepsi(), cola];

    let outcomes = collect(&scraper, &targets).await;
    let alerts = notify_incomplete("Duolingo", &notifier, &targets, &outcomes).await;

    assert_eq!(notifier.messages.lock().unwrap().len(), 2);
    assert_eq!(alerts.len(), 2);
    assert!(alerts.iter().all(|a| !a.text_sent));
    assert_eq!(alerts[1].handle, "cola");
}
