use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use env_logger::Env;
use fs_err::File;
use serde::Deserialize;
use streakwatch_duolingo::{DuolingoConfig, DuolingoScraper};
use streakwatch_notify::{Dispatcher, NotifyConfig};
use streakwatch_runner::config::with_adhoc;
use streakwatch_runner::coordinator::{collect, notify_incomplete, successful_reports};
use streakwatch_runner::{Registry, ScrapeOutcome, Scrapable, TargetsConfig};
use tokio::runtime;

const DEFAULT_LOG: &str = "streakwatch=info,streakwatch_runner=info,\
                           streakwatch_duolingo=info,streakwatch_notify=info";

/// Daily streak watcher
#[derive(Debug, Parser)]
#[command(version)]
pub struct Args {
    /// Name of the scraper to run
    pub scraper: Option<String>,
    /// Extra username to check, with no previous streak
    pub username: Option<String>,
    /// Path to the json file listing targets per scraper
    #[arg(long, env = "STREAKWATCH_CONFIG", default_value = "config/users.json")]
    pub config: PathBuf,
    /// Path to a json file with scraper and notification settings
    #[arg(long, env = "STREAKWATCH_SETTINGS")]
    pub settings: Option<PathBuf>,
    /// Override the profile site base URL
    #[arg(long)]
    pub base_url: Option<String>,
    /// Override the user agent used to load profiles
    #[arg(long)]
    pub user_agent: Option<String>,
    /// Seconds to wait for a profile page
    #[arg(long)]
    pub wait_window: Option<f32>,
    /// Telegram bot token
    #[arg(long, env = "TELEGRAM_BOT_TOKEN", hide_env_values = true)]
    pub telegram_token: Option<String>,
    /// Telegram chat receiving alerts
    #[arg(long, env = "TELEGRAM_CHAT_ID")]
    pub telegram_chat_id: Option<String>,
    /// CallMeBot text-to-speech voice
    #[arg(long, env = "CALLMEBOT_LANG")]
    pub callmebot_lang: Option<String>,
    /// Print results without sending alerts
    #[arg(long)]
    pub no_notify: bool,
    /// When quiet no logs are outputted
    #[arg(long, short)]
    pub quiet: bool,
}

/// Scraper and notification settings, flags taking precedence over the file.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default)]
    pub duolingo: DuolingoConfig,
    #[serde(default)]
    pub notify: NotifyConfig,
}

impl TryFrom<&Args> for Settings {
    type Error = anyhow::Error;

    fn try_from(args: &Args) -> Result<Self, Self::Error> {
        let mut conf: Settings = if let Some(path) = &args.settings {
            serde_json::from_reader(File::open(path)?)
                .with_context(|| format!("Couldn't parse {}", path.display()))?
        } else {
            Settings::default()
        };

        if let Some(base_url) = &args.base_url {
            conf.duolingo.base_url = base_url.to_string();
        }
        if let Some(user_agent) = &args.user_agent {
            conf.duolingo.user_agent = user_agent.to_string();
        }
        if let Some(wait_window) = args.wait_window {
            conf.duolingo.wait_window_secs = wait_window;
        }
        if let Some(token) = &args.telegram_token {
            conf.notify.telegram_bot_token = Some(token.to_string());
        }
        if let Some(chat_id) = &args.telegram_chat_id {
            conf.notify.telegram_chat_id = Some(chat_id.to_string());
        }
        if let Some(lang) = &args.callmebot_lang {
            conf.notify.callmebot_lang = lang.to_string();
        }
        Ok(conf)
    }
}

fn registry(settings: &Settings) -> Registry {
    Registry::new().with(DuolingoScraper::new(settings.duolingo.clone()))
}

/// One line per failed target, printed even when logs are off.
fn failure_lines(outcomes: &[ScrapeOutcome]) -> Vec<String> {
    outcomes
        .iter()
        .filter_map(|outcome| match outcome {
            ScrapeOutcome::Failure { username, error } => {
                Some(format!("❌ Scrape failed for {username}: {error}"))
            }
            ScrapeOutcome::Success(_) => None,
        })
        .collect()
}

async fn watch(
    scraper: &dyn Scrapable,
    args: &Args,
    notify: &NotifyConfig,
) -> anyhow::Result<()> {
    let name = scraper.name();
    log::info!("Running scraper {name}...");

    let configured = TargetsConfig::load_or_default(&args.config).targets_for(name);
    let targets = with_adhoc(configured, args.username.as_deref());
    if targets.is_empty() {
        log::warn!("No targets found for {name} in config or CLI args.");
        return Ok(());
    }
    let usernames: Vec<_> = targets.iter().map(|t| t.username.as_str()).collect();
    log::info!("Targets found: {}", usernames.join(", "));

    let outcomes = collect(scraper, &targets).await;
    for line in failure_lines(&outcomes) {
        eprintln!("{line}");
    }
    println!(
        "{}",
        serde_json::to_string_pretty(&successful_reports(&outcomes))?
    );

    println!("\n--- Notification Check ---");
    if args.no_notify {
        println!("Notifications disabled");
        return Ok(());
    }

    let dispatcher = Dispatcher::new(notify);
    let alerts = notify_incomplete(scraper.title(), &dispatcher, &targets, &outcomes).await;
    if alerts.is_empty() {
        println!("Nothing to send, every target is done for today");
    }
    for alert in alerts {
        println!("Alert for {alert}");
    }

    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if !args.quiet {
        env_logger::Builder::from_env(Env::default().default_filter_or(DEFAULT_LOG)).init();
    }

    let settings = Settings::try_from(&args)?;
    let registry = registry(&settings);
    let scraper = registry.resolve(args.scraper.as_deref()).map_err(|e| {
        log::error!("{e}");
        e
    })?;

    let rt = runtime::Builder::new_multi_thread().enable_all().build()?;
    rt.block_on(watch(scraper, &args, &settings.notify))
}
