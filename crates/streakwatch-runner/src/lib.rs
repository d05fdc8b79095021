pub mod config;
pub mod coordinator;
mod executor;
mod notifier;
mod registry;
mod scrapable;
pub mod streak;

pub use config::{ConfigError, TargetsConfig};
pub use coordinator::AlertRecord;
pub use executor::run_task;
pub use notifier::Notifier;
pub use registry::{Registry, RegistryError};
pub use scrapable::{ScrapeOutcome, Scrapable, StreakReport, Target};

pub use async_trait::async_trait;
