mod config;
mod duolingo;
mod error;
mod profile;
mod session;

pub use crate::config::DuolingoConfig;
pub use crate::duolingo::DuolingoScraper;
pub use crate::error::ExtractionError;
pub use crate::profile::{ProfilePage, DAY_STREAK, TOTAL_XP};
