use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("Username is required")]
    MissingUsername,

    #[error("Invalid base URL {0}")]
    InvalidBaseUrl(String),

    #[error("Timed out after {waited:?} waiting for {url}")]
    Timeout { url: String, waited: Duration },

    /// The page loaded but the profile never showed up on it, which is what a
    /// page rendered in the browser looks like before its scripts run.
    #[error("Profile content did not render at {url}")]
    NotRendered { url: String },

    #[error("Profile not found: {0}")]
    ProfileNotFound(String),

    #[error("Unexpected status {status} for {url}")]
    Http {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("Couldn't find \"{0}\" on profile page")]
    MissingStat(&'static str),

    #[error("Invalid counter {0:?}")]
    InvalidCounter(String),

    #[error(transparent)]
    Request(#[from] reqwest::Error),
}
