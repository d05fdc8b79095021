use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use reqwest::{StatusCode, Url};

use crate::error::ExtractionError;

/// A browsing context for a single profile visit.
///
/// Each session owns its own HTTP client, so nothing (cookies, pooled
/// connections) leaks from one profile to the next. The session is closed when
/// dropped, whichever way the extraction ended.
pub struct PageSession {
    client: reqwest::Client,
    open: Arc<AtomicUsize>,
}

impl PageSession {
    pub fn open(user_agent: &str, open: Arc<AtomicUsize>) -> Result<Self, ExtractionError> {
        let client = reqwest::ClientBuilder::new()
            .user_agent(user_agent)
            .gzip(true)
            .deflate(true)
            .build()?;
        let count = open.fetch_add(1, Ordering::SeqCst) + 1;
        log::debug!("Opened page session ({count} open)");
        Ok(Self { client, open })
    }

    /// Loads a profile page and returns its body.
    pub async fn goto(&self, url: &Url, username: &str) -> Result<String, ExtractionError> {
        log::info!("Navigating to {url}");
        let resp = self.client.get(url.clone()).send().await?;

        match resp.status() {
            StatusCode::NOT_FOUND => Err(ExtractionError::ProfileNotFound(username.to_string())),
            status if !status.is_success() => Err(ExtractionError::Http {
                url: url.to_string(),
                status,
            }),
            _ => Ok(resp.text().await?),
        }
    }
}

impl Drop for PageSession {
    fn drop(&mut self) {
        let count = self.open.fetch_sub(1, Ordering::SeqCst) - 1;
        log::debug!("Closed page session ({count} open)");
    }
}
