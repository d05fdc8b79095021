use std::collections::BTreeMap;

use crate::scrapable::Scrapable;

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("Scraper not found: {name}. Available: {}", .available.join(", "))]
    UnknownScraper { name: String, available: Vec<String> },
}

/// Scrapers by name.
#[derive(Default)]
pub struct Registry {
    scrapers: BTreeMap<&'static str, Box<dyn Scrapable>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, scraper: Box<dyn Scrapable>) {
        let name = scraper.name();
        if self.scrapers.insert(name, scraper).is_some() {
            log::warn!("Scraper {name} registered twice, keeping the last one");
        }
    }

    pub fn with(mut self, scraper: impl Scrapable + 'static) -> Self {
        self.register(Box::new(scraper));
        self
    }

    pub fn names(&self) -> Vec<String> {
        self.scrapers.keys().map(|n| n.to_string()).collect()
    }

    /// Looks up `name`, an absent name being just as unknown as a wrong one.
    pub fn resolve(&self, name: Option<&str>) -> Result<&dyn Scrapable, RegistryError> {
        name.and_then(|n| self.scrapers.get(n))
            .map(|s| s.as_ref())
            .ok_or_else(|| RegistryError::UnknownScraper {
                name: name.unwrap_or_default().to_string(),
                available: self.names(),
            })
    }
}
