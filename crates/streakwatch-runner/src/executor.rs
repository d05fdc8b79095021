use crate::scrapable::{ScrapeOutcome, Scrapable, Target};

/// Runs one scrape and contains its failure.
///
/// Always returns an outcome: any error raised by `scraper.scrape` is logged
/// and carried in [`ScrapeOutcome::Failure`].
pub async fn run_task(scraper: &dyn Scrapable, target: &Target) -> ScrapeOutcome {
    let name = scraper.name();
    log::info!("Starting scraper: {name} for {}", target.username);

    match scraper.scrape(target).await {
        Ok(report) => {
            log::info!("Finished scraper: {name} got: {report:?}");
            ScrapeOutcome::Success(report)
        }
        Err(e) => {
            log::error!("Error in scraper: {name} for {} got: {e:#}", target.username);
            ScrapeOutcome::Failure {
                username: target.username.clone(),
                error: e.to_string(),
            }
        }
    }
}
