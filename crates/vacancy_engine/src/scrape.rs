use vacancy_core::VacancyRecord;
use vacancy_logging::{vacancy_info, vacancy_warn};

use crate::decode::decode_page;
use crate::delay::DelaySource;
use crate::extract::{ExtractError, VacancyDetails, VacancyExtractor};
use crate::fetch::Fetcher;
use crate::FetchError;

/// Why one vacancy could not be scraped. Never fatal for the run.
#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),
    #[error("extraction failed: {0}")]
    Extract(#[from] ExtractError),
}

/// Fetch one detail page and pull out position and service name.
pub async fn scrape_vacancy(
    fetcher: &dyn Fetcher,
    extractor: &VacancyExtractor,
    url: &str,
) -> Result<VacancyDetails, ScrapeError> {
    let output = fetcher.fetch(url).await?;
    let html = decode_page(&output.bytes, output.metadata.content_type.as_deref());
    Ok(extractor.vacancy_details(&html)?)
}

/// Scrape every url in order, pausing after each request.
///
/// Failures are logged and yield a record with empty position and service,
/// so every url gets exactly one record.
pub async fn scrape_vacancies(
    fetcher: &dyn Fetcher,
    extractor: &VacancyExtractor,
    urls: &[String],
    delays: &mut dyn DelaySource,
) -> Vec<VacancyRecord> {
    let total = urls.len();
    let mut records = Vec::with_capacity(total);
    for (index, url) in urls.iter().enumerate() {
        vacancy_info!("Scraping {}/{}: {}", index + 1, total, url);
        let record = match scrape_vacancy(fetcher, extractor, url).await {
            Ok(details) => VacancyRecord::scraped(url.clone(), details.position, details.service),
            Err(err) => {
                vacancy_warn!("Failed to scrape a vacancy at {url}: {err}");
                VacancyRecord::unscraped(url.clone())
            }
        };
        records.push(record);
        tokio::time::sleep(delays.next_delay()).await;
    }
    records
}
