use std::path::PathBuf;

use thiserror::Error;
use url::Url;
use vacancy_core::{reconcile, urls_to_scrape};
use vacancy_logging::{vacancy_info, vacancy_warn};

use crate::browser::{LoadError, PageSource};
use crate::delay::DelaySource;
use crate::extract::VacancyExtractor;
use crate::fetch::Fetcher;
use crate::persist::{ensure_data_dir, load_seen, write_records, PersistError};
use crate::scrape::scrape_vacancies;

/// Where one run reads from and writes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSettings {
    pub listing_url: Url,
    pub data_dir: PathBuf,
    pub seen_file: String,
    pub add_file: String,
    pub delete_file: String,
}

impl RunSettings {
    pub fn seen_path(&self) -> PathBuf {
        self.data_dir.join(&self.seen_file)
    }

    pub fn add_path(&self) -> PathBuf {
        self.data_dir.join(&self.add_file)
    }

    pub fn delete_path(&self) -> PathBuf {
        self.data_dir.join(&self.delete_file)
    }
}

/// Listing URL with one query pair per work mode and per profession.
pub fn listing_url(
    base: &str,
    work_modes: &[String],
    professions: &[String],
) -> Result<Url, url::ParseError> {
    let mut url = Url::parse(base)?;
    {
        let mut query = url.query_pairs_mut();
        for mode in work_modes {
            query.append_pair("work_modes", mode);
        }
        for profession in professions {
            query.append_pair("professions", profession);
        }
    }
    Ok(url)
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Persist(#[from] PersistError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub listed: usize,
    pub scraped: usize,
    pub incomplete: usize,
    pub kept: usize,
    pub added: usize,
    pub deleted: usize,
}

/// One full pass: load listing, scrape new vacancies, reconcile, write files.
pub async fn run_once(
    page_source: &mut dyn PageSource,
    fetcher: &dyn Fetcher,
    extractor: &VacancyExtractor,
    delays: &mut dyn DelaySource,
    settings: &RunSettings,
) -> Result<RunReport, PipelineError> {
    vacancy_info!("Scrolling vacancies page...");
    let html = page_source.load(settings.listing_url.as_str())?;

    let listed = extractor.listing_links(&html, &settings.listing_url);
    vacancy_info!("Found {} vacancies!", listed.len());

    ensure_data_dir(&settings.data_dir)?;
    let seen = load_seen(&settings.seen_path())?;

    let pending = urls_to_scrape(&seen, &listed);
    let fresh = scrape_vacancies(fetcher, extractor, &pending, delays).await;
    let incomplete = fresh.iter().filter(|record| record.is_incomplete()).count();
    if incomplete > 0 {
        vacancy_warn!("{incomplete} vacancies saved with missing fields");
    }

    let result = reconcile(seen, &listed, fresh);
    if !result.has_changes() {
        vacancy_info!("No vacancies added or removed since the last run");
    }

    vacancy_info!("Saving {} active vacancies...", result.kept.len());
    write_records(&settings.seen_path(), &result.kept)?;

    vacancy_info!(
        "Saving {} vacancies to be deleted to {}...",
        result.deleted.len(),
        settings.delete_path().display()
    );
    write_records(&settings.delete_path(), &result.deleted)?;

    vacancy_info!(
        "Saving {} vacancies to be added to {}...",
        result.added.len(),
        settings.add_path().display()
    );
    write_records(&settings.add_path(), &result.added)?;

    Ok(RunReport {
        listed: listed.len(),
        scraped: pending.len(),
        incomplete,
        kept: result.kept.len(),
        added: result.added.len(),
        deleted: result.deleted.len(),
    })
}
