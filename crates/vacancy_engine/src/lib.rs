//! Vacancy engine: page loading, detail scraping, CSV storage and the run pipeline.
mod browser;
mod decode;
mod delay;
mod extract;
mod fetch;
mod persist;
mod pipeline;
mod scrape;
mod types;

pub use browser::{
    load_whole_page, BrowserPageSource, ChromeDriver, LoadError, PageSource, ScrollDriver,
    ScrollSettings,
};
pub use decode::decode_page;
pub use delay::{
    DelaySource, FixedDelay, GaussianJitter, JitterSettings, Sleeper, ThreadSleeper,
};
pub use extract::{ExtractError, ExtractorSettings, VacancyDetails, VacancyExtractor};
pub use fetch::{FetchSettings, Fetcher, ReqwestFetcher};
pub use persist::{ensure_data_dir, load_seen, write_records, AtomicFileWriter, PersistError};
pub use pipeline::{listing_url, run_once, PipelineError, RunReport, RunSettings};
pub use scrape::{scrape_vacancies, scrape_vacancy, ScrapeError};
pub use types::{FailureKind, FetchError, FetchMetadata, FetchOutput};
