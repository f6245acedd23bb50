mod config;

use std::path::PathBuf;

use anyhow::Context;
use log::LevelFilter;
use vacancy_engine::{
    run_once, BrowserPageSource, GaussianJitter, ReqwestFetcher, RunReport, VacancyExtractor,
};
use vacancy_logging::{vacancy_error, vacancy_info};

use crate::config::AppConfig;

fn main() -> anyhow::Result<()> {
    vacancy_logging::initialize(LevelFilter::Info);

    let config_path = std::env::args_os().nth(1).map(PathBuf::from);
    let config = AppConfig::load(config_path.as_deref())?;

    let runtime = tokio::runtime::Runtime::new().context("starting tokio runtime")?;
    let report = match runtime.block_on(run(&config)) {
        Ok(report) => report,
        Err(err) => {
            vacancy_error!("Run failed: {err:#}");
            return Err(err);
        }
    };

    vacancy_info!(
        "Done: {} listed, {} scraped ({} incomplete), {} active, {} added, {} removed",
        report.listed,
        report.scraped,
        report.incomplete,
        report.kept,
        report.added,
        report.deleted
    );
    Ok(())
}

async fn run(config: &AppConfig) -> anyhow::Result<RunReport> {
    let settings = config.run_settings()?;
    let jitter = config.jitter_settings()?;
    let extractor = VacancyExtractor::new(config.extractor_settings())?;
    let fetcher = ReqwestFetcher::new(config.fetch_settings())?;
    let mut page_source = BrowserPageSource::new(config.scroll_settings(), jitter);
    let mut delays = GaussianJitter::new(jitter);

    let report = run_once(
        &mut page_source,
        &fetcher,
        &extractor,
        &mut delays,
        &settings,
    )
    .await?;
    Ok(report)
}
