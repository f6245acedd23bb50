//! Run configuration.
//!
//! Every field has a built-in default, so the program runs without a config
//! file. A RON file may override any subset of fields, for example:
//!
//! ```ron
//! (
//!     listing: (professions: ["backend-developer"]),
//!     pacing: (jitter_mean_secs: 6.0),
//! )
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use vacancy_engine::{
    listing_url, ExtractorSettings, FetchSettings, JitterSettings, RunSettings, ScrollSettings,
};
use vacancy_logging::vacancy_info;

/// Looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILENAME: &str = "vacancy_watch.ron";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub listing: ListingConfig,
    pub storage: StorageConfig,
    pub pacing: PacingConfig,
    pub http: HttpConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListingConfig {
    pub base_url: String,
    pub work_modes: Vec<String>,
    pub professions: Vec<String>,
    pub card_link_selector: String,
    pub position_selector: String,
    pub service_selector: String,
}

impl Default for ListingConfig {
    fn default() -> Self {
        let selectors = ExtractorSettings::default();
        Self {
            base_url: "https://yandex.ru/jobs/vacancies".to_string(),
            work_modes: vec!["mixed".to_string(), "remote".to_string()],
            professions: vec!["ml-developer".to_string()],
            card_link_selector: selectors.card_link,
            position_selector: selectors.position,
            service_selector: selectors.service,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
    pub seen_file: String,
    pub add_file: String,
    pub delete_file: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            seen_file: "seen.csv".to_string(),
            add_file: "add.csv".to_string(),
            delete_file: "delete.csv".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PacingConfig {
    pub jitter_min_secs: f64,
    pub jitter_mean_secs: f64,
    pub jitter_std_dev_secs: f64,
    pub max_scroll_rounds: usize,
    pub headless: bool,
}

impl Default for PacingConfig {
    fn default() -> Self {
        let jitter = JitterSettings::default();
        let scroll = ScrollSettings::default();
        Self {
            jitter_min_secs: jitter.min.as_secs_f64(),
            jitter_mean_secs: jitter.mean.as_secs_f64(),
            jitter_std_dev_secs: jitter.std_dev.as_secs_f64(),
            max_scroll_rounds: scroll.max_rounds,
            headless: scroll.headless,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub max_bytes: u64,
    pub user_agent: String,
    pub accept: String,
    pub accept_language: String,
    pub referer: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        let fetch = FetchSettings::default();
        Self {
            connect_timeout_secs: fetch.connect_timeout.as_secs(),
            request_timeout_secs: fetch.request_timeout.as_secs(),
            max_bytes: fetch.max_bytes,
            user_agent: fetch.user_agent,
            accept: fetch.accept,
            accept_language: fetch.accept_language,
            referer: fetch.referer,
        }
    }
}

impl AppConfig {
    /// Load from `path`, or from [`DEFAULT_CONFIG_FILENAME`] if it exists,
    /// or fall back to the built-in defaults.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => {
                let default = PathBuf::from(DEFAULT_CONFIG_FILENAME);
                if !default.exists() {
                    vacancy_info!("No {DEFAULT_CONFIG_FILENAME} found, using built-in settings");
                    return Ok(Self::default());
                }
                default
            }
        };
        let text = fs::read_to_string(&path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config = ron::from_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        vacancy_info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn run_settings(&self) -> anyhow::Result<RunSettings> {
        let listing_url = listing_url(
            &self.listing.base_url,
            &self.listing.work_modes,
            &self.listing.professions,
        )
        .with_context(|| format!("invalid listing url {:?}", self.listing.base_url))?;
        if self.storage.add_file == self.storage.delete_file {
            bail!("add_file and delete_file must differ");
        }
        Ok(RunSettings {
            listing_url,
            data_dir: self.storage.data_dir.clone(),
            seen_file: self.storage.seen_file.clone(),
            add_file: self.storage.add_file.clone(),
            delete_file: self.storage.delete_file.clone(),
        })
    }

    pub fn extractor_settings(&self) -> ExtractorSettings {
        ExtractorSettings {
            card_link: self.listing.card_link_selector.clone(),
            position: self.listing.position_selector.clone(),
            service: self.listing.service_selector.clone(),
        }
    }

    pub fn jitter_settings(&self) -> anyhow::Result<JitterSettings> {
        Ok(JitterSettings {
            min: secs("jitter_min_secs", self.pacing.jitter_min_secs)?,
            mean: secs("jitter_mean_secs", self.pacing.jitter_mean_secs)?,
            std_dev: secs("jitter_std_dev_secs", self.pacing.jitter_std_dev_secs)?,
        })
    }

    pub fn scroll_settings(&self) -> ScrollSettings {
        ScrollSettings {
            max_rounds: self.pacing.max_scroll_rounds.max(1),
            headless: self.pacing.headless,
        }
    }

    pub fn fetch_settings(&self) -> FetchSettings {
        FetchSettings {
            connect_timeout: Duration::from_secs(self.http.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.http.request_timeout_secs),
            max_bytes: self.http.max_bytes,
            user_agent: self.http.user_agent.clone(),
            accept: self.http.accept.clone(),
            accept_language: self.http.accept_language.clone(),
            referer: self.http.referer.clone(),
            ..FetchSettings::default()
        }
    }
}

fn secs(field: &str, value: f64) -> anyhow::Result<Duration> {
    Duration::try_from_secs_f64(value)
        .with_context(|| format!("{field} must be a non-negative number of seconds, got {value}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_built_in_run() {
        let config = AppConfig::default();
        let run = config.run_settings().unwrap();
        assert_eq!(
            run.listing_url.as_str(),
            "https://yandex.ru/jobs/vacancies?work_modes=mixed&work_modes=remote&professions=ml-developer"
        );
        assert_eq!(run.seen_path(), PathBuf::from("data").join("seen.csv"));
        assert_eq!(run.add_path(), PathBuf::from("data").join("add.csv"));
        assert_eq!(run.delete_path(), PathBuf::from("data").join("delete.csv"));
        assert_eq!(config.jitter_settings().unwrap(), JitterSettings::default());
        assert_eq!(config.scroll_settings(), ScrollSettings::default());
        assert_eq!(config.extractor_settings(), ExtractorSettings::default());
    }

    #[test]
    fn partial_file_overrides_only_named_fields() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("custom.ron");
        fs::write(
            &path,
            r#"(
                listing: (professions: ["backend-developer"]),
                pacing: (jitter_mean_secs: 6.5, headless: false),
                storage: (data_dir: "state"),
            )"#,
        )
        .unwrap();

        let config = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(config.listing.professions, vec!["backend-developer".to_string()]);
        assert_eq!(config.listing.work_modes, ListingConfig::default().work_modes);
        assert_eq!(config.pacing.jitter_mean_secs, 6.5);
        assert!(!config.scroll_settings().headless);
        assert_eq!(
            config.run_settings().unwrap().seen_path(),
            PathBuf::from("state").join("seen.csv")
        );
        assert_eq!(config.http, HttpConfig::default());
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempfile::TempDir::new().unwrap();
        assert!(AppConfig::load(Some(&dir.path().join("absent.ron"))).is_err());
    }

    #[test]
    fn negative_jitter_is_rejected() {
        let mut config = AppConfig::default();
        config.pacing.jitter_min_secs = -1.0;
        assert!(config.jitter_settings().is_err());
    }

    #[test]
    fn same_add_and_delete_file_is_rejected() {
        let mut config = AppConfig::default();
        config.storage.delete_file = config.storage.add_file.clone();
        assert!(config.run_settings().is_err());
    }
}
