use std::sync::Arc;

use headless_chrome::{Browser, LaunchOptions, Tab};
use vacancy_logging::{vacancy_debug, vacancy_info, vacancy_warn};

use crate::delay::{DelaySource, GaussianJitter, JitterSettings, Sleeper, ThreadSleeper};

const SCROLL_TO_BOTTOM_JS: &str = "window.scrollTo(0, document.body.scrollHeight);";
const SCROLL_HEIGHT_JS: &str = "document.body.scrollHeight";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrollSettings {
    /// Upper bound on scroll rounds for pages that never stop growing.
    pub max_rounds: usize,
    pub headless: bool,
}

impl Default for ScrollSettings {
    fn default() -> Self {
        Self {
            max_rounds: 200,
            headless: true,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to launch browser: {0}")]
    Launch(String),
    #[error("failed to open {url}: {message}")]
    Navigation { url: String, message: String },
    #[error("browser script failed: {0}")]
    Script(String),
    #[error("page height is not a number: {0}")]
    Height(String),
}

/// The few browser operations the scroll loop needs.
pub trait ScrollDriver {
    fn scroll_to_bottom(&mut self) -> Result<(), LoadError>;
    fn scroll_height(&mut self) -> Result<u64, LoadError>;
    fn page_source(&mut self) -> Result<String, LoadError>;
}

/// Scroll until the page height stops changing, then return the markup.
///
/// Each round scrolls to the bottom, pauses for one delay and re-reads the
/// height. The first reading is compared against zero.
pub fn load_whole_page(
    driver: &mut dyn ScrollDriver,
    delays: &mut dyn DelaySource,
    sleeper: &dyn Sleeper,
    settings: &ScrollSettings,
) -> Result<String, LoadError> {
    let mut last_height = 0;
    for round in 1..=settings.max_rounds {
        driver.scroll_to_bottom()?;
        sleeper.sleep(delays.next_delay());
        let height = driver.scroll_height()?;
        vacancy_debug!("Scroll round {round}: height {height}");
        if height == last_height {
            return driver.page_source();
        }
        last_height = height;
    }
    vacancy_warn!(
        "Page still growing after {} scroll rounds, using what has loaded",
        settings.max_rounds
    );
    driver.page_source()
}

/// Source of the fully rendered listing page.
pub trait PageSource {
    fn load(&mut self, url: &str) -> Result<String, LoadError>;
}

/// Headless Chrome tab opened on one URL.
pub struct ChromeDriver {
    // Dropping the browser kills the Chrome process.
    _browser: Browser,
    tab: Arc<Tab>,
}

impl ChromeDriver {
    pub fn open(url: &str, headless: bool) -> Result<Self, LoadError> {
        let options = LaunchOptions::default_builder()
            .headless(headless)
            .build()
            .map_err(|err| LoadError::Launch(err.to_string()))?;
        let browser = Browser::new(options).map_err(|err| LoadError::Launch(err.to_string()))?;
        let tab = browser
            .new_tab()
            .map_err(|err| LoadError::Launch(err.to_string()))?;
        tab.navigate_to(url)
            .and_then(|tab| tab.wait_until_navigated())
            .map_err(|err| LoadError::Navigation {
                url: url.to_string(),
                message: err.to_string(),
            })?;
        Ok(Self {
            _browser: browser,
            tab,
        })
    }
}

impl ScrollDriver for ChromeDriver {
    fn scroll_to_bottom(&mut self) -> Result<(), LoadError> {
        self.tab
            .evaluate(SCROLL_TO_BOTTOM_JS, false)
            .map_err(|err| LoadError::Script(err.to_string()))?;
        Ok(())
    }

    fn scroll_height(&mut self) -> Result<u64, LoadError> {
        let result = self
            .tab
            .evaluate(SCROLL_HEIGHT_JS, false)
            .map_err(|err| LoadError::Script(err.to_string()))?;
        let value = result.value.unwrap_or(serde_json::Value::Null);
        value
            .as_u64()
            .or_else(|| value.as_f64().map(|height| height as u64))
            .ok_or_else(|| LoadError::Height(value.to_string()))
    }

    fn page_source(&mut self) -> Result<String, LoadError> {
        self.tab
            .get_content()
            .map_err(|err| LoadError::Script(err.to_string()))
    }
}

/// Launches a fresh headless Chrome for every load and scrolls it out.
pub struct BrowserPageSource {
    scroll: ScrollSettings,
    delays: GaussianJitter,
}

impl BrowserPageSource {
    pub fn new(scroll: ScrollSettings, jitter: JitterSettings) -> Self {
        Self {
            scroll,
            delays: GaussianJitter::new(jitter),
        }
    }
}

impl PageSource for BrowserPageSource {
    fn load(&mut self, url: &str) -> Result<String, LoadError> {
        vacancy_info!("Opening {url} in headless browser");
        let mut driver = ChromeDriver::open(url, self.scroll.headless)?;
        load_whole_page(&mut driver, &mut self.delays, &ThreadSleeper, &self.scroll)
    }
}
