use scraper::{ElementRef, Html, Selector};
use url::Url;
use vacancy_logging::vacancy_debug;

/// CSS selectors for the one page layout we understand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractorSettings {
    /// Anchor of a vacancy card on the listing page.
    pub card_link: String,
    /// Position title on a detail page.
    pub position: String,
    /// Employer / service name on a detail page.
    pub service: String,
}

impl Default for ExtractorSettings {
    fn default() -> Self {
        Self {
            card_link: ".lc-jobs-vacancy-card__link".to_string(),
            position: "h1".to_string(),
            service: ".lc-jobs-tags-block__service-name".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VacancyDetails {
    pub position: String,
    pub service: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExtractError {
    #[error("invalid selector {selector:?}: {message}")]
    InvalidSelector { selector: String, message: String },
    #[error("no element matches {selector:?}")]
    MissingElement { selector: String },
}

#[derive(Debug, Clone)]
pub struct VacancyExtractor {
    card_link: Selector,
    position: Selector,
    service: Selector,
    settings: ExtractorSettings,
}

impl VacancyExtractor {
    pub fn new(settings: ExtractorSettings) -> Result<Self, ExtractError> {
        Ok(Self {
            card_link: parse_selector(&settings.card_link)?,
            position: parse_selector(&settings.position)?,
            service: parse_selector(&settings.service)?,
            settings,
        })
    }

    /// Absolute detail-page URLs of every vacancy card, in document order.
    pub fn listing_links(&self, html: &str, base_url: &Url) -> Vec<String> {
        let doc = Html::parse_document(html);
        doc.select(&self.card_link)
            .filter_map(|card| {
                let Some(href) = card.value().attr("href") else {
                    vacancy_debug!("Vacancy card without href skipped");
                    return None;
                };
                match base_url.join(href) {
                    Ok(url) => Some(url.to_string()),
                    Err(err) => {
                        vacancy_debug!("Unresolvable vacancy href {href:?}: {err}");
                        None
                    }
                }
            })
            .collect()
    }

    /// Position and service name from a vacancy detail page.
    pub fn vacancy_details(&self, html: &str) -> Result<VacancyDetails, ExtractError> {
        let doc = Html::parse_document(html);
        let position = first_text(&doc, &self.position, &self.settings.position)?;
        let service = first_text(&doc, &self.service, &self.settings.service)?;
        Ok(VacancyDetails { position, service })
    }
}

fn parse_selector(selector: &str) -> Result<Selector, ExtractError> {
    Selector::parse(selector).map_err(|err| ExtractError::InvalidSelector {
        selector: selector.to_string(),
        message: err.to_string(),
    })
}

fn first_text(doc: &Html, selector: &Selector, source: &str) -> Result<String, ExtractError> {
    doc.select(selector)
        .next()
        .map(element_text)
        .ok_or_else(|| ExtractError::MissingElement {
            selector: source.to_string(),
        })
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}
