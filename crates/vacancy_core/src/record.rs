use serde::Serialize;

/// Header row shared by the seen, add and delete files.
pub const CSV_HEADER: [&str; 6] = ["stage", "link", "position", "service", "rating", "comments"];

/// One vacancy row.
///
/// Field order matches [`CSV_HEADER`]. Only `url`, `position` and `service`
/// are filled in by the scraper; `stage`, `rating` and `comments` are left for
/// manual bookkeeping and travel unchanged through every run.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct VacancyRecord {
    pub stage: String,
    #[serde(rename = "link")]
    pub url: String,
    pub position: String,
    pub service: String,
    pub rating: String,
    pub comments: String,
}

impl VacancyRecord {
    /// A freshly scraped record with empty annotation columns.
    pub fn scraped(
        url: impl Into<String>,
        position: impl Into<String>,
        service: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            position: position.into(),
            service: service.into(),
            ..Self::default()
        }
    }

    /// A record for a URL whose details could not be extracted.
    pub fn unscraped(url: impl Into<String>) -> Self {
        Self::scraped(url, "", "")
    }

    pub fn is_incomplete(&self) -> bool {
        self.position.is_empty() || self.service.is_empty()
    }
}
