use std::collections::HashSet;

use vacancy_logging::{vacancy_debug, vacancy_info};

use crate::VacancyRecord;

/// Result of comparing the seen set against the current listing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Reconciliation {
    /// New seen set: surviving seen rows followed by the added rows.
    pub kept: Vec<VacancyRecord>,
    /// Rows discovered in this run.
    pub added: Vec<VacancyRecord>,
    /// Seen rows no longer listed.
    pub deleted: Vec<VacancyRecord>,
}

impl Reconciliation {
    pub fn has_changes(&self) -> bool {
        !self.added.is_empty() || !self.deleted.is_empty()
    }
}

/// Listed URLs that need scraping: those absent from the seen set.
///
/// Keeps listing order and drops repeated URLs, so a card that appears twice
/// on the page is fetched once.
pub fn urls_to_scrape(seen: &[VacancyRecord], listed: &[String]) -> Vec<String> {
    let mut skip: HashSet<&str> = seen.iter().map(|record| record.url.as_str()).collect();
    let mut pending = Vec::new();
    for url in listed {
        if skip.insert(url.as_str()) {
            pending.push(url.clone());
        }
    }
    vacancy_debug!(
        "{} listed urls, {} already seen, {} to scrape",
        listed.len(),
        listed.len() - pending.len(),
        pending.len()
    );
    pending
}

/// Partition the seen set against the current listing and fold in fresh rows.
///
/// - seen and still listed: kept as is, prior data wins over any fresh row
/// - seen and no longer listed: deleted
/// - fresh row for an unseen url: added, and appended to kept
///
/// Fresh rows repeating a url already added are dropped.
pub fn reconcile(
    seen: Vec<VacancyRecord>,
    listed: &[String],
    fresh: Vec<VacancyRecord>,
) -> Reconciliation {
    let listed: HashSet<&str> = listed.iter().map(String::as_str).collect();
    let seen_urls: HashSet<String> = seen.iter().map(|record| record.url.clone()).collect();

    let (mut kept, deleted): (Vec<_>, Vec<_>) = seen
        .into_iter()
        .partition(|record| listed.contains(record.url.as_str()));

    let mut added_urls = HashSet::new();
    let mut added = Vec::with_capacity(fresh.len());
    for record in fresh {
        if seen_urls.contains(&record.url) {
            vacancy_debug!("Ignoring fresh row for already seen {}", record.url);
            continue;
        }
        if !added_urls.insert(record.url.clone()) {
            continue;
        }
        added.push(record);
    }
    kept.extend(added.iter().cloned());

    vacancy_info!(
        "Reconciled: {} active, {} added, {} removed",
        kept.len(),
        added.len(),
        deleted.len()
    );

    Reconciliation {
        kept,
        added,
        deleted,
    }
}
