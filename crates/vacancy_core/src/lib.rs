//! Vacancy core: the record model and pure reconciliation against the seen set.
mod record;
mod reconcile;

pub use record::{VacancyRecord, CSV_HEADER};
pub use reconcile::{reconcile, urls_to_scrape, Reconciliation};
