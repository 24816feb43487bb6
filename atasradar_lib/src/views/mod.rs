//! Views: each owns its own [`Resource`](crate::resource::Resource)s and
//! triggers fetches on load, page change, or explicit action. Views never
//! share state with each other.

mod assistant;
mod dashboard;
mod item_search;
mod supplier;

pub use assistant::AiAssistant;
pub use dashboard::GeneralDashboard;
pub use item_search::{ItemPage, ItemSearch, SearchFilters, SEARCH_PAGE_SIZE};
pub use supplier::{SupplierDashboard, SUPPLIER_PAGE_SIZE};

use chrono::{Months, NaiveDate};

/// Window of validity start dates covering the year up to `today`.
///
/// February 29 maps to February 28 of the previous year.
pub fn last_year_window(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let from = today
        .checked_sub_months(Months::new(12))
        .unwrap_or(NaiveDate::MIN);
    (from, today)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_is_one_year() {
        let today = NaiveDate::from_ymd_opt(2024, 5, 2).unwrap();
        assert_eq!(
            last_year_window(today),
            (NaiveDate::from_ymd_opt(2023, 5, 2).unwrap(), today)
        );
    }

    #[test]
    fn window_from_leap_day() {
        let today = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        assert_eq!(
            last_year_window(today).0,
            NaiveDate::from_ymd_opt(2023, 2, 28).unwrap()
        );
    }
}
