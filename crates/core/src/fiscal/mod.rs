//! Fiscal year windows.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The Jan 1 - Dec 31 date range a budget applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FiscalYearWindow {
    /// Calendar year.
    pub year: i32,
    /// January 1 of the year.
    pub date_from: NaiveDate,
    /// December 31 of the year.
    pub date_to: NaiveDate,
}

impl FiscalYearWindow {
    /// Builds the window for a calendar year.
    ///
    /// Returns `None` for years outside chrono's supported range.
    #[must_use]
    pub fn for_year(year: i32) -> Option<Self> {
        let date_from = NaiveDate::from_ymd_opt(year, 1, 1)?;
        let date_to = NaiveDate::from_ymd_opt(year, 12, 31)?;
        Some(Self {
            year,
            date_from,
            date_to,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_bounds() {
        let window = FiscalYearWindow::for_year(2026).unwrap();
        assert_eq!(window.date_from, NaiveDate::from_ymd_opt(2026, 1, 1).unwrap());
        assert_eq!(window.date_to, NaiveDate::from_ymd_opt(2026, 12, 31).unwrap());
    }

    #[test]
    fn test_out_of_range_year_is_none() {
        assert!(FiscalYearWindow::for_year(i32::MAX).is_none());
    }
}
