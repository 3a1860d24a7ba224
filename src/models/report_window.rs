//! Report window model.
//!
//! This module contains the [`ReportWindow`] type that defines the date range
//! a report request covers.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// The inclusive date range a report covers.
///
/// A window with `start_date > end_date` is the engine's only fatal input
/// condition; everything else degrades to per-record warnings or miss-punch
/// days.
///
/// # Example
///
/// ```
/// use attendance_engine::models::ReportWindow;
/// use chrono::NaiveDate;
///
/// let window = ReportWindow {
///     start_date: NaiveDate::from_ymd_opt(2025, 3, 3).unwrap(),
///     end_date: NaiveDate::from_ymd_opt(2025, 3, 16).unwrap(),
/// };
///
/// assert!(window.validate().is_ok());
/// assert!(window.contains_date(NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()));
/// assert_eq!(window.iter_days().count(), 14);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportWindow {
    /// The start date of the window (inclusive).
    pub start_date: NaiveDate,
    /// The end date of the window (inclusive).
    pub end_date: NaiveDate,
}

impl ReportWindow {
    /// Creates a window covering `[start_date, end_date]`.
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        ReportWindow {
            start_date,
            end_date,
        }
    }

    /// Checks that the window is well-formed.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidWindow`] when the start date is after
    /// the end date.
    pub fn validate(&self) -> EngineResult<()> {
        if self.start_date > self.end_date {
            return Err(EngineError::InvalidWindow {
                start_date: self.start_date,
                end_date: self.end_date,
            });
        }
        Ok(())
    }

    /// Checks if a given date falls within this window (inclusive).
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }

    /// Iterates every calendar date in the window, in order.
    ///
    /// Used by the report assembler to populate zero-total entries for days
    /// without any events. Yields nothing for an invalid window.
    pub fn iter_days(&self) -> impl Iterator<Item = NaiveDate> + use<> {
        let start = self.start_date;
        let end = self.end_date;
        std::iter::successors(Some(start), move |d| d.checked_add_days(Days::new(1)))
            .take_while(move |d| *d <= end)
    }
}
