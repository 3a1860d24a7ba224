//! Weekly overtime segmentation functionality.
//!
//! This module groups daily totals into Monday-aligned weeks and splits each
//! week's regular-bucket minutes against the overtime threshold. Special
//! work-type minutes ride along per week but never enter the threshold test.

use std::collections::BTreeMap;

use chrono::{Datelike, Duration, NaiveDate};

use crate::models::{DailyTotal, WeeklyTotal};

/// Returns the Monday that starts the week containing `date`.
///
/// # Example
///
/// ```
/// use attendance_engine::reconcile::week_start_of;
/// use chrono::NaiveDate;
///
/// // 2025-03-05 is a Wednesday
/// let wednesday = NaiveDate::from_ymd_opt(2025, 3, 5).unwrap();
/// assert_eq!(week_start_of(wednesday), NaiveDate::from_ymd_opt(2025, 3, 3).unwrap());
///
/// // A Monday is its own week start
/// let monday = NaiveDate::from_ymd_opt(2025, 3, 3).unwrap();
/// assert_eq!(week_start_of(monday), monday);
/// ```
pub fn week_start_of(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

/// Groups ordered daily totals into weekly totals with an overtime split.
///
/// A week boundary occurs whenever a day's Monday-aligned week start differs
/// from the running week start. Each finalized week satisfies
/// `regular_minutes + overtime_minutes == total_minutes` with
/// `regular_minutes` capped at the threshold. The final week is always
/// finalized even when the range does not end on a Sunday.
///
/// # Example
///
/// ```
/// use std::collections::BTreeMap;
/// use attendance_engine::models::DailyTotal;
/// use attendance_engine::reconcile::segment_weeks;
/// use chrono::NaiveDate;
///
/// let mut daily = BTreeMap::new();
/// // Six 420-minute days in one week: 2520 total
/// for day in 3..9 {
///     let mut total = DailyTotal::no_records();
///     total.regular_minutes = 420;
///     daily.insert(NaiveDate::from_ymd_opt(2025, 3, day).unwrap(), total);
/// }
///
/// let weeks = segment_weeks(&daily, 2400);
/// assert_eq!(weeks.len(), 1);
/// assert_eq!(weeks[0].regular_minutes, 2400);
/// assert_eq!(weeks[0].overtime_minutes, 120);
/// ```
pub fn segment_weeks(
    daily_hours: &BTreeMap<NaiveDate, DailyTotal>,
    threshold_minutes: i64,
) -> Vec<WeeklyTotal> {
    let mut weeks = Vec::new();
    let mut current: Option<WeekAccumulator> = None;

    for (date, day) in daily_hours {
        let week_start = week_start_of(*date);
        let boundary = !matches!(&current, Some(acc) if acc.week_start == week_start);
        if boundary {
            if let Some(acc) = current.take() {
                weeks.push(acc.finalize(threshold_minutes));
            }
            current = Some(WeekAccumulator::new(week_start));
        }
        if let Some(acc) = current.as_mut() {
            acc.add(day);
        }
    }

    if let Some(acc) = current {
        weeks.push(acc.finalize(threshold_minutes));
    }

    weeks
}

struct WeekAccumulator {
    week_start: NaiveDate,
    regular_minutes: i64,
    sp_minutes: i64,
    pw_minutes: i64,
    pt_minutes: i64,
}

impl WeekAccumulator {
    fn new(week_start: NaiveDate) -> Self {
        WeekAccumulator {
            week_start,
            regular_minutes: 0,
            sp_minutes: 0,
            pw_minutes: 0,
            pt_minutes: 0,
        }
    }

    fn add(&mut self, day: &DailyTotal) {
        self.regular_minutes += day.regular_minutes;
        self.sp_minutes += day.sp_minutes;
        self.pw_minutes += day.pw_minutes;
        self.pt_minutes += day.pt_minutes;
    }

    fn finalize(&self, threshold_minutes: i64) -> WeeklyTotal {
        let total = self.regular_minutes;
        WeeklyTotal {
            week_start: self.week_start,
            total_minutes: total,
            regular_minutes: total.min(threshold_minutes),
            overtime_minutes: (total - threshold_minutes).max(0),
            sp_minutes: self.sp_minutes,
            pw_minutes: self.pw_minutes,
            pt_minutes: self.pt_minutes,
        }
    }
}
