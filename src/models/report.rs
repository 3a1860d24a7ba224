//! Report output models for the Attendance Reconciliation Engine.
//!
//! This module contains the daily, weekly and grand-total structures the
//! engine returns, along with the warnings collected while normalizing raw
//! records. Durations are integer minutes everywhere; the `*_hours` helpers
//! convert to decimal hours for rendering layers (Excel export, dashboards).

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{ReportWindow, WorkPeriod, WorkTypeCode};

/// Converts an integer minute total to decimal hours.
///
/// # Example
///
/// ```
/// use attendance_engine::models::minutes_to_hours;
/// use rust_decimal::Decimal;
///
/// assert_eq!(minutes_to_hours(480), Decimal::new(80, 1)); // 8.0
/// assert_eq!(minutes_to_hours(90), Decimal::new(15, 1)); // 1.5
/// ```
pub fn minutes_to_hours(minutes: i64) -> Decimal {
    Decimal::new(minutes, 0) / Decimal::new(60, 0)
}

/// Classification of a single day's reconciliation outcome.
///
/// `Reconciling` is transient while sessions are being paired; a finished
/// day is always `NoRecords`, `Complete` or `MissPunch`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayState {
    /// No events existed for this day.
    NoRecords,
    /// Pairing is in progress; never present in a finished report.
    Reconciling,
    /// Every reconstructed period passed validation.
    Complete,
    /// At least one period failed pairing or validation; the day pays zero.
    MissPunch,
}

/// A warning recorded while normalizing raw records.
///
/// Warnings never abort a run; they travel with the report so callers can
/// display what was skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconcileWarning {
    /// A code identifying the type of warning (e.g. "unparsable_identifier").
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The raw record the warning refers to.
    pub source_record_id: String,
}

/// Per-employee, per-calendar-date totals.
///
/// Invariant: when `is_miss_punch` is true every minute field is zero; the
/// reconstructed periods are still retained for audit display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyTotal {
    /// Rounded regular minutes (work-type `None` only).
    pub regular_minutes: i64,
    /// Rounded Special Project minutes.
    pub sp_minutes: i64,
    /// Rounded Periodic Work minutes.
    pub pw_minutes: i64,
    /// Rounded Project Team minutes.
    pub pt_minutes: i64,
    /// Number of raw events observed on this day.
    pub records_count: usize,
    /// Whether the day failed reconciliation and pays zero.
    pub is_miss_punch: bool,
    /// The day's terminal classification.
    pub state: DayState,
    /// Every reconstructed period, including open and invalid ones.
    pub periods: Vec<WorkPeriod>,
}

impl DailyTotal {
    /// Builds the zero-total entry for a day without any events.
    pub fn no_records() -> Self {
        DailyTotal {
            regular_minutes: 0,
            sp_minutes: 0,
            pw_minutes: 0,
            pt_minutes: 0,
            records_count: 0,
            is_miss_punch: false,
            state: DayState::NoRecords,
            periods: Vec::new(),
        }
    }

    /// Sum of all four buckets.
    pub fn total_minutes(&self) -> i64 {
        self.regular_minutes + self.sp_minutes + self.pw_minutes + self.pt_minutes
    }

    /// Reads the minute bucket for a given work type.
    pub fn bucket_minutes(&self, work_type: WorkTypeCode) -> i64 {
        match work_type {
            WorkTypeCode::None => self.regular_minutes,
            WorkTypeCode::Sp => self.sp_minutes,
            WorkTypeCode::Pw => self.pw_minutes,
            WorkTypeCode::Pt => self.pt_minutes,
        }
    }

    /// Regular minutes as decimal hours.
    pub fn regular_hours(&self) -> Decimal {
        minutes_to_hours(self.regular_minutes)
    }
}

/// Per-employee totals for one Monday-aligned week.
///
/// `regular_minutes + overtime_minutes == total_minutes` always holds, and
/// the special-work-type buckets never participate in the overtime split.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyTotal {
    /// The Monday this week starts on.
    pub week_start: NaiveDate,
    /// Total regular-bucket minutes worked in the week.
    pub total_minutes: i64,
    /// Minutes paid at the regular rate (capped at the weekly threshold).
    pub regular_minutes: i64,
    /// Minutes above the weekly threshold.
    pub overtime_minutes: i64,
    /// Special Project minutes accumulated this week.
    pub sp_minutes: i64,
    /// Periodic Work minutes accumulated this week.
    pub pw_minutes: i64,
    /// Project Team minutes accumulated this week.
    pub pt_minutes: i64,
}

impl WeeklyTotal {
    /// Regular minutes as decimal hours.
    pub fn regular_hours(&self) -> Decimal {
        minutes_to_hours(self.regular_minutes)
    }

    /// Overtime minutes as decimal hours.
    pub fn overtime_hours(&self) -> Decimal {
        minutes_to_hours(self.overtime_minutes)
    }
}

/// Pay-period grand totals for one employee.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrandTotals {
    /// Sum of weekly regular minutes.
    pub regular_minutes: i64,
    /// Sum of weekly overtime minutes.
    pub overtime_minutes: i64,
    /// Sum of Special Project minutes.
    pub sp_minutes: i64,
    /// Sum of Periodic Work minutes.
    pub pw_minutes: i64,
    /// Sum of Project Team minutes.
    pub pt_minutes: i64,
}

impl GrandTotals {
    /// Regular minutes as decimal hours.
    pub fn regular_hours(&self) -> Decimal {
        minutes_to_hours(self.regular_minutes)
    }

    /// Overtime minutes as decimal hours.
    pub fn overtime_hours(&self) -> Decimal {
        minutes_to_hours(self.overtime_minutes)
    }

    /// Special Project minutes as decimal hours.
    pub fn sp_hours(&self) -> Decimal {
        minutes_to_hours(self.sp_minutes)
    }

    /// Periodic Work minutes as decimal hours.
    pub fn pw_hours(&self) -> Decimal {
        minutes_to_hours(self.pw_minutes)
    }

    /// Project Team minutes as decimal hours.
    pub fn pt_hours(&self) -> Decimal {
        minutes_to_hours(self.pt_minutes)
    }
}

/// The complete hours summary for one employee across the report window.
///
/// Ownership is strictly hierarchical: the summary owns its totals, the
/// totals own their periods, the periods own their events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeHoursSummary {
    /// The numeric core of the employee identifier.
    pub employee_base_id: String,
    /// Every date in the window, in order; days without events report zeros.
    pub daily_hours: BTreeMap<NaiveDate, DailyTotal>,
    /// Weekly totals in chronological order; the last week is finalized even
    /// when the window does not end on a Sunday.
    pub weekly_hours: Vec<WeeklyTotal>,
    /// Running sums of the weekly and daily values.
    pub grand_totals: GrandTotals,
}

/// The all-employee report returned to callers.
///
/// Employees are keyed by base identifier in a sorted map so that identical
/// input always serializes to identical output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceReport {
    /// The window the report covers.
    pub window: ReportWindow,
    /// Per-employee summaries keyed by `employee_base_id`.
    pub employees: BTreeMap<String, EmployeeHoursSummary>,
    /// Warnings collected while normalizing the raw records.
    pub warnings: Vec<ReconcileWarning>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minutes_to_hours_whole() {
        assert_eq!(minutes_to_hours(480), Decimal::new(80, 1));
    }

    #[test]
    fn test_minutes_to_hours_fractional() {
        assert_eq!(minutes_to_hours(450), Decimal::new(75, 1)); // 7.5
        assert_eq!(minutes_to_hours(0), Decimal::ZERO);
    }

    #[test]
    fn test_no_records_day_is_all_zero() {
        let day = DailyTotal::no_records();
        assert_eq!(day.total_minutes(), 0);
        assert_eq!(day.records_count, 0);
        assert!(!day.is_miss_punch);
        assert_eq!(day.state, DayState::NoRecords);
        assert!(day.periods.is_empty());
    }

    #[test]
    fn test_bucket_minutes_reads_matching_field() {
        let day = DailyTotal {
            regular_minutes: 480,
            sp_minutes: 60,
            pw_minutes: 30,
            pt_minutes: 15,
            records_count: 8,
            is_miss_punch: false,
            state: DayState::Complete,
            periods: Vec::new(),
        };
        assert_eq!(day.bucket_minutes(WorkTypeCode::None), 480);
        assert_eq!(day.bucket_minutes(WorkTypeCode::Sp), 60);
        assert_eq!(day.bucket_minutes(WorkTypeCode::Pw), 30);
        assert_eq!(day.bucket_minutes(WorkTypeCode::Pt), 15);
        assert_eq!(day.total_minutes(), 585);
    }

    #[test]
    fn test_weekly_total_hours_conversion() {
        let week = WeeklyTotal {
            week_start: NaiveDate::from_ymd_opt(2025, 3, 3).unwrap(),
            total_minutes: 2520,
            regular_minutes: 2400,
            overtime_minutes: 120,
            sp_minutes: 0,
            pw_minutes: 0,
            pt_minutes: 0,
        };
        assert_eq!(week.regular_hours(), Decimal::new(40, 0));
        assert_eq!(week.overtime_hours(), Decimal::new(20, 1)); // 2.0
    }

    #[test]
    fn test_grand_totals_default_is_zero() {
        let totals = GrandTotals::default();
        assert_eq!(totals.regular_minutes, 0);
        assert_eq!(totals.overtime_minutes, 0);
        assert_eq!(totals.regular_hours(), Decimal::ZERO);
    }

    #[test]
    fn test_day_state_serialization() {
        assert_eq!(
            serde_json::to_string(&DayState::NoRecords).unwrap(),
            "\"no_records\""
        );
        assert_eq!(
            serde_json::to_string(&DayState::MissPunch).unwrap(),
            "\"miss_punch\""
        );
    }

    #[test]
    fn test_report_serialization_round_trip() {
        let window = ReportWindow::new(
            NaiveDate::from_ymd_opt(2025, 3, 3).unwrap(),
            NaiveDate::from_ymd_opt(2025, 3, 4).unwrap(),
        );
        let mut daily_hours = BTreeMap::new();
        daily_hours.insert(window.start_date, DailyTotal::no_records());

        let mut employees = BTreeMap::new();
        employees.insert(
            "100".to_string(),
            EmployeeHoursSummary {
                employee_base_id: "100".to_string(),
                daily_hours,
                weekly_hours: vec![],
                grand_totals: GrandTotals::default(),
            },
        );

        let report = AttendanceReport {
            window,
            employees,
            warnings: vec![ReconcileWarning {
                code: "unparsable_identifier".to_string(),
                message: "identifier 'ABC' has no numeric core".to_string(),
                source_record_id: "rec_0009".to_string(),
            }],
        };

        let json = serde_json::to_string(&report).unwrap();
        let deserialized: AttendanceReport = serde_json::from_str(&json).unwrap();
        assert_eq!(report, deserialized);
    }
}
