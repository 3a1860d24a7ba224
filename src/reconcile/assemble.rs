//! Report assembly functionality.
//!
//! This module composes the full pipeline: raw records are normalized,
//! grouped by employee and day, reconciled into daily and weekly totals and
//! merged into the final [`AttendanceReport`]. Each employee's computation
//! depends only on that employee's own events, so multi-employee generation
//! fans out one blocking task per employee on the tokio runtime.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AttendanceEvent, AttendanceReport, EmployeeHoursSummary, GrandTotals, RawAttendanceRecord,
    ReportWindow, WeeklyTotal,
};

use super::daily::aggregate_day;
use super::normalize::normalize_records;
use super::pairing::PairingStrategy;
use super::weekly::segment_weeks;

/// Computes the full hours summary for one employee.
///
/// Every date of the window appears in the daily map; dates without events
/// report zero totals. Weekly totals and grand totals are derived from the
/// daily map.
pub fn summarize_employee(
    employee_base_id: String,
    events: Vec<AttendanceEvent>,
    window: &ReportWindow,
    strategy: PairingStrategy,
    config: &EngineConfig,
) -> EmployeeHoursSummary {
    let mut events_by_date: BTreeMap<NaiveDate, Vec<AttendanceEvent>> = BTreeMap::new();
    for event in events {
        events_by_date.entry(event.date).or_default().push(event);
    }

    let mut daily_hours = BTreeMap::new();
    for date in window.iter_days() {
        let day_events = events_by_date.remove(&date).unwrap_or_default();
        daily_hours.insert(date, aggregate_day(day_events, strategy, config));
    }

    let weekly_hours = segment_weeks(&daily_hours, config.overtime.weekly_threshold_minutes);
    let grand_totals = sum_weeks(&weekly_hours);

    debug!(
        employee_base_id = %employee_base_id,
        regular_minutes = grand_totals.regular_minutes,
        overtime_minutes = grand_totals.overtime_minutes,
        "employee summary computed"
    );

    EmployeeHoursSummary {
        employee_base_id,
        daily_hours,
        weekly_hours,
        grand_totals,
    }
}

fn sum_weeks(weeks: &[WeeklyTotal]) -> GrandTotals {
    let mut totals = GrandTotals::default();
    for week in weeks {
        totals.regular_minutes += week.regular_minutes;
        totals.overtime_minutes += week.overtime_minutes;
        totals.sp_minutes += week.sp_minutes;
        totals.pw_minutes += week.pw_minutes;
        totals.pt_minutes += week.pt_minutes;
    }
    totals
}

/// Groups normalized events by employee base identifier, keeping only
/// events inside the window.
fn group_by_employee(
    events: Vec<AttendanceEvent>,
    window: &ReportWindow,
) -> BTreeMap<String, Vec<AttendanceEvent>> {
    let mut by_employee: BTreeMap<String, Vec<AttendanceEvent>> = BTreeMap::new();
    for event in events {
        if window.contains_date(event.date) {
            by_employee
                .entry(event.employee_base_id.clone())
                .or_default()
                .push(event);
        }
    }
    by_employee
}

/// Generates the all-employee report sequentially.
///
/// This is the pure entry point: the same immutable input always produces
/// byte-identical output. Per-record problems surface as warnings inside the
/// report; the only fatal condition is an invalid window or configuration.
///
/// # Errors
///
/// Returns [`EngineError::InvalidWindow`] when `window.start_date` is after
/// `window.end_date`, or [`EngineError::InvalidConfig`] for inconsistent
/// configuration values.
///
/// # Example
///
/// ```
/// use attendance_engine::config::EngineConfig;
/// use attendance_engine::models::{RawAttendanceRecord, ReportWindow};
/// use attendance_engine::reconcile::{generate_report, PairingStrategy};
/// use chrono::NaiveDate;
///
/// let records = vec![
///     RawAttendanceRecord {
///         record_id: "rec_0001".to_string(),
///         employee_id: "100".to_string(),
///         date: "2025-03-03".to_string(),
///         time: "09:00:00".to_string(),
///         location: "Main Office".to_string(),
///         action: Some("Check in".to_string()),
///     },
///     RawAttendanceRecord {
///         record_id: "rec_0002".to_string(),
///         employee_id: "100".to_string(),
///         date: "2025-03-03".to_string(),
///         time: "17:00:00".to_string(),
///         location: "Main Office".to_string(),
///         action: Some("Check out".to_string()),
///     },
/// ];
/// let window = ReportWindow::new(
///     NaiveDate::from_ymd_opt(2025, 3, 3).unwrap(),
///     NaiveDate::from_ymd_opt(2025, 3, 9).unwrap(),
/// );
///
/// let report = generate_report(
///     &records,
///     &window,
///     PairingStrategy::LabelBased,
///     &EngineConfig::default(),
/// ).unwrap();
///
/// let summary = &report.employees["100"];
/// assert_eq!(summary.grand_totals.regular_minutes, 480);
/// ```
pub fn generate_report(
    records: &[RawAttendanceRecord],
    window: &ReportWindow,
    strategy: PairingStrategy,
    config: &EngineConfig,
) -> EngineResult<AttendanceReport> {
    window.validate()?;
    config.validate()?;

    let batch = normalize_records(records);
    let by_employee = group_by_employee(batch.events, window);

    let mut employees = BTreeMap::new();
    for (base_id, events) in by_employee {
        let summary = summarize_employee(base_id.clone(), events, window, strategy, config);
        employees.insert(base_id, summary);
    }

    Ok(AttendanceReport {
        window: *window,
        employees,
        warnings: batch.warnings,
    })
}

/// Generates the all-employee report with per-employee fan-out.
///
/// Employee computations share no mutable state, so each one runs as its own
/// blocking task; results are collected back into the sorted report map. The
/// output is identical to [`generate_report`] on the same input.
///
/// # Errors
///
/// Returns [`EngineError::InvalidWindow`] or [`EngineError::InvalidConfig`]
/// for bad request parameters, and [`EngineError::TaskFailure`] if a worker
/// task dies.
pub async fn generate_report_parallel(
    records: Vec<RawAttendanceRecord>,
    window: ReportWindow,
    strategy: PairingStrategy,
    config: EngineConfig,
) -> EngineResult<AttendanceReport> {
    window.validate()?;
    config.validate()?;

    let correlation_id = Uuid::new_v4();
    let batch = normalize_records(&records);
    let by_employee = group_by_employee(batch.events, &window);

    info!(
        %correlation_id,
        employees = by_employee.len(),
        warnings = batch.warnings.len(),
        "fanning out report computation"
    );

    let mut handles = Vec::with_capacity(by_employee.len());
    for (base_id, events) in by_employee {
        let task_config = config.clone();
        let task_id = base_id.clone();
        let handle = tokio::task::spawn_blocking(move || {
            summarize_employee(task_id, events, &window, strategy, &task_config)
        });
        handles.push((base_id, handle));
    }

    let mut employees = BTreeMap::new();
    for (base_id, handle) in handles {
        let summary = handle.await.map_err(|e| EngineError::TaskFailure {
            employee_base_id: base_id.clone(),
            message: e.to_string(),
        })?;
        employees.insert(base_id, summary);
    }

    info!(%correlation_id, "report assembled");

    Ok(AttendanceReport {
        window,
        employees,
        warnings: batch.warnings,
    })
}
