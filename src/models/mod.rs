//! Core data models for the Attendance Reconciliation Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod event;
mod report;
mod report_window;
mod work_period;

pub use event::{ActionLabel, AttendanceEvent, RawAttendanceRecord, WorkTypeCode};
pub use report::{
    AttendanceReport, DailyTotal, DayState, EmployeeHoursSummary, GrandTotals, ReconcileWarning,
    WeeklyTotal, minutes_to_hours,
};
pub use report_window::ReportWindow;
pub use work_period::WorkPeriod;
