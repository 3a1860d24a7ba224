//! Attendance event model and related types.
//!
//! This module defines the raw record consumed from the persistence layer
//! and the canonical [`AttendanceEvent`] produced by the normalizer. All
//! downstream reconciliation works exclusively on [`AttendanceEvent`] values,
//! so the engine never depends on a specific storage schema.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// Work-type classification embedded in an employee identifier.
///
/// Identifiers like `3937SP` or `PW3937` route their hours to a dedicated
/// non-overtime bucket. A plain numeric identifier maps to [`WorkTypeCode::None`].
///
/// # Example
///
/// ```
/// use attendance_engine::models::WorkTypeCode;
///
/// assert_eq!(WorkTypeCode::default(), WorkTypeCode::None);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkTypeCode {
    /// Regular work; hours count toward the weekly overtime threshold.
    #[default]
    None,
    /// Special Project hours (never overtime-eligible).
    Sp,
    /// Periodic Work hours (never overtime-eligible).
    Pw,
    /// Project Team hours (never overtime-eligible).
    Pt,
}

impl WorkTypeCode {
    /// Parses a two-letter work-type code, case-insensitively.
    ///
    /// Returns `None` for anything that is not exactly `SP`, `PW` or `PT`.
    ///
    /// # Example
    ///
    /// ```
    /// use attendance_engine::models::WorkTypeCode;
    ///
    /// assert_eq!(WorkTypeCode::from_code("sp"), Some(WorkTypeCode::Sp));
    /// assert_eq!(WorkTypeCode::from_code("PT"), Some(WorkTypeCode::Pt));
    /// assert_eq!(WorkTypeCode::from_code("XX"), None);
    /// ```
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_ascii_uppercase().as_str() {
            "SP" => Some(WorkTypeCode::Sp),
            "PW" => Some(WorkTypeCode::Pw),
            "PT" => Some(WorkTypeCode::Pt),
            _ => None,
        }
    }
}

/// The punch direction derived from a record's free-text description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionLabel {
    /// The employee clocked in.
    CheckIn,
    /// The employee clocked out.
    CheckOut,
    /// No description was supplied; the label strategy treats this as a check-in.
    Unknown,
}

impl ActionLabel {
    /// Returns true if this label counts as a check-out.
    pub fn is_check_out(self) -> bool {
        self == ActionLabel::CheckOut
    }

    /// Returns true if this label counts as a check-in.
    ///
    /// [`ActionLabel::Unknown`] is biased toward check-in so that a lone
    /// undescribed punch opens a session rather than orphaning one.
    pub fn is_check_in(self) -> bool {
        !self.is_check_out()
    }
}

/// One raw attendance record as exposed by the persistence/query layer.
///
/// Date and time arrive as text because upstream import files carry them as
/// text; the normalizer owns the parsing and drops (with a warning) any
/// record it cannot interpret.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawAttendanceRecord {
    /// Opaque reference back to the stored record, for traceability.
    pub record_id: String,
    /// The employee identifier as recorded, possibly carrying a work-type code.
    pub employee_id: String,
    /// The calendar date of the punch, `YYYY-MM-DD`.
    pub date: String,
    /// The time of day of the punch, `HH:MM:SS` or `HH:MM`.
    pub time: String,
    /// The name of the location where the punch was made.
    pub location: String,
    /// Optional free-text action description (e.g. "Check out - front gate").
    #[serde(default)]
    pub action: Option<String>,
}

/// A single normalized punch.
///
/// Immutable once constructed; the normalizer is the only producer.
///
/// # Example
///
/// ```
/// use attendance_engine::models::{ActionLabel, AttendanceEvent, WorkTypeCode};
/// use chrono::{NaiveDate, NaiveTime};
///
/// let event = AttendanceEvent {
///     employee_base_id: "3937".to_string(),
///     work_type: WorkTypeCode::Sp,
///     date: NaiveDate::from_ymd_opt(2025, 3, 3).unwrap(),
///     time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
///     location: "Front Gate".to_string(),
///     action: ActionLabel::CheckIn,
///     source_record_id: "rec_0001".to_string(),
/// };
/// assert_eq!(event.datetime().to_string(), "2025-03-03 09:00:00");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceEvent {
    /// The numeric core of the employee identifier.
    pub employee_base_id: String,
    /// The work-type code carried by the identifier, if any.
    pub work_type: WorkTypeCode,
    /// The calendar date of the punch.
    pub date: NaiveDate,
    /// The time of day of the punch.
    pub time: NaiveTime,
    /// The name of the location where the punch was made.
    pub location: String,
    /// The punch direction derived from the record's description.
    pub action: ActionLabel,
    /// Opaque reference back to the raw record, for traceability.
    pub source_record_id: String,
}

impl AttendanceEvent {
    /// Combines the event's date and time into a single timestamp.
    pub fn datetime(&self) -> NaiveDateTime {
        self.date.and_time(self.time)
    }
}
