//! Work period model.
//!
//! A [`WorkPeriod`] is a reconstructed work session: a paired check-in and
//! check-out, or an open period when pairing failed. Open and invalid periods
//! contribute zero payable minutes but are retained for audit display.

use serde::{Deserialize, Serialize};

use super::AttendanceEvent;

/// A reconstructed work session for one employee.
///
/// The `start` event anchors the period. For an orphaned check-out (a
/// check-out with no preceding check-in) the orphan event itself is stored
/// as the anchor with no `end`, so the punch still appears in audit output.
///
/// # Example
///
/// ```
/// use attendance_engine::models::{ActionLabel, AttendanceEvent, WorkPeriod, WorkTypeCode};
/// use chrono::{NaiveDate, NaiveTime};
///
/// let start = AttendanceEvent {
///     employee_base_id: "100".to_string(),
///     work_type: WorkTypeCode::None,
///     date: NaiveDate::from_ymd_opt(2025, 3, 3).unwrap(),
///     time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
///     location: "Main Office".to_string(),
///     action: ActionLabel::CheckIn,
///     source_record_id: "rec_0001".to_string(),
/// };
/// let end = AttendanceEvent {
///     time: NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
///     action: ActionLabel::CheckOut,
///     source_record_id: "rec_0002".to_string(),
///     ..start.clone()
/// };
///
/// let period = WorkPeriod::closed(start, end);
/// assert_eq!(period.duration_minutes, 480);
/// assert!(!period.is_open());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkPeriod {
    /// The event that anchors the period (normally the check-in).
    pub start: AttendanceEvent,
    /// The closing check-out, absent when the period could not be paired.
    pub end: Option<AttendanceEvent>,
    /// Raw duration in minutes; zero for open periods.
    pub duration_minutes: i64,
    /// Whether the period passed validation. Set by the period validator;
    /// freshly reconstructed periods start out unvalidated.
    pub valid: bool,
}

impl WorkPeriod {
    /// Builds a closed period from a start and end event.
    ///
    /// The duration is the signed minute difference between the two
    /// timestamps; validation decides later whether it is acceptable.
    pub fn closed(start: AttendanceEvent, end: AttendanceEvent) -> Self {
        let duration_minutes = (end.datetime() - start.datetime()).num_minutes();
        WorkPeriod {
            start,
            end: Some(end),
            duration_minutes,
            valid: false,
        }
    }

    /// Builds an open period anchored at a single unpairable event.
    pub fn open(anchor: AttendanceEvent) -> Self {
        WorkPeriod {
            start: anchor,
            end: None,
            duration_minutes: 0,
            valid: false,
        }
    }

    /// Returns true if the period has no closing event.
    pub fn is_open(&self) -> bool {
        self.end.is_none()
    }
}
