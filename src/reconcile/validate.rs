//! Period validation functionality.
//!
//! This module decides whether a reconstructed [`WorkPeriod`] is plausible
//! enough to pay. A period must be closed, run strictly forward in time, and
//! have a duration within the configured bounds. Anything else flips the
//! owning day to a miss-punch while the period itself stays in the output
//! for audit display.

use serde::{Deserialize, Serialize};

use crate::config::ValidationLimits;
use crate::models::WorkPeriod;

/// The outcome of assessing a single reconstructed period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodVerdict {
    /// The period is payable.
    Valid,
    /// The period has no closing event.
    Open,
    /// The end does not fall strictly after the start.
    NonPositiveDuration,
    /// The duration is below the configured minimum.
    TooShort,
    /// The duration exceeds the configured maximum.
    TooLong,
}

/// Assesses one period against the configured duration bounds.
///
/// # Example
///
/// ```
/// use attendance_engine::config::ValidationLimits;
/// use attendance_engine::models::{ActionLabel, AttendanceEvent, WorkPeriod, WorkTypeCode};
/// use attendance_engine::reconcile::{assess_period, PeriodVerdict};
/// use chrono::{NaiveDate, NaiveTime};
///
/// let event = |time: &str, action| AttendanceEvent {
///     employee_base_id: "100".to_string(),
///     work_type: WorkTypeCode::None,
///     date: NaiveDate::from_ymd_opt(2025, 3, 3).unwrap(),
///     time: NaiveTime::parse_from_str(time, "%H:%M:%S").unwrap(),
///     location: "Main Office".to_string(),
///     action,
///     source_record_id: time.to_string(),
/// };
///
/// let limits = ValidationLimits::default();
/// let period = WorkPeriod::closed(
///     event("09:00:00", ActionLabel::CheckIn),
///     event("17:00:00", ActionLabel::CheckOut),
/// );
/// assert_eq!(assess_period(&period, &limits), PeriodVerdict::Valid);
///
/// let open = WorkPeriod::open(event("09:00:00", ActionLabel::CheckIn));
/// assert_eq!(assess_period(&open, &limits), PeriodVerdict::Open);
/// ```
pub fn assess_period(period: &WorkPeriod, limits: &ValidationLimits) -> PeriodVerdict {
    if period.is_open() {
        return PeriodVerdict::Open;
    }
    if period.duration_minutes <= 0 {
        return PeriodVerdict::NonPositiveDuration;
    }
    if period.duration_minutes < limits.min_period_minutes {
        return PeriodVerdict::TooShort;
    }
    if period.duration_minutes > limits.max_period_minutes {
        return PeriodVerdict::TooLong;
    }
    PeriodVerdict::Valid
}

/// Validates every period in place, marking each one's `valid` flag.
///
/// Returns true only when all periods passed, which is the condition for
/// the owning day to classify as complete.
pub fn validate_periods(periods: &mut [WorkPeriod], limits: &ValidationLimits) -> bool {
    let mut all_valid = true;
    for period in periods.iter_mut() {
        period.valid = assess_period(period, limits) == PeriodVerdict::Valid;
        all_valid &= period.valid;
    }
    all_valid
}
