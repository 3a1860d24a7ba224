//! Daily aggregation functionality.
//!
//! This module turns one employee's events for one calendar day into a
//! [`DailyTotal`]: sessions are reconstructed, validated, summed per
//! work-type bucket and rounded to the configured increment. Rounding is
//! applied once per bucket per day, not per period, so rounding error never
//! compounds across sessions.

use crate::config::EngineConfig;
use crate::models::{AttendanceEvent, DailyTotal, DayState, WorkTypeCode};

use super::pairing::{PairingStrategy, reconstruct_day};
use super::validate::validate_periods;

/// Rounds a minute total to the nearest multiple of `increment`, half-up.
///
/// # Example
///
/// ```
/// use attendance_engine::reconcile::round_to_increment;
///
/// assert_eq!(round_to_increment(484, 15), 480);
/// assert_eq!(round_to_increment(488, 15), 495);
/// assert_eq!(round_to_increment(480, 15), 480);
/// assert_eq!(round_to_increment(0, 15), 0);
/// ```
pub fn round_to_increment(minutes: i64, increment: i64) -> i64 {
    debug_assert!(increment > 0);
    (2 * minutes + increment) / (2 * increment) * increment
}

/// Aggregates one employee's events for one calendar day.
///
/// The day classifies as [`DayState::Complete`] only when every
/// reconstructed period validates; a single open or implausible period
/// zeroes all four buckets and marks the day [`DayState::MissPunch`], with
/// the periods retained for audit display. A day without events reports
/// [`DayState::NoRecords`].
///
/// # Example
///
/// ```
/// use attendance_engine::config::EngineConfig;
/// use attendance_engine::models::{ActionLabel, AttendanceEvent, DayState, WorkTypeCode};
/// use attendance_engine::reconcile::{aggregate_day, PairingStrategy};
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
/// let config = EngineConfig::default();
/// let day = aggregate_day(
///     vec![
///         event("09:00:00", ActionLabel::CheckIn),
///         event("17:00:00", ActionLabel::CheckOut),
///     ],
///     PairingStrategy::LabelBased,
///     &config,
/// );
///
/// assert_eq!(day.regular_minutes, 480);
/// assert_eq!(day.state, DayState::Complete);
/// assert!(!day.is_miss_punch);
/// ```
pub fn aggregate_day(
    events: Vec<AttendanceEvent>,
    strategy: PairingStrategy,
    config: &EngineConfig,
) -> DailyTotal {
    if events.is_empty() {
        return DailyTotal::no_records();
    }

    let records_count = events.len();

    let mut periods = reconstruct_day(events, strategy, config.pairing.split_by_location);
    let all_valid = validate_periods(&mut periods, &config.validation);

    if !all_valid {
        // Miss-punch days pay zero; no rounding is applied.
        return DailyTotal {
            regular_minutes: 0,
            sp_minutes: 0,
            pw_minutes: 0,
            pt_minutes: 0,
            records_count,
            is_miss_punch: true,
            state: DayState::MissPunch,
            periods,
        };
    }

    let mut raw = [0i64; 4];
    for period in &periods {
        let bucket = match period.start.work_type {
            WorkTypeCode::None => 0,
            WorkTypeCode::Sp => 1,
            WorkTypeCode::Pw => 2,
            WorkTypeCode::Pt => 3,
        };
        raw[bucket] += period.duration_minutes;
    }

    let increment = config.rounding.increment_minutes;
    DailyTotal {
        regular_minutes: round_to_increment(raw[0], increment),
        sp_minutes: round_to_increment(raw[1], increment),
        pw_minutes: round_to_increment(raw[2], increment),
        pt_minutes: round_to_increment(raw[3], increment),
        records_count,
        is_miss_punch: false,
        state: DayState::Complete,
        periods,
    }
}
