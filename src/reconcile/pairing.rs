//! Session reconstruction functionality.
//!
//! This module pairs a single employee's punches for one calendar day into
//! [`WorkPeriod`]s. Upstream data sources disagree on whether punch labels
//! are trustworthy, so two interchangeable strategies are exposed behind one
//! entry point and the caller selects one.
//!
//! Events that cannot be paired become open periods; the aggregator turns any
//! open or invalid period into a miss-punch day. Nothing is discarded.

use serde::{Deserialize, Serialize};

use crate::models::{AttendanceEvent, WorkPeriod, WorkTypeCode};

/// Named pairing policy for session reconstruction.
///
/// # Example
///
/// ```
/// use attendance_engine::reconcile::PairingStrategy;
///
/// assert_eq!(PairingStrategy::default(), PairingStrategy::LabelBased);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PairingStrategy {
    /// Treat events as alternating start/end regardless of label. An odd
    /// event count leaves the final punch unpaired.
    Positional,
    /// Pair each check-in with the nearest later unconsumed check-out,
    /// tolerating interleaved punches. This is the default.
    #[default]
    LabelBased,
}

/// Reconstructs work periods from one group of time-sorted events.
///
/// A group is all of one employee's events for one day, already subdivided
/// by work type (and optionally location) by [`reconstruct_day`]. Events
/// must be sorted chronologically.
///
/// If the group holds two or more events that all carry the same effective
/// label, every event becomes an open period: a day of nothing but check-ins
/// (or nothing but check-outs) must yield zero hours rather than a
/// first-to-last span that double-counts a forgotten punch.
///
/// # Example
///
/// ```
/// use attendance_engine::models::{ActionLabel, AttendanceEvent, WorkTypeCode};
/// use attendance_engine::reconcile::{reconstruct_sessions, PairingStrategy};
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
/// let events = vec![
///     event("09:00:00", ActionLabel::CheckIn),
///     event("17:00:00", ActionLabel::CheckOut),
/// ];
///
/// let periods = reconstruct_sessions(&events, PairingStrategy::LabelBased);
/// assert_eq!(periods.len(), 1);
/// assert_eq!(periods[0].duration_minutes, 480);
/// ```
pub fn reconstruct_sessions(
    events: &[AttendanceEvent],
    strategy: PairingStrategy,
) -> Vec<WorkPeriod> {
    if events.is_empty() {
        return Vec::new();
    }

    if all_same_label(events) {
        return events.iter().cloned().map(WorkPeriod::open).collect();
    }

    match strategy {
        PairingStrategy::Positional => pair_by_position(events),
        PairingStrategy::LabelBased => pair_by_label(events),
    }
}

/// Reconstructs all work periods for one employee on one calendar day.
///
/// Events are sorted chronologically, partitioned by work-type code (a
/// period never straddles two work types), optionally subdivided into
/// contiguous same-location runs, and each group is paired with the selected
/// strategy. The returned periods are ordered by start time.
pub fn reconstruct_day(
    mut events: Vec<AttendanceEvent>,
    strategy: PairingStrategy,
    split_by_location: bool,
) -> Vec<WorkPeriod> {
    events.sort_by(|a, b| {
        a.datetime()
            .cmp(&b.datetime())
            .then_with(|| a.source_record_id.cmp(&b.source_record_id))
    });

    let mut periods = Vec::new();
    for work_type in [
        WorkTypeCode::None,
        WorkTypeCode::Sp,
        WorkTypeCode::Pw,
        WorkTypeCode::Pt,
    ] {
        let group: Vec<AttendanceEvent> = events
            .iter()
            .filter(|e| e.work_type == work_type)
            .cloned()
            .collect();
        if group.is_empty() {
            continue;
        }

        if split_by_location {
            for run in location_runs(&group) {
                periods.extend(reconstruct_sessions(run, strategy));
            }
        } else {
            periods.extend(reconstruct_sessions(&group, strategy));
        }
    }

    periods.sort_by(|a, b| {
        a.start
            .datetime()
            .cmp(&b.start.datetime())
            .then_with(|| a.start.source_record_id.cmp(&b.start.source_record_id))
    });
    periods
}

/// Splits a sorted event list into contiguous same-location runs.
fn location_runs(events: &[AttendanceEvent]) -> Vec<&[AttendanceEvent]> {
    let mut runs = Vec::new();
    let mut run_start = 0;
    for i in 1..events.len() {
        if events[i].location != events[run_start].location {
            runs.push(&events[run_start..i]);
            run_start = i;
        }
    }
    runs.push(&events[run_start..]);
    runs
}

fn all_same_label(events: &[AttendanceEvent]) -> bool {
    events.len() >= 2
        && events
            .iter()
            .all(|e| e.action.is_check_out() == events[0].action.is_check_out())
}

/// Positional-parity pairing: event 1 starts, event 2 ends, event 3 starts...
fn pair_by_position(events: &[AttendanceEvent]) -> Vec<WorkPeriod> {
    let mut periods = Vec::new();
    let mut chunks = events.chunks_exact(2);
    for chunk in chunks.by_ref() {
        periods.push(WorkPeriod::closed(chunk[0].clone(), chunk[1].clone()));
    }
    if let [leftover] = chunks.remainder() {
        periods.push(WorkPeriod::open(leftover.clone()));
    }
    periods
}

/// Label-based pairing: greedy chronological matching.
///
/// A check-out consumes the nearest strictly-earlier unconsumed check-in;
/// a check-out with no such check-in is an orphan, and check-ins left open
/// at the end of the group stay open.
fn pair_by_label(events: &[AttendanceEvent]) -> Vec<WorkPeriod> {
    let mut periods = Vec::new();
    let mut open_check_ins: Vec<AttendanceEvent> = Vec::new();

    for event in events {
        if event.action.is_check_out() {
            let matched = open_check_ins
                .iter()
                .rposition(|check_in| check_in.datetime() < event.datetime());
            match matched {
                Some(index) => {
                    let check_in = open_check_ins.remove(index);
                    periods.push(WorkPeriod::closed(check_in, event.clone()));
                }
                None => periods.push(WorkPeriod::open(event.clone())),
            }
        } else {
            open_check_ins.push(event.clone());
        }
    }

    periods.extend(open_check_ins.into_iter().map(WorkPeriod::open));
    periods
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ActionLabel;
    use chrono::{NaiveDate, NaiveTime};

    fn make_event(time: &str, action: ActionLabel) -> AttendanceEvent {
        make_event_at("Main Office", WorkTypeCode::None, time, action)
    }

    fn make_event_at(
        location: &str,
        work_type: WorkTypeCode,
        time: &str,
        action: ActionLabel,
    ) -> AttendanceEvent {
        AttendanceEvent {
            employee_base_id: "100".to_string(),
            work_type,
            date: NaiveDate::from_ymd_opt(2025, 3, 3).unwrap(),
            time: NaiveTime::parse_from_str(time, "%H:%M:%S").unwrap(),
            location: location.to_string(),
            action,
            source_record_id: format!("rec_{location}_{time}"),
        }
    }

    #[test]
    fn test_single_pair_both_strategies_agree() {
        let events = vec![
            make_event("09:00:00", ActionLabel::CheckIn),
            make_event("17:00:00", ActionLabel::CheckOut),
        ];
        for strategy in [PairingStrategy::Positional, PairingStrategy::LabelBased] {
            let periods = reconstruct_sessions(&events, strategy);
            assert_eq!(periods.len(), 1, "strategy {strategy:?}");
            assert_eq!(periods[0].duration_minutes, 480);
            assert!(!periods[0].is_open());
        }
    }

    #[test]
    fn test_alternating_two_pairs_agree() {
        let events = vec![
            make_event("09:00:00", ActionLabel::CheckIn),
            make_event("12:00:00", ActionLabel::CheckOut),
            make_event("13:00:00", ActionLabel::CheckIn),
            make_event("17:00:00", ActionLabel::CheckOut),
        ];
        for strategy in [PairingStrategy::Positional, PairingStrategy::LabelBased] {
            let periods = reconstruct_sessions(&events, strategy);
            let total: i64 = periods.iter().map(|p| p.duration_minutes).sum();
            assert_eq!(periods.len(), 2, "strategy {strategy:?}");
            assert_eq!(total, 420);
        }
    }

    #[test]
    fn test_positional_odd_count_leaves_open_period() {
        let events = vec![
            make_event("09:00:00", ActionLabel::CheckIn),
            make_event("12:00:00", ActionLabel::CheckOut),
            make_event("13:00:00", ActionLabel::CheckIn),
        ];
        let periods = reconstruct_sessions(&events, PairingStrategy::Positional);
        assert_eq!(periods.len(), 2);
        assert!(!periods[0].is_open());
        assert!(periods[1].is_open());
    }

    #[test]
    fn test_positional_ignores_labels() {
        // Labels say out-in, positions say start-end
        let events = vec![
            make_event("09:00:00", ActionLabel::CheckOut),
            make_event("17:00:00", ActionLabel::CheckIn),
        ];
        let periods = reconstruct_sessions(&events, PairingStrategy::Positional);
        assert_eq!(periods.len(), 1);
        assert_eq!(periods[0].duration_minutes, 480);
    }

    #[test]
    fn test_label_based_unpaired_check_in_stays_open() {
        let events = vec![
            make_event("09:00:00", ActionLabel::CheckIn),
            make_event("12:00:00", ActionLabel::CheckOut),
            make_event("13:00:00", ActionLabel::CheckIn),
        ];
        let periods = reconstruct_sessions(&events, PairingStrategy::LabelBased);
        assert_eq!(periods.len(), 2);
        assert_eq!(periods[0].duration_minutes, 180);
        assert!(periods[1].is_open());
        assert_eq!(
            periods[1].start.time,
            NaiveTime::from_hms_opt(13, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_label_based_orphan_check_out_stays_open() {
        let events = vec![
            make_event("08:00:00", ActionLabel::CheckOut),
            make_event("09:00:00", ActionLabel::CheckIn),
            make_event("17:00:00", ActionLabel::CheckOut),
        ];
        let periods = reconstruct_sessions(&events, PairingStrategy::LabelBased);
        assert_eq!(periods.len(), 2);
        assert!(periods[0].is_open());
        assert_eq!(
            periods[0].start.time,
            NaiveTime::from_hms_opt(8, 0, 0).unwrap()
        );
        assert_eq!(periods[1].duration_minutes, 480);
    }

    #[test]
    fn test_label_based_nested_check_ins_use_nearest() {
        // Two check-ins before the first check-out: nearest-in-time wins.
        let events = vec![
            make_event("09:00:00", ActionLabel::CheckIn),
            make_event("10:00:00", ActionLabel::CheckIn),
            make_event("12:00:00", ActionLabel::CheckOut),
            make_event("17:00:00", ActionLabel::CheckOut),
        ];
        let periods = reconstruct_sessions(&events, PairingStrategy::LabelBased);
        assert_eq!(periods.len(), 2);
        // 10:00 pairs with 12:00, 09:00 pairs with 17:00
        let durations: Vec<i64> = periods.iter().map(|p| p.duration_minutes).collect();
        assert!(durations.contains(&120));
        assert!(durations.contains(&480));
    }

    #[test]
    fn test_label_based_treats_unknown_as_check_in() {
        let events = vec![
            make_event("09:00:00", ActionLabel::Unknown),
            make_event("17:00:00", ActionLabel::CheckOut),
        ];
        let periods = reconstruct_sessions(&events, PairingStrategy::LabelBased);
        assert_eq!(periods.len(), 1);
        assert_eq!(periods[0].duration_minutes, 480);
    }

    #[test]
    fn test_all_check_ins_yield_only_open_periods() {
        let events = vec![
            make_event("09:00:00", ActionLabel::CheckIn),
            make_event("12:00:00", ActionLabel::CheckIn),
            make_event("17:00:00", ActionLabel::CheckIn),
        ];
        for strategy in [PairingStrategy::Positional, PairingStrategy::LabelBased] {
            let periods = reconstruct_sessions(&events, strategy);
            assert_eq!(periods.len(), 3, "strategy {strategy:?}");
            assert!(periods.iter().all(WorkPeriod::is_open));
        }
    }

    #[test]
    fn test_all_check_outs_yield_only_open_periods() {
        // A naive first-to-last span here would be 8 nonzero hours.
        let events = vec![
            make_event("09:00:00", ActionLabel::CheckOut),
            make_event("17:00:00", ActionLabel::CheckOut),
        ];
        for strategy in [PairingStrategy::Positional, PairingStrategy::LabelBased] {
            let periods = reconstruct_sessions(&events, strategy);
            assert_eq!(periods.len(), 2, "strategy {strategy:?}");
            assert!(periods.iter().all(WorkPeriod::is_open));
        }
    }

    #[test]
    fn test_single_event_stays_open() {
        let events = vec![make_event("09:00:00", ActionLabel::CheckIn)];
        for strategy in [PairingStrategy::Positional, PairingStrategy::LabelBased] {
            let periods = reconstruct_sessions(&events, strategy);
            assert_eq!(periods.len(), 1);
            assert!(periods[0].is_open());
        }
    }

    #[test]
    fn test_check_out_at_same_instant_does_not_pair() {
        let events = vec![
            make_event("09:00:00", ActionLabel::CheckIn),
            make_event("09:00:00", ActionLabel::CheckOut),
        ];
        let periods = reconstruct_sessions(&events, PairingStrategy::LabelBased);
        assert_eq!(periods.len(), 2);
        assert!(periods.iter().all(WorkPeriod::is_open));
    }

    #[test]
    fn test_reconstruct_day_sorts_unordered_events() {
        let events = vec![
            make_event("17:00:00", ActionLabel::CheckOut),
            make_event("09:00:00", ActionLabel::CheckIn),
        ];
        let periods = reconstruct_day(events, PairingStrategy::LabelBased, false);
        assert_eq!(periods.len(), 1);
        assert_eq!(periods[0].duration_minutes, 480);
    }

    #[test]
    fn test_reconstruct_day_partitions_by_work_type() {
        let events = vec![
            make_event_at("Main Office", WorkTypeCode::None, "09:00:00", ActionLabel::CheckIn),
            make_event_at("Main Office", WorkTypeCode::Sp, "10:00:00", ActionLabel::CheckIn),
            make_event_at("Main Office", WorkTypeCode::Sp, "12:00:00", ActionLabel::CheckOut),
            make_event_at("Main Office", WorkTypeCode::None, "17:00:00", ActionLabel::CheckOut),
        ];
        let periods = reconstruct_day(events, PairingStrategy::LabelBased, false);
        assert_eq!(periods.len(), 2);
        // Regular period spans 09:00-17:00, SP period spans 10:00-12:00
        assert_eq!(periods[0].start.work_type, WorkTypeCode::None);
        assert_eq!(periods[0].duration_minutes, 480);
        assert_eq!(periods[1].start.work_type, WorkTypeCode::Sp);
        assert_eq!(periods[1].duration_minutes, 120);
    }

    #[test]
    fn test_reconstruct_day_splits_location_runs() {
        let events = vec![
            make_event_at("Site A", WorkTypeCode::None, "09:00:00", ActionLabel::CheckIn),
            make_event_at("Site A", WorkTypeCode::None, "12:00:00", ActionLabel::CheckOut),
            make_event_at("Site B", WorkTypeCode::None, "13:00:00", ActionLabel::CheckIn),
            make_event_at("Site B", WorkTypeCode::None, "17:00:00", ActionLabel::CheckOut),
        ];
        let periods = reconstruct_day(events, PairingStrategy::Positional, true);
        assert_eq!(periods.len(), 2);
        assert_eq!(periods[0].duration_minutes, 180);
        assert_eq!(periods[1].duration_minutes, 240);
    }

    #[test]
    fn test_reconstruct_day_location_split_exposes_incomplete_runs() {
        // One check-in at each site: with location splitting each run is a
        // lone punch, so both stay open.
        let events = vec![
            make_event_at("Site A", WorkTypeCode::None, "09:00:00", ActionLabel::CheckIn),
            make_event_at("Site B", WorkTypeCode::None, "17:00:00", ActionLabel::CheckIn),
        ];
        let periods = reconstruct_day(events, PairingStrategy::Positional, true);
        assert_eq!(periods.len(), 2);
        assert!(periods.iter().all(WorkPeriod::is_open));
    }

    #[test]
    fn test_reconstruct_day_empty_input() {
        let periods = reconstruct_day(Vec::new(), PairingStrategy::LabelBased, false);
        assert!(periods.is_empty());
    }
}
