//! Event normalization functionality.
//!
//! This module converts raw attendance records into canonical
//! [`AttendanceEvent`] values. It owns the two lossy conversions in the
//! pipeline: decoding the work-type code embedded in the employee identifier,
//! and deriving the punch direction from the free-text description. A record
//! that cannot be normalized is dropped with a warning; it never aborts the
//! run.

use chrono::{NaiveDate, NaiveTime};
use tracing::warn;

use crate::models::{
    ActionLabel, AttendanceEvent, RawAttendanceRecord, ReconcileWarning, WorkTypeCode,
};

/// An employee identifier decomposed into its numeric core and work-type code.
///
/// Produced exactly once by the normalizer; downstream stages never re-parse
/// identifier strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedIdentifier {
    /// The numeric core of the identifier.
    pub base_id: String,
    /// The embedded work-type code, if any.
    pub work_type: WorkTypeCode,
}

/// The outcome of normalizing a batch of raw records.
#[derive(Debug, Clone, Default)]
pub struct NormalizedBatch {
    /// Successfully normalized events, in input order.
    pub events: Vec<AttendanceEvent>,
    /// One warning per dropped record, in input order.
    pub warnings: Vec<ReconcileWarning>,
}

/// Decomposes an employee identifier into base ID and work-type code.
///
/// The accepted shape is a run of digits optionally preceded *or* followed
/// (not both) by one of the literal codes `SP`, `PW`, `PT`, case-insensitive,
/// with no separator: `3937`, `3937SP`, `pw3937`. Any other alphabetic
/// content makes the identifier unparsable.
///
/// # Example
///
/// ```
/// use attendance_engine::reconcile::parse_employee_identifier;
/// use attendance_engine::models::WorkTypeCode;
///
/// let parsed = parse_employee_identifier("3937SP").unwrap();
/// assert_eq!(parsed.base_id, "3937");
/// assert_eq!(parsed.work_type, WorkTypeCode::Sp);
///
/// assert!(parse_employee_identifier("3937XY").is_none());
/// ```
pub fn parse_employee_identifier(raw: &str) -> Option<ParsedIdentifier> {
    let trimmed = raw.trim();
    let first_digit = trimmed.find(|c: char| c.is_ascii_digit())?;
    let last_digit = trimmed.rfind(|c: char| c.is_ascii_digit())?;

    let (prefix, rest) = trimmed.split_at(first_digit);
    let (digits, suffix) = rest.split_at(last_digit + 1 - first_digit);

    // "12A3" style identifiers have a non-digit inside the numeric core
    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    let work_type = match (prefix.is_empty(), suffix.is_empty()) {
        (true, true) => WorkTypeCode::None,
        (false, true) => WorkTypeCode::from_code(prefix)?,
        (true, false) => WorkTypeCode::from_code(suffix)?,
        (false, false) => return None,
    };

    Some(ParsedIdentifier {
        base_id: digits.to_string(),
        work_type,
    })
}

/// Derives the punch direction from a record's free-text description.
///
/// A description containing "out" (case-insensitive) is a check-out; any
/// other non-blank description is a check-in. A missing or blank description
/// maps to [`ActionLabel::Unknown`], which the label strategy treats as a
/// check-in.
///
/// # Example
///
/// ```
/// use attendance_engine::reconcile::classify_action;
/// use attendance_engine::models::ActionLabel;
///
/// assert_eq!(classify_action(Some("Check OUT - front gate")), ActionLabel::CheckOut);
/// assert_eq!(classify_action(Some("arrival")), ActionLabel::CheckIn);
/// assert_eq!(classify_action(None), ActionLabel::Unknown);
/// ```
pub fn classify_action(description: Option<&str>) -> ActionLabel {
    match description {
        Some(text) if text.trim().is_empty() => ActionLabel::Unknown,
        Some(text) => {
            if text.to_lowercase().contains("out") {
                ActionLabel::CheckOut
            } else {
                ActionLabel::CheckIn
            }
        }
        None => ActionLabel::Unknown,
    }
}

fn parse_event_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}

fn parse_event_time(raw: &str) -> Option<NaiveTime> {
    let trimmed = raw.trim();
    NaiveTime::parse_from_str(trimmed, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M"))
        .ok()
}

/// Normalizes a batch of raw records into canonical events.
///
/// Records with an unparsable identifier, date or time are dropped; each
/// drop is logged and recorded as a [`ReconcileWarning`] so callers can
/// surface what was skipped.
///
/// # Example
///
/// ```
/// use attendance_engine::reconcile::normalize_records;
/// use attendance_engine::models::RawAttendanceRecord;
///
/// let records = vec![RawAttendanceRecord {
///     record_id: "rec_0001".to_string(),
///     employee_id: "3937".to_string(),
///     date: "2025-03-03".to_string(),
///     time: "09:00:00".to_string(),
///     location: "Main Office".to_string(),
///     action: Some("Check in".to_string()),
/// }];
///
/// let batch = normalize_records(&records);
/// assert_eq!(batch.events.len(), 1);
/// assert!(batch.warnings.is_empty());
/// ```
pub fn normalize_records(records: &[RawAttendanceRecord]) -> NormalizedBatch {
    let mut batch = NormalizedBatch::default();

    for record in records {
        let Some(identifier) = parse_employee_identifier(&record.employee_id) else {
            drop_record(
                &mut batch,
                record,
                "unparsable_identifier",
                format!("identifier '{}' has no usable numeric core", record.employee_id),
            );
            continue;
        };

        let Some(date) = parse_event_date(&record.date) else {
            drop_record(
                &mut batch,
                record,
                "unparsable_date",
                format!("date '{}' is not YYYY-MM-DD", record.date),
            );
            continue;
        };

        let Some(time) = parse_event_time(&record.time) else {
            drop_record(
                &mut batch,
                record,
                "unparsable_time",
                format!("time '{}' is not HH:MM[:SS]", record.time),
            );
            continue;
        };

        batch.events.push(AttendanceEvent {
            employee_base_id: identifier.base_id,
            work_type: identifier.work_type,
            date,
            time,
            location: record.location.clone(),
            action: classify_action(record.action.as_deref()),
            source_record_id: record.record_id.clone(),
        });
    }

    batch
}

fn drop_record(
    batch: &mut NormalizedBatch,
    record: &RawAttendanceRecord,
    code: &str,
    message: String,
) {
    warn!(
        record_id = %record.record_id,
        code,
        "dropping attendance record: {message}"
    );
    batch.warnings.push(ReconcileWarning {
        code: code.to_string(),
        message,
        source_record_id: record.record_id.clone(),
    });
}
