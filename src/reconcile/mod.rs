//! Reconciliation pipeline for the Attendance Reconciliation Engine.
//!
//! This module contains the stages that turn raw punch records into payable
//! hours: record normalization, session reconstruction with the two pairing
//! strategies, period validation, daily aggregation with quarter-hour
//! rounding, weekly overtime segmentation, and final report assembly.

mod assemble;
mod daily;
mod normalize;
mod pairing;
mod validate;
mod weekly;

pub use assemble::{generate_report, generate_report_parallel, summarize_employee};
pub use daily::{aggregate_day, round_to_increment};
pub use normalize::{
    NormalizedBatch, ParsedIdentifier, classify_action, normalize_records,
    parse_employee_identifier,
};
pub use pairing::{PairingStrategy, reconstruct_day, reconstruct_sessions};
pub use validate::{PeriodVerdict, assess_period, validate_periods};
pub use weekly::{segment_weeks, week_start_of};
