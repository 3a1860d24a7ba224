//! Attendance Event Reconciliation & Payroll Hours Engine
//!
//! This crate reconstructs work sessions from a raw, unordered stream of
//! single-punch attendance events, detects miss punches, and aggregates
//! verified durations into daily, weekly, and pay-period totals with
//! regular/overtime splitting and special work-type buckets.

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod models;
pub mod reconcile;
