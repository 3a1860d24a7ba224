//! Configuration loading and management for the Attendance Reconciliation Engine.
//!
//! This module provides the engine's tunable policy values (period duration
//! bounds, rounding increment, weekly overtime threshold, pairing defaults),
//! loadable from a YAML file with sensible payroll defaults.
//!
//! # Example
//!
//! ```
//! use attendance_engine::config::EngineConfig;
//!
//! let config = EngineConfig::default();
//! assert_eq!(config.overtime.weekly_threshold_minutes, 2400);
//! ```

mod loader;
mod types;

pub use types::{EngineConfig, OvertimeConfig, PairingConfig, RoundingConfig, ValidationLimits};
