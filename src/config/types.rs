//! Configuration types for the Attendance Reconciliation Engine.
//!
//! This module contains the strongly-typed configuration structure that is
//! deserialized from a YAML configuration file. Every section has defaults
//! matching the payroll policy constants, so an empty file (or no file at
//! all) yields a working configuration.

use serde::Deserialize;

use crate::error::{EngineError, EngineResult};
use crate::reconcile::PairingStrategy;

/// Session pairing options.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PairingConfig {
    /// The strategy used when the caller does not select one explicitly.
    pub default_strategy: PairingStrategy,
    /// Whether a day's events are subdivided into contiguous same-location
    /// runs before pairing.
    pub split_by_location: bool,
}

impl Default for PairingConfig {
    fn default() -> Self {
        PairingConfig {
            default_strategy: PairingStrategy::LabelBased,
            split_by_location: false,
        }
    }
}

/// Plausibility bounds for reconstructed period durations.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ValidationLimits {
    /// Minimum acceptable period duration in minutes.
    pub min_period_minutes: i64,
    /// Maximum acceptable period duration in minutes.
    pub max_period_minutes: i64,
}

impl Default for ValidationLimits {
    fn default() -> Self {
        ValidationLimits {
            min_period_minutes: 15,
            max_period_minutes: 12 * 60,
        }
    }
}

/// Daily total rounding options.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RoundingConfig {
    /// The increment daily totals are rounded to, in minutes.
    pub increment_minutes: i64,
}

impl Default for RoundingConfig {
    fn default() -> Self {
        RoundingConfig {
            increment_minutes: 15,
        }
    }
}

/// Weekly overtime options.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OvertimeConfig {
    /// Weekly minutes above which regular hours become overtime.
    pub weekly_threshold_minutes: i64,
}

impl Default for OvertimeConfig {
    fn default() -> Self {
        OvertimeConfig {
            weekly_threshold_minutes: 40 * 60,
        }
    }
}

/// The complete engine configuration.
///
/// # Example
///
/// ```
/// use attendance_engine::config::EngineConfig;
///
/// let config = EngineConfig::default();
/// assert_eq!(config.validation.min_period_minutes, 15);
/// assert_eq!(config.validation.max_period_minutes, 720);
/// assert_eq!(config.overtime.weekly_threshold_minutes, 2400);
/// assert_eq!(config.rounding.increment_minutes, 15);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Session pairing options.
    pub pairing: PairingConfig,
    /// Period duration bounds.
    pub validation: ValidationLimits,
    /// Daily rounding options.
    pub rounding: RoundingConfig,
    /// Weekly overtime options.
    pub overtime: OvertimeConfig,
}

impl EngineConfig {
    /// Checks the configuration for internally inconsistent values.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConfig`] naming the offending field.
    pub fn validate(&self) -> EngineResult<()> {
        if self.validation.min_period_minutes < 0 {
            return Err(EngineError::InvalidConfig {
                field: "validation.min_period_minutes".to_string(),
                message: "must not be negative".to_string(),
            });
        }
        if self.validation.min_period_minutes > self.validation.max_period_minutes {
            return Err(EngineError::InvalidConfig {
                field: "validation.min_period_minutes".to_string(),
                message: "must not exceed max_period_minutes".to_string(),
            });
        }
        if self.rounding.increment_minutes <= 0 {
            return Err(EngineError::InvalidConfig {
                field: "rounding.increment_minutes".to_string(),
                message: "must be positive".to_string(),
            });
        }
        if self.overtime.weekly_threshold_minutes <= 0 {
            return Err(EngineError::InvalidConfig {
                field: "overtime.weekly_threshold_minutes".to_string(),
                message: "must be positive".to_string(),
            });
        }
        Ok(())
    }
}
