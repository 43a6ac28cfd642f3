//! Engine configuration
//!
//! Default constants for the debt model, plus the two configuration structs
//! consumed by the base and weighted engines. Missing JSON fields fall back to
//! the defaults, so a partial config file only overrides what it names.

use crate::error::DebtError;
use serde::{Deserialize, Serialize};

/// Hours of sleep per night below which debt accrues
pub const TARGET_SLEEP_HOURS: f64 = 7.0;

/// Recommended hours of sleep per night (informational, not used by the fold)
pub const RECOMMENDED_SLEEP_HOURS: f64 = 8.0;

/// Maximum debt a single day can add
pub const MAX_DAILY_DEBT: f64 = 16.0;

/// Upper bound on total debt
pub const MAX_TOTAL_DEBT: f64 = 40.0;

/// Fraction of a surplus hour that offsets one hour of debt
pub const RECOVERY_RATE: f64 = 0.4;

/// Default lookback window in days
pub const DEFAULT_LOOKBACK_DAYS: usize = 10;

/// Default decay factor (1.0 = no decay)
pub const DEFAULT_DECAY_FACTOR: f64 = 1.0;

/// Default EMA smoothing factor for the weighted engine
pub const DEFAULT_SMOOTHING_FACTOR: f64 = 0.1;

/// Configuration shared by both engines
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DebtConfig {
    /// Nightly sleep target (hours)
    pub target_sleep_hours: f64,
    /// Recommended nightly sleep (hours)
    pub recommended_sleep_hours: f64,
    /// Cap on debt added by one day (hours)
    pub max_daily_debt: f64,
    /// Cap on total debt (hours)
    pub max_total_debt: f64,
    /// Recovery credited per surplus hour
    pub recovery_rate: f64,
    /// Number of trailing days considered
    pub lookback_days: usize,
}

impl Default for DebtConfig {
    fn default() -> Self {
        Self {
            target_sleep_hours: TARGET_SLEEP_HOURS,
            recommended_sleep_hours: RECOMMENDED_SLEEP_HOURS,
            max_daily_debt: MAX_DAILY_DEBT,
            max_total_debt: MAX_TOTAL_DEBT,
            recovery_rate: RECOVERY_RATE,
            lookback_days: DEFAULT_LOOKBACK_DAYS,
        }
    }
}

impl DebtConfig {
    /// Override the lookback window
    pub fn with_lookback(mut self, lookback_days: usize) -> Self {
        self.lookback_days = lookback_days;
        self
    }

    /// Check that every parameter is usable by the fold
    pub fn validate(&self) -> Result<(), DebtError> {
        if self.lookback_days == 0 {
            return Err(DebtError::InvalidConfig(
                "lookback_days must be at least 1".to_string(),
            ));
        }

        for (name, value) in [
            ("target_sleep_hours", self.target_sleep_hours),
            ("recommended_sleep_hours", self.recommended_sleep_hours),
            ("max_daily_debt", self.max_daily_debt),
            ("max_total_debt", self.max_total_debt),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(DebtError::InvalidConfig(format!(
                    "{name} must be a finite non-negative number, got {value}"
                )));
            }
        }

        if !self.recovery_rate.is_finite() || self.recovery_rate <= 0.0 {
            return Err(DebtError::InvalidConfig(format!(
                "recovery_rate must be positive, got {}",
                self.recovery_rate
            )));
        }

        Ok(())
    }

    /// Load configuration from JSON
    pub fn from_json(json: &str) -> Result<Self, DebtError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}

/// Configuration for the weighted engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedConfig {
    /// Parameters shared with the base engine
    #[serde(flatten)]
    pub base: DebtConfig,
    /// Per-day decay applied to debt contributions, in (0, 1]
    #[serde(default = "default_decay_factor")]
    pub decay_factor: f64,
    /// EMA smoothing factor α, in [0, 1)
    #[serde(default = "default_smoothing_factor")]
    pub smoothing_factor: f64,
}

fn default_decay_factor() -> f64 {
    DEFAULT_DECAY_FACTOR
}

fn default_smoothing_factor() -> f64 {
    DEFAULT_SMOOTHING_FACTOR
}

impl Default for WeightedConfig {
    fn default() -> Self {
        Self {
            base: DebtConfig::default(),
            decay_factor: DEFAULT_DECAY_FACTOR,
            smoothing_factor: DEFAULT_SMOOTHING_FACTOR,
        }
    }
}

impl WeightedConfig {
    /// Override the decay factor
    pub fn with_decay(mut self, decay_factor: f64) -> Self {
        self.decay_factor = decay_factor;
        self
    }

    /// Override the smoothing factor
    pub fn with_smoothing(mut self, smoothing_factor: f64) -> Self {
        self.smoothing_factor = smoothing_factor;
        self
    }

    /// Override the lookback window
    pub fn with_lookback(mut self, lookback_days: usize) -> Self {
        self.base.lookback_days = lookback_days;
        self
    }

    pub fn validate(&self) -> Result<(), DebtError> {
        self.base.validate()?;

        if !(self.decay_factor > 0.0 && self.decay_factor <= 1.0) {
            return Err(DebtError::InvalidConfig(format!(
                "decay_factor must be in (0, 1], got {}",
                self.decay_factor
            )));
        }

        if !(0.0..1.0).contains(&self.smoothing_factor) {
            return Err(DebtError::InvalidConfig(format!(
                "smoothing_factor must be in [0, 1), got {}",
                self.smoothing_factor
            )));
        }

        Ok(())
    }

    /// Load configuration from JSON
    pub fn from_json(json: &str) -> Result<Self, DebtError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        assert!(DebtConfig::default().validate().is_ok());
        assert!(WeightedConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_lookback_rejected() {
        let config = DebtConfig::default().with_lookback(0);
        assert!(matches!(config.validate(), Err(DebtError::InvalidConfig(_))));
    }

    #[test]
    fn test_decay_range() {
        assert!(WeightedConfig::default().with_decay(0.0).validate().is_err());
        assert!(WeightedConfig::default().with_decay(1.2).validate().is_err());
        assert!(WeightedConfig::default().with_decay(0.9).validate().is_ok());
    }

    #[test]
    fn test_smoothing_range() {
        assert!(WeightedConfig::default().with_smoothing(1.0).validate().is_err());
        assert!(WeightedConfig::default().with_smoothing(-0.1).validate().is_err());
        assert!(WeightedConfig::default().with_smoothing(0.0).validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = WeightedConfig::from_json(r#"{"decay_factor": 0.9, "lookback_days": 7}"#)
            .unwrap();

        assert_eq!(config.decay_factor, 0.9);
        assert_eq!(config.base.lookback_days, 7);
        assert_eq!(config.base.target_sleep_hours, TARGET_SLEEP_HOURS);
        assert_eq!(config.smoothing_factor, DEFAULT_SMOOTHING_FACTOR);
    }

    #[test]
    fn test_invalid_json_config() {
        let result = DebtConfig::from_json(r#"{"recovery_rate": 0.0}"#);
        assert!(matches!(result, Err(DebtError::InvalidConfig(_))));
    }
}
