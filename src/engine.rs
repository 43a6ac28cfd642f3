//! Debt engines
//!
//! This module provides the public API of the crate. The free functions are
//! pure: the base computation keeps no state at all, and the weighted
//! computation takes the previous smoothing state and returns the next one.
//! [`DebtEngine`] and [`WeightedDebtEngine`] wrap them for callers that prefer
//! to hold configuration (and, for the weighted variant, smoothing state) in
//! one place.
//!
//! Pipeline stages:
//! 1. Window selection - trailing `lookback_days` of the sorted log
//! 2. Aggregation - fold the window with the per-day update rule
//! 3. Smoothing - weighted engine only, EMA over successive calls
//! 4. Weekly averages - from the full sorted history

use crate::aggregator::{DecayedAggregator, StandardAggregator, WindowAggregator};
use crate::config::{DebtConfig, WeightedConfig};
use crate::error::DebtError;
use crate::smoothing::SmoothingState;
use crate::stats::statistics_from_report;
use crate::trend::{weekly_averages, weighted_weekly_averages};
use crate::types::{DebtReport, SleepLog, SleepRecord, SleepStats};
use crate::window::select_window;

/// Compute debt and weekly averages for a sleep log (stateless).
///
/// The configuration is validated first; an unusable one is reported as
/// [`DebtError::InvalidConfig`].
///
/// # Example
/// ```
/// use sleep_debt::{compute_debt, DebtConfig, SleepLog};
/// use chrono::NaiveDate;
///
/// let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
/// let log: SleepLog = (0..10)
///     .map(|i| (start + chrono::Duration::days(i), 6.0))
///     .collect();
///
/// let report = compute_debt(&log, &DebtConfig::default()).unwrap();
/// assert!((report.current_debt - 10.0).abs() < 1e-9);
/// ```
pub fn compute_debt(log: &SleepLog, config: &DebtConfig) -> Result<DebtReport, DebtError> {
    config.validate()?;
    Ok(debt_report(log, config))
}

/// Compute decay-weighted, smoothed debt for a sleep log.
///
/// Returns the report together with the state to pass to the next call. An
/// empty log leaves the state untouched. The configuration is validated
/// before anything is computed.
pub fn compute_weighted_debt(
    log: &SleepLog,
    config: &WeightedConfig,
    state: SmoothingState,
) -> Result<(DebtReport, SmoothingState), DebtError> {
    config.validate()?;
    Ok(weighted_debt_report(log, config, state))
}

/// Base debt report for a configuration that has already been validated
pub(crate) fn debt_report(log: &SleepLog, config: &DebtConfig) -> DebtReport {
    if log.is_empty() {
        return DebtReport::default();
    }

    let window = select_window(log, config.lookback_days);
    let sorted = log.sorted_records();

    DebtReport {
        current_debt: StandardAggregator::new(config).aggregate(&window),
        weekly_averages: weekly_averages(&sorted),
    }
}

/// Weighted debt report for a configuration that has already been validated
pub(crate) fn weighted_debt_report(
    log: &SleepLog,
    config: &WeightedConfig,
    state: SmoothingState,
) -> (DebtReport, SmoothingState) {
    if log.is_empty() {
        return (DebtReport::default(), state);
    }

    let window = select_window(log, config.base.lookback_days);
    let state = smooth_window(&window, config, state);
    let sorted = log.sorted_records();

    let report = DebtReport {
        current_debt: state.smoothed_debt,
        weekly_averages: weighted_weekly_averages(&sorted, config.decay_factor),
    };

    (report, state)
}

/// Raw decayed debt of a window blended into the smoothing state
fn smooth_window(
    window: &[SleepRecord],
    config: &WeightedConfig,
    state: SmoothingState,
) -> SmoothingState {
    let raw_debt = DecayedAggregator::new(&config.base, config.decay_factor).aggregate(window);
    state.blend(raw_debt, config.smoothing_factor)
}

/// Stateless debt engine with a fixed configuration
#[derive(Debug, Clone, Default)]
pub struct DebtEngine {
    config: DebtConfig,
}

impl DebtEngine {
    /// Create an engine with default constants
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine with a validated configuration
    pub fn with_config(config: DebtConfig) -> Result<Self, DebtError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &DebtConfig {
        &self.config
    }

    /// Debt and weekly averages for the log
    pub fn calculate_debt(&self, log: &SleepLog) -> DebtReport {
        debt_report(log, &self.config)
    }

    /// Debt of an already selected window, in ascending date order
    pub fn calculate_window_debt(&self, window: &[SleepRecord]) -> f64 {
        StandardAggregator::new(&self.config).aggregate(window)
    }

    /// Summary statistics for the log
    pub fn statistics(&self, log: &SleepLog) -> SleepStats {
        if log.is_empty() {
            return SleepStats::empty();
        }
        let report = self.calculate_debt(log);
        statistics_from_report(log, &report, self.config.recovery_rate)
    }
}

/// Weighted debt engine holding its smoothing state.
///
/// Each independent sleep history needs its own instance; calls that update
/// the smoothed value take `&mut self`.
#[derive(Debug, Clone, Default)]
pub struct WeightedDebtEngine {
    config: WeightedConfig,
    state: SmoothingState,
}

impl WeightedDebtEngine {
    /// Create an engine with default constants and zero smoothed debt
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine with a validated configuration
    pub fn with_config(config: WeightedConfig) -> Result<Self, DebtError> {
        config.validate()?;
        Ok(Self {
            config,
            state: SmoothingState::default(),
        })
    }

    /// Resume from previously saved smoothing state
    pub fn with_state(mut self, state: SmoothingState) -> Self {
        self.state = state;
        self
    }

    pub fn config(&self) -> &WeightedConfig {
        &self.config
    }

    pub fn state(&self) -> SmoothingState {
        self.state
    }

    /// Forget the smoothed value
    pub fn reset(&mut self) {
        self.state = SmoothingState::default();
    }

    /// Smoothed debt and weekly averages for the log; updates the smoothing state
    pub fn calculate_debt(&mut self, log: &SleepLog) -> DebtReport {
        let (report, state) = weighted_debt_report(log, &self.config, self.state);
        self.state = state;
        report
    }

    /// Smoothed debt of an already selected window; updates the smoothing state
    pub fn calculate_window_debt(&mut self, window: &[SleepRecord]) -> f64 {
        self.state = smooth_window(window, &self.config, self.state);
        self.state.smoothed_debt
    }

    /// Summary statistics for the log; updates the smoothing state unless the
    /// log is empty
    pub fn statistics(&mut self, log: &SleepLog) -> SleepStats {
        if log.is_empty() {
            return SleepStats::empty();
        }
        let report = self.calculate_debt(log);
        statistics_from_report(log, &report, self.config.base.recovery_rate)
    }

    /// Load smoothing state from JSON
    pub fn load_state(&mut self, json: &str) -> Result<(), DebtError> {
        self.state = SmoothingState::from_json(json)?;
        Ok(())
    }

    /// Save smoothing state to JSON
    pub fn save_state(&self) -> Result<String, DebtError> {
        Ok(self.state.to_json()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn make_log(hours: &[f64]) -> SleepLog {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        hours
            .iter()
            .enumerate()
            .map(|(i, h)| (start + chrono::Duration::days(i as i64), *h))
            .collect()
    }

    #[test]
    fn test_empty_log() {
        assert_eq!(
            compute_debt(&SleepLog::new(), &DebtConfig::default()).unwrap(),
            DebtReport::default()
        );
    }

    #[test]
    fn test_only_lookback_window_counts() {
        // 5 old days of heavy undersleep fall outside the 10-day window
        let mut hours = vec![2.0; 5];
        hours.extend([6.0; 10]);
        let report = compute_debt(&make_log(&hours), &DebtConfig::default()).unwrap();

        assert!((report.current_debt - 10.0).abs() < 1e-9);
        assert_eq!(report.weekly_averages.len(), 2);
    }

    #[test]
    fn test_custom_lookback() {
        let config = DebtConfig::default().with_lookback(3);
        let report = compute_debt(&make_log(&[6.0; 10]), &config).unwrap();
        assert!((report.current_debt - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_window_debt_matches_log_debt() {
        let engine = DebtEngine::new();
        let log = make_log(&[6.0, 9.0, 5.5, 7.0, 4.0]);
        let window = select_window(&log, 10);

        assert_eq!(
            engine.calculate_window_debt(&window),
            engine.calculate_debt(&log).current_debt
        );
    }

    #[test]
    fn test_weighted_without_smoothing_matches_base() {
        let log = make_log(&[6.0, 9.0, 5.5, 7.0, 4.0, 8.0, 6.5, 6.0, 10.0, 3.0, 7.5]);
        let config = WeightedConfig::default().with_smoothing(0.0);

        let (weighted, _) =
            compute_weighted_debt(&log, &config, SmoothingState::default()).unwrap();
        let base = compute_debt(&log, &config.base).unwrap();

        assert_eq!(weighted.current_debt, base.current_debt);
    }

    #[test]
    fn test_weighted_state_carries_across_calls() {
        let mut engine = WeightedDebtEngine::with_config(WeightedConfig::default()).unwrap();
        let log = make_log(&[6.0; 10]);

        // raw = 10: first call 9.0, second call 9.9
        let first = engine.calculate_debt(&log).current_debt;
        let second = engine.calculate_debt(&log).current_debt;

        assert!((first - 9.0).abs() < 1e-9);
        assert!((second - 9.9).abs() < 1e-9);
        assert_eq!(engine.state(), SmoothingState::new(second));
    }

    #[test]
    fn test_pure_weighted_call_does_not_share_state() {
        let log = make_log(&[6.0; 10]);
        let config = WeightedConfig::default();

        let (a, _) = compute_weighted_debt(&log, &config, SmoothingState::default()).unwrap();
        let (b, _) = compute_weighted_debt(&log, &config, SmoothingState::default()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_empty_log_keeps_weighted_state() {
        let mut engine = WeightedDebtEngine::new().with_state(SmoothingState::new(3.0));
        let report = engine.calculate_debt(&SleepLog::new());

        assert_eq!(report, DebtReport::default());
        assert_eq!(engine.state(), SmoothingState::new(3.0));
    }

    #[test]
    fn test_weighted_weekly_averages() {
        let config = WeightedConfig::default().with_decay(0.9);
        let (report, _) =
            compute_weighted_debt(&make_log(&[7.0; 14]), &config, SmoothingState::default())
                .unwrap();

        assert_eq!(report.weekly_averages.len(), 3);
        assert!(report.weekly_averages.iter().all(|a| (a - 7.0).abs() < 1e-9));
    }

    #[test]
    fn test_reset() {
        let mut engine = WeightedDebtEngine::new();
        engine.calculate_debt(&make_log(&[5.0; 4]));
        assert!(engine.state().smoothed_debt > 0.0);

        engine.reset();
        assert_eq!(engine.state(), SmoothingState::default());
    }

    #[test]
    fn test_state_save_and_load() {
        let mut engine = WeightedDebtEngine::new();
        engine.calculate_debt(&make_log(&[5.0; 4]));
        let saved = engine.save_state().unwrap();

        let mut restored = WeightedDebtEngine::new();
        restored.load_state(&saved).unwrap();
        assert_eq!(restored.state(), engine.state());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = WeightedConfig::default().with_decay(1.5);
        assert!(WeightedDebtEngine::with_config(config).is_err());
        assert!(DebtEngine::with_config(DebtConfig::default().with_lookback(0)).is_err());
    }

    #[test]
    fn test_free_functions_reject_invalid_config() {
        let log = make_log(&[6.0; 10]);
        let no_recovery = DebtConfig {
            recovery_rate: 0.0,
            ..DebtConfig::default()
        };

        assert!(matches!(
            compute_debt(&log, &no_recovery),
            Err(DebtError::InvalidConfig(_))
        ));
        assert!(matches!(
            compute_debt(&log, &DebtConfig::default().with_lookback(0)),
            Err(DebtError::InvalidConfig(_))
        ));
        assert!(matches!(
            compute_weighted_debt(
                &log,
                &WeightedConfig::default().with_smoothing(1.0),
                SmoothingState::default()
            ),
            Err(DebtError::InvalidConfig(_))
        ));
    }
}
