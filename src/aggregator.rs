//! Window aggregation
//!
//! A [`WindowAggregator`] folds a chronologically ordered window into a single
//! debt value. The standard aggregator weighs every day equally; the decayed
//! aggregator discounts the new debt of older days.

use crate::config::DebtConfig;
use crate::types::SleepRecord;
use crate::window::apply_day;
use tracing::debug;

/// Strategy for folding a window into a debt value
pub trait WindowAggregator {
    /// Parameters of the per-day update rule
    fn config(&self) -> &DebtConfig;

    /// Weight applied to the new debt of the day at `days_from_end`
    /// (0 for the most recent day of the window)
    fn contribution_weight(&self, days_from_end: usize) -> f64;

    /// Fold the window left to right and clamp the result to the total cap.
    ///
    /// The window must be in ascending date order.
    fn aggregate(&self, window: &[SleepRecord]) -> f64 {
        let config = self.config();
        let last = window.len().saturating_sub(1);

        let total = window.iter().enumerate().fold(0.0, |debt, (i, record)| {
            apply_day(debt, record.hours, self.contribution_weight(last - i), config)
        });

        let clamped = total.min(config.max_total_debt);
        debug!(
            window_days = window.len(),
            unclamped = total,
            debt = clamped,
            "aggregated window debt"
        );
        clamped
    }
}

/// Equal-weight aggregation used by the base engine
#[derive(Debug, Clone, Copy)]
pub struct StandardAggregator<'a> {
    config: &'a DebtConfig,
}

impl<'a> StandardAggregator<'a> {
    pub fn new(config: &'a DebtConfig) -> Self {
        Self { config }
    }
}

impl WindowAggregator for StandardAggregator<'_> {
    fn config(&self) -> &DebtConfig {
        self.config
    }

    fn contribution_weight(&self, _days_from_end: usize) -> f64 {
        1.0
    }
}

/// Recency-weighted aggregation used by the weighted engine.
///
/// With `decay_factor < 1` a day's new debt is scaled by
/// `decay_factor^days_from_end`. Recovery is always applied at full strength.
#[derive(Debug, Clone, Copy)]
pub struct DecayedAggregator<'a> {
    config: &'a DebtConfig,
    decay_factor: f64,
}

impl<'a> DecayedAggregator<'a> {
    pub fn new(config: &'a DebtConfig, decay_factor: f64) -> Self {
        Self {
            config,
            decay_factor,
        }
    }

    pub fn decay_factor(&self) -> f64 {
        self.decay_factor
    }
}

impl WindowAggregator for DecayedAggregator<'_> {
    fn config(&self) -> &DebtConfig {
        self.config
    }

    fn contribution_weight(&self, days_from_end: usize) -> f64 {
        if self.decay_factor < 1.0 {
            let exponent = i32::try_from(days_from_end).unwrap_or(i32::MAX);
            self.decay_factor.powi(exponent)
        } else {
            1.0
        }
    }
}
