//! Window selection and the per-day debt update
//!
//! Both engines look at the same trailing window of the log and fold it with
//! the same update rule; they differ only in how much weight a day's new debt
//! carries.

use crate::config::DebtConfig;
use crate::types::{SleepLog, SleepRecord};
use tracing::debug;

/// Select the trailing `lookback` days of the log in chronological order.
///
/// Returns the whole history when fewer than `lookback` days exist, and an
/// empty window for an empty log.
pub fn select_window(log: &SleepLog, lookback: usize) -> Vec<SleepRecord> {
    let skip = log.len().saturating_sub(lookback);
    let window: Vec<SleepRecord> = log.iter().skip(skip).collect();

    debug!(
        total_days = log.len(),
        lookback,
        window_days = window.len(),
        window_start = ?window.first().map(|r| r.date),
        "selected debt window"
    );

    window
}

/// Apply one day to the running debt.
///
/// A shortfall adds `min(shortfall, max_daily_debt) * weight`. A surplus (or
/// exactly meeting the target) earns `surplus * recovery_rate` back, never
/// weighted, and the debt floors at zero.
pub fn apply_day(debt: f64, hours: f64, weight: f64, config: &DebtConfig) -> f64 {
    let diff = config.target_sleep_hours - hours;

    if diff > 0.0 {
        debt + diff.min(config.max_daily_debt) * weight
    } else {
        let recovery = diff.abs() * config.recovery_rate;
        (debt - recovery).max(0.0)
    }
}
