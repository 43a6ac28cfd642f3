//! Statistics facade
//!
//! Bundles descriptive statistics of the whole log with the engine's debt,
//! trend and recovery estimate.

use crate::config::DebtConfig;
use crate::engine::debt_report;
use crate::error::DebtError;
use crate::trend::{classify_trend, recovery_days};
use crate::types::{DebtReport, SleepLog, SleepStats};

/// Summary statistics using the base engine.
///
/// The configuration is validated even for an empty log, which then yields
/// [`SleepStats::empty`] without running the aggregator.
pub fn get_statistics(log: &SleepLog, config: &DebtConfig) -> Result<SleepStats, DebtError> {
    config.validate()?;

    if log.is_empty() {
        return Ok(SleepStats::empty());
    }

    let report = debt_report(log, config);
    Ok(statistics_from_report(log, &report, config.recovery_rate))
}

/// Combine a debt report with descriptive statistics of the log
pub(crate) fn statistics_from_report(
    log: &SleepLog,
    report: &DebtReport,
    recovery_rate: f64,
) -> SleepStats {
    let Some((average, min, max)) = describe(log) else {
        return SleepStats::empty();
    };

    SleepStats {
        average_sleep: average,
        min_sleep: min,
        max_sleep: max,
        current_debt: report.current_debt,
        trend: classify_trend(&report.weekly_averages),
        recovery_days: recovery_days(report.current_debt, recovery_rate),
    }
}

/// Mean, minimum and maximum hours of a non-empty log
fn describe(log: &SleepLog) -> Option<(f64, f64, f64)> {
    if log.is_empty() {
        return None;
    }

    let (sum, min, max) = log.hours().fold(
        (0.0, f64::INFINITY, f64::NEG_INFINITY),
        |(sum, min, max), h| (sum + h, min.min(h), max.max(h)),
    );

    Some((sum / log.len() as f64, min, max))
}
