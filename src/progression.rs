//! Debt progression
//!
//! Replays a log day by day, computing base and weighted debt on each prefix of
//! the history. One weighted engine is used for the whole sweep so its
//! smoothing state evolves the way it would with daily updates.

use crate::config::WeightedConfig;
use crate::engine::{DebtEngine, WeightedDebtEngine};
use crate::error::DebtError;
use crate::types::{SleepLog, SleepStats};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Debt of both engines as of one day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressionPoint {
    pub date: NaiveDate,
    /// Hours slept that day
    pub hours: f64,
    /// Base engine debt over history up to and including `date`
    pub regular_debt: f64,
    /// Weighted engine debt over history up to and including `date`
    pub weighted_debt: f64,
}

/// Outcome of a regular versus weighted comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonSummary {
    pub final_regular_debt: f64,
    pub final_weighted_debt: f64,
    /// Absolute difference between the final debts
    pub debt_difference: f64,
    /// Base engine statistics over the whole log
    pub regular_stats: SleepStats,
    /// Weighted engine statistics over the whole log, taken after the sweep
    pub weighted_stats: SleepStats,
}

/// Day-by-day comparison of the two engines
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebtComparison {
    pub points: Vec<ProgressionPoint>,
    pub summary: ComparisonSummary,
}

/// Run both engines over every prefix of the log
pub fn compare_engines(
    log: &SleepLog,
    config: &WeightedConfig,
) -> Result<DebtComparison, DebtError> {
    let regular = DebtEngine::with_config(config.base.clone())?;
    let mut weighted = WeightedDebtEngine::with_config(config.clone())?;

    let points = sweep(log, &regular, &mut weighted);

    let regular_stats = regular.statistics(log);
    let weighted_stats = weighted.statistics(log);

    let final_regular_debt = points.last().map_or(0.0, |p| p.regular_debt);
    let final_weighted_debt = points.last().map_or(0.0, |p| p.weighted_debt);

    info!(
        days = points.len(),
        final_regular_debt,
        final_weighted_debt,
        "debt progression complete"
    );

    Ok(DebtComparison {
        points,
        summary: ComparisonSummary {
            final_regular_debt,
            final_weighted_debt,
            debt_difference: (final_regular_debt - final_weighted_debt).abs(),
            regular_stats,
            weighted_stats,
        },
    })
}

fn sweep(
    log: &SleepLog,
    regular: &DebtEngine,
    weighted: &mut WeightedDebtEngine,
) -> Vec<ProgressionPoint> {
    log.iter()
        .map(|record| {
            let prefix = log.through(record.date);
            ProgressionPoint {
                date: record.date,
                hours: record.hours,
                regular_debt: regular.calculate_debt(&prefix).current_debt,
                weighted_debt: weighted.calculate_debt(&prefix).current_debt,
            }
        })
        .collect()
}
