//! Weekly trend and recovery estimate
//!
//! Weekly averages are computed from the full sorted history, not just the
//! debt window. Two complete weeks are needed for a trend.

use crate::types::{SleepRecord, Trend};

/// Days in one trend period
pub const WEEK_DAYS: usize = 7;

/// Surplus hours per day assumed by the recovery estimate
pub const RECOVERY_SURPLUS_HOURS: f64 = 1.0;

/// Unweighted `[previous_week, current_week]` averages.
///
/// Empty when fewer than two full weeks of history exist.
pub fn weekly_averages(records: &[SleepRecord]) -> Vec<f64> {
    let n = records.len();
    if n < 2 * WEEK_DAYS {
        return Vec::new();
    }

    let current = mean_hours(&records[n - WEEK_DAYS..]);
    let previous = mean_hours(&records[n - 2 * WEEK_DAYS..n - WEEK_DAYS]);

    vec![previous, current]
}

/// Decay-weighted average of the most recent week.
///
/// Position `i` (0 = oldest) gets weight `decay_factor^(6 - i)`, so the most
/// recent day counts most and the weight total is at least 1. `None` with
/// fewer than seven days.
pub fn weighted_week_average(records: &[SleepRecord], decay_factor: f64) -> Option<f64> {
    let n = records.len();
    if n < WEEK_DAYS {
        return None;
    }

    let (weighted_sum, weight_total) = records[n - WEEK_DAYS..].iter().enumerate().fold(
        (0.0, 0.0),
        |(sum, total), (i, record)| {
            let weight = decay_factor.powi((WEEK_DAYS - 1 - i) as i32);
            (sum + record.hours * weight, total + weight)
        },
    );

    Some(weighted_sum / weight_total)
}

/// Weekly averages reported by the weighted engine: the unweighted pair when
/// available, followed by the decay-weighted week when at least seven days exist.
///
/// With 7 to 13 days the list holds only the weighted week, so the trend stays
/// [`Trend::Insufficient`] until a second full week is recorded.
pub fn weighted_weekly_averages(records: &[SleepRecord], decay_factor: f64) -> Vec<f64> {
    let mut averages = weekly_averages(records);
    if let Some(weighted) = weighted_week_average(records, decay_factor) {
        averages.push(weighted);
    }
    averages
}

/// Compare the last two averages
pub fn classify_trend(averages: &[f64]) -> Trend {
    match averages {
        [.., previous, current] => {
            if current > previous {
                Trend::Improving
            } else if current < previous {
                Trend::Declining
            } else {
                Trend::Stable
            }
        }
        _ => Trend::Insufficient,
    }
}

/// Whole days of one extra hour of sleep needed to clear `debt`.
///
/// Assumes no new debt accrues meanwhile. Zero debt needs zero days.
pub fn recovery_days(debt: f64, recovery_rate: f64) -> u32 {
    if debt <= 0.0 {
        return 0;
    }

    let recovery_per_day = RECOVERY_SURPLUS_HOURS * recovery_rate;
    (debt / recovery_per_day).ceil() as u32
}

fn mean_hours(records: &[SleepRecord]) -> f64 {
    let sum: f64 = records.iter().map(|r| r.hours).sum();
    sum / records.len() as f64
}
