//! Period summary
//!
//! Descriptive statistics over a whole log, split by weekday and weekend.

use crate::types::SleepLog;
use chrono::{Datelike, Weekday};
use serde::{Deserialize, Serialize};

/// Descriptive statistics for a period of sleep records
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodSummary {
    /// Number of days with a record
    pub days: usize,
    /// Mean hours over all days
    pub average_sleep: f64,
    /// Mean hours Monday to Friday, if any such day exists
    pub weekday_average: Option<f64>,
    /// Mean hours Saturday and Sunday, if any such day exists
    pub weekend_average: Option<f64>,
    /// Population standard deviation of hours
    pub std_dev: f64,
    pub min_sleep: f64,
    pub max_sleep: f64,
}

impl PeriodSummary {
    /// Summarize a log; `None` when it is empty
    pub fn from_log(log: &SleepLog) -> Option<Self> {
        if log.is_empty() {
            return None;
        }

        let hours: Vec<f64> = log.hours().collect();
        let average_sleep = mean(&hours)?;
        let variance = hours
            .iter()
            .map(|h| (h - average_sleep).powi(2))
            .sum::<f64>()
            / hours.len() as f64;

        let (weekend, weekday): (Vec<_>, Vec<_>) =
            log.iter().partition(|r| is_weekend(r.date.weekday()));
        let weekday: Vec<f64> = weekday.iter().map(|r| r.hours).collect();
        let weekend: Vec<f64> = weekend.iter().map(|r| r.hours).collect();

        Some(Self {
            days: hours.len(),
            average_sleep,
            weekday_average: mean(&weekday),
            weekend_average: mean(&weekend),
            std_dev: variance.sqrt(),
            min_sleep: hours.iter().copied().fold(f64::INFINITY, f64::min),
            max_sleep: hours.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        })
    }
}

fn is_weekend(day: Weekday) -> bool {
    matches!(day, Weekday::Sat | Weekday::Sun)
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}
