//! Core types for the sleep debt engine
//!
//! This module defines the data that flows through the engine: the sleep log
//! supplied by callers, per-day records inside a window, the debt report
//! produced by each engine, and the statistics bundle.

use crate::error::DebtError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Date format used for sleep log keys
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// One night of sleep attributed to a calendar day
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SleepRecord {
    pub date: NaiveDate,
    pub hours: f64,
}

impl SleepRecord {
    pub fn new(date: NaiveDate, hours: f64) -> Self {
        Self { date, hours }
    }
}

/// Sleep hours keyed by calendar day.
///
/// Holds at most one record per day. Iteration is always chronological,
/// whatever order the records were inserted in.
///
/// Hours are expected to be finite and non-negative. The debt fold does not
/// check this; [`SleepLog::from_json`] rejects violating records and
/// [`SleepLog::insert`] asserts it in debug builds.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SleepLog {
    records: BTreeMap<NaiveDate, f64>,
}

impl SleepLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the hours slept on `date`
    pub fn insert(&mut self, date: NaiveDate, hours: f64) -> Option<f64> {
        debug_assert!(
            hours.is_finite() && hours >= 0.0,
            "hours slept must be finite and non-negative"
        );
        self.records.insert(date, hours)
    }

    pub fn get(&self, date: NaiveDate) -> Option<f64> {
        self.records.get(&date).copied()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in ascending date order
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = SleepRecord> + ExactSizeIterator + '_ {
        self.records
            .iter()
            .map(|(date, hours)| SleepRecord::new(*date, *hours))
    }

    /// Hours slept in ascending date order
    pub fn hours(&self) -> impl Iterator<Item = f64> + '_ {
        self.records.values().copied()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.records.keys().next().copied()
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.records.keys().next_back().copied()
    }

    /// All records in ascending date order
    pub fn sorted_records(&self) -> Vec<SleepRecord> {
        self.iter().collect()
    }

    /// Sub-log containing every record on or before `date`
    pub fn through(&self, date: NaiveDate) -> SleepLog {
        Self {
            records: self
                .records
                .range(..=date)
                .map(|(d, h)| (*d, *h))
                .collect(),
        }
    }

    /// Parse a JSON object of `{"YYYY-MM-DD": hours}`
    pub fn from_json(json: &str) -> Result<Self, DebtError> {
        let raw: HashMap<String, f64> = serde_json::from_str(json)?;
        let mut log = Self::new();

        for (key, hours) in raw {
            let date = NaiveDate::parse_from_str(key.trim(), DATE_FORMAT)
                .map_err(|e| DebtError::DateParseError(format!("{key}: {e}")))?;

            if !hours.is_finite() {
                return Err(DebtError::InvalidRecord {
                    date: key,
                    reason: "hours must be a finite number".to_string(),
                });
            }
            if hours < 0.0 {
                return Err(DebtError::InvalidRecord {
                    date: key,
                    reason: format!("hours must be non-negative, got {hours}"),
                });
            }

            if log.records.insert(date, hours).is_some() {
                return Err(DebtError::InvalidRecord {
                    date: key,
                    reason: format!("duplicate date {date}"),
                });
            }
        }

        Ok(log)
    }

    /// Serialize the log as a JSON object keyed by date
    pub fn to_json(&self) -> Result<String, DebtError> {
        Ok(serde_json::to_string(self)?)
    }
}

impl FromIterator<(NaiveDate, f64)> for SleepLog {
    fn from_iter<I: IntoIterator<Item = (NaiveDate, f64)>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

impl FromIterator<SleepRecord> for SleepLog {
    fn from_iter<I: IntoIterator<Item = SleepRecord>>(iter: I) -> Self {
        iter.into_iter().map(|r| (r.date, r.hours)).collect()
    }
}

impl From<HashMap<NaiveDate, f64>> for SleepLog {
    fn from(records: HashMap<NaiveDate, f64>) -> Self {
        records.into_iter().collect()
    }
}

impl From<BTreeMap<NaiveDate, f64>> for SleepLog {
    fn from(records: BTreeMap<NaiveDate, f64>) -> Self {
        Self { records }
    }
}

/// Output of one engine call
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DebtReport {
    /// Debt at the end of the window (hours), in `[0, max_total_debt]`
    pub current_debt: f64,
    /// Weekly averages, oldest first. Only the last two drive the trend.
    pub weekly_averages: Vec<f64>,
}

/// Qualitative direction of weekly sleep averages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    NoData,
    Insufficient,
    Improving,
    Declining,
    Stable,
}

impl Trend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Trend::NoData => "No data",
            Trend::Insufficient => "Insufficient data",
            Trend::Improving => "Improving",
            Trend::Declining => "Declining",
            Trend::Stable => "Stable",
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Summary bundle returned by the statistics facade
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SleepStats {
    /// Mean hours over the whole log
    pub average_sleep: f64,
    /// Shortest night in the log
    pub min_sleep: f64,
    /// Longest night in the log
    pub max_sleep: f64,
    /// Debt reported by the engine
    pub current_debt: f64,
    /// Trend derived from the engine's weekly averages
    pub trend: Trend,
    /// Days of one surplus hour needed to clear the debt
    pub recovery_days: u32,
}

impl SleepStats {
    /// Bundle returned for an empty log
    pub fn empty() -> Self {
        Self {
            average_sleep: 0.0,
            min_sleep: 0.0,
            max_sleep: 0.0,
            current_debt: 0.0,
            trend: Trend::NoData,
            recovery_days: 0,
        }
    }
}
