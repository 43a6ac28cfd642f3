//! Sleep Debt - windowed sleep debt engine
//!
//! Computes a running sleep debt from daily sleep durations through a
//! deterministic pipeline: window selection → per-day debt/recovery fold →
//! optional EMA smoothing → weekly trend and recovery estimate.
//!
//! ## Engines
//!
//! - **Base**: stateless, equal weight for every day in the window
//! - **Weighted**: decays the new debt of older days and smooths the result
//!   across calls

pub mod aggregator;
pub mod config;
pub mod engine;
pub mod error;
pub mod progression;
pub mod smoothing;
pub mod stats;
pub mod summary;
pub mod trend;
pub mod types;
pub mod window;

pub use aggregator::{DecayedAggregator, StandardAggregator, WindowAggregator};
pub use config::{DebtConfig, WeightedConfig};
pub use engine::{compute_debt, compute_weighted_debt, DebtEngine, WeightedDebtEngine};
pub use error::DebtError;
pub use progression::{compare_engines, DebtComparison};
pub use smoothing::SmoothingState;
pub use stats::get_statistics;
pub use summary::PeriodSummary;
pub use types::{DebtReport, SleepLog, SleepRecord, SleepStats, Trend};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
