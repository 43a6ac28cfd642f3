//! Property tests for the debt fold invariants.

use chrono::NaiveDate;
use proptest::prelude::*;
use sleep_debt::window::apply_day;
use sleep_debt::{
    compute_debt, compute_weighted_debt, DebtConfig, DecayedAggregator, SleepLog, SleepRecord,
    SmoothingState, StandardAggregator, WeightedConfig, WindowAggregator,
};

fn make_window(hours: &[f64]) -> Vec<SleepRecord> {
    let start = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
    hours
        .iter()
        .enumerate()
        .map(|(i, h)| SleepRecord::new(start + chrono::Duration::days(i as i64), *h))
        .collect()
}

fn make_log(hours: &[f64]) -> SleepLog {
    make_window(hours).into_iter().collect()
}

proptest! {
    #[test]
    fn debt_never_negative_at_any_step(hours in prop::collection::vec(0.0f64..14.0, 0..40)) {
        let config = DebtConfig::default();
        let mut debt = 0.0;
        for h in &hours {
            debt = apply_day(debt, *h, 1.0, &config);
            prop_assert!(debt >= 0.0);
        }
    }

    #[test]
    fn debt_never_exceeds_total_cap(hours in prop::collection::vec(0.0f64..14.0, 0..120)) {
        let config = DebtConfig::default().with_lookback(120);
        let report = compute_debt(&make_log(&hours), &config).unwrap();
        prop_assert!(report.current_debt >= 0.0);
        prop_assert!(report.current_debt <= config.max_total_debt);
    }

    #[test]
    fn severe_shortfall_adds_exactly_the_daily_cap(hours in 0.0f64..14.0, prior in 0.0f64..20.0) {
        let config = DebtConfig {
            target_sleep_hours: 30.0,
            ..DebtConfig::default()
        };
        let debt = apply_day(prior, hours, 1.0, &config);
        prop_assert!((debt - prior - config.max_daily_debt).abs() < 1e-9);
    }

    #[test]
    fn no_decay_matches_standard(hours in prop::collection::vec(0.0f64..14.0, 0..20)) {
        let config = DebtConfig::default();
        let window = make_window(&hours);
        let standard = StandardAggregator::new(&config).aggregate(&window);
        let decayed = DecayedAggregator::new(&config, 1.0).aggregate(&window);
        prop_assert_eq!(standard, decayed);
    }

    #[test]
    fn decay_never_increases_debt(
        hours in prop::collection::vec(0.0f64..14.0, 0..20),
        decay in 0.05f64..1.0,
    ) {
        let config = DebtConfig::default();
        let window = make_window(&hours);
        let standard = StandardAggregator::new(&config).aggregate(&window);
        let decayed = DecayedAggregator::new(&config, decay).aggregate(&window);
        prop_assert!(decayed <= standard + 1e-9);
    }

    #[test]
    fn zero_smoothing_returns_raw_debt(
        hours in prop::collection::vec(0.0f64..14.0, 1..30),
        decay in 0.05f64..=1.0,
        previous in 0.0f64..40.0,
    ) {
        let config = WeightedConfig::default().with_decay(decay).with_smoothing(0.0);
        let log = make_log(&hours);

        let (report, state) =
            compute_weighted_debt(&log, &config, SmoothingState::new(previous)).unwrap();

        let window = sleep_debt::window::select_window(&log, config.base.lookback_days);
        let raw = DecayedAggregator::new(&config.base, decay).aggregate(&window);
        prop_assert_eq!(report.current_debt, raw);
        prop_assert_eq!(state.smoothed_debt, raw);
    }

    #[test]
    fn insertion_order_is_irrelevant(hours in prop::collection::vec(0.0f64..14.0, 0..30)) {
        let records = make_window(&hours);
        let forward: SleepLog = records.iter().copied().collect();
        let backward: SleepLog = records.iter().rev().copied().collect();

        prop_assert_eq!(
            compute_debt(&forward, &DebtConfig::default()).unwrap(),
            compute_debt(&backward, &DebtConfig::default()).unwrap()
        );
    }
}
