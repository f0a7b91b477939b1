//! # Strategy Comparison Tests

use std::time::Duration;

use pretty_assertions::assert_eq;
use rowfetch_core::bench::{self, BenchmarkHarness, PrefetchingAccessor};
use rowfetch_core::config::Strategy;
use rowfetch_core::hint::NoopHint;
use rowfetch_core::BenchError;

use crate::common::builders::{pattern, synthetic_store};
use crate::common::mocks::{CountingClock, SteppingClock};

#[test]
fn test_markov_comparison_reports_accuracy() {
    let store = synthetic_store(3, 16);
    let p = pattern(&[0, 1, 0, 1, 0, 2], &store);
    let accessor = PrefetchingAccessor::new(NoopHint, SteppingClock::new(Duration::from_millis(2)));
    let mut harness = BenchmarkHarness::new(accessor);

    let report = bench::compare(&mut harness, &store, &p, Strategy::Markov, 3).unwrap();
    assert_eq!(report.strategy, "markov");
    assert_eq!(report.accuracy, Some(0.8));
    assert_eq!(report.coverage, Some(1.0));
    assert_eq!(report.speedup, 1.0);
    assert!(report.results_match);
}

#[test]
fn test_baseline_comparison_has_no_accuracy() {
    let store = synthetic_store(3, 4);
    let p = pattern(&[2, 1, 0], &store);
    let accessor = PrefetchingAccessor::new(NoopHint, SteppingClock::new(Duration::from_millis(1)));
    let mut harness = BenchmarkHarness::new(accessor);

    let report = bench::compare(&mut harness, &store, &p, Strategy::None, 2).unwrap();
    assert_eq!(report.strategy, "none");
    assert_eq!(report.accuracy, None);
}

#[test]
fn test_comparison_json_carries_every_field() {
    let store = synthetic_store(4, 4);
    let p = pattern(&[0, 1, 2, 3, 0, 1, 2, 3], &store);
    let accessor = PrefetchingAccessor::new(NoopHint, SteppingClock::new(Duration::from_millis(1)));
    let mut harness = BenchmarkHarness::new(accessor);

    let report = bench::compare(&mut harness, &store, &p, Strategy::NGram { order: 2 }, 2).unwrap();
    let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
    assert_eq!(json["strategy"], "ngram(2)");
    assert_eq!(json["accuracy"], 1.0);
    assert_eq!(json["results_match"], true);
    assert!(json["baseline_mean_ms"].is_number());
}

#[test]
fn test_empty_pattern_fails_without_timing() {
    let store = synthetic_store(3, 4);
    let p = pattern(&[], &store);
    let mut harness = BenchmarkHarness::new(PrefetchingAccessor::new(NoopHint, CountingClock::new()));

    let err = bench::compare(&mut harness, &store, &p, Strategy::Markov, 2).unwrap_err();
    assert!(matches!(err, BenchError::EmptyPattern));
    assert_eq!(harness.accessor().clock().reads(), 0);
}
