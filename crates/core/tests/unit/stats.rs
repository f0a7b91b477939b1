//! # Statistics Tests
//!
//! Mean and population variance, the speedup edge cases, and report
//! serialization.

use std::time::Duration;

use pretty_assertions::assert_eq;
use rowfetch_core::stats::*;

fn stats(strategy: &str, millis: &[u64], reduction: f64) -> RunStatistics {
    let durations: Vec<Duration> = millis.iter().map(|&m| Duration::from_millis(m)).collect();
    RunStatistics::from_samples(strategy.to_string(), &durations, vec![reduction; millis.len()])
}

#[test]
fn test_population_variance() {
    let (mean, variance) = mean_and_variance(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
    assert_eq!(mean, 5.0);
    assert_eq!(variance, 4.0);
}

#[test]
fn test_empty_and_single_samples() {
    assert_eq!(mean_and_variance(&[]), (0.0, 0.0));
    assert_eq!(mean_and_variance(&[3.5]), (3.5, 0.0));
}

#[test]
fn test_identical_inexact_samples_have_zero_variance() {
    let (mean, variance) = mean_and_variance(&[0.1; 5]);
    assert_eq!(mean, 0.1);
    assert_eq!(variance, 0.0);

    let (mean, variance) = mean_and_variance(&[0.501_503_5; 7]);
    assert_eq!(mean, 0.501_503_5);
    assert_eq!(variance, 0.0);
}

#[test]
fn test_run_statistics_from_durations() {
    let run = stats("none", &[1, 3], 0.5);
    assert_eq!(run.durations_ms, vec![1.0, 3.0]);
    assert_eq!(run.mean_ms, 2.0);
    assert_eq!(run.variance_ms, 1.0);
    assert_eq!(run.stddev_ms(), 1.0);
    assert_eq!(run.repetitions(), 2);
    assert_eq!(run.reduction(), Some(0.5));
}

#[test]
fn test_speedup_edge_cases() {
    assert_eq!(speedup(10.0, 5.0), 2.0);
    assert_eq!(speedup(4.0, 8.0), 0.5);
    assert_eq!(speedup(0.0, 0.0), 1.0);
    assert_eq!(speedup(3.0, 0.0), f64::INFINITY);
}

#[test]
fn test_results_match_uses_tolerance() {
    let a = stats("none", &[1], 1.0);
    let b = stats("markov", &[1], 1.0 + 1e-12);
    let c = stats("markov", &[1], 1.5);
    let empty = RunStatistics::from_samples("none".to_string(), &[], Vec::new());
    assert!(results_match(&a, &b, 1e-10));
    assert!(!results_match(&a, &c, 1e-10));
    assert!(!results_match(&a, &empty, 1e-10));
}

#[test]
fn test_sweep_step_summarizes_pair() {
    let baseline = stats("none", &[8, 8], 2.0);
    let candidate = stats("lookahead(4)", &[4, 4], 2.0);
    let step = SweepStep::new(4, &baseline, &candidate, 1e-10);
    assert_eq!(step.parameter, 4);
    assert_eq!(step.baseline_mean_ms, 8.0);
    assert_eq!(step.candidate_mean_ms, 4.0);
    assert_eq!(step.speedup, 2.0);
    assert!(step.results_match);
}

#[test]
fn test_sweep_report_json_schema() {
    let baseline = stats("none", &[6], 1.0);
    let candidate = stats("lookahead(2)", &[3], 1.0);
    let step = SweepStep::new(2, &baseline, &candidate, 1e-10);
    let report = SweepReport {
        parameter_name: "PREFETCH_AHEAD".to_string(),
        steps: vec![step],
        best: step,
    };

    let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
    assert_eq!(json["parameter_name"], "PREFETCH_AHEAD");
    assert_eq!(json["steps"].as_array().map(Vec::len), Some(1));
    assert_eq!(json["best"]["parameter"], 2);
    assert_eq!(json["best"]["speedup"], 2.0);
    assert_eq!(json["best"]["results_match"], true);
}
