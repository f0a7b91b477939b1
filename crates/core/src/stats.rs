//! Timing statistics and reporting.
//!
//! This module turns raw pass timings into the numbers a run reports. It provides:
//! 1. **Run statistics:** Per-strategy duration samples with mean and population variance.
//! 2. **Speedup:** Baseline mean over candidate mean, with the zero-duration cases pinned down.
//! 3. **Sweep records:** One row per parameter value plus the best configuration.
//! 4. **Comparison records:** A single strategy against the baseline, with prediction accuracy.
//!
//! Records serialize to JSON with a stable schema and print as plain-text tables.

use std::time::Duration;

use serde::Serialize;

use crate::common::Result;
use crate::common::constants::MS_PER_NS;

/// Timing samples and reduction values for one (strategy, parameter) pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunStatistics {
    /// Strategy name, e.g. `lookahead(4)`.
    pub strategy: String,
    /// Wall-clock duration of each pass in milliseconds.
    pub durations_ms: Vec<f64>,
    /// Reduction value of each pass.
    pub reductions: Vec<f64>,
    /// Mean pass duration in milliseconds.
    pub mean_ms: f64,
    /// Population variance of pass durations (ms²).
    pub variance_ms: f64,
}

impl RunStatistics {
    /// Builds statistics from per-pass durations and reduction values.
    pub fn from_samples(strategy: String, durations: &[Duration], reductions: Vec<f64>) -> Self {
        let durations_ms: Vec<f64> = durations.iter().map(|d| duration_ms(*d)).collect();
        let (mean_ms, variance_ms) = mean_and_variance(&durations_ms);
        Self {
            strategy,
            durations_ms,
            reductions,
            mean_ms,
            variance_ms,
        }
    }

    /// Standard deviation of pass durations in milliseconds.
    pub fn stddev_ms(&self) -> f64 {
        self.variance_ms.sqrt()
    }

    /// Number of timed passes.
    pub fn repetitions(&self) -> usize {
        self.durations_ms.len()
    }

    /// Reduction value of the first pass, if any pass ran.
    pub fn reduction(&self) -> Option<f64> {
        self.reductions.first().copied()
    }
}

/// Converts a duration to fractional milliseconds.
#[inline]
pub fn duration_ms(duration: Duration) -> f64 {
    duration.as_nanos() as f64 * MS_PER_NS
}

/// Mean and population variance (divide by `n`, not `n - 1`).
///
/// Returns `(0.0, 0.0)` for an empty slice. Samples are shifted by the first
/// one before summing, so identical samples give exactly that value and a
/// variance of exactly zero.
pub fn mean_and_variance(samples: &[f64]) -> (f64, f64) {
    let Some(&pivot) = samples.first() else {
        return (0.0, 0.0);
    };
    let n = samples.len() as f64;
    let offset = samples.iter().map(|s| s - pivot).sum::<f64>() / n;
    let variance = samples
        .iter()
        .map(|s| (s - pivot - offset).powi(2))
        .sum::<f64>()
        / n;
    (pivot + offset, variance)
}

/// Baseline mean duration divided by candidate mean duration.
///
/// When the candidate mean is zero the ratio is `1.0` if the baseline is
/// also zero (nothing measurable changed) and `+inf` otherwise.
pub fn speedup(baseline_mean_ms: f64, candidate_mean_ms: f64) -> f64 {
    if candidate_mean_ms > 0.0 {
        baseline_mean_ms / candidate_mean_ms
    } else if baseline_mean_ms > 0.0 {
        f64::INFINITY
    } else {
        1.0
    }
}

/// Returns `true` if both runs agree on the reduction value within `tolerance`.
pub fn results_match(baseline: &RunStatistics, candidate: &RunStatistics, tolerance: f64) -> bool {
    match (baseline.reduction(), candidate.reduction()) {
        (Some(a), Some(b)) => (a - b).abs() <= tolerance,
        _ => false,
    }
}

/// One sweep step: the baseline and one candidate parameter value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SweepStep {
    /// Parameter value of the candidate.
    pub parameter: usize,
    /// Baseline mean pass duration (ms).
    pub baseline_mean_ms: f64,
    /// Baseline standard deviation (ms).
    pub baseline_stddev_ms: f64,
    /// Candidate mean pass duration (ms).
    pub candidate_mean_ms: f64,
    /// Candidate standard deviation (ms).
    pub candidate_stddev_ms: f64,
    /// Baseline mean over candidate mean.
    pub speedup: f64,
    /// Whether both strategies produced the same reduction value.
    pub results_match: bool,
}

impl SweepStep {
    /// Summarizes one baseline/candidate pair.
    pub fn new(
        parameter: usize,
        baseline: &RunStatistics,
        candidate: &RunStatistics,
        tolerance: f64,
    ) -> Self {
        Self {
            parameter,
            baseline_mean_ms: baseline.mean_ms,
            baseline_stddev_ms: baseline.stddev_ms(),
            candidate_mean_ms: candidate.mean_ms,
            candidate_stddev_ms: candidate.stddev_ms(),
            speedup: speedup(baseline.mean_ms, candidate.mean_ms),
            results_match: results_match(baseline, candidate, tolerance),
        }
    }

    /// Prints this step in the per-step report format.
    pub fn print(&self, parameter_name: &str) {
        println!("\nTesting {} = {}", parameter_name, self.parameter);
        println!(
            "  baseline access time   {:.4} ± {:.4} ms",
            self.baseline_mean_ms, self.baseline_stddev_ms
        );
        println!(
            "  prefetched access time {:.4} ± {:.4} ms",
            self.candidate_mean_ms, self.candidate_stddev_ms
        );
        println!("  speedup                {:.5}x", self.speedup);
        println!("  results match          {}", self.results_match);
    }
}

/// Outcome of a parameter sweep.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SweepReport {
    /// Name of the swept parameter (e.g. `PREFETCH_AHEAD`).
    pub parameter_name: String,
    /// Every step in sweep order.
    pub steps: Vec<SweepStep>,
    /// Step with the strictly greatest speedup; earlier steps win ties.
    pub best: SweepStep,
}

impl SweepReport {
    /// Prints every step followed by the best configuration.
    pub fn print(&self) {
        for step in &self.steps {
            step.print(&self.parameter_name);
        }
        self.print_best();
    }

    /// Prints the best configuration summary.
    pub fn print_best(&self) {
        let best = &self.best;
        println!("\n==========================================================");
        println!("BEST CONFIGURATION");
        println!("==========================================================");
        println!("{:<24} {}", self.parameter_name, best.parameter);
        println!(
            "baseline access time     {:.4} ± {:.4} ms",
            best.baseline_mean_ms, best.baseline_stddev_ms
        );
        println!(
            "prefetched access time   {:.4} ± {:.4} ms",
            best.candidate_mean_ms, best.candidate_stddev_ms
        );
        println!("best speedup             {:.5}x", best.speedup);
        println!("==========================================================");
    }

    /// Serializes the report as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Outcome of comparing one strategy against the baseline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonReport {
    /// Candidate strategy name.
    pub strategy: String,
    /// Fraction of produced predictions that were correct, if any were produced.
    pub accuracy: Option<f64>,
    /// Fraction of scorable positions that received a prediction.
    pub coverage: Option<f64>,
    /// Baseline mean pass duration (ms).
    pub baseline_mean_ms: f64,
    /// Baseline standard deviation (ms).
    pub baseline_stddev_ms: f64,
    /// Candidate mean pass duration (ms).
    pub candidate_mean_ms: f64,
    /// Candidate standard deviation (ms).
    pub candidate_stddev_ms: f64,
    /// Baseline mean over candidate mean.
    pub speedup: f64,
    /// Whether both strategies produced the same reduction value.
    pub results_match: bool,
}

impl ComparisonReport {
    /// Prints the comparison.
    pub fn print(&self) {
        println!("\n==========================================================");
        println!("PREFETCH COMPARISON: {}", self.strategy);
        println!("==========================================================");
        match self.accuracy {
            Some(accuracy) => println!("prediction accuracy      {:.2}%", accuracy * 100.0),
            None => println!("prediction accuracy      n/a (no predictions)"),
        }
        if let Some(coverage) = self.coverage {
            println!("prediction coverage      {:.2}%", coverage * 100.0);
        }
        println!(
            "baseline access time     {:.4} ± {:.4} ms",
            self.baseline_mean_ms, self.baseline_stddev_ms
        );
        println!(
            "prefetched access time   {:.4} ± {:.4} ms",
            self.candidate_mean_ms, self.candidate_stddev_ms
        );
        println!("speedup                  {:.5}x", self.speedup);
        println!("results match            {}", self.results_match);
        println!("==========================================================");
    }

    /// Serializes the report as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
