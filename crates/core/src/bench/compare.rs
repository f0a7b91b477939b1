//! Single-strategy comparison against the baseline.

use tracing::info;

use super::clock::Clock;
use super::harness::BenchmarkHarness;
use crate::common::Result;
use crate::config::Strategy;
use crate::hint::PrefetchHint;
use crate::pattern::AccessPattern;
use crate::predict::{AnyPredictor, NoPredictor, measure_accuracy};
use crate::stats::{ComparisonReport, results_match, speedup};
use crate::store::EmbeddingStore;

/// Trains `strategy` once, reports its accuracy, and times it against the baseline.
///
/// Accuracy is measured on the same pattern the predictor was trained on
/// and is timed against, so it overstates what unseen text would get.
pub fn compare<H, C>(
    harness: &mut BenchmarkHarness<H, C>,
    store: &EmbeddingStore,
    pattern: &AccessPattern,
    strategy: Strategy,
    repetitions: usize,
) -> Result<ComparisonReport>
where
    H: PrefetchHint,
    C: Clock,
{
    let mut predictor = AnyPredictor::build(strategy, pattern)?;
    let accuracy = measure_accuracy(&mut predictor, pattern);
    if let Some(ratio) = accuracy.ratio() {
        info!(
            strategy = %strategy,
            accuracy_pct = ratio * 100.0,
            predicted = accuracy.predicted,
            scored = accuracy.scored_positions,
            "prediction accuracy"
        );
    }

    let baseline = harness.evaluate(store, pattern, || Ok(NoPredictor), repetitions)?;
    let candidate = harness.evaluate(store, pattern, || Ok(predictor), repetitions)?;

    Ok(ComparisonReport {
        strategy: candidate.strategy.clone(),
        accuracy: accuracy.ratio(),
        coverage: accuracy.coverage(),
        baseline_mean_ms: baseline.mean_ms,
        baseline_stddev_ms: baseline.stddev_ms(),
        candidate_mean_ms: candidate.mean_ms,
        candidate_stddev_ms: candidate.stddev_ms(),
        speedup: speedup(baseline.mean_ms, candidate.mean_ms),
        results_match: results_match(&baseline, &candidate, harness.tolerance()),
    })
}
