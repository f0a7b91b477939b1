//! Strategy parameter sweep.
//!
//! For each parameter value the sweep evaluates the baseline and the
//! candidate back to back, so both see the same machine state, and keeps
//! the step with the strictly greatest speedup. The first step seeds the
//! best; a later step with an equal speedup does not replace it.

use std::ops::RangeInclusive;

use tracing::info;

use super::clock::{Clock, MonotonicClock};
use super::harness::BenchmarkHarness;
use crate::common::{BenchError, Result};
use crate::config::StrategyFamily;
use crate::hint::{CacheHint, PrefetchHint};
use crate::pattern::AccessPattern;
use crate::predict::{AnyPredictor, NoPredictor, Predictor};
use crate::stats::{SweepReport, SweepStep};
use crate::store::EmbeddingStore;

/// Searches a strategy parameter for the best speedup over the baseline.
#[derive(Debug, Clone)]
pub struct SweepController<H = CacheHint, C = MonotonicClock> {
    harness: BenchmarkHarness<H, C>,
    repetitions: usize,
}

impl<H: PrefetchHint, C: Clock> SweepController<H, C> {
    /// Creates a sweep that runs `repetitions` passes per strategy per step.
    pub const fn new(harness: BenchmarkHarness<H, C>, repetitions: usize) -> Self {
        Self {
            harness,
            repetitions,
        }
    }

    /// The harness, including its reference reduction value.
    pub const fn harness(&self) -> &BenchmarkHarness<H, C> {
        &self.harness
    }

    /// Releases the harness.
    pub fn into_harness(self) -> BenchmarkHarness<H, C> {
        self.harness
    }

    /// Sweeps `family` over `range` against the `NoPredictor` baseline.
    ///
    /// Trained families (n-gram) are retrained on `pattern` for every step.
    pub fn sweep(
        &mut self,
        store: &EmbeddingStore,
        pattern: &AccessPattern,
        family: StrategyFamily,
        range: RangeInclusive<usize>,
    ) -> Result<SweepReport> {
        self.sweep_with(store, pattern, family.parameter_name(), range, |parameter| {
            AnyPredictor::build(family.strategy(parameter), pattern)
        })
    }

    /// Sweeps an arbitrary predictor constructor over `range`.
    ///
    /// # Arguments
    ///
    /// * `store` - Rows to read.
    /// * `pattern` - Positions to visit.
    /// * `parameter_name` - Label for reports.
    /// * `range` - Inclusive parameter values, visited in ascending order.
    /// * `build` - Constructs the candidate predictor for one parameter value.
    ///
    /// # Returns
    ///
    /// Every step and the best one, `InvalidConfig` for an empty range, or
    /// the first harness error (which aborts the remaining steps).
    pub fn sweep_with<P, F>(
        &mut self,
        store: &EmbeddingStore,
        pattern: &AccessPattern,
        parameter_name: &str,
        range: RangeInclusive<usize>,
        mut build: F,
    ) -> Result<SweepReport>
    where
        P: Predictor,
        F: FnMut(usize) -> Result<P>,
    {
        if range.is_empty() {
            return Err(BenchError::InvalidConfig(format!(
                "sweep range {}..={} is empty",
                range.start(),
                range.end()
            )));
        }

        let mut steps = Vec::with_capacity(range.clone().count());
        let mut best: Option<SweepStep> = None;

        for parameter in range {
            let baseline =
                self.harness
                    .evaluate(store, pattern, || Ok(NoPredictor), self.repetitions)?;
            let candidate =
                self.harness
                    .evaluate(store, pattern, || build(parameter), self.repetitions)?;
            let step = SweepStep::new(parameter, &baseline, &candidate, self.harness.tolerance());

            info!(
                parameter_name,
                parameter,
                baseline_mean_ms = step.baseline_mean_ms,
                candidate_mean_ms = step.candidate_mean_ms,
                speedup = step.speedup,
                results_match = step.results_match,
                "sweep step"
            );

            best = match best {
                Some(current) if step.speedup <= current.speedup => Some(current),
                _ => Some(step),
            };
            steps.push(step);
        }

        // The range was non-empty, so at least one step was recorded.
        let best = best.ok_or_else(|| {
            BenchError::InvalidConfig("sweep produced no steps".to_string())
        })?;
        info!(
            parameter_name,
            parameter = best.parameter,
            speedup = best.speedup,
            "best configuration"
        );

        Ok(SweepReport {
            parameter_name: parameter_name.to_string(),
            steps,
            best,
        })
    }
}
