//! Repetition harness and correctness oracle.
//!
//! The harness runs the accessor several times per strategy and turns the
//! timings into `RunStatistics`. It also remembers the first reduction value
//! it sees for a store and pattern; every later pass over the same inputs, of
//! any strategy, must reproduce it within the tolerance. Prefetching may
//! change timing and nothing else, so a disagreement aborts the run with
//! `CorrectnessMismatch`. Passing a different store or pattern starts a new
//! reference.

use tracing::{debug, info};

use super::accessor::PrefetchingAccessor;
use super::clock::{Clock, MonotonicClock};
use crate::common::{BenchError, DEFAULT_TOLERANCE, Result};
use crate::config::Strategy;
use crate::hint::{CacheHint, PrefetchHint};
use crate::pattern::AccessPattern;
use crate::predict::{AnyPredictor, Predictor};
use crate::stats::{RunStatistics, duration_ms};
use crate::store::EmbeddingStore;

/// Identity of the store and pattern a reference value was computed from.
///
/// Buffer addresses plus lengths. Stores and patterns are immutable, so a
/// live input with an unchanged key holds unchanged data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct InputKey {
    store: usize,
    values: usize,
    dimension: usize,
    pattern: usize,
    positions: usize,
}

impl InputKey {
    fn of(store: &EmbeddingStore, pattern: &AccessPattern) -> Self {
        Self {
            store: store.values().as_ptr().addr(),
            values: store.values().len(),
            dimension: store.dimension(),
            pattern: pattern.indices().as_ptr().addr(),
            positions: pattern.len(),
        }
    }
}

/// Runs repeated passes and checks that every pass computes the same value.
#[derive(Debug, Clone)]
pub struct BenchmarkHarness<H = CacheHint, C = MonotonicClock> {
    accessor: PrefetchingAccessor<H, C>,
    tolerance: f64,
    /// First reduction value observed for the current inputs.
    reference: Option<(InputKey, f64)>,
}

impl<H: PrefetchHint, C: Clock> BenchmarkHarness<H, C> {
    /// Creates a harness with the default tolerance (1e-10 absolute).
    pub const fn new(accessor: PrefetchingAccessor<H, C>) -> Self {
        Self::with_tolerance(accessor, DEFAULT_TOLERANCE)
    }

    /// Creates a harness with an explicit absolute tolerance.
    pub const fn with_tolerance(accessor: PrefetchingAccessor<H, C>, tolerance: f64) -> Self {
        Self {
            accessor,
            tolerance,
            reference: None,
        }
    }

    /// The accessor used for every pass.
    pub const fn accessor(&self) -> &PrefetchingAccessor<H, C> {
        &self.accessor
    }

    /// Absolute tolerance for reduction agreement.
    pub const fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Reference reduction value for the most recent inputs, once any pass has run.
    pub fn reference(&self) -> Option<f64> {
        self.reference.map(|(_, value)| value)
    }

    /// Times `repetitions` passes of one strategy.
    ///
    /// # Arguments
    ///
    /// * `store` - Rows to read.
    /// * `pattern` - Positions to visit.
    /// * `build` - Constructs (and trains) the predictor; called once, after the precondition checks.
    /// * `repetitions` - Number of timed passes.
    ///
    /// # Returns
    ///
    /// Per-pass durations with mean and population variance. Fails with
    /// `EmptyPattern` or `InvalidConfig` before any timing, with the
    /// builder's error if training fails, or with `CorrectnessMismatch` when
    /// a pass disagrees with the reference value.
    pub fn evaluate<P, F>(
        &mut self,
        store: &EmbeddingStore,
        pattern: &AccessPattern,
        build: F,
        repetitions: usize,
    ) -> Result<RunStatistics>
    where
        P: Predictor,
        F: FnOnce() -> Result<P>,
    {
        if pattern.is_empty() {
            return Err(BenchError::EmptyPattern);
        }
        if repetitions == 0 {
            return Err(BenchError::InvalidConfig(
                "repetitions must be at least 1".to_string(),
            ));
        }

        let mut predictor = build()?;
        let strategy = predictor.name();
        let inputs = InputKey::of(store, pattern);
        let mut durations = Vec::with_capacity(repetitions);
        let mut reductions = Vec::with_capacity(repetitions);

        for repetition in 0..repetitions {
            let outcome = self.accessor.run(store, pattern, &mut predictor)?;
            self.check(&strategy, inputs, outcome.value)?;
            debug!(
                strategy = %strategy,
                repetition,
                elapsed_ms = duration_ms(outcome.elapsed),
                value = outcome.value,
                "pass complete"
            );
            durations.push(outcome.elapsed);
            reductions.push(outcome.value);
        }

        let stats = RunStatistics::from_samples(strategy, &durations, reductions);
        info!(
            strategy = %stats.strategy,
            repetitions,
            mean_ms = stats.mean_ms,
            stddev_ms = stats.stddev_ms(),
            "strategy evaluated"
        );
        Ok(stats)
    }

    /// Builds the predictor for `strategy` (training on `pattern`) and evaluates it.
    pub fn evaluate_strategy(
        &mut self,
        store: &EmbeddingStore,
        pattern: &AccessPattern,
        strategy: Strategy,
        repetitions: usize,
    ) -> Result<RunStatistics> {
        self.evaluate(
            store,
            pattern,
            || AnyPredictor::build(strategy, pattern),
            repetitions,
        )
    }

    /// Compares `value` against the reference for `inputs`, adopting it if
    /// there is none yet or the previous reference came from other inputs.
    fn check(&mut self, strategy: &str, inputs: InputKey, value: f64) -> Result<()> {
        let expected = match self.reference {
            Some((key, expected)) if key == inputs => expected,
            previous => {
                if previous.is_some() {
                    debug!(strategy, "inputs changed, new reference value");
                }
                self.reference = Some((inputs, value));
                return Ok(());
            }
        };
        // Written so that a NaN on either side fails the check.
        let agrees = (value - expected).abs() <= self.tolerance;
        if !agrees {
            return Err(BenchError::CorrectnessMismatch {
                strategy: strategy.to_string(),
                expected,
                found: value,
            });
        }
        Ok(())
    }
}
