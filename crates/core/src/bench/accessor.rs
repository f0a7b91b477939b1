//! Prefetching lookup-and-reduce pass.
//!
//! One pass walks the access pattern front to back. At every position it
//! first asks the predictor for a future row and hints it, then reads the
//! current row and folds its mean square into the accumulator. The result
//! is the mean of the per-row mean squares.
//!
//! The reduction is one multiply-add per value, so
//! cache misses, not arithmetic, dominate the measured time. Hints only
//! change latency; the value is computed in the same order regardless of
//! strategy and is bit-identical across strategies.

use std::time::Duration;

use tracing::warn;

use super::clock::{Clock, MonotonicClock};
use crate::common::{BenchError, Result};
use crate::hint::{CacheHint, PrefetchHint};
use crate::pattern::AccessPattern;
use crate::predict::Predictor;
use crate::store::EmbeddingStore;

/// Result of one pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AccessOutcome {
    /// Mean over positions of each row's mean square.
    pub value: f64,
    /// Wall-clock time of the whole pass.
    pub elapsed: Duration,
}

/// Mean of the squared values of `row`.
#[inline(always)]
pub fn row_mean_square(row: &[f64]) -> f64 {
    row.iter().map(|v| v * v).sum::<f64>() / row.len() as f64
}

/// Drives timed passes with an injected hint and clock.
#[derive(Debug, Clone, Default)]
pub struct PrefetchingAccessor<H = CacheHint, C = MonotonicClock> {
    hint: H,
    clock: C,
}

impl<H: PrefetchHint, C: Clock> PrefetchingAccessor<H, C> {
    /// Creates an accessor that hints through `hint` and times with `clock`.
    pub const fn new(hint: H, clock: C) -> Self {
        Self { hint, clock }
    }

    /// The hint implementation.
    pub const fn hint(&self) -> &H {
        &self.hint
    }

    /// The clock.
    pub const fn clock(&self) -> &C {
        &self.clock
    }

    /// Runs one pass over `pattern`.
    ///
    /// # Arguments
    ///
    /// * `store` - Rows to read. Not modified.
    /// * `pattern` - Positions to visit. Not modified.
    /// * `predictor` - Strategy choosing which row to hint; its per-pass context is reset first.
    ///
    /// # Returns
    ///
    /// The reduction value and the elapsed time, `EmptyPattern` (before the
    /// clock is read) for an empty pattern, or `OutOfRange` if the pattern
    /// refers to a row `store` does not have.
    pub fn run<P>(
        &self,
        store: &EmbeddingStore,
        pattern: &AccessPattern,
        predictor: &mut P,
    ) -> Result<AccessOutcome>
    where
        P: Predictor + ?Sized,
    {
        if pattern.is_empty() {
            return Err(BenchError::EmptyPattern);
        }
        predictor.reset();

        let start = self.clock.now();
        let mut total = 0.0;
        for (position, &index) in pattern.indices().iter().enumerate() {
            if let Some(predicted) = predictor.predict(pattern, position) {
                // Out-of-range predictions are not hinted.
                if let Some(row) = store.get(predicted) {
                    self.hint.prefetch(row);
                }
            }
            total += row_mean_square(store.row(index)?);
        }
        let total = std::hint::black_box(total);
        let elapsed = self.clock.now().saturating_sub(start);

        if elapsed.is_zero() {
            warn!(
                positions = pattern.len(),
                "pass finished in zero measurable time; speedups will be meaningless"
            );
        }

        Ok(AccessOutcome {
            value: total / pattern.len() as f64,
            elapsed,
        })
    }
}
