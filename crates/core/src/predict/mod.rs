//! Next-row predictors.
//!
//! This module contains the interface and implementations for strategies
//! that decide which row to hint ahead of need: no prediction (baseline),
//! fixed lookahead, first-order Markov, and n-gram with backoff.

pub use self::fixed::FixedLookahead;
pub use self::markov::MarkovNext;
pub use self::ngram::{NGramBackoff, NGramModel};
pub use self::none::NoPredictor;

/// Fixed-distance lookahead into the access pattern.
pub mod fixed;

/// Most-frequent-successor (first-order Markov) predictor.
pub mod markov;

/// N-gram predictor with backoff to shorter contexts.
pub mod ngram;

/// Baseline predictor that never predicts.
pub mod none;

/// Successor counting shared by the trained predictors.
mod tally;

use crate::common::{Result, RowIndex};
use crate::config::Strategy;
use crate::pattern::AccessPattern;

/// Trait for next-row predictors.
///
/// The accessor calls `predict` once per position, in order, after `reset`.
/// Trained state is read-only; only per-pass context (such as a sliding
/// window of recent rows) may change.
pub trait Predictor {
    /// Predicts a row that will be needed after `position`.
    ///
    /// # Arguments
    ///
    /// * `pattern` - The pattern being walked.
    /// * `position` - Current position; context through this position is available.
    ///
    /// # Returns
    ///
    /// The row to hint, or `None` when there is no evidence for a guess.
    fn predict(&mut self, pattern: &AccessPattern, position: usize) -> Option<RowIndex>;

    /// Clears per-pass context before a new pass over a pattern.
    fn reset(&mut self) {}

    /// How many positions ahead the prediction targets.
    fn horizon(&self) -> usize {
        1
    }

    /// Short name used in logs and reports.
    fn name(&self) -> String;
}

/// Enum wrapper for static dispatch of predictors.
/// This avoids vtable lookups in the per-row loop.
#[derive(Debug, Clone)]
pub enum AnyPredictor {
    /// Baseline, never predicts.
    None(NoPredictor),
    /// Predicts the row `k` positions ahead.
    Lookahead(FixedLookahead),
    /// Predicts the most frequent successor of the current row.
    Markov(MarkovNext),
    /// Predicts from the longest matching recent context.
    NGram(NGramBackoff),
}

impl AnyPredictor {
    /// Builds (and trains, where needed) the predictor for `strategy`.
    ///
    /// Trained strategies learn from `training`. The same pattern is usually
    /// the one being benchmarked, which inflates reported accuracy.
    pub fn build(strategy: Strategy, training: &AccessPattern) -> Result<Self> {
        Ok(match strategy {
            Strategy::None => Self::None(NoPredictor),
            Strategy::Lookahead { distance } => Self::Lookahead(FixedLookahead::new(distance)),
            Strategy::Markov => Self::Markov(MarkovNext::train(training)),
            Strategy::NGram { order } => Self::NGram(NGramBackoff::train(training, order)?),
        })
    }
}

impl Predictor for AnyPredictor {
    #[inline(always)]
    fn predict(&mut self, pattern: &AccessPattern, position: usize) -> Option<RowIndex> {
        match self {
            Self::None(p) => p.predict(pattern, position),
            Self::Lookahead(p) => p.predict(pattern, position),
            Self::Markov(p) => p.predict(pattern, position),
            Self::NGram(p) => p.predict(pattern, position),
        }
    }

    fn reset(&mut self) {
        match self {
            Self::None(p) => p.reset(),
            Self::Lookahead(p) => p.reset(),
            Self::Markov(p) => p.reset(),
            Self::NGram(p) => p.reset(),
        }
    }

    fn horizon(&self) -> usize {
        match self {
            Self::None(p) => p.horizon(),
            Self::Lookahead(p) => p.horizon(),
            Self::Markov(p) => p.horizon(),
            Self::NGram(p) => p.horizon(),
        }
    }

    fn name(&self) -> String {
        match self {
            Self::None(p) => p.name(),
            Self::Lookahead(p) => p.name(),
            Self::Markov(p) => p.name(),
            Self::NGram(p) => p.name(),
        }
    }
}

/// Prediction accuracy over one pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Accuracy {
    /// Predictions that matched the row actually needed.
    pub correct: usize,
    /// Positions where a prediction was produced and could be scored.
    pub predicted: usize,
    /// Positions that could be scored at all.
    pub scored_positions: usize,
}

impl Accuracy {
    /// Fraction of produced predictions that were correct.
    ///
    /// Positions without a prediction are excluded from the denominator.
    /// Returns `None` when no prediction was produced.
    pub fn ratio(&self) -> Option<f64> {
        (self.predicted > 0).then(|| self.correct as f64 / self.predicted as f64)
    }

    /// Fraction of scorable positions where a prediction was produced.
    pub fn coverage(&self) -> Option<f64> {
        (self.scored_positions > 0).then(|| self.predicted as f64 / self.scored_positions as f64)
    }
}

/// Measures how often `predictor` names the row `horizon()` positions ahead.
///
/// Every position is fed to the predictor so that context advances exactly
/// as it does during a timed pass; only positions with a target inside the
/// pattern are scored.
pub fn measure_accuracy<P: Predictor>(predictor: &mut P, pattern: &AccessPattern) -> Accuracy {
    predictor.reset();
    let horizon = predictor.horizon();
    let mut accuracy = Accuracy::default();

    for position in 0..pattern.len() {
        let prediction = predictor.predict(pattern, position);
        let Some(actual) = position.checked_add(horizon).and_then(|t| pattern.get(t)) else {
            continue;
        };
        accuracy.scored_positions += 1;
        if let Some(predicted) = prediction {
            accuracy.predicted += 1;
            if predicted == actual {
                accuracy.correct += 1;
            }
        }
    }

    predictor.reset();
    accuracy
}
