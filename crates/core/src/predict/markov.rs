//! Markov Next-Row Predictor.
//!
//! Learns, for every row, which row most often follows it in a training
//! pattern, and predicts that successor whenever the row is read again.
//!
//! Ties go to the successor that reached the maximum count first: for the
//! training sequence `0 → 1, 0 → 2` the table keeps `0 → 1`.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `train()`: O(L) for a pattern of length L
//!   - `predict()`: O(1) expected (one hash lookup)
//! - **Space Complexity:** O(R) where R is the number of distinct rows with a successor

use std::collections::HashMap;

use tracing::debug;

use super::Predictor;
use super::tally::SuccessorTally;
use crate::common::RowIndex;
use crate::pattern::AccessPattern;

/// First-order Markov predictor backed by a frozen transition table.
#[derive(Debug, Clone, Default)]
pub struct MarkovNext {
    /// Row index to its most frequent successor.
    transitions: HashMap<RowIndex, RowIndex>,
}

impl MarkovNext {
    /// Builds the transition table from consecutive pairs of `pattern`.
    pub fn train(pattern: &AccessPattern) -> Self {
        let mut tally = SuccessorTally::new();
        for pair in pattern.indices().windows(2) {
            tally.record(pair[0], pair[1]);
        }
        let transitions = tally.freeze();
        debug!(
            positions = pattern.len(),
            entries = transitions.len(),
            "trained markov transition table"
        );
        Self { transitions }
    }

    /// Most frequent successor of `row`, if one was observed.
    #[inline(always)]
    pub fn successor(&self, row: RowIndex) -> Option<RowIndex> {
        self.transitions.get(&row).copied()
    }

    /// Number of rows with a recorded successor.
    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    /// Returns `true` if no transition was learned.
    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }
}

impl Predictor for MarkovNext {
    /// Looks up the successor of the row at `position`.
    #[inline(always)]
    fn predict(&mut self, pattern: &AccessPattern, position: usize) -> Option<RowIndex> {
        pattern.get(position).and_then(|row| self.successor(row))
    }

    fn name(&self) -> String {
        "markov".to_string()
    }
}
