//! Fixed Lookahead Predictor.
//!
//! Reads the access pattern itself `k` positions ahead. This is the oracle
//! software-prefetching case: the future is known, and the only question is
//! how far ahead to hint so the line arrives just before it is needed.
//!
//! # Performance
//!
//! - **Time Complexity:** `predict()`: O(1)
//! - **Space Complexity:** O(1), stateless
//! - **Best Case:** `k` matches memory latency divided by per-row compute time
//! - **Worst Case:** `k` so large that hinted lines are evicted before use

use super::Predictor;
use crate::common::RowIndex;
use crate::pattern::AccessPattern;

/// Predicts the row at `position + distance`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedLookahead {
    distance: usize,
}

impl FixedLookahead {
    /// Creates a lookahead predictor.
    ///
    /// # Arguments
    ///
    /// * `distance` - Positions ahead to predict. Zero predicts the current row.
    pub const fn new(distance: usize) -> Self {
        Self { distance }
    }

    /// The lookahead distance.
    pub const fn distance(&self) -> usize {
        self.distance
    }
}

impl Predictor for FixedLookahead {
    /// Returns `pattern[position + distance]`, or `None` past the end.
    #[inline(always)]
    fn predict(&mut self, pattern: &AccessPattern, position: usize) -> Option<RowIndex> {
        position
            .checked_add(self.distance)
            .and_then(|target| pattern.get(target))
    }

    fn horizon(&self) -> usize {
        self.distance
    }

    fn name(&self) -> String {
        format!("lookahead({})", self.distance)
    }
}
