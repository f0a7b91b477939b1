//! Successor counting.
//!
//! Both trained predictors reduce "which row follows this context" to a
//! single best answer. Counting is done once during training; the frozen
//! table keeps only the winner per key.

use std::collections::HashMap;
use std::hash::Hash;

use crate::common::RowIndex;

/// Counts for the successors of one key.
#[derive(Debug, Default)]
struct Successors {
    counts: HashMap<RowIndex, u32>,
    best: RowIndex,
    best_count: u32,
}

impl Successors {
    /// Records one occurrence of `next`.
    ///
    /// The best successor changes only when a count strictly exceeds the
    /// current maximum, so the first successor to reach a count keeps it.
    fn record(&mut self, next: RowIndex) {
        let count = self.counts.entry(next).or_insert(0);
        *count += 1;
        if *count > self.best_count {
            self.best_count = *count;
            self.best = next;
        }
    }
}

/// Training-time table of successor counts keyed by context.
#[derive(Debug)]
pub(crate) struct SuccessorTally<K> {
    entries: HashMap<K, Successors>,
}

impl<K: Eq + Hash> SuccessorTally<K> {
    pub(crate) fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Records that `next` followed `key`.
    pub(crate) fn record(&mut self, key: K, next: RowIndex) {
        self.entries.entry(key).or_default().record(next);
    }

    /// Keeps only the best successor per key.
    pub(crate) fn freeze(self) -> HashMap<K, RowIndex> {
        self.entries
            .into_iter()
            .map(|(key, successors)| (key, successors.best))
            .collect()
    }
}
