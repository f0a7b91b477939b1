//! Access pattern construction.
//!
//! An access pattern is the order in which rows are looked up. It is derived
//! from a token sequence but stores its own copy of the indices, and keeps
//! the matched tokens alongside for reporting.

use std::ops::Index;

use crate::common::{BenchError, Result, RowIndex};
use crate::store::EmbeddingStore;

/// Ordered sequence of row indices, each valid for the store it was built against.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccessPattern {
    indices: Vec<RowIndex>,
    tokens: Vec<String>,
}

impl AccessPattern {
    /// Builds a pattern from raw indices, validating them against `store`.
    pub fn from_indices(indices: Vec<RowIndex>, store: &EmbeddingStore) -> Result<Self> {
        Self::new(indices, Vec::new(), store.row_count())
    }

    /// Builds a pattern from indices and the tokens they were resolved from.
    ///
    /// # Arguments
    ///
    /// * `indices` - Row indices in lookup order.
    /// * `tokens` - Matched tokens, either empty or one per index.
    /// * `row_count` - Number of rows in the target store.
    ///
    /// # Returns
    ///
    /// The pattern, `OutOfRange` for the first index `>= row_count`, or
    /// `InvalidConfig` when `tokens` is non-empty and its length differs.
    pub fn new(indices: Vec<RowIndex>, tokens: Vec<String>, row_count: usize) -> Result<Self> {
        if let Some(&index) = indices.iter().find(|&&i| i >= row_count) {
            return Err(BenchError::OutOfRange {
                index,
                len: row_count,
            });
        }
        if !tokens.is_empty() && tokens.len() != indices.len() {
            return Err(BenchError::InvalidConfig(format!(
                "{} tokens for {} indices",
                tokens.len(),
                indices.len()
            )));
        }
        Ok(Self { indices, tokens })
    }

    /// Number of positions.
    #[inline]
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Returns `true` if the pattern has no positions.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Row indices in lookup order.
    #[inline]
    pub fn indices(&self) -> &[RowIndex] {
        &self.indices
    }

    /// Row index at `position`, if any.
    #[inline(always)]
    pub fn get(&self, position: usize) -> Option<RowIndex> {
        self.indices.get(position).copied()
    }

    /// Tokens the indices were resolved from (empty for raw patterns).
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Number of distinct rows touched by the pattern.
    pub fn distinct_rows(&self) -> usize {
        let mut seen = self.indices.clone();
        seen.sort_unstable();
        seen.dedup();
        seen.len()
    }
}

impl Index<usize> for AccessPattern {
    type Output = RowIndex;

    #[inline(always)]
    fn index(&self, position: usize) -> &RowIndex {
        &self.indices[position]
    }
}
