//! N-gram Backoff Predictor.
//!
//! Learns, for every order k in `1..=n`, which row most often follows each
//! context of k−1 rows. Prediction tries the longest context first and
//! backs off one order at a time; order 1 has the empty context and answers
//! with the globally most frequent row.
//!
//! Contexts are fixed-capacity inline arrays hashed by content, and the
//! sliding window of recent rows is a fixed-size buffer, so a prediction
//! never allocates.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `train()`: O(n · L) for order n and pattern length L
//!   - `predict()`: O(n) hash lookups in the worst case
//! - **Space Complexity:** O(n · L) contexts in the worst case
//! - **Best Case:** Repetitive text where short contexts determine the next word
//! - **Worst Case:** High-entropy sequences; every lookup backs off to order 1

use std::collections::HashMap;

use tracing::debug;

use super::Predictor;
use super::tally::SuccessorTally;
use crate::common::{BenchError, MAX_NGRAM_ORDER, Result, RowIndex};
use crate::pattern::AccessPattern;

/// Longest context any order can have.
const MAX_CONTEXT: usize = MAX_NGRAM_ORDER - 1;

/// Context key: up to `MAX_CONTEXT` row indices stored inline.
///
/// Unused slots are always zero so equality and hashing only see the prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct Context {
    len: u8,
    rows: [RowIndex; MAX_CONTEXT],
}

impl Context {
    fn from_slice(rows: &[RowIndex]) -> Self {
        let mut key = Self {
            len: rows.len() as u8,
            rows: [0; MAX_CONTEXT],
        };
        key.rows[..rows.len()].copy_from_slice(rows);
        key
    }
}

/// Sliding buffer of the most recent rows, oldest first.
#[derive(Debug, Clone, Copy)]
struct ContextWindow {
    rows: [RowIndex; MAX_CONTEXT],
    len: usize,
    capacity: usize,
}

impl ContextWindow {
    const fn new(capacity: usize) -> Self {
        Self {
            rows: [0; MAX_CONTEXT],
            len: 0,
            capacity,
        }
    }

    #[inline(always)]
    fn push(&mut self, row: RowIndex) {
        if self.capacity == 0 {
            return;
        }
        if self.len == self.capacity {
            self.rows.copy_within(1..self.capacity, 0);
            self.rows[self.capacity - 1] = row;
        } else {
            self.rows[self.len] = row;
            self.len += 1;
        }
    }

    #[inline(always)]
    fn as_slice(&self) -> &[RowIndex] {
        &self.rows[..self.len]
    }

    fn clear(&mut self) {
        self.len = 0;
    }
}

/// Trained n-gram tables, one per order.
#[derive(Debug, Clone)]
pub struct NGramModel {
    /// `orders[k - 1]` maps a context of k−1 rows to its best successor.
    orders: Vec<HashMap<Context, RowIndex>>,
}

impl NGramModel {
    /// Counts every k-gram of `rows` for k in `1..=order`.
    ///
    /// Fails with `InvalidConfig` unless `1 <= order <= MAX_NGRAM_ORDER`.
    pub fn train(rows: &[RowIndex], order: usize) -> Result<Self> {
        if order == 0 || order > MAX_NGRAM_ORDER {
            return Err(BenchError::InvalidConfig(format!(
                "n-gram order {order} outside 1..={MAX_NGRAM_ORDER}"
            )));
        }

        let orders = (1..=order)
            .map(|k| {
                let mut tally = SuccessorTally::new();
                for gram in rows.windows(k) {
                    let (context, next) = gram.split_at(k - 1);
                    tally.record(Context::from_slice(context), next[0]);
                }
                tally.freeze()
            })
            .collect();

        Ok(Self { orders })
    }

    /// Highest order the model was trained with.
    pub fn order(&self) -> usize {
        self.orders.len()
    }

    /// Number of distinct contexts learned at order `k`.
    pub fn contexts_at(&self, k: usize) -> usize {
        k.checked_sub(1)
            .and_then(|i| self.orders.get(i))
            .map_or(0, HashMap::len)
    }

    /// Predicts the row following `context`, backing off to shorter contexts.
    ///
    /// Only the last `order() - 1` rows of `context` are used. Orders whose
    /// context would be longer than `context` are skipped.
    pub fn predict_after(&self, context: &[RowIndex]) -> Option<RowIndex> {
        for k in (1..=self.orders.len()).rev() {
            let width = k - 1;
            if context.len() < width {
                continue;
            }
            let key = Context::from_slice(&context[context.len() - width..]);
            if let Some(&next) = self.orders[k - 1].get(&key) {
                return Some(next);
            }
        }
        None
    }
}

/// N-gram predictor: a trained model plus the per-pass context window.
#[derive(Debug, Clone)]
pub struct NGramBackoff {
    model: NGramModel,
    window: ContextWindow,
}

impl NGramBackoff {
    /// Trains an order-`order` model on `pattern`.
    pub fn train(pattern: &AccessPattern, order: usize) -> Result<Self> {
        let model = NGramModel::train(pattern.indices(), order)?;
        debug!(
            order,
            positions = pattern.len(),
            contexts = model.contexts_at(order),
            "trained n-gram model"
        );
        Ok(Self::from_model(model))
    }

    /// Wraps an already trained model.
    pub fn from_model(model: NGramModel) -> Self {
        let window = ContextWindow::new(model.order().saturating_sub(1));
        Self { model, window }
    }

    /// The trained model.
    pub fn model(&self) -> &NGramModel {
        &self.model
    }
}

impl Predictor for NGramBackoff {
    /// Slides the row at `position` into the window and predicts its successor.
    #[inline(always)]
    fn predict(&mut self, pattern: &AccessPattern, position: usize) -> Option<RowIndex> {
        if let Some(row) = pattern.get(position) {
            self.window.push(row);
        }
        self.model.predict_after(self.window.as_slice())
    }

    fn reset(&mut self) {
        self.window.clear();
    }

    fn name(&self) -> String {
        format!("ngram({})", self.model.order())
    }
}
