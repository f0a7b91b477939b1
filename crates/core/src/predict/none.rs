//! Baseline predictor.
//!
//! Never predicts, so the accessor issues no hints. Every sweep measures
//! this first and compares candidates against it.

use super::Predictor;
use crate::common::RowIndex;
use crate::pattern::AccessPattern;

/// Predictor that always returns "no prediction".
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPredictor;

impl Predictor for NoPredictor {
    #[inline(always)]
    fn predict(&mut self, _pattern: &AccessPattern, _position: usize) -> Option<RowIndex> {
        None
    }

    fn name(&self) -> String {
        "none".to_string()
    }
}
