//! Predictive prefetching for row-indexed embedding lookups.
//!
//! This crate measures how much software prefetch hints speed up a
//! lookup-and-reduce pass over a dense row matrix. It provides:
//! 1. **Data:** `EmbeddingStore` (contiguous fixed-width rows) and `AccessPattern` (row order).
//! 2. **Prediction:** `NoPredictor`, `FixedLookahead`, `MarkovNext`, and `NGramBackoff`.
//! 3. **Benchmarking:** A prefetching accessor, a repetition harness with a correctness oracle,
//!    and a sweep controller that searches for the best strategy parameter.
//! 4. **Input:** Loaders for GloVe-style matrix files and whitespace token streams.
//! 5. **Reporting:** Timing statistics, human-readable summaries, and JSON export.

/// Common types and constants (row indices, errors, cache geometry).
pub mod common;
/// Benchmark configuration (defaults, strategy selection, hint span).
pub mod config;
/// Benchmark machinery (clock, accessor, harness, sweep, CPU pinning).
pub mod bench;
/// Advisory memory hints (no-op and hardware prefetch).
pub mod hint;
/// Matrix and token stream loaders.
pub mod input;
/// Access pattern construction.
pub mod pattern;
/// Next-row predictors.
pub mod predict;
/// Timing statistics and sweep reporting.
pub mod stats;
/// Embedding row storage.
pub mod store;

/// Root configuration type; use `BenchConfig::default()` or deserialize from JSON.
pub use crate::config::BenchConfig;
/// Crate-wide error and result types.
pub use crate::common::{BenchError, Result, RowIndex};
/// Ordered row lookups to benchmark.
pub use crate::pattern::AccessPattern;
/// Immutable row matrix.
pub use crate::store::EmbeddingStore;
