//! Common utilities and types shared by every benchmark component.
//!
//! This module provides:
//! 1. **Row indices:** The index type used by stores, patterns, and predictors.
//! 2. **Constants:** Cache geometry and model limits.
//! 3. **Error Handling:** The crate-wide error taxonomy and `Result` alias.

/// Common constants (cache line size, n-gram limits, tolerances).
pub mod constants;

/// Error taxonomy for loading, prediction, and benchmarking.
pub mod error;

pub use constants::{CACHE_LINE_BYTES, DEFAULT_TOLERANCE, MAX_NGRAM_ORDER};
pub use error::{BenchError, Result};

/// Index of a row in an [`EmbeddingStore`](crate::store::EmbeddingStore).
pub type RowIndex = usize;
