//! Error definitions.
//!
//! This module defines every failure the benchmark can report. It provides:
//! 1. **Data errors:** Out-of-range rows and malformed matrices.
//! 2. **Precondition errors:** Empty access patterns and invalid configuration.
//! 3. **Consistency errors:** Strategies disagreeing on the reduction value.
//! 4. **Input errors:** Unreadable files and unparsable numbers.
//!
//! None of these are transient. Nothing in the crate retries.

use std::path::PathBuf;

use thiserror::Error;

use super::RowIndex;

/// Errors raised while loading inputs, training predictors, or benchmarking.
#[derive(Debug, Error)]
pub enum BenchError {
    /// A row index is not below the number of rows in the store.
    ///
    /// Raised by `EmbeddingStore::row` and when an access pattern refers
    /// to a row the store does not have.
    #[error("row index {index} out of range (store has {len} rows)")]
    OutOfRange {
        /// The offending index.
        index: RowIndex,
        /// Number of rows in the store.
        len: usize,
    },

    /// A row does not have the declared embedding dimension.
    #[error("malformed input: row {row} has {found} values, expected {expected}")]
    MalformedInput {
        /// Zero-based row number (line number for loaded files).
        row: usize,
        /// Declared dimension.
        expected: usize,
        /// Number of values actually present.
        found: usize,
    },

    /// The access pattern has no positions, so no mean can be formed.
    #[error("access pattern is empty: no input tokens matched the vocabulary")]
    EmptyPattern,

    /// Two runs produced reduction values further apart than the tolerance.
    ///
    /// Prefetching may only change timing. A mismatch means the benchmark
    /// itself is broken, so the sweep aborts instead of reporting speedups.
    #[error(
        "correctness mismatch for {strategy}: expected {expected:.17e}, found {found:.17e}"
    )]
    CorrectnessMismatch {
        /// Strategy whose run disagreed.
        strategy: String,
        /// Reference value from the first run the harness observed.
        expected: f64,
        /// Value produced by the disagreeing run.
        found: f64,
    },

    /// A configuration value is outside its supported range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A matrix value could not be parsed as a floating-point number.
    #[error("parse error on line {line}: {reason}")]
    Parse {
        /// One-based line number in the source file.
        line: usize,
        /// What went wrong.
        reason: String,
    },

    /// A file could not be read.
    #[error("could not read {path:?}: {source}")]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The benchmark thread could not be pinned to the requested CPU.
    #[error("could not pin to CPU {cpu}: {source}")]
    Affinity {
        /// Requested CPU.
        cpu: usize,
        /// Error reported by the operating system.
        #[source]
        source: std::io::Error,
    },

    /// A configuration file was not valid JSON for `BenchConfig`.
    #[error("invalid configuration file: {0}")]
    Config(#[from] serde_json::Error),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, BenchError>;
