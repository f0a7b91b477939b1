//! Crate-wide constants.

/// Cache line size assumed when hinting whole rows (bytes).
///
/// Matches the line size of current x86_64 and most aarch64 parts. A wrong
/// guess only changes how many hints are issued, never the computed value.
pub const CACHE_LINE_BYTES: usize = 64;

/// Highest n-gram order `NGramBackoff` accepts.
///
/// Contexts are stored inline as `MAX_NGRAM_ORDER - 1` indices, so lookups
/// never allocate.
pub const MAX_NGRAM_ORDER: usize = 8;

/// Absolute tolerance when comparing reduction values across runs.
pub const DEFAULT_TOLERANCE: f64 = 1e-10;

/// Milliseconds per nanosecond, used when converting clock readings.
pub const MS_PER_NS: f64 = 1e-6;
