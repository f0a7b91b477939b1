//! Benchmark machinery.
//!
//! This module times lookup-and-reduce passes under different predictors. It provides:
//! 1. **Clock:** An injectable monotonic clock.
//! 2. **Accessor:** One timed pass that hints predicted rows before reading the current one.
//! 3. **Harness:** Repeated passes with timing statistics and a correctness oracle.
//! 4. **Sweep:** A parameter search for the strategy with the best speedup.
//! 5. **Compare:** One trained strategy against the baseline, with prediction accuracy.
//! 6. **Affinity:** Optional CPU pinning to reduce timing noise.

/// Prefetching lookup-and-reduce pass.
pub mod accessor;

/// CPU pinning for the benchmark thread.
pub mod affinity;

/// Monotonic clock abstraction.
pub mod clock;

/// Single-strategy comparison against the baseline.
pub mod compare;

/// Repetition harness and correctness oracle.
pub mod harness;

/// Strategy parameter sweep.
pub mod sweep;

pub use accessor::{AccessOutcome, PrefetchingAccessor, row_mean_square};
pub use affinity::pin_to_cpu;
pub use clock::{Clock, MonotonicClock};
pub use compare::compare;
pub use harness::BenchmarkHarness;
pub use sweep::SweepController;
