//! Monotonic clock abstraction.
//!
//! The accessor reads the clock exactly twice per pass. Tests inject clocks
//! that count reads or advance by fixed steps.

use std::time::{Duration, Instant};

/// Source of monotonic timestamps.
pub trait Clock {
    /// Time elapsed since an arbitrary fixed origin.
    ///
    /// Successive readings never decrease.
    fn now(&self) -> Duration;
}

impl<C: Clock + ?Sized> Clock for &C {
    #[inline(always)]
    fn now(&self) -> Duration {
        (**self).now()
    }
}

/// Clock backed by `std::time::Instant` (nanosecond resolution on Linux).
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    /// Creates a clock whose origin is now.
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    #[inline(always)]
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}
