//! Advisory memory hints.
//!
//! A hint asks the hardware to start pulling a row into cache before it is
//! read. Hints never block, never fail, and never change what the program
//! computes. Whether the hardware honors them is unobservable, so nothing in
//! the crate waits on one.

use std::str::FromStr;

use serde::Deserialize;

use crate::common::{BenchError, CACHE_LINE_BYTES};

/// How much of a row a hint covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HintSpan {
    /// Hint only the cache line holding the first value of the row.
    #[default]
    FirstLine,
    /// Hint every cache line the row occupies.
    WholeRow,
}

impl FromStr for HintSpan {
    type Err = BenchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "first-line" | "line" => Ok(Self::FirstLine),
            "whole-row" | "row" => Ok(Self::WholeRow),
            other => Err(BenchError::InvalidConfig(format!(
                "unknown hint span '{other}' (expected first-line or whole-row)"
            ))),
        }
    }
}

/// Capability to issue an advisory prefetch for a row.
pub trait PrefetchHint {
    /// Requests that `row` be brought into cache.
    ///
    /// Must return immediately and must not affect program results.
    fn prefetch(&self, row: &[f64]);
}

/// Hint that does nothing. Used as a baseline and on unsupported targets.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopHint;

impl PrefetchHint for NoopHint {
    #[inline(always)]
    fn prefetch(&self, _row: &[f64]) {}
}

/// Hint backed by the target's prefetch instruction.
///
/// - **x86_64**: `_mm_prefetch` with `_MM_HINT_T0`.
/// - **aarch64**: `prfm pldl1keep`.
/// - **Other**: no-op.
#[derive(Debug, Clone, Copy, Default)]
pub struct CacheHint {
    span: HintSpan,
}

impl CacheHint {
    /// Creates a hardware hint covering `span` of each row.
    pub const fn new(span: HintSpan) -> Self {
        Self { span }
    }

    /// The configured span.
    pub const fn span(&self) -> HintSpan {
        self.span
    }
}

impl PrefetchHint for CacheHint {
    #[inline(always)]
    fn prefetch(&self, row: &[f64]) {
        if row.is_empty() {
            return;
        }
        match self.span {
            HintSpan::FirstLine => prefetch_line(row.as_ptr().cast::<u8>()),
            HintSpan::WholeRow => {
                let base = row.as_ptr().cast::<u8>();
                let bytes = std::mem::size_of_val(row);
                let mut offset = 0;
                while offset < bytes {
                    prefetch_line(base.wrapping_add(offset));
                    offset += CACHE_LINE_BYTES;
                }
            }
        }
    }
}

#[inline(always)]
fn prefetch_line(ptr: *const u8) {
    #[cfg(target_arch = "x86_64")]
    {
        // SAFETY: prefetch is a hint and never faults, even for invalid
        // addresses; `ptr` is derived from a live slice in any case.
        unsafe {
            use std::arch::x86_64::{_MM_HINT_T0, _mm_prefetch};
            _mm_prefetch(ptr.cast::<i8>(), _MM_HINT_T0);
        }
    }

    #[cfg(target_arch = "aarch64")]
    {
        // SAFETY: `prfm` is a hint instruction with no architectural side
        // effects and cannot fault.
        unsafe {
            core::arch::asm!(
                "prfm pldl1keep, [{ptr}]",
                ptr = in(reg) ptr,
                options(nostack, preserves_flags)
            );
        }
    }

    #[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
    {
        let _ = ptr;
    }
}
