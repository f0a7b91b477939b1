//! Configuration for benchmark runs.
//!
//! This module defines the configuration structures and enums that
//! parameterize a run. It provides:
//! 1. **Defaults:** Baseline constants (dimension, sweep bounds, repetitions, paths).
//! 2. **Structures:** `BenchConfig` with nested sweep and input sections.
//! 3. **Enums:** Prediction strategies and the strategy families a sweep can vary.
//!
//! Configuration is read from JSON (`BenchConfig::load`) or built with
//! `BenchConfig::default()`; CLI flags override individual fields.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;

use crate::common::{BenchError, DEFAULT_TOLERANCE, MAX_NGRAM_ORDER, Result};
use crate::hint::HintSpan;

/// Default configuration constants.
mod defaults {
    /// Embedding dimension of the 840B GloVe release.
    pub const DIMENSION: usize = 300;

    /// Timed passes per strategy per sweep step.
    pub const REPETITIONS: usize = 10;

    /// First lookahead distance tried by a sweep.
    pub const SWEEP_START: usize = 1;

    /// Last lookahead distance tried by a sweep (inclusive).
    pub const SWEEP_END: usize = 20;

    /// N-gram order used when none is given.
    pub const NGRAM_ORDER: usize = 3;

    /// Default matrix file.
    pub const MATRIX_PATH: &str = "data/glove.840B.300d.txt";

    /// Default token file.
    pub const TOKENS_PATH: &str = "data/input.txt";
}

/// A prediction strategy with its parameter.
///
/// JSON form is tagged by `kind`, e.g. `{"kind": "lookahead", "distance": 8}`.
/// The string form (CLI) is `none`, `markov`, `lookahead:K`, or `ngram:N`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Strategy {
    /// No prediction; the baseline.
    #[default]
    None,
    /// Predict the row `distance` positions ahead.
    Lookahead {
        /// Positions ahead.
        distance: usize,
    },
    /// Predict the most frequent successor of the current row.
    Markov,
    /// Predict from the longest matching context of up to `order - 1` rows.
    #[serde(rename = "ngram")]
    NGram {
        /// Model order (1..=8).
        order: usize,
    },
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Lookahead { distance } => write!(f, "lookahead:{distance}"),
            Self::Markov => write!(f, "markov"),
            Self::NGram { order } => write!(f, "ngram:{order}"),
        }
    }
}

impl FromStr for Strategy {
    type Err = BenchError;

    fn from_str(s: &str) -> Result<Self> {
        let (kind, parameter) = match s.split_once(':') {
            Some((kind, parameter)) => (kind, Some(parameter)),
            None => (s, None),
        };
        let parse = |name: &str| -> Result<usize> {
            let raw = parameter.ok_or_else(|| {
                BenchError::InvalidConfig(format!("strategy '{kind}' needs a {name}, e.g. {kind}:4"))
            })?;
            raw.trim().parse().map_err(|_| {
                BenchError::InvalidConfig(format!("invalid {name} '{raw}' for strategy '{kind}'"))
            })
        };

        match kind.trim().to_ascii_lowercase().as_str() {
            "none" | "baseline" => Ok(Self::None),
            "markov" | "next-word" => Ok(Self::Markov),
            "lookahead" | "fixed" => Ok(Self::Lookahead {
                distance: parse("distance")?,
            }),
            "ngram" => Ok(Self::NGram {
                order: parse("order")?,
            }),
            other => Err(BenchError::InvalidConfig(format!(
                "unknown strategy '{other}' (expected none, markov, lookahead:K, ngram:N)"
            ))),
        }
    }
}

/// Strategies whose parameter a sweep can vary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StrategyFamily {
    /// Vary the lookahead distance.
    #[default]
    Lookahead,
    /// Vary the n-gram order.
    #[serde(rename = "ngram")]
    NGram,
}

impl StrategyFamily {
    /// The concrete strategy for one parameter value.
    pub const fn strategy(self, parameter: usize) -> Strategy {
        match self {
            Self::Lookahead => Strategy::Lookahead {
                distance: parameter,
            },
            Self::NGram => Strategy::NGram { order: parameter },
        }
    }

    /// Name of the parameter being varied, for reports.
    pub const fn parameter_name(self) -> &'static str {
        match self {
            Self::Lookahead => "PREFETCH_AHEAD",
            Self::NGram => "NGRAM_ORDER",
        }
    }
}

impl FromStr for StrategyFamily {
    type Err = BenchError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lookahead" | "fixed" => Ok(Self::Lookahead),
            "ngram" => Ok(Self::NGram),
            other => Err(BenchError::InvalidConfig(format!(
                "unknown sweep family '{other}' (expected lookahead or ngram)"
            ))),
        }
    }
}

/// Root configuration structure.
///
/// # Examples
///
/// ```
/// use rowfetch_core::config::{BenchConfig, Strategy, StrategyFamily};
///
/// let json = r#"{
///     "dimension": 25,
///     "repetitions": 3,
///     "strategy": { "kind": "ngram", "order": 2 },
///     "sweep": { "family": "lookahead", "start": 2, "end": 6 },
///     "input": { "matrix_path": "glove.25d.txt" }
/// }"#;
///
/// let config = BenchConfig::from_json(json).unwrap();
/// assert_eq!(config.dimension, 25);
/// assert_eq!(config.strategy, Strategy::NGram { order: 2 });
/// assert_eq!(config.sweep.family, StrategyFamily::Lookahead);
/// assert_eq!(config.sweep.end, 6);
/// assert_eq!(config.input.tokens_path.to_str(), Some("data/input.txt"));
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct BenchConfig {
    /// Values per embedding row.
    #[serde(default = "BenchConfig::default_dimension")]
    pub dimension: usize,

    /// Timed passes per strategy.
    #[serde(default = "BenchConfig::default_repetitions")]
    pub repetitions: usize,

    /// Absolute tolerance for reduction value agreement.
    #[serde(default = "BenchConfig::default_tolerance")]
    pub tolerance: f64,

    /// Strategy compared against the baseline by `compare`.
    #[serde(default = "BenchConfig::default_strategy")]
    pub strategy: Strategy,

    /// How much of each row a hint covers.
    #[serde(default)]
    pub hint_span: HintSpan,

    /// Pin the benchmark thread to this CPU (Linux only).
    #[serde(default)]
    pub pin_cpu: Option<usize>,

    /// Parameter sweep settings.
    #[serde(default)]
    pub sweep: SweepConfig,

    /// Input file locations.
    #[serde(default)]
    pub input: InputConfig,
}

impl BenchConfig {
    /// Returns the default embedding dimension.
    fn default_dimension() -> usize {
        defaults::DIMENSION
    }

    /// Returns the default repetition count.
    fn default_repetitions() -> usize {
        defaults::REPETITIONS
    }

    /// Returns the default agreement tolerance.
    fn default_tolerance() -> f64 {
        DEFAULT_TOLERANCE
    }

    /// Returns the default comparison strategy.
    fn default_strategy() -> Strategy {
        Strategy::NGram {
            order: defaults::NGRAM_ORDER,
        }
    }

    /// Parses a configuration from JSON. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a JSON configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path).map_err(|source| BenchError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Checks every field against its supported range.
    pub fn validate(&self) -> Result<()> {
        if self.dimension == 0 {
            return Err(BenchError::InvalidConfig(
                "dimension must be at least 1".to_string(),
            ));
        }
        if self.repetitions == 0 {
            return Err(BenchError::InvalidConfig(
                "repetitions must be at least 1".to_string(),
            ));
        }
        if !(self.tolerance.is_finite() && self.tolerance >= 0.0) {
            return Err(BenchError::InvalidConfig(format!(
                "tolerance must be a non-negative finite number, got {}",
                self.tolerance
            )));
        }
        if let Strategy::NGram { order } = self.strategy {
            check_ngram_order(order)?;
        }
        self.sweep.validate()
    }
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            dimension: defaults::DIMENSION,
            repetitions: defaults::REPETITIONS,
            tolerance: DEFAULT_TOLERANCE,
            strategy: Self::default_strategy(),
            hint_span: HintSpan::default(),
            pin_cpu: None,
            sweep: SweepConfig::default(),
            input: InputConfig::default(),
        }
    }
}

/// Parameter sweep settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct SweepConfig {
    /// Strategy family whose parameter is varied.
    #[serde(default)]
    pub family: StrategyFamily,

    /// First parameter value.
    #[serde(default = "SweepConfig::default_start")]
    pub start: usize,

    /// Last parameter value (inclusive).
    #[serde(default = "SweepConfig::default_end")]
    pub end: usize,
}

impl SweepConfig {
    /// Returns the default first parameter value.
    fn default_start() -> usize {
        defaults::SWEEP_START
    }

    /// Returns the default last parameter value.
    fn default_end() -> usize {
        defaults::SWEEP_END
    }

    /// The inclusive parameter range.
    pub const fn range(&self) -> std::ops::RangeInclusive<usize> {
        self.start..=self.end
    }

    /// Rejects empty ranges and n-gram orders the model cannot hold.
    pub fn validate(&self) -> Result<()> {
        if self.start > self.end {
            return Err(BenchError::InvalidConfig(format!(
                "sweep range {}..={} is empty",
                self.start, self.end
            )));
        }
        if self.family == StrategyFamily::NGram {
            check_ngram_order(self.start)?;
            check_ngram_order(self.end)?;
        }
        Ok(())
    }
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            family: StrategyFamily::default(),
            start: defaults::SWEEP_START,
            end: defaults::SWEEP_END,
        }
    }
}

/// Input file locations.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InputConfig {
    /// Whitespace-delimited matrix: `token v1 ... vD` per line.
    #[serde(default = "InputConfig::default_matrix_path")]
    pub matrix_path: PathBuf,

    /// Whitespace-delimited tokens to look up.
    #[serde(default = "InputConfig::default_tokens_path")]
    pub tokens_path: PathBuf,
}

impl InputConfig {
    /// Returns the default matrix path.
    fn default_matrix_path() -> PathBuf {
        PathBuf::from(defaults::MATRIX_PATH)
    }

    /// Returns the default token path.
    fn default_tokens_path() -> PathBuf {
        PathBuf::from(defaults::TOKENS_PATH)
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            matrix_path: Self::default_matrix_path(),
            tokens_path: Self::default_tokens_path(),
        }
    }
}

fn check_ngram_order(order: usize) -> Result<()> {
    if order == 0 || order > MAX_NGRAM_ORDER {
        return Err(BenchError::InvalidConfig(format!(
            "n-gram order {order} outside 1..={MAX_NGRAM_ORDER}"
        )));
    }
    Ok(())
}
