//! # Configuration Tests
//!
//! Defaults, JSON deserialization, string parsing of strategies, and
//! validation.

use std::path::Path;

use pretty_assertions::assert_eq;
use rowfetch_core::config::*;
use rowfetch_core::hint::HintSpan;
use rowfetch_core::BenchError;
use rstest::rstest;

use crate::common::builders::temp_file;

#[test]
fn test_config_default() {
    let config = BenchConfig::default();
    assert_eq!(config.dimension, 300);
    assert_eq!(config.repetitions, 10);
    assert_eq!(config.tolerance, 1e-10);
    assert_eq!(config.strategy, Strategy::NGram { order: 3 });
    assert_eq!(config.hint_span, HintSpan::FirstLine);
    assert_eq!(config.pin_cpu, None);
    assert_eq!(config.sweep.family, StrategyFamily::Lookahead);
    assert_eq!(config.sweep.range(), 1..=20);
    assert_eq!(config.input.matrix_path, Path::new("data/glove.840B.300d.txt"));
    assert_eq!(config.input.tokens_path, Path::new("data/input.txt"));
    assert!(config.validate().is_ok());
}

#[test]
fn test_empty_json_takes_defaults() {
    let config = BenchConfig::from_json("{}").unwrap();
    assert_eq!(config.dimension, 300);
    assert_eq!(config.sweep, SweepConfig::default());
    assert_eq!(config.input, InputConfig::default());
}

#[test]
fn test_json_overrides() {
    let json = r#"{
        "dimension": 25,
        "repetitions": 4,
        "tolerance": 1e-8,
        "strategy": { "kind": "lookahead", "distance": 6 },
        "hint_span": "whole-row",
        "pin_cpu": 2,
        "sweep": { "family": "ngram", "start": 2, "end": 5 },
        "input": { "matrix_path": "m.txt", "tokens_path": "t.txt" }
    }"#;
    let config = BenchConfig::from_json(json).unwrap();
    assert_eq!(config.dimension, 25);
    assert_eq!(config.repetitions, 4);
    assert_eq!(config.tolerance, 1e-8);
    assert_eq!(config.strategy, Strategy::Lookahead { distance: 6 });
    assert_eq!(config.hint_span, HintSpan::WholeRow);
    assert_eq!(config.pin_cpu, Some(2));
    assert_eq!(config.sweep.family, StrategyFamily::NGram);
    assert_eq!(config.sweep.range(), 2..=5);
    assert_eq!(config.input.matrix_path, Path::new("m.txt"));
}

#[test]
fn test_markov_and_none_strategies_deserialize() {
    let config = BenchConfig::from_json(r#"{ "strategy": { "kind": "markov" } }"#).unwrap();
    assert_eq!(config.strategy, Strategy::Markov);
    let config = BenchConfig::from_json(r#"{ "strategy": { "kind": "none" } }"#).unwrap();
    assert_eq!(config.strategy, Strategy::None);
}

#[test]
fn test_unknown_strategy_kind_is_a_config_error() {
    let err = BenchConfig::from_json(r#"{ "strategy": { "kind": "oracle" } }"#).unwrap_err();
    assert!(matches!(err, BenchError::Config(_)));
}

#[rstest]
#[case(r#"{ "dimension": 0 }"#)]
#[case(r#"{ "repetitions": 0 }"#)]
#[case(r#"{ "tolerance": -1.0 }"#)]
#[case(r#"{ "strategy": { "kind": "ngram", "order": 9 } }"#)]
#[case(r#"{ "sweep": { "start": 6, "end": 2 } }"#)]
#[case(r#"{ "sweep": { "family": "ngram", "start": 1, "end": 20 } }"#)]
fn test_out_of_range_values_are_rejected(#[case] json: &str) {
    assert!(matches!(
        BenchConfig::from_json(json),
        Err(BenchError::InvalidConfig(_))
    ));
}

#[test]
fn test_load_from_file() {
    let file = temp_file(r#"{ "dimension": 50, "strategy": { "kind": "markov" } }"#);
    let config = BenchConfig::load(file.path()).unwrap();
    assert_eq!(config.dimension, 50);
    assert_eq!(config.strategy, Strategy::Markov);
}

#[test]
fn test_load_missing_file_names_path() {
    let err = BenchConfig::load(Path::new("/nonexistent/rowfetch.json")).unwrap_err();
    match err {
        BenchError::Io { path, .. } => assert_eq!(path, Path::new("/nonexistent/rowfetch.json")),
        other => panic!("expected Io, got {other:?}"),
    }
}

// ──────────────────────────────────────────────────────────
// String forms
// ──────────────────────────────────────────────────────────

#[rstest]
#[case("none", Strategy::None)]
#[case("baseline", Strategy::None)]
#[case("markov", Strategy::Markov)]
#[case("next-word", Strategy::Markov)]
#[case("lookahead:8", Strategy::Lookahead { distance: 8 })]
#[case("fixed:2", Strategy::Lookahead { distance: 2 })]
#[case("ngram:3", Strategy::NGram { order: 3 })]
#[case("NGram:4", Strategy::NGram { order: 4 })]
fn test_strategy_from_str(#[case] text: &str, #[case] expected: Strategy) {
    assert_eq!(text.parse::<Strategy>().unwrap(), expected);
}

#[rstest]
#[case("lookahead")]
#[case("ngram:x")]
#[case("oracle")]
fn test_strategy_from_str_errors(#[case] text: &str) {
    assert!(matches!(
        text.parse::<Strategy>(),
        Err(BenchError::InvalidConfig(_))
    ));
}

#[test]
fn test_strategy_display_parses_back() {
    for strategy in [
        Strategy::None,
        Strategy::Markov,
        Strategy::Lookahead { distance: 12 },
        Strategy::NGram { order: 5 },
    ] {
        assert_eq!(strategy.to_string().parse::<Strategy>().unwrap(), strategy);
    }
}

#[test]
fn test_family_parsing_and_names() {
    assert_eq!("lookahead".parse::<StrategyFamily>().unwrap(), StrategyFamily::Lookahead);
    assert_eq!("ngram".parse::<StrategyFamily>().unwrap(), StrategyFamily::NGram);
    assert!("markov".parse::<StrategyFamily>().is_err());
    assert_eq!(StrategyFamily::Lookahead.parameter_name(), "PREFETCH_AHEAD");
    assert_eq!(StrategyFamily::NGram.parameter_name(), "NGRAM_ORDER");
    assert_eq!(StrategyFamily::NGram.strategy(4), Strategy::NGram { order: 4 });
}

#[test]
fn test_hint_span_parsing() {
    assert_eq!("whole-row".parse::<HintSpan>().unwrap(), HintSpan::WholeRow);
    assert_eq!("line".parse::<HintSpan>().unwrap(), HintSpan::FirstLine);
    assert!("half".parse::<HintSpan>().is_err());
}
