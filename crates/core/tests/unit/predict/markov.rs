//! # Markov Predictor Tests

use pretty_assertions::assert_eq;
use rowfetch_core::predict::{MarkovNext, Predictor};

use crate::common::builders::{pattern, synthetic_store};

#[test]
fn test_most_frequent_successor_wins() {
    let store = synthetic_store(3, 2);
    let p = pattern(&[0, 1, 0, 1, 0, 2], &store);
    let markov = MarkovNext::train(&p);

    assert_eq!(markov.successor(0), Some(1));
    assert_eq!(markov.successor(1), Some(0));
    assert_eq!(markov.successor(2), None);
    assert_eq!(markov.len(), 2);
}

#[test]
fn test_tie_keeps_first_successor_to_reach_count() {
    let store = synthetic_store(3, 2);
    let p = pattern(&[0, 1, 0, 2], &store);
    let markov = MarkovNext::train(&p);
    assert_eq!(markov.successor(0), Some(1));
}

#[test]
fn test_overtaking_successor_replaces_best() {
    let store = synthetic_store(3, 1);
    let p = pattern(&[0, 1, 0, 2, 0, 2], &store);
    assert_eq!(MarkovNext::train(&p).successor(0), Some(2));
}

#[test]
fn test_predict_uses_row_at_position() {
    let store = synthetic_store(3, 2);
    let p = pattern(&[0, 1, 0, 1, 0, 2], &store);
    let mut markov = MarkovNext::train(&p);

    let predictions: Vec<_> = (0..p.len()).map(|i| markov.predict(&p, i)).collect();
    assert_eq!(
        predictions,
        vec![Some(1), Some(0), Some(1), Some(0), Some(1), None]
    );
}

#[test]
fn test_short_patterns_learn_nothing() {
    let store = synthetic_store(2, 1);
    assert!(MarkovNext::train(&pattern(&[], &store)).is_empty());
    assert!(MarkovNext::train(&pattern(&[1], &store)).is_empty());
}

#[test]
fn test_self_transition() {
    let store = synthetic_store(2, 1);
    let markov = MarkovNext::train(&pattern(&[1, 1, 1], &store));
    assert_eq!(markov.successor(1), Some(1));
    assert_eq!(markov.name(), "markov");
}
