//! # Embedding Store Tests
//!
//! Construction from rows and flat buffers, and bounds-checked row access.

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rowfetch_core::{BenchError, EmbeddingStore};

use crate::common::builders::synthetic_store;

#[test]
fn test_from_rows_preserves_order() {
    let store = EmbeddingStore::from_rows(2, [[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]]).unwrap();
    assert_eq!(store.row_count(), 3);
    assert_eq!(store.dimension(), 2);
    assert_eq!(store.row(1).unwrap(), &[3.0, 4.0]);
    assert_eq!(store.row(2).unwrap(), &[5.0, 6.0]);
}

#[test]
fn test_from_rows_rejects_short_row() {
    let rows: Vec<Vec<f64>> = vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0]];
    let err = EmbeddingStore::from_rows(3, rows).unwrap_err();
    assert!(matches!(
        err,
        BenchError::MalformedInput {
            row: 1,
            expected: 3,
            found: 2
        }
    ));
}

#[test]
fn test_from_flat_rejects_partial_row() {
    let err = EmbeddingStore::from_flat(4, vec![0.0; 10]).unwrap_err();
    assert!(matches!(
        err,
        BenchError::MalformedInput {
            row: 2,
            expected: 4,
            found: 2
        }
    ));
}

#[test]
fn test_zero_dimension_is_invalid() {
    assert!(matches!(
        EmbeddingStore::from_flat(0, Vec::new()),
        Err(BenchError::InvalidConfig(_))
    ));
    assert!(matches!(
        EmbeddingStore::from_rows(0, Vec::<Vec<f64>>::new()),
        Err(BenchError::InvalidConfig(_))
    ));
}

#[test]
fn test_empty_store() {
    let store = EmbeddingStore::from_flat(3, Vec::new()).unwrap();
    assert!(store.is_empty());
    assert_eq!(store.row_count(), 0);
    assert!(matches!(
        store.row(0),
        Err(BenchError::OutOfRange { index: 0, len: 0 })
    ));
}

#[test]
fn test_row_reports_out_of_range() {
    let store = synthetic_store(5, 3);
    let err = store.row(5).unwrap_err();
    assert!(matches!(err, BenchError::OutOfRange { index: 5, len: 5 }));
    assert!(store.get(5).is_none());
}

#[test]
fn test_out_of_range_message_names_index_and_length() {
    let store = synthetic_store(2, 1);
    let message = store.row(9).unwrap_err().to_string();
    assert!(message.contains('9'));
    assert!(message.contains('2'));
}

proptest! {
    #[test]
    fn prop_rows_past_end_are_out_of_range(rows in 1usize..64, dimension in 1usize..16, past in 0usize..1000) {
        let store = synthetic_store(rows, dimension);
        let index = rows + past;
        let out_of_range = matches!(
            store.row(index),
            Err(BenchError::OutOfRange { index: i, len }) if i == index && len == rows
        );
        prop_assert!(out_of_range);
    }

    #[test]
    fn prop_rows_in_range_have_declared_width(rows in 1usize..64, dimension in 1usize..16, pick in any::<prop::sample::Index>()) {
        let store = synthetic_store(rows, dimension);
        let index = pick.index(rows);
        let row = store.row(index).unwrap();
        prop_assert_eq!(row.len(), dimension);
        prop_assert_eq!(row[0], index as f64);
    }
}
