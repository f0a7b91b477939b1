//! GloVe-style matrix loader.
//!
//! Each non-blank line is a token followed by exactly `dimension` numbers.
//! A handful of lines in the large GloVe releases have tokens containing
//! spaces, so the last `dimension` fields are taken as values and everything
//! before them as the token. The first field is always token text; a numeric
//! field after it and right before the values is an extra column, and the
//! line is rejected. Every line becomes a row, in file order; if a token
//! repeats, the later row owns the token.

use std::io::BufRead;
use std::path::Path;

use tracing::info;

use super::{Vocabulary, open};
use crate::common::{BenchError, Result};
use crate::store::EmbeddingStore;

/// Reads a matrix file.
///
/// # Arguments
///
/// * `path` - File with one `token v1 ... vD` line per row.
/// * `dimension` - Expected number of values per row.
///
/// # Returns
///
/// The vocabulary and the store, `Io` if the file cannot be read, or the
/// errors described for [`parse_matrix`].
pub fn load_matrix(path: &Path, dimension: usize) -> Result<(Vocabulary, EmbeddingStore)> {
    info!(path = %path.display(), dimension, "loading matrix");
    let reader = open(path)?;
    parse_matrix(reader, dimension).map_err(|e| match e {
        BenchError::Io { source, .. } => BenchError::Io {
            path: path.to_path_buf(),
            source,
        },
        other => other,
    })
}

/// Parses matrix text from any buffered reader.
///
/// Fails with `MalformedInput` (row = one-based line number) when a line has
/// fewer than `dimension + 1` fields or more than `dimension` numeric fields
/// after the token, and with `Parse` when a value is not a finite number.
pub fn parse_matrix<R: BufRead>(reader: R, dimension: usize) -> Result<(Vocabulary, EmbeddingStore)> {
    if dimension == 0 {
        return Err(BenchError::InvalidConfig(
            "embedding dimension must be at least 1".to_string(),
        ));
    }

    let mut vocabulary = Vocabulary::new();
    let mut data = Vec::new();
    let mut rows = 0;

    for (line_index, line) in reader.lines().enumerate() {
        let line_number = line_index + 1;
        let line = line.map_err(|source| BenchError::Io {
            path: "<matrix>".into(),
            source,
        })?;

        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.is_empty() {
            continue;
        }
        if fields.len() < dimension + 1 {
            return Err(BenchError::MalformedInput {
                row: line_number,
                expected: dimension,
                found: fields.len() - 1,
            });
        }

        let split = fields.len() - dimension;
        let extra = fields[1..split]
            .iter()
            .rev()
            .take_while(|field| field.parse::<f64>().is_ok())
            .count();
        if extra > 0 {
            return Err(BenchError::MalformedInput {
                row: line_number,
                expected: dimension,
                found: dimension + extra,
            });
        }

        for raw in &fields[split..] {
            let value: f64 = raw.parse().map_err(|e| BenchError::Parse {
                line: line_number,
                reason: format!("'{raw}': {e}"),
            })?;
            if !value.is_finite() {
                return Err(BenchError::Parse {
                    line: line_number,
                    reason: format!("'{raw}' is not a finite number"),
                });
            }
            data.push(value);
        }
        vocabulary.insert(fields[..split].join(" "), rows);
        rows += 1;
    }

    let store = EmbeddingStore::from_flat(dimension, data)?;
    info!(rows, tokens = vocabulary.len(), dimension, "matrix loaded");
    Ok((vocabulary, store))
}
