//! Matrix and token stream loaders.
//!
//! These sit outside the timed path. They turn text files into the two
//! typed inputs the benchmark consumes:
//! 1. **Matrix:** `token v1 ... vD` per line → `Vocabulary` + `EmbeddingStore`.
//! 2. **Tokens:** whitespace-delimited words → `AccessPattern` (unknown words dropped).

/// GloVe-style matrix loader.
pub mod matrix;

/// Token stream resolution.
pub mod tokens;

use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

pub use matrix::{load_matrix, parse_matrix};
pub use tokens::{load_tokens, parse_tokens};

use crate::common::{BenchError, Result, RowIndex};

/// Mapping from token to row index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vocabulary {
    rows: HashMap<String, RowIndex>,
}

impl Vocabulary {
    /// Creates an empty vocabulary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Maps `token` to `row`, replacing any earlier mapping.
    pub fn insert(&mut self, token: String, row: RowIndex) {
        let _ = self.rows.insert(token, row);
    }

    /// Row index for `token`.
    pub fn get(&self, token: &str) -> Option<RowIndex> {
        self.rows.get(token).copied()
    }

    /// Number of distinct tokens.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if no tokens are mapped.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl FromIterator<(String, RowIndex)> for Vocabulary {
    fn from_iter<I: IntoIterator<Item = (String, RowIndex)>>(iter: I) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}

/// Opens `path` for buffered reading.
fn open(path: &Path) -> Result<BufReader<File>> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|source| BenchError::Io {
            path: path.to_path_buf(),
            source,
        })
}
