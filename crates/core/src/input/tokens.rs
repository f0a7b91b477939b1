//! Token stream resolution.

use std::io::BufRead;
use std::path::Path;

use tracing::{info, warn};

use super::{Vocabulary, open};
use crate::common::{BenchError, Result};
use crate::pattern::AccessPattern;
use crate::store::EmbeddingStore;

/// Reads a token file and resolves it against `vocabulary`.
pub fn load_tokens(
    path: &Path,
    vocabulary: &Vocabulary,
    store: &EmbeddingStore,
) -> Result<AccessPattern> {
    info!(path = %path.display(), "loading input tokens");
    let reader = open(path)?;
    parse_tokens(reader, vocabulary, store).map_err(|e| match e {
        BenchError::Io { source, .. } => BenchError::Io {
            path: path.to_path_buf(),
            source,
        },
        other => other,
    })
}

/// Resolves whitespace-delimited tokens into an access pattern.
///
/// Tokens missing from `vocabulary` are dropped. The result may be empty;
/// callers decide whether that is fatal.
pub fn parse_tokens<R: BufRead>(
    reader: R,
    vocabulary: &Vocabulary,
    store: &EmbeddingStore,
) -> Result<AccessPattern> {
    let mut indices = Vec::new();
    let mut matched = Vec::new();
    let mut dropped = 0_usize;

    for line in reader.lines() {
        let line = line.map_err(|source| BenchError::Io {
            path: "<tokens>".into(),
            source,
        })?;
        for token in line.split_whitespace() {
            match vocabulary.get(token) {
                Some(row) => {
                    indices.push(row);
                    matched.push(token.to_string());
                }
                None => dropped += 1,
            }
        }
    }

    if indices.is_empty() {
        warn!(dropped, "no input tokens matched the vocabulary");
    } else {
        info!(matched = indices.len(), dropped, "input tokens resolved");
    }
    AccessPattern::new(indices, matched, store.row_count())
}
