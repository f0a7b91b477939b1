//! Embedding row storage.
//!
//! Rows live in one contiguous row-major buffer so that row `i` starts at
//! `i * dimension`. The store is immutable once built; benchmark components
//! only ever borrow it.

use crate::common::{BenchError, Result, RowIndex};

/// Fixed-width row matrix with bounds-checked row access.
#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddingStore {
    /// Row-major values, `rows * dimension` long.
    data: Vec<f64>,
    /// Values per row.
    dimension: usize,
}

impl EmbeddingStore {
    /// Builds a store from individual rows.
    ///
    /// # Arguments
    ///
    /// * `dimension` - Declared number of values per row (must be non-zero).
    /// * `rows` - Row values in index order.
    ///
    /// # Returns
    ///
    /// The store, or `MalformedInput` naming the first row whose length differs
    /// from `dimension`.
    pub fn from_rows<I, R>(dimension: usize, rows: I) -> Result<Self>
    where
        I: IntoIterator<Item = R>,
        R: AsRef<[f64]>,
    {
        check_dimension(dimension)?;
        let rows = rows.into_iter();
        let mut data = Vec::with_capacity(rows.size_hint().0 * dimension);
        for (row, values) in rows.enumerate() {
            let values = values.as_ref();
            if values.len() != dimension {
                return Err(BenchError::MalformedInput {
                    row,
                    expected: dimension,
                    found: values.len(),
                });
            }
            data.extend_from_slice(values);
        }
        Ok(Self { data, dimension })
    }

    /// Builds a store from a row-major buffer.
    ///
    /// Fails with `MalformedInput` when the buffer does not divide into whole
    /// rows; the reported row is the trailing partial one.
    pub fn from_flat(dimension: usize, data: Vec<f64>) -> Result<Self> {
        check_dimension(dimension)?;
        let remainder = data.len() % dimension;
        if remainder != 0 {
            return Err(BenchError::MalformedInput {
                row: data.len() / dimension,
                expected: dimension,
                found: remainder,
            });
        }
        Ok(Self { data, dimension })
    }

    /// Number of rows (`N`).
    #[inline]
    pub fn row_count(&self) -> usize {
        self.data.len() / self.dimension
    }

    /// Values per row (`D`).
    #[inline]
    pub const fn dimension(&self) -> usize {
        self.dimension
    }

    /// Returns `true` if the store holds no rows.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns row `index`, or `OutOfRange` when `index >= row_count()`.
    #[inline]
    pub fn row(&self, index: RowIndex) -> Result<&[f64]> {
        self.get(index).ok_or(BenchError::OutOfRange {
            index,
            len: self.row_count(),
        })
    }

    /// Returns row `index` if it exists.
    ///
    /// Used on the hot path where an out-of-range prediction is simply
    /// not hinted.
    #[inline(always)]
    pub fn get(&self, index: RowIndex) -> Option<&[f64]> {
        let start = index.checked_mul(self.dimension)?;
        let end = start.checked_add(self.dimension)?;
        self.data.get(start..end)
    }

    /// The row-major backing buffer.
    #[inline]
    pub(crate) fn values(&self) -> &[f64] {
        &self.data
    }

    /// Size of one row in bytes.
    #[inline]
    pub const fn row_bytes(&self) -> usize {
        self.dimension * std::mem::size_of::<f64>()
    }
}

fn check_dimension(dimension: usize) -> Result<()> {
    if dimension == 0 {
        return Err(BenchError::InvalidConfig(
            "embedding dimension must be at least 1".to_string(),
        ));
    }
    Ok(())
}
