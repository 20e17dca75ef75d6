//! In-memory tabular dataset.
//!
//! # Overview
//!
//! A [`Dataset`] is an ordered list of named [`Column`]s that share one row
//! index. Column names may repeat (as they do in raw CSV headers) until the
//! column-name pass of the deduplicator makes them unique.
//!
//! The row index holds the original row labels. After rows are removed the
//! labels are no longer contiguous, which lets callers map surviving rows
//! back to the input.
//!
//! # Example
//!
//! ```
//! use tabdupe::dataset::{Dataset, Value};
//!
//! let ds = Dataset::from_columns(vec![
//!     ("a", vec![1, 2, 2]),
//!     ("b", vec![3, 4, 4]),
//! ])
//! .unwrap();
//!
//! assert_eq!(ds.n_rows(), 3);
//! assert_eq!(ds.column_names(), vec!["a", "b"]);
//! assert_eq!(ds.row(1), vec![&Value::Int(2), &Value::Int(4)]);
//! ```

pub mod value;

pub use value::Value;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised by structural dataset operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DatasetError {
    /// A column's length differs from the row index length.
    #[error("column '{column}' has {found} values but the index has {expected} rows")]
    LengthMismatch {
        /// Offending column
        column: String,
        /// Row index length
        expected: usize,
        /// Column length
        found: usize,
    },

    /// The named column is not present.
    #[error("column '{0}' not found")]
    MissingColumn(String),

    /// A column position is past the end of the dataset.
    #[error("column position {position} out of bounds for {len} columns")]
    PositionOutOfBounds {
        /// Requested position
        position: usize,
        /// Number of columns
        len: usize,
    },
}

/// A named column of values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Column name (may be non-unique before name resolution)
    pub name: String,
    /// One value per row of the owning dataset
    pub values: Vec<Value>,
}

impl Column {
    /// Create a new column.
    #[must_use]
    pub fn new(name: impl Into<String>, values: Vec<Value>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Number of values in this column.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if this column has no values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Element-wise equality of values, ignoring names.
    ///
    /// Row order matters: two columns are equal only if the value at every
    /// row position matches.
    #[must_use]
    pub fn same_values(&self, other: &Column) -> bool {
        self.values == other.values
    }

    /// BLAKE3 fingerprint of the values (names are not included).
    #[must_use]
    pub fn fingerprint(&self) -> [u8; 32] {
        let mut hasher = blake3::Hasher::new();
        hasher.update(&(self.values.len() as u64).to_le_bytes());
        for v in &self.values {
            v.feed(&mut hasher);
        }
        *hasher.finalize().as_bytes()
    }
}

/// An ordered collection of named columns sharing a row index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    index: Vec<usize>,
    columns: Vec<Column>,
}

impl Dataset {
    /// Create a dataset with a default `0..n` row index.
    ///
    /// # Errors
    ///
    /// Returns `DatasetError::LengthMismatch` if the columns differ in length.
    pub fn new(columns: Vec<Column>) -> Result<Self, DatasetError> {
        let n_rows = columns.first().map_or(0, Column::len);
        Self::with_index((0..n_rows).collect(), columns)
    }

    /// Create a dataset with an explicit row index.
    ///
    /// # Errors
    ///
    /// Returns `DatasetError::LengthMismatch` if any column's length differs
    /// from the index length.
    pub fn with_index(index: Vec<usize>, columns: Vec<Column>) -> Result<Self, DatasetError> {
        if let Some(bad) = columns.iter().find(|c| c.len() != index.len()) {
            return Err(DatasetError::LengthMismatch {
                column: bad.name.clone(),
                expected: index.len(),
                found: bad.len(),
            });
        }
        Ok(Self { index, columns })
    }

    /// Build a dataset from `(name, values)` pairs.
    ///
    /// # Errors
    ///
    /// Returns `DatasetError::LengthMismatch` if the columns differ in length.
    pub fn from_columns<I, N, V>(pairs: I) -> Result<Self, DatasetError>
    where
        I: IntoIterator<Item = (N, Vec<V>)>,
        N: Into<String>,
        V: Into<Value>,
    {
        let columns = pairs
            .into_iter()
            .map(|(name, values)| Column::new(name, values.into_iter().map(Into::into).collect()))
            .collect();
        Self::new(columns)
    }

    /// Row labels, in row order.
    #[must_use]
    pub fn index(&self) -> &[usize] {
        &self.index
    }

    /// Number of rows.
    #[must_use]
    pub fn n_rows(&self) -> usize {
        self.index.len()
    }

    /// Number of columns.
    #[must_use]
    pub fn n_cols(&self) -> usize {
        self.columns.len()
    }

    /// Check if the dataset has no columns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// All columns in order.
    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Column names in order (duplicates included).
    #[must_use]
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Check if a column with this name exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c.name == name)
    }

    /// First column carrying `name`.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Column at a position.
    #[must_use]
    pub fn column_at(&self, position: usize) -> Option<&Column> {
        self.columns.get(position)
    }

    /// Position of the first column carrying `name`.
    #[must_use]
    pub fn position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// Every position carrying `name`, in column order.
    #[must_use]
    pub fn positions(&self, name: &str) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .filter(|(_, c)| c.name == name)
            .map(|(i, _)| i)
            .collect()
    }

    /// Names that appear more than once, in the order they are first seen.
    #[must_use]
    pub fn duplicated_names(&self) -> Vec<String> {
        let mut seen = std::collections::HashSet::new();
        let mut dups: Vec<String> = Vec::new();
        for c in &self.columns {
            if !seen.insert(c.name.as_str()) && !dups.iter().any(|d| d == &c.name) {
                dups.push(c.name.clone());
            }
        }
        // Order by first appearance of the name, not of its first repeat
        dups.sort_by_key(|d| self.position(d));
        dups
    }

    /// Rename the column at `position`.
    ///
    /// # Errors
    ///
    /// Returns `DatasetError::PositionOutOfBounds` for an invalid position.
    pub fn rename_at(
        &mut self,
        position: usize,
        name: impl Into<String>,
    ) -> Result<(), DatasetError> {
        let len = self.columns.len();
        let column = self
            .columns
            .get_mut(position)
            .ok_or(DatasetError::PositionOutOfBounds { position, len })?;
        column.name = name.into();
        Ok(())
    }

    /// Remove and return the column at `position`.
    ///
    /// # Errors
    ///
    /// Returns `DatasetError::PositionOutOfBounds` for an invalid position.
    pub fn drop_at(&mut self, position: usize) -> Result<Column, DatasetError> {
        if position >= self.columns.len() {
            return Err(DatasetError::PositionOutOfBounds {
                position,
                len: self.columns.len(),
            });
        }
        Ok(self.columns.remove(position))
    }

    /// Remove and return the first column carrying `name`.
    ///
    /// # Errors
    ///
    /// Returns `DatasetError::MissingColumn` if no column has this name.
    pub fn drop_column(&mut self, name: &str) -> Result<Column, DatasetError> {
        let position = self
            .position(name)
            .ok_or_else(|| DatasetError::MissingColumn(name.to_string()))?;
        Ok(self.columns.remove(position))
    }

    /// Values of the row at `position` (not label), in column order.
    ///
    /// # Panics
    ///
    /// Panics if `position >= n_rows()`.
    #[must_use]
    pub fn row(&self, position: usize) -> Vec<&Value> {
        self.columns.iter().map(|c| &c.values[position]).collect()
    }

    /// Keep only the rows at the given positions, in the given order.
    ///
    /// # Panics
    ///
    /// Panics if a position is out of range.
    #[must_use]
    pub fn take_rows(&self, positions: &[usize]) -> Self {
        let index = positions.iter().map(|&p| self.index[p]).collect();
        let columns = self
            .columns
            .iter()
            .map(|c| {
                let values = positions.iter().map(|&p| c.values[p].clone()).collect();
                Column::new(c.name.clone(), values)
            })
            .collect();
        Self { index, columns }
    }
}
