//! Duplicate row removal.
//!
//! A row is a duplicate when its values over the compared columns match an
//! earlier row. The first occurrence is kept and survivors stay in their
//! original order, carrying their original labels.

use std::collections::HashSet;

use serde::Serialize;

use crate::dataset::{Dataset, Value};

/// Row counts for each stage of the row pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RowResolution {
    /// Rows before the pass
    pub rows_before: usize,
    /// Rows removed comparing all columns
    pub all_columns_removed: usize,
    /// Rows removed by the single-column stage, if it ran
    pub single_columns_removed: Option<usize>,
    /// Rows removed by the column-group stage, if it ran
    pub column_group_removed: Option<usize>,
    /// Rows after the pass
    pub rows_after: usize,
}

impl RowResolution {
    /// Total rows removed across all stages.
    #[must_use]
    pub fn total_removed(&self) -> usize {
        self.rows_before - self.rows_after
    }
}

/// Row positions to keep when comparing on the given column positions.
///
/// An empty `columns` slice compares nothing, so every row is kept.
#[must_use]
pub fn first_occurrences(dataset: &Dataset, columns: &[usize]) -> Vec<usize> {
    if columns.is_empty() {
        return (0..dataset.n_rows()).collect();
    }

    let cols = dataset.columns();
    let mut seen: HashSet<Vec<&Value>> = HashSet::with_capacity(dataset.n_rows());
    (0..dataset.n_rows())
        .filter(|&row| {
            let key: Vec<&Value> = columns.iter().map(|&c| &cols[c].values[row]).collect();
            seen.insert(key)
        })
        .collect()
}

/// Drop rows that repeat an earlier row on the given column positions.
///
/// Returns the thinned dataset and the number of rows removed.
#[must_use]
pub fn drop_duplicate_rows(dataset: &Dataset, columns: &[usize]) -> (Dataset, usize) {
    let keep = first_occurrences(dataset, columns);
    let removed = dataset.n_rows() - keep.len();
    if removed == 0 {
        return (dataset.clone(), 0);
    }
    (dataset.take_rows(&keep), removed)
}
