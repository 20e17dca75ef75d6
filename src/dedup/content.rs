//! Same-data column resolution.
//!
//! Two columns with different names but identical values in every row are
//! duplicates; the later one is dropped. Each column is fingerprinted once,
//! and only pairs with matching fingerprints are compared element-wise.

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;

use crate::dataset::{Dataset, DatasetError};

/// Two columns holding identical data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SameDataPair {
    /// The earlier column, which is kept
    pub kept: String,
    /// The later column, which is dropped
    pub removed: String,
}

impl SameDataPair {
    /// The pair's key, `"<kept> <removed>"`.
    #[must_use]
    pub fn key(&self) -> String {
        format!("{} {}", self.kept, self.removed)
    }
}

impl fmt::Display for SameDataPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key())
    }
}

/// Find every pair of columns with identical values.
///
/// Every ordered pair `(i, j)` with `i != j` is considered in column order,
/// and a pair is recorded once, as `(i, j)`, unless `(j, i)` was recorded
/// before it. The earlier column is therefore always the kept one.
#[must_use]
pub fn find_same_data_pairs(dataset: &Dataset) -> Vec<SameDataPair> {
    let columns = dataset.columns();
    let fingerprints: Vec<[u8; 32]> = columns.iter().map(|c| c.fingerprint()).collect();

    let mut recorded: HashSet<(usize, usize)> = HashSet::new();
    let mut pairs = Vec::new();

    for i in 0..columns.len() {
        for j in 0..columns.len() {
            if i == j || fingerprints[i] != fingerprints[j] {
                continue;
            }
            if !columns[i].same_values(&columns[j]) {
                log::trace!(
                    "Fingerprint collision between '{}' and '{}'",
                    columns[i].name,
                    columns[j].name
                );
                continue;
            }
            if recorded.contains(&(j, i)) {
                continue;
            }
            recorded.insert((i, j));
            pairs.push(SameDataPair {
                kept: columns[i].name.clone(),
                removed: columns[j].name.clone(),
            });
        }
    }

    pairs
}

/// Drop the second column of one pair.
///
/// Returns `Ok(false)` when the column was already dropped through an
/// earlier pair; the end state is the same either way.
pub fn drop_pair(dataset: &mut Dataset, pair: &SameDataPair) -> Result<bool, DatasetError> {
    match dataset.drop_column(&pair.removed) {
        Ok(_) => Ok(true),
        Err(DatasetError::MissingColumn(_)) => Ok(false),
        Err(e) => Err(e),
    }
}
