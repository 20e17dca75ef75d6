//! Deduplicator that sequences the column and row passes.
//!
//! # Overview
//!
//! The [`Deduplicator`] borrows the source dataset and never changes it. The
//! column-name pass takes an owned copy (the working dataset) and every later
//! pass mutates that copy. The row pass writes its result to a separate
//! dataset so both stages stay retrievable.
//!
//! Passes run in order:
//! 1. [`Deduplicator::resolve_column_name_duplicates`]
//! 2. [`Deduplicator::resolve_same_data_duplicates`] (optional)
//! 3. [`Deduplicator::resolve_row_duplicates`] (optional)
//!
//! Calling a pass or accessor before the pass it depends on fails with
//! [`DedupError::PreconditionNotMet`].
//!
//! # Example
//!
//! ```
//! use tabdupe::dataset::Dataset;
//! use tabdupe::dedup::{DedupConfig, Deduplicator};
//!
//! let source = Dataset::from_columns(vec![
//!     ("a", vec![1, 2, 2]),
//!     ("b", vec![3, 4, 4]),
//!     ("a", vec![1, 2, 2]),
//! ])
//! .unwrap();
//!
//! let mut dedup = Deduplicator::new(&source, DedupConfig::default());
//! dedup.resolve_column_name_duplicates().unwrap();
//! dedup.resolve_same_data_duplicates().unwrap();
//! dedup.resolve_row_duplicates().unwrap();
//!
//! let cleaned = dedup.deduped_columns().unwrap();
//! assert_eq!(cleaned.column_names(), vec!["a", "b"]);
//! assert_eq!(cleaned.index(), &[0, 1]);
//! ```

use std::sync::Arc;

use serde::Serialize;

use crate::dataset::{Dataset, DatasetError};
use crate::observer::{DedupObserver, LogObserver, Pass, RowStage};

use super::content::{drop_pair, find_same_data_pairs, SameDataPair};
use super::names::{resolve_names, NameResolution, DEFAULT_DUP_MARKER};
use super::rows::{drop_duplicate_rows, RowResolution};

/// Errors that can occur during deduplication.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DedupError {
    /// A pass or accessor was called before the pass it depends on.
    #[error("Need to run '{required}' before '{requested}'")]
    PreconditionNotMet {
        /// The pass that has to run first
        required: Pass,
        /// What the caller asked for
        requested: &'static str,
    },

    /// A duplicate-position lookup was made for a name that is not duplicated.
    #[error("Column '{0}' is not duplicated")]
    ColumnNotDuplicated(String),

    /// A row scope names a column that is not in the working dataset.
    #[error(
        "Unknown column '{name}'{}",
        .suggestion.as_ref().map(|s| format!(", did you mean '{s}'?")).unwrap_or_default()
    )]
    UnknownColumn {
        /// The requested column
        name: String,
        /// Closest existing column name, if any is close enough
        suggestion: Option<String>,
    },

    /// A structural dataset operation failed.
    #[error(transparent)]
    Dataset(#[from] DatasetError),
}

/// Configuration for a [`Deduplicator`].
#[derive(Clone)]
pub struct DedupConfig {
    /// Columns to deduplicate rows on, one at a time, in order.
    pub single_columns: Option<Vec<String>>,
    /// Columns to deduplicate rows on jointly.
    pub column_group: Option<Vec<String>>,
    /// Infix between a duplicated name and its numeric suffix.
    pub dup_marker: String,
    /// Receives pass events.
    pub observer: Arc<dyn DedupObserver>,
}

impl std::fmt::Debug for DedupConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DedupConfig")
            .field("single_columns", &self.single_columns)
            .field("column_group", &self.column_group)
            .field("dup_marker", &self.dup_marker)
            .field("observer", &"<observer>")
            .finish()
    }
}

impl Default for DedupConfig {
    fn default() -> Self {
        Self {
            single_columns: None,
            column_group: None,
            dup_marker: DEFAULT_DUP_MARKER.to_string(),
            observer: Arc::new(LogObserver),
        }
    }
}

impl DedupConfig {
    /// Deduplicate rows on each of these columns individually.
    #[must_use]
    pub fn with_single_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.single_columns = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    /// Deduplicate rows on these columns jointly.
    #[must_use]
    pub fn with_column_group<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.column_group = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    /// Set the duplicate-name marker.
    #[must_use]
    pub fn with_dup_marker(mut self, marker: impl Into<String>) -> Self {
        self.dup_marker = marker.into();
        self
    }

    /// Set the observer.
    #[must_use]
    pub fn with_observer(mut self, observer: Arc<dyn DedupObserver>) -> Self {
        self.observer = observer;
        self
    }
}

/// Everything the passes found, in one serializable record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DedupReport {
    /// Columns in the source dataset
    pub source_columns: usize,
    /// Rows in the source dataset
    pub source_rows: usize,
    /// Columns left after the column passes
    pub columns_after: usize,
    /// Rows left after the row pass (or the source row count if it did not run)
    pub rows_after: usize,
    /// Column-name pass outcome
    pub column_names: NameResolution,
    /// Same-data pairs, if that pass ran
    pub same_data_pairs: Option<Vec<SameDataPair>>,
    /// Row pass outcome, if it ran
    pub rows: Option<RowResolution>,
}

impl DedupReport {
    /// Check if any column or row was removed or renamed.
    #[must_use]
    pub fn found_duplicates(&self) -> bool {
        !self.column_names.is_clean()
            || self.same_data_pairs.as_ref().is_some_and(|p| !p.is_empty())
            || self.rows.as_ref().is_some_and(|r| r.total_removed() > 0)
    }
}

/// Runs the deduplication passes over one borrowed dataset.
pub struct Deduplicator<'a> {
    source: &'a Dataset,
    config: DedupConfig,
    dedup: Option<Dataset>,
    names: Option<NameResolution>,
    same_data_pairs: Option<Vec<SameDataPair>>,
    dedup_rows: Option<Dataset>,
    rows: Option<RowResolution>,
}

impl<'a> Deduplicator<'a> {
    /// Create a deduplicator over `source`.
    #[must_use]
    pub fn new(source: &'a Dataset, config: DedupConfig) -> Self {
        Self {
            source,
            config,
            dedup: None,
            names: None,
            same_data_pairs: None,
            dedup_rows: None,
            rows: None,
        }
    }

    /// Create a deduplicator with default configuration.
    #[must_use]
    pub fn with_defaults(source: &'a Dataset) -> Self {
        Self::new(source, DedupConfig::default())
    }

    /// The untouched source dataset.
    #[must_use]
    pub fn source(&self) -> &Dataset {
        self.source
    }

    /// The configuration in use.
    #[must_use]
    pub fn config(&self) -> &DedupConfig {
        &self.config
    }

    /// Pass 1: make every column name unique.
    ///
    /// Starts over from a fresh copy of the source, so running it again
    /// discards every later result.
    ///
    /// # Errors
    ///
    /// Only structural errors, which indicate a bug in position bookkeeping.
    pub fn resolve_column_name_duplicates(&mut self) -> Result<&NameResolution, DedupError> {
        let observer = Arc::clone(&self.config.observer);
        observer.on_pass_start(Pass::ColumnNames);

        self.same_data_pairs = None;
        self.dedup_rows = None;
        self.rows = None;

        let mut working = self.source.clone();
        let resolution = resolve_names(&mut working, &self.config.dup_marker)?;
        log::debug!(
            "Column names: {} duplicated, {} removed, {} renamed",
            resolution.duplicated_names.len(),
            resolution.removed.len(),
            resolution.renamed.len()
        );
        observer.on_column_names_resolved(&resolution);

        self.dedup = Some(working);
        observer.on_pass_end(Pass::ColumnNames);
        Ok(&*self.names.insert(resolution))
    }

    /// Pass 2: drop columns whose data repeats an earlier column.
    ///
    /// # Errors
    ///
    /// Returns `DedupError::PreconditionNotMet` if pass 1 has not run.
    pub fn resolve_same_data_duplicates(&mut self) -> Result<&[SameDataPair], DedupError> {
        let observer = Arc::clone(&self.config.observer);
        let working = self.dedup.as_mut().ok_or(DedupError::PreconditionNotMet {
            required: Pass::ColumnNames,
            requested: Pass::SameData.method_name(),
        })?;
        observer.on_pass_start(Pass::SameData);

        let pairs = find_same_data_pairs(working);
        for pair in &pairs {
            let dropped = drop_pair(working, pair)?;
            observer.on_same_data_column(pair, dropped);
        }
        observer.on_same_data_resolved(&pairs);

        // The row result was computed from the old column set
        self.dedup_rows = None;
        self.rows = None;

        observer.on_pass_end(Pass::SameData);
        Ok(self.same_data_pairs.insert(pairs).as_slice())
    }

    /// Pass 3: drop duplicate rows.
    ///
    /// Runs on all columns first, then each configured single column in
    /// order, then the configured column group. The working dataset is left
    /// unchanged; the result is available from [`Self::deduped_columns`].
    ///
    /// # Errors
    ///
    /// Returns `DedupError::PreconditionNotMet` if pass 1 has not run, or
    /// `DedupError::UnknownColumn` if a scope names a missing column. Scope
    /// columns are checked before any row is removed.
    pub fn resolve_row_duplicates(&mut self) -> Result<&RowResolution, DedupError> {
        let observer = Arc::clone(&self.config.observer);
        let working = self.dedup.as_ref().ok_or(DedupError::PreconditionNotMet {
            required: Pass::ColumnNames,
            requested: Pass::Rows.method_name(),
        })?;

        let single = self
            .config
            .single_columns
            .as_deref()
            .map(|names| resolve_scope(working, names))
            .transpose()?;
        let group = self
            .config
            .column_group
            .as_deref()
            .map(|names| resolve_scope(working, names))
            .transpose()?;

        observer.on_pass_start(Pass::Rows);

        let all: Vec<usize> = (0..working.n_cols()).collect();
        let (mut current, removed) = drop_duplicate_rows(working, &all);
        observer.on_rows_removed(RowStage::AllColumns, removed);

        let mut resolution = RowResolution {
            rows_before: working.n_rows(),
            all_columns_removed: removed,
            ..Default::default()
        };

        if let Some(positions) = single {
            let before = current.n_rows();
            for pos in positions {
                let (next, _) = drop_duplicate_rows(&current, &[pos]);
                current = next;
            }
            let removed = before - current.n_rows();
            observer.on_rows_removed(RowStage::SingleColumns, removed);
            resolution.single_columns_removed = Some(removed);
        }

        if let Some(positions) = group {
            let (next, removed) = drop_duplicate_rows(&current, &positions);
            current = next;
            observer.on_rows_removed(RowStage::ColumnGroup, removed);
            resolution.column_group_removed = Some(removed);
        }

        resolution.rows_after = current.n_rows();
        self.dedup_rows = Some(current);
        observer.on_pass_end(Pass::Rows);
        Ok(&*self.rows.insert(resolution))
    }

    /// Run every pass in order and return the report.
    ///
    /// # Errors
    ///
    /// Propagates the first pass error.
    pub fn run_all(&mut self) -> Result<DedupReport, DedupError> {
        self.resolve_column_name_duplicates()?;
        self.resolve_same_data_duplicates()?;
        self.resolve_row_duplicates()?;
        self.report()
    }

    /// The most processed dataset available.
    ///
    /// Row-deduplicated if the row pass ran, otherwise the column-deduplicated
    /// working dataset.
    ///
    /// # Errors
    ///
    /// Returns `DedupError::PreconditionNotMet` if pass 1 has not run.
    pub fn deduped_columns(&self) -> Result<&Dataset, DedupError> {
        self.dedup_rows
            .as_ref()
            .or(self.dedup.as_ref())
            .ok_or(DedupError::PreconditionNotMet {
                required: Pass::ColumnNames,
                requested: "deduped_columns",
            })
    }

    /// The column-deduplicated dataset, ignoring any row pass.
    ///
    /// # Errors
    ///
    /// Returns `DedupError::PreconditionNotMet` if pass 1 has not run.
    pub fn column_deduped(&self) -> Result<&Dataset, DedupError> {
        self.dedup.as_ref().ok_or(DedupError::PreconditionNotMet {
            required: Pass::ColumnNames,
            requested: "column_deduped",
        })
    }

    /// Names that appeared more than once in the source.
    ///
    /// # Errors
    ///
    /// Returns `DedupError::PreconditionNotMet` if pass 1 has not run.
    pub fn duplicate_column_names(&self) -> Result<&[String], DedupError> {
        self.column_name_report()
            .map(|r| r.duplicated_names.as_slice())
            .map_err(|_| DedupError::PreconditionNotMet {
                required: Pass::ColumnNames,
                requested: "duplicate_column_names",
            })
    }

    /// Full outcome of the column-name pass.
    ///
    /// # Errors
    ///
    /// Returns `DedupError::PreconditionNotMet` if pass 1 has not run.
    pub fn column_name_report(&self) -> Result<&NameResolution, DedupError> {
        self.names.as_ref().ok_or(DedupError::PreconditionNotMet {
            required: Pass::ColumnNames,
            requested: "column_name_report",
        })
    }

    /// Column pairs found holding the same data.
    ///
    /// # Errors
    ///
    /// Returns `DedupError::PreconditionNotMet` if pass 2 has not run.
    pub fn same_data_column_pairs(&self) -> Result<&[SameDataPair], DedupError> {
        self.same_data_pairs
            .as_deref()
            .ok_or(DedupError::PreconditionNotMet {
                required: Pass::SameData,
                requested: "same_data_column_pairs",
            })
    }

    /// Row counts from the row pass.
    ///
    /// # Errors
    ///
    /// Returns `DedupError::PreconditionNotMet` if pass 3 has not run.
    pub fn row_report(&self) -> Result<&RowResolution, DedupError> {
        self.rows.as_ref().ok_or(DedupError::PreconditionNotMet {
            required: Pass::Rows,
            requested: "row_report",
        })
    }

    /// Aggregate report of every pass run so far.
    ///
    /// # Errors
    ///
    /// Returns `DedupError::PreconditionNotMet` if pass 1 has not run.
    pub fn report(&self) -> Result<DedupReport, DedupError> {
        let names = self.column_name_report()?;
        let columns = self.column_deduped()?;
        Ok(DedupReport {
            source_columns: self.source.n_cols(),
            source_rows: self.source.n_rows(),
            columns_after: columns.n_cols(),
            rows_after: self.deduped_columns()?.n_rows(),
            column_names: names.clone(),
            same_data_pairs: self.same_data_pairs.clone(),
            rows: self.rows.clone(),
        })
    }
}

/// Map scope column names to positions in `dataset`.
fn resolve_scope(dataset: &Dataset, names: &[String]) -> Result<Vec<usize>, DedupError> {
    names
        .iter()
        .map(|name| {
            dataset.position(name).ok_or_else(|| DedupError::UnknownColumn {
                name: name.clone(),
                suggestion: suggest_column(dataset, name),
            })
        })
        .collect()
}

/// Closest column name to `name`, if any is reasonably similar.
fn suggest_column(dataset: &Dataset, name: &str) -> Option<String> {
    dataset
        .column_names()
        .into_iter()
        .map(|candidate| (candidate, strsim::jaro_winkler(name, candidate)))
        .filter(|(_, score)| *score > 0.8)
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(candidate, _)| candidate.to_string())
}
