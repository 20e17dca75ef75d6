//! Observer hooks for deduplication passes.
//!
//! The [`Deduplicator`](crate::dedup::Deduplicator) never configures logging
//! itself. Each instance reports its progress to an injected
//! [`DedupObserver`], so several deduplicators can run in one process without
//! sharing formatting state. [`LogObserver`] is the default and forwards
//! every event to the `log` facade.

use std::fmt;

use crate::dedup::{NameResolution, SameDataPair};

/// The passes a deduplicator runs, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Pass {
    /// Duplicate column names
    ColumnNames,
    /// Duplicate column content under different names
    SameData,
    /// Duplicate rows
    Rows,
}

impl Pass {
    /// Name of the method that runs this pass.
    #[must_use]
    pub fn method_name(self) -> &'static str {
        match self {
            Self::ColumnNames => "resolve_column_name_duplicates",
            Self::SameData => "resolve_same_data_duplicates",
            Self::Rows => "resolve_row_duplicates",
        }
    }
}

impl fmt::Display for Pass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.method_name())
    }
}

/// Stages of the row pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RowStage {
    /// Every column takes part in the comparison
    AllColumns,
    /// Each listed column on its own, cumulatively
    SingleColumns,
    /// The listed columns jointly
    ColumnGroup,
}

impl fmt::Display for RowStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AllColumns => write!(f, "all columns"),
            Self::SingleColumns => write!(f, "specified single columns"),
            Self::ColumnGroup => write!(f, "specified column group"),
        }
    }
}

/// Receives events from the deduplication passes.
///
/// Every method has a default no-op body, so implementors only override
/// what they care about.
pub trait DedupObserver: Send + Sync {
    /// Called when a pass starts.
    fn on_pass_start(&self, _pass: Pass) {}

    /// Called once the column-name pass has settled every duplicated name.
    fn on_column_names_resolved(&self, _resolution: &NameResolution) {}

    /// Called for each same-data pair.
    ///
    /// `dropped` is false when the second column was already gone.
    fn on_same_data_column(&self, _pair: &SameDataPair, _dropped: bool) {}

    /// Called once the same-data pass has handled every pair.
    fn on_same_data_resolved(&self, _pairs: &[SameDataPair]) {}

    /// Called after a row stage with the number of rows it removed.
    fn on_rows_removed(&self, _stage: RowStage, _removed: usize) {}

    /// Called when a pass completes.
    fn on_pass_end(&self, _pass: Pass) {}
}

/// Observer that ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl DedupObserver for NullObserver {}

/// Observer that writes informational log records.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl DedupObserver for LogObserver {
    fn on_pass_start(&self, pass: Pass) {
        log::debug!("Starting {}", pass);
    }

    fn on_column_names_resolved(&self, resolution: &NameResolution) {
        let removed: Vec<String> = resolution.removed.iter().map(ToString::to_string).collect();
        let renamed: Vec<String> = resolution.renamed.iter().map(ToString::to_string).collect();
        log::info!(
            "duplicated columns removed: {:?}, duplicated column names but different values, \
             these were not removed, need to check manually: {:?}",
            removed,
            renamed
        );
    }

    fn on_same_data_column(&self, pair: &SameDataPair, dropped: bool) {
        if dropped {
            log::info!(
                "column {} removed because it has same data as {}",
                pair.removed,
                pair.kept
            );
        } else {
            log::debug!(
                "column {} has same data as {} and was already removed",
                pair.removed,
                pair.kept
            );
        }
    }

    fn on_same_data_resolved(&self, pairs: &[SameDataPair]) {
        if pairs.is_empty() {
            log::info!("No columns with the same data found");
        }
    }

    fn on_rows_removed(&self, stage: RowStage, removed: usize) {
        if removed > 0 {
            log::info!("{removed} rows removed due to row duplication based on {stage}");
        } else {
            log::info!("No row duplication based on {stage}");
        }
    }

    fn on_pass_end(&self, pass: Pass) {
        log::debug!("Finished {}", pass);
    }
}
