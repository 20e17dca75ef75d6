//! Deduplication engine.
//!
//! This module provides:
//! - Duplicate column name resolution (pass 1)
//! - Same-data column resolution (pass 2)
//! - Duplicate row removal, global then scoped (pass 3)
//! - The [`Deduplicator`] that sequences the passes and keeps their results

pub mod content;
pub mod deduplicator;
pub mod names;
pub mod rows;

pub use content::{find_same_data_pairs, SameDataPair};
pub use deduplicator::{DedupConfig, DedupError, DedupReport, Deduplicator};
pub use names::{
    duplicate_positions, NameResolution, RemovedDuplicate, RenamedDuplicate, DEFAULT_DUP_MARKER,
};
pub use rows::{drop_duplicate_rows, RowResolution};
