//! JSON report for deduplication results.
//!
//! # Output Schema
//!
//! ```json
//! {
//!   "input": "data.csv",
//!   "generated_at": "2024-01-01T00:00:00Z",
//!   "exit_code": 0,
//!   "exit_code_name": "TD000",
//!   "report": {
//!     "source_columns": 9,
//!     "source_rows": 5,
//!     "columns_after": 6,
//!     "rows_after": 4,
//!     "column_names": {
//!       "duplicated_names": ["col1", "col2"],
//!       "removed": [{ "name": "col1", "renamed": "col1_dup_0", "position": 6 }],
//!       "renamed": [{ "name": "col1", "renamed": "col1_dup_1", "position": 8 }]
//!     },
//!     "same_data_pairs": [{ "kept": "col3", "removed": "col6" }],
//!     "rows": {
//!       "rows_before": 5,
//!       "all_columns_removed": 1,
//!       "single_columns_removed": null,
//!       "column_group_removed": null,
//!       "rows_after": 4
//!     }
//!   }
//! }
//! ```

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::dedup::DedupReport;
use crate::error::ExitCode;

/// Complete JSON report.
#[derive(Debug, Clone, Serialize)]
pub struct JsonReport<'a> {
    /// Input the report describes
    pub input: String,
    /// When the report was produced
    pub generated_at: DateTime<Utc>,
    /// The exit code number
    pub exit_code: i32,
    /// The machine-readable exit code name (e.g., "TD000")
    pub exit_code_name: &'static str,
    /// Pass results
    pub report: &'a DedupReport,
}

impl<'a> JsonReport<'a> {
    /// Create a JSON report stamped with the current time.
    #[must_use]
    pub fn new(input: impl Into<String>, report: &'a DedupReport, exit_code: ExitCode) -> Self {
        Self {
            input: input.into(),
            generated_at: Utc::now(),
            exit_code: exit_code.as_i32(),
            exit_code_name: exit_code.code_prefix(),
            report,
        }
    }

    /// Compact JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Write pretty-printed JSON followed by a newline.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn write_to<W: Write>(&self, mut writer: W) -> std::io::Result<()> {
        serde_json::to_writer_pretty(&mut writer, self)?;
        writeln!(writer)
    }
}
