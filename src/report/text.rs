//! Human-readable summary of deduplication results.

use std::fmt;
use std::io::Write;

use yansi::Paint;

use crate::dedup::DedupReport;

/// Terminal summary of a [`DedupReport`].
pub struct TextReport<'a> {
    report: &'a DedupReport,
    color: bool,
}

impl<'a> TextReport<'a> {
    /// Create a summary; `color` enables ANSI styling.
    #[must_use]
    pub fn new(report: &'a DedupReport, color: bool) -> Self {
        Self { report, color }
    }

    /// Write the summary.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn write_to<W: Write>(&self, mut writer: W) -> std::io::Result<()> {
        write!(writer, "{self}")
    }

    fn heading(&self, text: &str) -> String {
        if self.color {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn warn(&self, text: &str) -> String {
        if self.color {
            text.yellow().to_string()
        } else {
            text.to_string()
        }
    }
}

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = self.report;
        writeln!(f, "{}", self.heading("Columns"))?;
        writeln!(f, "  {} -> {}", r.source_columns, r.columns_after)?;

        let names = &r.column_names;
        if names.is_clean() {
            writeln!(f, "  no repeated column names")?;
        }
        for removed in &names.removed {
            writeln!(
                f,
                "  removed '{}', a repeat of '{}' with the same data",
                removed.renamed, removed.name
            )?;
        }
        for renamed in &names.renamed {
            writeln!(
                f,
                "  {} '{}' renamed to '{}', data differs; check manually",
                self.warn("review:"),
                renamed.name,
                renamed.renamed
            )?;
        }

        match &r.same_data_pairs {
            Some(pairs) if pairs.is_empty() => writeln!(f, "  no columns with the same data")?,
            Some(pairs) => {
                for pair in pairs {
                    writeln!(f, "  '{}' has the same data as '{}'", pair.removed, pair.kept)?;
                }
            }
            None => writeln!(f, "  same-data check skipped")?,
        }

        writeln!(f, "{}", self.heading("Rows"))?;
        writeln!(f, "  {} -> {}", r.source_rows, r.rows_after)?;
        match &r.rows {
            Some(rows) => {
                writeln!(f, "  all columns: {} removed", rows.all_columns_removed)?;
                if let Some(n) = rows.single_columns_removed {
                    writeln!(f, "  single columns: {n} removed")?;
                }
                if let Some(n) = rows.column_group_removed {
                    writeln!(f, "  column group: {n} removed")?;
                }
            }
            None => writeln!(f, "  row check skipped")?,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Dataset;
    use crate::dedup::{DedupConfig, Deduplicator};
    use crate::observer::NullObserver;
    use std::sync::Arc;

    fn quiet() -> DedupConfig {
        DedupConfig::default().with_observer(Arc::new(NullObserver))
    }

    #[test]
    fn test_text_report_plain() {
        let ds = Dataset::from_columns(vec![
            ("a", vec![1, 1]),
            ("a", vec![2, 2]),
            ("c", vec![1, 1]),
        ])
        .unwrap();
        let report = Deduplicator::new(&ds, quiet()).run_all().unwrap();
        let text = TextReport::new(&report, false).to_string();

        assert!(text.contains("Columns\n  3 -> 2\n"));
        assert!(text.contains("review: 'a' renamed to 'a_dup_0'"));
        assert!(text.contains("'c' has the same data as 'a'"));
        assert!(text.contains("Rows\n  2 -> 1\n"));
        assert!(text.contains("all columns: 1 removed"));
        assert!(!text.contains('\u{1b}'));
    }

    #[test]
    fn test_text_report_names_removed_repeat() {
        let ds = Dataset::from_columns(vec![("b", vec![1]), ("b", vec![1])]).unwrap();
        let report = Deduplicator::new(&ds, quiet()).run_all().unwrap();
        let text = TextReport::new(&report, false).to_string();
        assert!(text.contains("removed 'b_dup_0', a repeat of 'b' with the same data"));
    }

    #[test]
    fn test_text_report_skipped_passes() {
        let ds = Dataset::from_columns(vec![("a", vec![1])]).unwrap();
        let mut dedup = Deduplicator::new(&ds, quiet());
        dedup.resolve_column_name_duplicates().unwrap();
        let report = dedup.report().unwrap();
        let text = TextReport::new(&report, false).to_string();
        assert!(text.contains("no repeated column names"));
        assert!(text.contains("same-data check skipped"));
        assert!(text.contains("row check skipped"));
    }

    #[test]
    fn test_text_report_color() {
        let ds = Dataset::from_columns(vec![("a", vec![1])]).unwrap();
        let report = Deduplicator::new(&ds, quiet()).run_all().unwrap();
        let text = TextReport::new(&report, true).to_string();
        assert!(text.contains('\u{1b}'));
    }
}
