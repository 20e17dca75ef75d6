//! Duplicate column name resolution.
//!
//! When several columns share a name, the first occurrence keeps it and each
//! later occurrence is labelled `<name><marker><k>`, where `k` is the
//! repeat's zero-based position among the repeats (`_dup_0`, `_dup_1`, ...).
//! A label that already exists in the dataset is skipped. Each labelled
//! repeat is then compared value-for-value against the first occurrence:
//!
//! - identical data: the column is dropped (an automatic removal)
//! - different data: the column keeps its label and is flagged for manual
//!   review
//!
//! Names are processed in the order they first appear, which makes the
//! labels reproducible across runs.

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;

use crate::dataset::Dataset;

use super::DedupError;

/// Default infix between a duplicated name and its suffix.
pub const DEFAULT_DUP_MARKER: &str = "_dup_";

/// A repeated column that matched its first occurrence and was dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemovedDuplicate {
    /// The shared column name
    pub name: String,
    /// Label the repeat carried when it was dropped
    pub renamed: String,
    /// Position of the dropped column in the source dataset
    pub position: usize,
}

impl fmt::Display for RemovedDuplicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.renamed)
    }
}

/// A repeated column that differed from its first occurrence and was relabelled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenamedDuplicate {
    /// The shared column name
    pub name: String,
    /// The new, unique label
    pub renamed: String,
    /// Position of the column in the source dataset
    pub position: usize,
}

impl fmt::Display for RenamedDuplicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.renamed)
    }
}

/// Outcome of the column-name pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NameResolution {
    /// Names that appeared more than once, in first-seen order
    pub duplicated_names: Vec<String>,
    /// Repeats dropped because their data matched the first occurrence
    pub removed: Vec<RemovedDuplicate>,
    /// Repeats kept under a new label because their data differed
    pub renamed: Vec<RenamedDuplicate>,
}

impl NameResolution {
    /// Check if the dataset had no repeated names.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.duplicated_names.is_empty()
    }
}

/// Every position carrying a duplicated column name.
///
/// # Errors
///
/// Returns `DedupError::ColumnNotDuplicated` if `name` appears at most once.
///
/// # Example
///
/// ```
/// use tabdupe::dataset::Dataset;
/// use tabdupe::dedup::duplicate_positions;
///
/// let ds = Dataset::from_columns(vec![("a", vec![1]), ("b", vec![2]), ("a", vec![3])]).unwrap();
/// assert_eq!(duplicate_positions(&ds, "a").unwrap(), vec![0, 2]);
/// assert!(duplicate_positions(&ds, "b").is_err());
/// ```
pub fn duplicate_positions(dataset: &Dataset, name: &str) -> Result<Vec<usize>, DedupError> {
    let positions = dataset.positions(name);
    if positions.len() < 2 {
        return Err(DedupError::ColumnNotDuplicated(name.to_string()));
    }
    Ok(positions)
}

/// Make every column name in `working` unique.
///
/// Decisions are taken against the unmodified dataset first, then applied:
/// relabels in place, then drops from the highest position down so earlier
/// positions stay valid.
pub fn resolve_names(working: &mut Dataset, marker: &str) -> Result<NameResolution, DedupError> {
    let mut resolution = NameResolution {
        duplicated_names: working.duplicated_names(),
        ..Default::default()
    };

    let mut taken: HashSet<String> = working
        .column_names()
        .into_iter()
        .map(str::to_string)
        .collect();
    let mut drops: Vec<usize> = Vec::new();
    let mut relabels: Vec<(usize, String)> = Vec::new();

    for name in &resolution.duplicated_names {
        let positions = duplicate_positions(working, name)?;
        let first = &working.columns()[positions[0]];
        let mut next = 0usize;

        for (repeat, &pos) in positions[1..].iter().enumerate() {
            let mut suffix = repeat.max(next);
            let mut label = format!("{name}{marker}{suffix}");
            while taken.contains(&label) {
                suffix += 1;
                label = format!("{name}{marker}{suffix}");
            }
            next = suffix + 1;
            taken.insert(label.clone());

            if working.columns()[pos].same_values(first) {
                log::trace!("Column '{label}' at #{pos} matches #{}", positions[0]);
                drops.push(pos);
                resolution.removed.push(RemovedDuplicate {
                    name: name.clone(),
                    renamed: label,
                    position: pos,
                });
            } else {
                relabels.push((pos, label.clone()));
                resolution.renamed.push(RenamedDuplicate {
                    name: name.clone(),
                    renamed: label,
                    position: pos,
                });
            }
        }
    }

    for (pos, label) in relabels {
        working.rename_at(pos, label)?;
    }
    drops.sort_unstable();
    for pos in drops.into_iter().rev() {
        working.drop_at(pos)?;
    }

    Ok(resolution)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_duplicates_is_noop() {
        let mut ds = Dataset::from_columns(vec![("a", vec![1]), ("b", vec![2])]).unwrap();
        let before = ds.clone();
        let res = resolve_names(&mut ds, DEFAULT_DUP_MARKER).unwrap();
        assert!(res.is_clean());
        assert_eq!(ds, before);
    }

    #[test]
    fn test_identical_repeat_is_dropped() {
        let mut ds = Dataset::from_columns(vec![
            ("a", vec![1, 2]),
            ("b", vec![3, 4]),
            ("a", vec![1, 2]),
        ])
        .unwrap();
        let res = resolve_names(&mut ds, DEFAULT_DUP_MARKER).unwrap();
        assert_eq!(ds.column_names(), vec!["a", "b"]);
        assert_eq!(
            res.removed,
            vec![RemovedDuplicate {
                name: "a".into(),
                renamed: "a_dup_0".into(),
                position: 2
            }]
        );
        assert!(res.renamed.is_empty());
    }

    #[test]
    fn test_different_repeats_are_numbered_in_order() {
        let mut ds = Dataset::from_columns(vec![
            ("a", vec![1]),
            ("a", vec![2]),
            ("a", vec![3]),
        ])
        .unwrap();
        let res = resolve_names(&mut ds, DEFAULT_DUP_MARKER).unwrap();
        assert_eq!(ds.column_names(), vec!["a", "a_dup_0", "a_dup_1"]);
        assert_eq!(res.renamed[0].renamed, "a_dup_0");
        assert_eq!(res.renamed[1].position, 2);
    }

    #[test]
    fn test_suffix_follows_repeat_position() {
        let mut ds = Dataset::from_columns(vec![
            ("a", vec![1]),
            ("a", vec![2]),
            ("a", vec![1]),
            ("a", vec![3]),
        ])
        .unwrap();
        let res = resolve_names(&mut ds, DEFAULT_DUP_MARKER).unwrap();
        assert_eq!(ds.column_names(), vec!["a", "a_dup_0", "a_dup_2"]);
        assert_eq!(res.removed[0].renamed, "a_dup_1");
        assert_eq!(res.removed[0].to_string(), "a: a_dup_1");
    }

    #[test]
    fn test_existing_label_is_skipped() {
        let mut ds = Dataset::from_columns(vec![
            ("a", vec![1]),
            ("a_dup_0", vec![5]),
            ("a", vec![2]),
            ("a", vec![3]),
        ])
        .unwrap();
        resolve_names(&mut ds, DEFAULT_DUP_MARKER).unwrap();
        assert_eq!(ds.column_names(), vec!["a", "a_dup_0", "a_dup_1", "a_dup_2"]);
    }

    #[test]
    fn test_custom_marker() {
        let mut ds = Dataset::from_columns(vec![("x", vec![1]), ("x", vec![2])]).unwrap();
        resolve_names(&mut ds, ".").unwrap();
        assert_eq!(ds.column_names(), vec!["x", "x.0"]);
    }

    #[test]
    fn test_compares_against_first_occurrence() {
        // The third "a" matches the second but not the first, so it is kept
        let mut ds = Dataset::from_columns(vec![
            ("a", vec![1]),
            ("a", vec![2]),
            ("a", vec![2]),
        ])
        .unwrap();
        let res = resolve_names(&mut ds, DEFAULT_DUP_MARKER).unwrap();
        assert_eq!(ds.column_names(), vec!["a", "a_dup_0", "a_dup_1"]);
        assert!(res.removed.is_empty());
    }

    #[test]
    fn test_duplicate_positions_errors_on_unique_name() {
        let ds = Dataset::from_columns(vec![("a", vec![1]), ("b", vec![1])]).unwrap();
        assert!(matches!(
            duplicate_positions(&ds, "a"),
            Err(DedupError::ColumnNotDuplicated(name)) if name == "a"
        ));
        assert!(duplicate_positions(&ds, "missing").is_err());
    }
}
