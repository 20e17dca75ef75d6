use std::collections::HashSet;
use std::sync::Arc;

use proptest::prelude::*;
use tabdupe::dataset::{Column, Dataset, Value};
use tabdupe::dedup::{DedupConfig, Deduplicator};
use tabdupe::encode::one_hot_encode;
use tabdupe::observer::NullObserver;

/// Small value and name alphabets so duplicates actually occur.
fn arb_dataset() -> impl Strategy<Value = Dataset> {
    (0usize..6, 1usize..7).prop_flat_map(|(rows, cols)| {
        let column = (
            prop::sample::select(vec!["a", "b", "c", "a_dup_0"]),
            prop::collection::vec(0i64..3, rows),
        );
        prop::collection::vec(column, cols).prop_map(|columns| {
            Dataset::new(
                columns
                    .into_iter()
                    .map(|(name, values)| {
                        Column::new(name, values.into_iter().map(Value::Int).collect())
                    })
                    .collect(),
            )
            .unwrap()
        })
    })
}

fn quiet() -> DedupConfig {
    DedupConfig::default().with_observer(Arc::new(NullObserver))
}

proptest! {
    #[test]
    fn test_source_never_mutated(ds in arb_dataset()) {
        let snapshot = ds.clone();
        let mut dedup = Deduplicator::new(&ds, quiet());
        dedup.run_all().unwrap();
        prop_assert_eq!(&ds, &snapshot);
    }

    #[test]
    fn test_names_unique_after_column_pass(ds in arb_dataset()) {
        let mut dedup = Deduplicator::new(&ds, quiet());
        dedup.resolve_column_name_duplicates().unwrap();
        let working = dedup.column_deduped().unwrap();

        let names = working.column_names();
        let unique: HashSet<&str> = names.iter().copied().collect();
        prop_assert_eq!(unique.len(), names.len());
        prop_assert_eq!(working.n_rows(), ds.n_rows());
    }

    #[test]
    fn test_columns_distinct_after_same_data_pass(ds in arb_dataset()) {
        let mut dedup = Deduplicator::new(&ds, quiet());
        dedup.resolve_column_name_duplicates().unwrap();
        dedup.resolve_same_data_duplicates().unwrap();
        let working = dedup.column_deduped().unwrap();

        let columns = working.columns();
        for (i, left) in columns.iter().enumerate() {
            for right in &columns[i + 1..] {
                prop_assert!(!left.same_values(right), "{} == {}", left.name, right.name);
            }
        }
        // Each surviving column is one of the source columns
        for column in columns {
            prop_assert!(ds.columns().iter().any(|c| c.values == column.values));
        }
    }

    #[test]
    fn test_rows_unique_and_ordered(ds in arb_dataset()) {
        let mut dedup = Deduplicator::new(&ds, quiet());
        dedup.resolve_column_name_duplicates().unwrap();
        dedup.resolve_same_data_duplicates().unwrap();
        let rows = dedup.resolve_row_duplicates().unwrap().clone();
        let result = dedup.deduped_columns().unwrap();

        prop_assert!(result.index().windows(2).all(|w| w[0] < w[1]));
        prop_assert_eq!(rows.rows_after, result.n_rows());
        prop_assert_eq!(rows.rows_before - rows.total_removed(), rows.rows_after);

        let seen: HashSet<Vec<&Value>> = (0..result.n_rows()).map(|r| result.row(r)).collect();
        prop_assert_eq!(seen.len(), result.n_rows());
    }

    #[test]
    fn test_single_scope_values_unique(ds in arb_dataset()) {
        let mut dedup = Deduplicator::new(&ds, quiet());
        dedup.resolve_column_name_duplicates().unwrap();
        let first = dedup.column_deduped().unwrap().column_names()[0].to_string();

        let config = quiet().with_single_columns([first.clone()]);
        let mut scoped = Deduplicator::new(&ds, config);
        scoped.resolve_column_name_duplicates().unwrap();
        scoped.resolve_row_duplicates().unwrap();
        let result = scoped.deduped_columns().unwrap();

        let values = &result.column(&first).unwrap().values;
        let unique: HashSet<&Value> = values.iter().collect();
        prop_assert_eq!(unique.len(), values.len());
    }

    #[test]
    fn test_one_hot_rows_have_single_one(labels in prop::collection::vec(0usize..5, 0..20)) {
        let encoded = one_hot_encode(&labels, labels.len(), 5).unwrap();
        prop_assert_eq!(encoded.len(), labels.len());
        for (row, &label) in encoded.iter().zip(&labels) {
            prop_assert_eq!(row.iter().map(|&v| usize::from(v)).sum::<usize>(), 1);
            prop_assert_eq!(row[label], 1);
        }
    }
}
