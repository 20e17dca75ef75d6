use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::sync::Arc;
use tabdupe::dataset::{Column, Dataset, Value};
use tabdupe::dedup::{find_same_data_pairs, DedupConfig, Deduplicator};
use tabdupe::io::{read_csv_from, write_csv, CsvOptions};
use tabdupe::observer::NullObserver;

// Helper to build a dataset where every fourth column repeats an earlier one
// and half the rows are repeats.
fn make_dataset(rows: usize, cols: usize) -> Dataset {
    let columns = (0..cols)
        .map(|c| {
            let seed = if c % 4 == 3 { c - 3 } else { c };
            let values = (0..rows)
                .map(|r| Value::Int(((r % (rows / 2).max(1)) * 31 + seed * 7) as i64))
                .collect();
            Column::new(format!("col{}", c % (cols - cols / 8)), values)
        })
        .collect();
    Dataset::new(columns).unwrap()
}

fn quiet() -> DedupConfig {
    DedupConfig::default().with_observer(Arc::new(NullObserver))
}

// 1. Same-data detection
fn bench_same_data(c: &mut Criterion) {
    let mut group = c.benchmark_group("same_data");

    for cols in [16, 64, 256] {
        let ds = make_dataset(1_000, cols);
        group.bench_with_input(format!("{}_columns", cols), &ds, |b, ds| {
            b.iter(|| black_box(find_same_data_pairs(ds)))
        });
    }
    group.finish();
}

// 2. Full pipeline
fn bench_run_all(c: &mut Criterion) {
    let mut group = c.benchmark_group("run_all");

    for rows in [1_000, 10_000, 100_000] {
        let ds = make_dataset(rows, 16);
        group.bench_with_input(format!("{}_rows", rows), &ds, |b, ds| {
            b.iter(|| {
                let report = Deduplicator::new(ds, quiet()).run_all().unwrap();
                black_box(report)
            })
        });
    }
    group.finish();
}

// 3. Scoped row pass
fn bench_scoped_rows(c: &mut Criterion) {
    let ds = make_dataset(10_000, 16);
    let config = quiet()
        .with_single_columns(["col0", "col1"])
        .with_column_group(["col2", "col4", "col5"]);

    c.bench_function("rows_scoped_10000", |b| {
        b.iter(|| {
            let mut dedup = Deduplicator::new(&ds, config.clone());
            dedup.resolve_column_name_duplicates().unwrap();
            black_box(dedup.resolve_row_duplicates().unwrap().rows_after)
        })
    });
}

// 4. CSV round trip
fn bench_csv(c: &mut Criterion) {
    let ds = make_dataset(10_000, 16);
    let mut buffer = Vec::new();
    write_csv(&ds, &mut buffer, &CsvOptions::default()).unwrap();

    c.bench_function("csv_read_10000", |b| {
        b.iter(|| black_box(read_csv_from(buffer.as_slice(), &CsvOptions::default()).unwrap()))
    });
}

criterion_group!(
    benches,
    bench_same_data,
    bench_run_all,
    bench_scoped_rows,
    bench_csv
);
criterion_main!(benches);
