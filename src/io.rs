//! CSV input and output for datasets.
//!
//! The header row becomes the column names, duplicates included, so raw
//! files with repeated headers reach the column-name pass untouched. Cells
//! are typed with [`Value::infer`]. Rows are labelled `0..n` in file order.
//!
//! # Example
//!
//! ```
//! use tabdupe::io::{read_csv_from, write_csv, CsvOptions};
//!
//! let data = "a,b,a\n1,x,1\n2,y,2\n";
//! let ds = read_csv_from(data.as_bytes(), &CsvOptions::default()).unwrap();
//! assert_eq!(ds.column_names(), vec!["a", "b", "a"]);
//!
//! let mut out = Vec::new();
//! write_csv(&ds, &mut out, &CsvOptions::default()).unwrap();
//! assert_eq!(String::from_utf8(out).unwrap(), data);
//! ```

use std::fs::File;
use std::path::Path;

use thiserror::Error;

use crate::dataset::{Column, Dataset, DatasetError, Value};

/// Errors that can occur while reading or writing CSV data.
#[derive(Debug, Error)]
pub enum CsvIoError {
    /// I/O error during reading or writing.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed CSV (for example a row with the wrong number of fields).
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The parsed columns did not form a valid dataset.
    #[error(transparent)]
    Dataset(#[from] DatasetError),
}

/// CSV reading and writing options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvOptions {
    /// Field delimiter.
    pub delimiter: u8,
    /// Write the row labels as a leading column.
    pub write_index: bool,
    /// Header of the leading label column.
    pub index_header: String,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            write_index: false,
            index_header: "index".to_string(),
        }
    }
}

impl CsvOptions {
    /// Set the delimiter.
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Write row labels as a leading column.
    #[must_use]
    pub fn with_index(mut self, write_index: bool) -> Self {
        self.write_index = write_index;
        self
    }
}

/// Read a dataset from a CSV file.
///
/// # Errors
///
/// Returns `CsvIoError` if the file cannot be opened or parsed.
pub fn read_csv(path: &Path, options: &CsvOptions) -> Result<Dataset, CsvIoError> {
    let file = File::open(path)?;
    read_csv_from(file, options)
}

/// Read a dataset from any CSV source.
///
/// # Errors
///
/// Returns `CsvIoError` if the data cannot be parsed.
pub fn read_csv_from<R: std::io::Read>(
    reader: R,
    options: &CsvOptions,
) -> Result<Dataset, CsvIoError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(options.delimiter)
        .has_headers(true)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let mut values: Vec<Vec<Value>> = vec![Vec::new(); headers.len()];

    for record in csv_reader.records() {
        let record = record?;
        for (column, field) in values.iter_mut().zip(record.iter()) {
            column.push(Value::infer(field));
        }
    }

    let columns = headers
        .iter()
        .zip(values)
        .map(|(name, vals)| Column::new(name, vals))
        .collect();
    let dataset = Dataset::new(columns)?;
    log::debug!(
        "Read {} columns x {} rows",
        dataset.n_cols(),
        dataset.n_rows()
    );
    Ok(dataset)
}

/// Write a dataset as CSV.
///
/// # Errors
///
/// Returns `CsvIoError` if writing fails.
pub fn write_csv<W: std::io::Write>(
    dataset: &Dataset,
    writer: W,
    options: &CsvOptions,
) -> Result<(), CsvIoError> {
    let mut csv_writer = csv::WriterBuilder::new()
        .delimiter(options.delimiter)
        .from_writer(writer);

    let index_header = unique_index_header(dataset, &options.index_header);
    let mut header: Vec<&str> = Vec::with_capacity(dataset.n_cols() + 1);
    if options.write_index {
        header.push(&index_header);
    }
    header.extend(dataset.column_names());
    csv_writer.write_record(&header)?;

    for (row, label) in dataset.index().iter().enumerate() {
        let mut fields: Vec<String> = Vec::with_capacity(header.len());
        if options.write_index {
            fields.push(label.to_string());
        }
        fields.extend(dataset.row(row).into_iter().map(ToString::to_string));
        csv_writer.write_record(&fields)?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Header for the label column that no data column already uses.
///
/// Tries `base`, then `base_1`, `base_2`, ...
fn unique_index_header(dataset: &Dataset, base: &str) -> String {
    if !dataset.contains(base) {
        return base.to_string();
    }
    (1..)
        .map(|n| format!("{base}_{n}"))
        .find(|candidate| !dataset.contains(candidate))
        .unwrap_or_else(|| base.to_string())
}

/// Write a dataset to a CSV file.
///
/// # Errors
///
/// Returns `CsvIoError` if the file cannot be created or written.
pub fn write_csv_file(
    dataset: &Dataset,
    path: &Path,
    options: &CsvOptions,
) -> Result<(), CsvIoError> {
    let file = File::create(path)?;
    write_csv(dataset, file, options)
}
