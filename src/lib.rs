//! tabdupe - Column and row deduplication for tabular data
//!
//! Cleans a dataset in three ordered passes over a private working copy:
//!
//! 1. Repeated column names: exact repeats are dropped, the rest relabelled
//!    `<name>_dup_<k>`.
//! 2. Columns holding the same data as an earlier column are dropped.
//! 3. Duplicate rows are dropped, on all columns and then on optional
//!    column scopes.
//!
//! The input dataset is never modified. A one-hot encoder for
//! classification targets ships alongside.
//!
//! # Example
//!
//! ```
//! use tabdupe::dataset::Dataset;
//! use tabdupe::dedup::Deduplicator;
//!
//! let ds = Dataset::from_columns(vec![
//!     ("a", vec![1, 2, 2]),
//!     ("b", vec![1, 2, 2]),
//! ])
//! .unwrap();
//!
//! let mut dedup = Deduplicator::with_defaults(&ds);
//! let report = dedup.run_all().unwrap();
//! assert_eq!(report.columns_after, 1);
//! assert_eq!(dedup.deduped_columns().unwrap().index(), &[0, 1]);
//! ```

pub mod cli;
pub mod config;
pub mod dataset;
pub mod dedup;
pub mod encode;
pub mod error;
pub mod io;
pub mod logging;
pub mod observer;
pub mod report;

use std::io::{IsTerminal, Write};
use std::path::Path;

use anyhow::{Context, Result};

use crate::cli::{Cli, Commands, DedupArgs, OneHotArgs, ReportFormat};
use crate::config::Config;
use crate::dataset::{Dataset, Value};
use crate::dedup::Deduplicator;
use crate::error::ExitCode;
use crate::report::{JsonReport, TextReport};

/// Run the application for parsed CLI arguments.
///
/// # Errors
///
/// Returns an error if configuration, input, a pass, or output fails.
pub fn run_app(cli: Cli) -> Result<ExitCode> {
    logging::init_logging(cli.verbose, cli.quiet, cli.no_color);
    log::debug!("Log level: {}", logging::current_level_name());

    let config = Config::load(cli.config.as_deref())?;
    log::debug!("Configuration: {config:?}");

    let color = !cli.no_color && std::io::stdout().is_terminal();
    match cli.command {
        Commands::Dedup(args) => run_dedup(args, config, color, cli.quiet),
        Commands::Onehot(args) => run_onehot(&args, config),
    }
}

/// Apply CLI overrides on top of the loaded configuration.
fn merge_dedup_args(mut config: Config, args: &DedupArgs) -> Result<Config> {
    if !args.single_columns.is_empty() {
        config.single_columns.clone_from(&args.single_columns);
    }
    if !args.group_columns.is_empty() {
        config.column_group.clone_from(&args.group_columns);
    }
    if let Some(marker) = &args.dup_marker {
        config.dup_marker.clone_from(marker);
    }
    if let Some(delimiter) = args.delimiter {
        config.delimiter = delimiter;
    }
    config.skip_same_data |= args.skip_same_data;
    config.skip_rows |= args.skip_rows;
    config.write_index |= args.write_index;
    config.validate()?;
    Ok(config)
}

fn run_dedup(args: DedupArgs, config: Config, color: bool, quiet: bool) -> Result<ExitCode> {
    let config = merge_dedup_args(config, &args)?;
    let csv_options = config.csv_options();

    let source = io::read_csv(&args.input, &csv_options)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;
    log::info!(
        "Loaded {}: {} columns x {} rows",
        args.input.display(),
        source.n_cols(),
        source.n_rows()
    );

    let mut dedup = Deduplicator::new(&source, config.dedup_config());
    dedup.resolve_column_name_duplicates()?;
    if config.skip_same_data {
        log::debug!("Skipping same-data pass");
    } else {
        dedup.resolve_same_data_duplicates()?;
    }
    if config.skip_rows {
        log::debug!("Skipping row pass");
    } else {
        dedup.resolve_row_duplicates()?;
    }

    let report = dedup.report()?;
    let exit_code = if report.found_duplicates() {
        ExitCode::Success
    } else {
        ExitCode::NoDuplicates
    };

    if let Some(output) = &args.output {
        io::write_csv_file(dedup.deduped_columns()?, output, &csv_options)
            .with_context(|| format!("Failed to write {}", output.display()))?;
        log::info!("Wrote {}", output.display());
    }

    let input_name = args.input.display().to_string();
    let stdout = std::io::stdout();
    match args.report {
        ReportFormat::Text if !quiet => TextReport::new(&report, color)
            .write_to(stdout.lock())
            .context("Failed to write report")?,
        ReportFormat::Json => JsonReport::new(input_name.as_str(), &report, exit_code)
            .write_to(stdout.lock())
            .context("Failed to write report")?,
        ReportFormat::Text | ReportFormat::Off => {}
    }

    if let Some(path) = &args.report_file {
        write_json_report(path, &input_name, &report, exit_code)?;
    }

    Ok(exit_code)
}

fn write_json_report(
    path: &Path,
    input: &str,
    report: &dedup::DedupReport,
    exit_code: ExitCode,
) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    JsonReport::new(input, report, exit_code)
        .write_to(std::io::BufWriter::new(file))
        .with_context(|| format!("Failed to write {}", path.display()))?;
    log::info!("Report written to {}", path.display());
    Ok(())
}

fn run_onehot(args: &OneHotArgs, mut config: Config) -> Result<ExitCode> {
    if let Some(delimiter) = args.delimiter {
        config.delimiter = delimiter;
        config.validate()?;
    }
    let csv_options = config.csv_options();

    let source = io::read_csv(&args.input, &csv_options)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;
    let labels = class_labels(&source, &args.column)?;
    let num_classes = args
        .classes
        .unwrap_or_else(|| labels.iter().max().map_or(0, |max| max + 1));
    log::debug!("Encoding {} labels into {num_classes} classes", labels.len());

    let matrix = encode::one_hot_encode(&labels, labels.len(), num_classes)
        .with_context(|| format!("Failed to encode column '{}'", args.column))?;
    let encoded = Dataset::new(
        (0..num_classes)
            .map(|class| {
                dataset::Column::new(
                    format!("class_{class}"),
                    matrix.iter().map(|row| Value::Int(i64::from(row[class]))).collect(),
                )
            })
            .collect(),
    )?;

    match &args.output {
        Some(path) => io::write_csv_file(&encoded, path, &csv_options)
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => {
            let mut stdout = std::io::stdout().lock();
            io::write_csv(&encoded, &mut stdout, &csv_options).context("Failed to write output")?;
            stdout.flush()?;
        }
    }
    Ok(ExitCode::Success)
}

/// Read a column of non-negative integer class labels.
fn class_labels(dataset: &Dataset, column: &str) -> Result<Vec<usize>> {
    let values = &dataset
        .column(column)
        .with_context(|| format!("Unknown column '{column}'"))?
        .values;
    values
        .iter()
        .enumerate()
        .map(|(row, value)| match value {
            Value::Int(n) => usize::try_from(*n)
                .with_context(|| format!("Negative label {n} at row {row}")),
            other => anyhow::bail!(
                "Label at row {row} must be an integer, got {} '{other}'",
                other.type_name()
            ),
        })
        .collect()
}
