//! Command-line interface definitions for tabdupe.
//!
//! # Example
//!
//! ```bash
//! # Remove duplicate columns and rows, print a summary
//! tabdupe dedup data.csv -o clean.csv
//!
//! # Also drop rows that repeat a customer id, then rows repeating (city, zip)
//! tabdupe dedup data.csv -o clean.csv --single-col customer_id --group-col city --group-col zip
//!
//! # Machine-readable report
//! tabdupe dedup data.csv --report json
//!
//! # One-hot encode a label column
//! tabdupe onehot labels.csv --column target --classes 3
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Column and row deduplication for tabular data.
///
/// tabdupe resolves repeated column names, drops columns that repeat another
/// column's data, and drops duplicate rows.
#[derive(Debug, Parser)]
#[command(name = "tabdupe")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity level (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Print errors as JSON on stderr
    #[arg(long, global = true)]
    pub json_errors: bool,

    /// Configuration file (defaults to the platform config directory)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Remove duplicate columns and rows from a CSV file
    Dedup(DedupArgs),
    /// One-hot encode an integer label column
    Onehot(OneHotArgs),
}

/// Arguments for the dedup subcommand.
#[derive(Debug, Args)]
pub struct DedupArgs {
    /// CSV file to deduplicate
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Where to write the cleaned CSV (omit to only report)
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Drop rows repeating a value in this column (repeatable, applied in order)
    #[arg(long = "single-col", value_name = "NAME")]
    pub single_columns: Vec<String>,

    /// Drop rows repeating the joint values of these columns (repeatable)
    #[arg(long = "group-col", value_name = "NAME")]
    pub group_columns: Vec<String>,

    /// Report format
    #[arg(short, long, value_enum, default_value = "text")]
    pub report: ReportFormat,

    /// Also write the JSON report to this file
    #[arg(long, value_name = "PATH")]
    pub report_file: Option<PathBuf>,

    /// Skip the same-data column pass
    #[arg(long)]
    pub skip_same_data: bool,

    /// Skip the duplicate row pass
    #[arg(long)]
    pub skip_rows: bool,

    /// Write row labels as the first output column
    #[arg(long)]
    pub write_index: bool,

    /// Field delimiter (a single character, or "tab")
    #[arg(short, long, value_name = "CHAR", value_parser = parse_delimiter)]
    pub delimiter: Option<char>,

    /// Infix for relabelled duplicate column names
    #[arg(long, value_name = "TEXT")]
    pub dup_marker: Option<String>,
}

/// Arguments for the onehot subcommand.
#[derive(Debug, Args)]
pub struct OneHotArgs {
    /// CSV file holding the labels
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Name of the label column
    #[arg(short, long, value_name = "NAME")]
    pub column: String,

    /// Number of classes (defaults to the largest label + 1)
    #[arg(long, value_name = "N")]
    pub classes: Option<usize>,

    /// Where to write the encoded CSV (defaults to stdout)
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Field delimiter (a single character, or "tab")
    #[arg(short, long, value_name = "CHAR", value_parser = parse_delimiter)]
    pub delimiter: Option<char>,
}

/// Report format for dedup results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable summary
    #[default]
    Text,
    /// JSON for scripting
    Json,
    /// No report
    Off,
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportFormat::Text => write!(f, "text"),
            ReportFormat::Json => write!(f, "json"),
            ReportFormat::Off => write!(f, "off"),
        }
    }
}

/// Parse a delimiter argument.
///
/// Accepts one ASCII character, or the words `tab` / `\t`.
///
/// # Examples
///
/// ```
/// use tabdupe::cli::parse_delimiter;
///
/// assert_eq!(parse_delimiter(";").unwrap(), ';');
/// assert_eq!(parse_delimiter("tab").unwrap(), '\t');
/// assert!(parse_delimiter("ab").is_err());
/// ```
///
/// # Errors
///
/// Returns an error for empty input, more than one character, or non-ASCII.
pub fn parse_delimiter(s: &str) -> Result<char, String> {
    if s.eq_ignore_ascii_case("tab") || s == "\\t" {
        return Ok('\t');
    }
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (None, _) => Err("Delimiter cannot be empty".to_string()),
        (Some(c), None) if c.is_ascii() => Ok(c),
        (Some(c), None) => Err(format!("Delimiter must be ASCII, got '{c}'")),
        (Some(_), Some(_)) => Err(format!("Delimiter must be one character, got '{s}'")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_delimiter() {
        assert_eq!(parse_delimiter(",").unwrap(), ',');
        assert_eq!(parse_delimiter("TAB").unwrap(), '\t');
        assert_eq!(parse_delimiter("\\t").unwrap(), '\t');
        assert_eq!(parse_delimiter("\t").unwrap(), '\t');
        assert!(parse_delimiter("").is_err());
        assert!(parse_delimiter(";;").is_err());
        assert!(parse_delimiter("§").is_err());
    }

    #[test]
    fn test_cli_parse_help() {
        let result = Cli::try_parse_from(["tabdupe", "--help"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_parse_dedup_basic() {
        let cli = Cli::try_parse_from(["tabdupe", "dedup", "data.csv"]).unwrap();
        assert_eq!(cli.verbose, 0);
        match cli.command {
            Commands::Dedup(args) => {
                assert_eq!(args.input, PathBuf::from("data.csv"));
                assert_eq!(args.output, None);
                assert_eq!(args.report, ReportFormat::Text);
                assert!(args.single_columns.is_empty());
                assert!(!args.skip_rows);
            }
            _ => panic!("Expected Dedup command"),
        }
    }

    #[test]
    fn test_cli_parse_dedup_with_scopes() {
        let cli = Cli::try_parse_from([
            "tabdupe",
            "-v",
            "dedup",
            "data.csv",
            "-o",
            "clean.csv",
            "--single-col",
            "id",
            "--single-col",
            "email",
            "--group-col",
            "city",
            "--group-col",
            "zip",
            "--report",
            "json",
            "--delimiter",
            ";",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 1);
        match cli.command {
            Commands::Dedup(args) => {
                assert_eq!(args.output, Some(PathBuf::from("clean.csv")));
                assert_eq!(args.single_columns, vec!["id", "email"]);
                assert_eq!(args.group_columns, vec!["city", "zip"]);
                assert_eq!(args.report, ReportFormat::Json);
                assert_eq!(args.delimiter, Some(';'));
            }
            _ => panic!("Expected Dedup command"),
        }
    }

    #[test]
    fn test_cli_quiet_conflicts_with_verbose() {
        let result = Cli::try_parse_from(["tabdupe", "-v", "-q", "dedup", "data.csv"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_missing_input() {
        assert!(Cli::try_parse_from(["tabdupe", "dedup"]).is_err());
    }

    #[test]
    fn test_cli_parse_onehot() {
        let cli = Cli::try_parse_from([
            "tabdupe", "onehot", "labels.csv", "--column", "target", "--classes", "3",
        ])
        .unwrap();
        match cli.command {
            Commands::Onehot(args) => {
                assert_eq!(args.column, "target");
                assert_eq!(args.classes, Some(3));
                assert_eq!(args.output, None);
            }
            _ => panic!("Expected Onehot command"),
        }
    }

    #[test]
    fn test_cli_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "tabdupe",
            "dedup",
            "data.csv",
            "--json-errors",
            "--config",
            "my.toml",
        ])
        .unwrap();
        assert!(cli.json_errors);
        assert_eq!(cli.config, Some(PathBuf::from("my.toml")));
    }
}
