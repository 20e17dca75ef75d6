//! Report formatters for deduplication results.
//!
//! - JSON for automation and scripting
//! - Plain text summary for terminals
//!
//! # Example
//!
//! ```
//! use tabdupe::dataset::Dataset;
//! use tabdupe::dedup::Deduplicator;
//! use tabdupe::error::ExitCode;
//! use tabdupe::report::JsonReport;
//!
//! let ds = Dataset::from_columns(vec![("a", vec![1, 1])]).unwrap();
//! let mut dedup = Deduplicator::with_defaults(&ds);
//! let report = dedup.run_all().unwrap();
//!
//! let json = JsonReport::new("data.csv", &report, ExitCode::Success);
//! println!("{}", json.to_json_pretty().unwrap());
//! ```

pub mod json;
pub mod text;

pub use json::JsonReport;
pub use text::TextReport;
