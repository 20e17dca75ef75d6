//! Application configuration.
//!
//! Settings are layered with figment, lowest priority first:
//!
//! 1. Built-in defaults
//! 2. A TOML file (`--config PATH`, or `config.toml` in the platform config
//!    directory)
//! 3. Environment variables prefixed `TABDUPE_` (e.g. `TABDUPE_DUP_MARKER`)
//! 4. CLI flags, applied by [`crate::run_app`]

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::dedup::{DedupConfig, DEFAULT_DUP_MARKER};
use crate::io::CsvOptions;

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Columns to deduplicate rows on individually.
    pub single_columns: Vec<String>,
    /// Columns to deduplicate rows on jointly.
    pub column_group: Vec<String>,
    /// Infix used when relabelling repeated column names.
    pub dup_marker: String,
    /// CSV field delimiter.
    pub delimiter: char,
    /// Write row labels as the first output column.
    pub write_index: bool,
    /// Skip the same-data column pass.
    pub skip_same_data: bool,
    /// Skip the row pass.
    pub skip_rows: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            single_columns: Vec::new(),
            column_group: Vec::new(),
            dup_marker: DEFAULT_DUP_MARKER.to_string(),
            delimiter: ',',
            write_index: false,
            skip_same_data: false,
            skip_rows: false,
        }
    }
}

impl Config {
    /// Build the layered figment without extracting it.
    ///
    /// With `path` set, that file is used; otherwise the default path, if
    /// it can be determined. A missing file contributes nothing.
    #[must_use]
    pub fn figment(path: Option<&Path>) -> Figment {
        let file = path.map(Path::to_path_buf).or_else(Self::default_path);
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(file) = file {
            figment = figment.merge(Toml::file(file));
        }
        figment.merge(Env::prefixed("TABDUPE_"))
    }

    /// Load the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the file or environment holds invalid values.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config: Self = Self::figment(path)
            .extract()
            .context("Failed to load configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Check values that serde cannot.
    ///
    /// # Errors
    ///
    /// Returns an error for a non-ASCII delimiter or an empty marker.
    pub fn validate(&self) -> Result<()> {
        if !self.delimiter.is_ascii() {
            anyhow::bail!("Delimiter must be a single ASCII character, got '{}'", self.delimiter);
        }
        if self.dup_marker.is_empty() {
            anyhow::bail!("dup_marker cannot be empty");
        }
        Ok(())
    }

    /// Save the configuration as TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;
        Ok(())
    }

    /// Platform-specific configuration file path.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "tabdupe", "tabdupe")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Deduplicator settings derived from this configuration.
    ///
    /// Empty scope lists mean "no scope".
    #[must_use]
    pub fn dedup_config(&self) -> DedupConfig {
        let mut config = DedupConfig::default().with_dup_marker(self.dup_marker.clone());
        if !self.single_columns.is_empty() {
            config = config.with_single_columns(self.single_columns.clone());
        }
        if !self.column_group.is_empty() {
            config = config.with_column_group(self.column_group.clone());
        }
        config
    }

    /// CSV settings derived from this configuration.
    #[must_use]
    pub fn csv_options(&self) -> CsvOptions {
        // validate() guarantees an ASCII delimiter
        CsvOptions::default()
            .with_delimiter(self.delimiter as u8)
            .with_index(self.write_index)
    }
}
