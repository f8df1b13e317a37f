//! Configuration file support for qkview-analyzer.
//!
//! Provides YAML-based configuration through `qkview-analyzer.config.yml`
//! files, including data structures, file loading, and validation.

use anyhow::{bail, Context};
use chrono::NaiveDateTime;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use crate::application::dto::OutputFormat;
use crate::shared::text::parse_reference_time;
use crate::shared::Result;

pub const CONFIG_FILENAME: &str = "qkview-analyzer.config.yml";

/// Smallest accepted `default_year`
const MIN_DEFAULT_YEAR: i32 = 1970;

/// Largest accepted `default_year`
const MAX_DEFAULT_YEAR: i32 = 9999;

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub format: Option<String>,
    pub output: Option<String>,
    pub default_year: Option<i32>,
    pub reference_time: Option<String>,
    pub skip_patterns: Option<Vec<String>>,
    pub max_log_file_size_mb: Option<u64>,
    pub elasticsearch: Option<ElasticsearchSection>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// Remote search index settings.
#[derive(Debug, Deserialize, Default, Clone)]
pub struct ElasticsearchSection {
    pub url: Option<String>,
    pub index: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl ConfigFile {
    /// Report format, already validated by the loader.
    pub fn output_format(&self) -> Option<OutputFormat> {
        self.format.as_deref().and_then(|f| f.parse().ok())
    }

    /// Reference time, already validated by the loader.
    pub fn reference_time(&self) -> Option<NaiveDateTime> {
        self.reference_time
            .as_deref()
            .and_then(|t| parse_reference_time(t).ok())
    }

    /// Log size limit in bytes.
    pub fn max_log_file_size(&self) -> Option<u64> {
        self.max_log_file_size_mb
            .map(|mb| mb.saturating_mul(1024 * 1024))
    }
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    if let Some(ref format) = config.format {
        if let Err(e) = format.parse::<OutputFormat>() {
            bail!(
                "Invalid config: {}\n\n💡 Hint: Use 'format: json' or 'format: markdown'.",
                e
            );
        }
    }

    if let Some(year) = config.default_year {
        if !(MIN_DEFAULT_YEAR..=MAX_DEFAULT_YEAR).contains(&year) {
            bail!(
                "Invalid config: default_year {} is out of range.\n\n\
                 💡 Hint: default_year must be between {} and {}.",
                year,
                MIN_DEFAULT_YEAR,
                MAX_DEFAULT_YEAR
            );
        }
    }

    if let Some(ref reference_time) = config.reference_time {
        if let Err(e) = parse_reference_time(reference_time) {
            bail!(
                "Invalid config: {}\n\n💡 Hint: Use a value such as \"2024-06-01 12:00:00\".",
                e
            );
        }
    }

    if config.max_log_file_size_mb == Some(0) {
        bail!(
            "Invalid config: max_log_file_size_mb must be greater than 0.\n\n\
             💡 Hint: Remove the field to use the default limit of 100 MB."
        );
    }

    if let Some(ref es) = config.elasticsearch {
        if let Some(ref index) = es.index {
            if index.trim().is_empty() {
                bail!(
                    "Invalid config: elasticsearch.index must not be empty.\n\n\
                     💡 Hint: Set an index name such as \"qkview-logs\"."
                );
            }
        }
        if es.password.is_some() && es.username.is_none() {
            bail!(
                "Invalid config: elasticsearch.password is set without elasticsearch.username.\n\n\
                 💡 Hint: Add the username the password belongs to."
            );
        }
    }

    Ok(())
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    for key in config.unknown_fields.keys() {
        eprintln!(
            "⚠️  Warning: Unknown config field '{}' will be ignored.",
            key
        );
    }
}
