// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Loader configuration.
//!
//! Configuration is an explicit value passed to the pipeline. It can be
//! built in code, through [`super::LoaderBuilder`], or read from TOML:
//!
//! ```toml
//! input = "runs/exp1/events.out.tfevents.1700000000.host"
//! recording_id = "exp1"
//! on_decode_error = "fail_fast"
//! value_selection = "all"
//! max_record_len = 268435456
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::dispatch::RecordingInfo;
use crate::io::DEFAULT_MAX_RECORD_LEN;
use crate::{LoaderError, Result};

/// Application id used when none is configured.
pub const DEFAULT_APPLICATION_ID: &str = "rerun_example_external_data_loader_tfrecord";

/// What to do when a record is recognized but malformed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecodeErrorPolicy {
    /// Log it, count it, move on to the next record
    #[default]
    Skip,
    /// Stop the load with [`LoaderError::Decode`]
    FailFast,
}

/// Which value entries of a record to process.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueSelection {
    /// Only the first entry of each record's value list
    #[default]
    First,
    /// Every entry, in list order
    All,
}

/// Configuration for one load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoaderConfig {
    /// Event file to read
    pub input: PathBuf,
    /// Recording to write into; a random one is generated when unset
    pub recording_id: Option<String>,
    /// Application the recording belongs to
    pub application_id: String,
    /// Handling of malformed records
    pub on_decode_error: DecodeErrorPolicy,
    /// Handling of records with several values
    pub value_selection: ValueSelection,
    /// Largest record accepted, in bytes
    pub max_record_len: u64,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::new(),
            recording_id: None,
            application_id: DEFAULT_APPLICATION_ID.to_string(),
            on_decode_error: DecodeErrorPolicy::default(),
            value_selection: ValueSelection::default(),
            max_record_len: DEFAULT_MAX_RECORD_LEN,
        }
    }
}

impl LoaderConfig {
    /// Create a configuration for `input` with defaults for everything else.
    pub fn new<P: AsRef<Path>>(input: P) -> Self {
        Self {
            input: input.as_ref().to_path_buf(),
            ..Self::default()
        }
    }

    /// Parse a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| LoaderError::invalid_config(e.to_string()))
    }

    /// Read and parse a TOML file.
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            LoaderError::invalid_config(format!("Failed to read {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&text)
    }

    /// Check internal consistency.
    pub fn validate(&self) -> Result<()> {
        if self.max_record_len == 0 {
            return Err(LoaderError::invalid_config(
                "max_record_len must be greater than zero",
            ));
        }
        if self.application_id.trim().is_empty() {
            return Err(LoaderError::invalid_config("application_id is empty"));
        }
        if self
            .recording_id
            .as_deref()
            .is_some_and(|id| id.trim().is_empty())
        {
            return Err(LoaderError::invalid_config("recording_id is empty"));
        }
        Ok(())
    }

    /// Recording identity for the sink, generating a recording id if unset.
    pub fn recording_info(&self) -> RecordingInfo {
        RecordingInfo {
            application_id: self.application_id.clone(),
            recording_id: self
                .recording_id
                .clone()
                .unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = LoaderConfig::default();
        assert_eq!(config.on_decode_error, DecodeErrorPolicy::Skip);
        assert_eq!(config.value_selection, ValueSelection::First);
        assert_eq!(config.max_record_len, DEFAULT_MAX_RECORD_LEN);
        assert_eq!(config.application_id, DEFAULT_APPLICATION_ID);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_toml() {
        let config = LoaderConfig::from_toml_str(
            r#"
            input = "events.out.tfevents.1"
            recording_id = "abc"
            on_decode_error = "fail_fast"
            value_selection = "all"
            max_record_len = 1024
            "#,
        )
        .unwrap();
        assert_eq!(config.input, PathBuf::from("events.out.tfevents.1"));
        assert_eq!(config.recording_id.as_deref(), Some("abc"));
        assert_eq!(config.on_decode_error, DecodeErrorPolicy::FailFast);
        assert_eq!(config.value_selection, ValueSelection::All);
        assert_eq!(config.max_record_len, 1024);
        assert_eq!(config.application_id, DEFAULT_APPLICATION_ID);
    }

    #[test]
    fn test_from_toml_rejects_unknown_keys() {
        let err = LoaderConfig::from_toml_str("bogus = 1").unwrap_err();
        assert!(matches!(err, LoaderError::InvalidConfig { .. }));
    }

    #[test]
    fn test_from_toml_rejects_bad_policy() {
        assert!(LoaderConfig::from_toml_str(r#"on_decode_error = "maybe""#).is_err());
    }

    #[test]
    fn test_validate() {
        let mut config = LoaderConfig::new("x");
        config.max_record_len = 0;
        assert!(config.validate().is_err());

        let mut config = LoaderConfig::new("x");
        config.recording_id = Some("  ".to_string());
        assert!(config.validate().is_err());

        let mut config = LoaderConfig::new("x");
        config.application_id = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_recording_info() {
        let mut config = LoaderConfig::new("x");
        config.recording_id = Some("shared".to_string());
        assert_eq!(config.recording_info().recording_id, "shared");

        config.recording_id = None;
        let generated = config.recording_info().recording_id;
        assert!(uuid::Uuid::parse_str(&generated).is_ok());
        assert_ne!(generated, config.recording_info().recording_id);
    }
}
