// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Builder pattern for creating pipelines.
//!
//! The `LoaderBuilder` provides a fluent API over [`LoaderConfig`].

use std::path::PathBuf;

use super::config::{DecodeErrorPolicy, LoaderConfig, ValueSelection};
use super::Pipeline;
use crate::Result;

/// Builder for creating pipelines.
///
/// # Example
///
/// ```rust,no_run
/// use tfrecord_loader::pipeline::{LoaderBuilder, ValueSelection};
///
/// let pipeline = LoaderBuilder::new()
///     .input("events.out.tfevents.1700000000.host")
///     .recording_id("exp1")
///     .fail_fast(true)
///     .value_selection(ValueSelection::All)
///     .build()?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct LoaderBuilder {
    config: LoaderConfig,
}

impl LoaderBuilder {
    /// Create a new builder with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing configuration, e.g. one read from TOML.
    pub fn from_config(config: LoaderConfig) -> Self {
        Self { config }
    }

    /// Set the event file to read.
    pub fn input<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.config.input = path.into();
        self
    }

    /// Set the recording id.
    pub fn recording_id(mut self, id: impl Into<String>) -> Self {
        self.config.recording_id = Some(id.into());
        self
    }

    /// Set the application id.
    pub fn application_id(mut self, id: impl Into<String>) -> Self {
        self.config.application_id = id.into();
        self
    }

    /// Set the decode error policy.
    pub fn on_decode_error(mut self, policy: DecodeErrorPolicy) -> Self {
        self.config.on_decode_error = policy;
        self
    }

    /// Shorthand for [`DecodeErrorPolicy::FailFast`] when `true`.
    pub fn fail_fast(self, enabled: bool) -> Self {
        self.on_decode_error(if enabled {
            DecodeErrorPolicy::FailFast
        } else {
            DecodeErrorPolicy::Skip
        })
    }

    /// Set which value entries of a record are processed.
    pub fn value_selection(mut self, selection: ValueSelection) -> Self {
        self.config.value_selection = selection;
        self
    }

    /// Set the largest accepted record length.
    pub fn max_record_len(mut self, len: u64) -> Self {
        self.config.max_record_len = len;
        self
    }

    /// Get the configuration built so far.
    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Validate the configuration and create the pipeline.
    pub fn build(self) -> Result<Pipeline> {
        self.config.validate()?;
        Ok(Pipeline::new(self.config))
    }
}
