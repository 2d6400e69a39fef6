// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Common utilities for the loader executable.

use std::path::Path;

use tracing_subscriber::EnvFilter;

use tfrecord_loader::LoaderConfig;

pub use anyhow::Result as CliResult;
pub type Result<T = ()> = CliResult<T>;

/// Exit status for a successful load.
pub const EXIT_SUCCESS: i32 = 0;

/// Exit status for any failure after the input was accepted.
pub const EXIT_FAILURE: i32 = 1;

/// Install the log subscriber.
///
/// Logs go to stderr only; stdout carries the sink stream. The level comes
/// from `RUST_LOG` and defaults to `warn`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    // A subscriber may already be installed when embedded; keep that one.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Load the base configuration, from a TOML file when one is given.
pub fn base_config(config_file: Option<&Path>) -> Result<LoaderConfig> {
    match config_file {
        Some(path) => Ok(LoaderConfig::from_toml_file(path)?),
        None => Ok(LoaderConfig::default()),
    }
}
