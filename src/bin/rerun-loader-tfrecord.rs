// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # rerun-loader-tfrecord
//!
//! External data loader for TensorBoard event files.
//!
//! The viewer invokes the loader once per candidate file. Files that are not
//! TensorBoard event files are declined with exit status 66; accepted files
//! are streamed to stdout as an RRD recording, or as JSON lines with
//! `--format json`.
//!
//! ## Usage
//!
//! ```sh
//! # Load into a fresh recording
//! rerun-loader-tfrecord runs/exp1/events.out.tfevents.1700000000.host
//!
//! # Load into an existing recording, stop at the first malformed record
//! rerun-loader-tfrecord --recording-id exp1 --fail-fast events.out.tfevents.1
//!
//! # Take settings from a file
//! rerun-loader-tfrecord --config loader.toml events.out.tfevents.1
//!
//! # Inspect the decoded values as text
//! rerun-loader-tfrecord --format json events.out.tfevents.1 | head
//! ```

mod common;

use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::process;

use anyhow::Context as _;
use clap::{Parser, ValueEnum};
use common::{Result, EXIT_FAILURE, EXIT_SUCCESS};
use tracing::debug;

use tfrecord_loader::{
    check_input, JsonLinesSink, LoaderBuilder, RerunSink, ValueSelection, INCOMPATIBLE_EXIT_CODE,
};

/// Load TensorBoard event files into a recording
///
/// Reads the TFRecord container, decodes scalars, images, text and tensors,
/// and streams them to stdout for the viewer.
#[derive(Parser, Clone, Debug)]
#[command(name = "rerun-loader-tfrecord")]
#[command(about = "External data loader for TensorBoard event files", long_about = None)]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    /// Event file to load
    filepath: PathBuf,

    /// Recording to log into (random when omitted)
    #[arg(long)]
    recording_id: Option<String>,

    /// Application id of the recording
    #[arg(long)]
    application_id: Option<String>,

    /// TOML configuration file; flags take precedence over it
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Stop at the first malformed record instead of skipping it
    #[arg(long)]
    fail_fast: bool,

    /// Process every value of a record, not only the first
    #[arg(long)]
    all_values: bool,

    /// Output stream format
    #[arg(long, value_enum, default_value_t = OutputFormat::Rrd)]
    format: OutputFormat,
}

/// What the loader writes to stdout.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    /// Rerun recording stream, read by the viewer
    Rrd,
    /// Newline-delimited JSON
    Json,
}

fn run(cli: Cli) -> Result<()> {
    let mut builder =
        LoaderBuilder::from_config(common::base_config(cli.config.as_deref())?).input(&cli.filepath);
    if let Some(id) = cli.recording_id {
        builder = builder.recording_id(id);
    }
    if let Some(id) = cli.application_id {
        builder = builder.application_id(id);
    }
    if cli.fail_fast {
        builder = builder.fail_fast(true);
    }
    if cli.all_values {
        builder = builder.value_selection(ValueSelection::All);
    }
    let pipeline = builder.build()?;

    let recording = pipeline.config().recording_info();
    debug!(
        application_id = %recording.application_id,
        recording_id = %recording.recording_id,
        "loading"
    );

    let loaded = match cli.format {
        OutputFormat::Rrd => {
            let sink =
                RerunSink::stdout(&recording).context("Failed to open recording stream")?;
            pipeline.run_file(sink)
        }
        OutputFormat::Json => {
            let stdout = io::stdout();
            let sink = JsonLinesSink::new(BufWriter::new(stdout.lock()), &recording)
                .context("Failed to write recording header")?;
            pipeline.run_file(sink)
        }
    };
    loaded.with_context(|| format!("Failed to load {}", cli.filepath.display()))?;
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    common::init_tracing();

    let eligibility = check_input(&cli.filepath);
    if !eligibility.is_supported() {
        debug!(path = %cli.filepath.display(), reason = %eligibility, "declining input");
        process::exit(INCOMPATIBLE_EXIT_CODE);
    }

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        process::exit(EXIT_FAILURE);
    }
    process::exit(EXIT_SUCCESS);
}
