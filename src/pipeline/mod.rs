// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Load pipeline.
//!
//! [`Pipeline`] drives frame reading, event decoding and dispatch strictly
//! in sequence: each record is fully dispatched before the next one is
//! read, so sink calls follow container order.
//!
//! - [`config`] - [`LoaderConfig`] and its policies
//! - [`builder`] - [`LoaderBuilder`], fluent configuration
//! - [`stats`] - [`LoadStats`] counters

pub mod builder;
pub mod config;
pub mod stats;

pub use builder::LoaderBuilder;
pub use config::{DecodeErrorPolicy, LoaderConfig, ValueSelection, DEFAULT_APPLICATION_ID};
pub use stats::LoadStats;

use std::collections::HashSet;
use std::io::Read;

use tracing::{debug, warn};

use crate::dispatch::{DispatchOutcome, Sink, ValueDispatcher};
use crate::encoding::{DecodeResult, Decoded, EventDecoder};
use crate::io::{frame, Frame, FrameReader};
use crate::{LoaderError, Result};

/// A configured load, reusable across sources.
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: LoaderConfig,
    decoder: EventDecoder,
}

/// Per-run state that is not part of the reported statistics.
struct RunState<'a, S: Sink> {
    dispatcher: ValueDispatcher<S>,
    stats: &'a mut LoadStats,
    warned_histograms: HashSet<String>,
}

impl Pipeline {
    /// Create a pipeline. The configuration is used as given; see
    /// [`LoaderBuilder::build`] for a validating constructor.
    pub fn new(config: LoaderConfig) -> Self {
        Self {
            config,
            decoder: EventDecoder::new(),
        }
    }

    /// The pipeline's configuration.
    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Load every record of `source` into `sink`.
    ///
    /// Statistics are logged whether or not the load succeeds.
    pub fn run<R: Read, S: Sink>(&self, source: R, sink: S) -> Result<LoadStats> {
        let mut stats = LoadStats::new();
        let result = self.run_into(source, sink, &mut stats);
        stats.log_summary();
        result.map(|()| stats)
    }

    /// Load the configured input file into `sink`.
    pub fn run_file<S: Sink>(&self, sink: S) -> Result<LoadStats> {
        if self.config.input.as_os_str().is_empty() {
            return Err(LoaderError::invalid_config("no input file configured"));
        }
        let source = frame::open_buffered(&self.config.input, "Pipeline::run_file")?;
        self.run(source, sink)
    }

    /// Like [`run`](Self::run), accumulating into caller-owned statistics.
    ///
    /// On error, `stats` describes the prefix processed before the failure.
    /// The sink is flushed on every exit path.
    pub fn run_into<R: Read, S: Sink>(
        &self,
        source: R,
        sink: S,
        stats: &mut LoadStats,
    ) -> Result<()> {
        let mut frames = FrameReader::new(source).with_max_record_len(self.config.max_record_len);
        let mut state = RunState {
            dispatcher: ValueDispatcher::new(sink),
            stats,
            warned_histograms: HashSet::new(),
        };

        let outcome = self.drive(&mut frames, &mut state);
        let flushed = state.dispatcher.flush();
        outcome?;
        flushed?;
        Ok(())
    }

    fn drive<R: Read, S: Sink>(
        &self,
        frames: &mut FrameReader<R>,
        state: &mut RunState<'_, S>,
    ) -> Result<()> {
        while let Some(frame) = frames.read_frame()? {
            state.stats.record_frame(frame.encoded_len());
            for result in self.decode(&frame) {
                self.handle(frame.offset, result, state)?;
            }
        }
        Ok(())
    }

    fn decode(&self, frame: &Frame) -> Vec<DecodeResult> {
        match self.config.value_selection {
            ValueSelection::First => vec![self.decoder.decode(&frame.payload)],
            ValueSelection::All => self.decoder.decode_all(&frame.payload),
        }
    }

    fn handle<S: Sink>(
        &self,
        offset: u64,
        result: DecodeResult,
        state: &mut RunState<'_, S>,
    ) -> Result<()> {
        let event = match result {
            Ok(Decoded::Event(event)) => event,
            Ok(Decoded::Skip(reason)) => {
                debug!(offset, reason = %reason, "skipping record");
                state.stats.record_skip(&reason);
                return Ok(());
            }
            Err(err) => {
                if self.config.on_decode_error == DecodeErrorPolicy::FailFast {
                    return Err(LoaderError::decode(offset, err));
                }
                warn!(
                    offset,
                    tag = err.tag().unwrap_or_default(),
                    error = %err,
                    "skipping malformed record"
                );
                state.stats.decode_errors += 1;
                return Ok(());
            }
        };

        let tag = event.tag.clone();
        match state.dispatcher.dispatch(event)? {
            DispatchOutcome::Written(kind) => state.stats.record_dispatched(kind),
            DispatchOutcome::Unsupported(kind) => {
                state.stats.histograms_unsupported += 1;
                if state.warned_histograms.insert(tag.clone()) {
                    warn!(tag = %tag, kind = kind.as_str(), "value kind not supported, dropping");
                }
            }
        }
        Ok(())
    }
}
