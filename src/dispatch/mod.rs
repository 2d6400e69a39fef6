// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Dispatch of decoded events to sinks.
//!
//! - [`sink`] - the [`Sink`] trait
//! - [`dispatcher`] - [`ValueDispatcher`], event to sink calls
//! - [`rerun_sink`] - [`RerunSink`], RRD stream for the Rerun viewer
//! - [`json_lines`] - [`JsonLinesSink`], newline-delimited JSON transport
//! - [`memory`] - [`MemorySink`], in-memory call recorder

pub mod dispatcher;
pub mod json_lines;
pub mod memory;
pub mod rerun_sink;
pub mod sink;

pub use dispatcher::{DispatchOutcome, ValueDispatcher};
pub use json_lines::JsonLinesSink;
pub use memory::{MemorySink, SinkCall};
pub use rerun_sink::RerunSink;
pub use sink::{RecordingInfo, Sink, SinkResult};
