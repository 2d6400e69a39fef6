// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # tfrecord-loader
//!
//! Loader for TensorBoard event files (`*.tfevents*`).
//!
//! The library reads the TFRecord container, decodes each record's
//! `Event` payload and forwards typed values to a [`Sink`]:
//! - **Framing** with masked CRC32C validation in [`io`](crate::io)
//! - **Event decoding** into [`Value`]s in [`encoding`](crate::encoding)
//! - **Dispatch** to sinks in [`dispatch`](crate::dispatch)
//! - **Orchestration** and configuration in [`pipeline`](crate::pipeline)
//!
//! ## Architecture
//!
//! - `core/` - Event and value types, error types
//! - `io/` - Frame reader and writer, checksums, input eligibility
//! - `encoding/` - Protobuf messages, tensor extraction, event decoder
//! - `dispatch/` - Sink trait, value dispatcher, Rerun, JSON lines and memory sinks
//! - `pipeline/` - Configuration, builder, statistics, the load loop
//!
//! ## Example: Loading an event file
//!
//! ```rust,no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use tfrecord_loader::{LoaderBuilder, RerunSink};
//!
//! let pipeline = LoaderBuilder::new()
//!     .input("events.out.tfevents.1700000000.host")
//!     .recording_id("exp1")
//!     .build()?;
//!
//! let recording = pipeline.config().recording_info();
//! let sink = RerunSink::stdout(&recording)?;
//! let stats = pipeline.run_file(sink)?;
//! println!("{} events", stats.events_dispatched);
//! # Ok(())
//! # }
//! ```
//!
//! ## Example: Reading frames
//!
//! ```rust,no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use tfrecord_loader::{EventDecoder, FrameReader};
//!
//! let decoder = EventDecoder::new();
//! for frame in FrameReader::open("events.out.tfevents.1")? {
//!     let frame = frame?;
//!     println!("{}: {:?}", frame.offset, decoder.decode(&frame.payload));
//! }
//! # Ok(())
//! # }
//! ```

// Core types
pub mod core;

// Re-export core types for convenience
pub use crate::core::{
    DecodeError, Event, HistogramSummary, LoaderError, Result, SinkError, TensorValue, Value,
    ValueKind,
};

// Container framing and input checks
pub mod io;

pub use io::{check_input, Eligibility, Frame, FrameReader, FrameWriter, INCOMPATIBLE_EXIT_CODE};

// Event payload decoding
pub mod encoding;

pub use encoding::{Decoded, EventDecoder, SkipReason};

// Sinks and dispatch
pub mod dispatch;

pub use dispatch::{
    JsonLinesSink, MemorySink, RecordingInfo, RerunSink, Sink, SinkCall, ValueDispatcher,
};

// Load orchestration
pub mod pipeline;

pub use pipeline::{
    DecodeErrorPolicy, LoadStats, LoaderBuilder, LoaderConfig, Pipeline, ValueSelection,
};
