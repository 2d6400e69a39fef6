// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core types used throughout tfrecord-loader.
//!
//! - [`LoaderError`], [`DecodeError`], [`SinkError`] - error taxonomy
//! - [`Event`], [`Value`] - decoded summary samples

pub mod error;
pub mod value;

pub use error::{DecodeError, LoaderError, Result, SinkError};
pub use value::{Event, HistogramSummary, TensorValue, Value, ValueKind};
