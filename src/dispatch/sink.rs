// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! The sink interface.
//!
//! A sink is an append-only, time-indexed destination. The time context set
//! by [`Sink::set_time_context`] applies to every append that follows it,
//! until the next call.

use crate::core::SinkError;

/// Result type for sink operations.
pub type SinkResult = std::result::Result<(), SinkError>;

/// Identity of the recording a sink writes into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordingInfo {
    pub application_id: String,
    pub recording_id: String,
}

/// Destination for dispatched values.
///
/// Implementations must apply calls in the order they are made. Any
/// failure is reported back and never retried by the caller.
pub trait Sink {
    /// Set the time context for subsequent appends.
    fn set_time_context(&mut self, step: i64, wall_time: f64) -> SinkResult;

    /// Append a numeric sample to the series `tag`.
    fn append_scalar(&mut self, tag: &str, value: f64) -> SinkResult;

    /// Append an opaque blob. `mime_hint` is advisory.
    fn append_blob(&mut self, tag: &str, data: &[u8], mime_hint: Option<&str>) -> SinkResult;

    /// Append a string.
    fn append_text(&mut self, tag: &str, text: &str) -> SinkResult;

    /// Append a row-major array with the given shape.
    fn append_tensor(&mut self, tag: &str, shape: &[u64], values: &[f64]) -> SinkResult;

    /// Push buffered entries to the transport.
    fn flush(&mut self) -> SinkResult {
        Ok(())
    }
}

impl<S: Sink + ?Sized> Sink for &mut S {
    fn set_time_context(&mut self, step: i64, wall_time: f64) -> SinkResult {
        (**self).set_time_context(step, wall_time)
    }

    fn append_scalar(&mut self, tag: &str, value: f64) -> SinkResult {
        (**self).append_scalar(tag, value)
    }

    fn append_blob(&mut self, tag: &str, data: &[u8], mime_hint: Option<&str>) -> SinkResult {
        (**self).append_blob(tag, data, mime_hint)
    }

    fn append_text(&mut self, tag: &str, text: &str) -> SinkResult {
        (**self).append_text(tag, text)
    }

    fn append_tensor(&mut self, tag: &str, shape: &[u64], values: &[f64]) -> SinkResult {
        (**self).append_tensor(tag, shape, values)
    }

    fn flush(&mut self) -> SinkResult {
        (**self).flush()
    }
}

impl<S: Sink + ?Sized> Sink for Box<S> {
    fn set_time_context(&mut self, step: i64, wall_time: f64) -> SinkResult {
        (**self).set_time_context(step, wall_time)
    }

    fn append_scalar(&mut self, tag: &str, value: f64) -> SinkResult {
        (**self).append_scalar(tag, value)
    }

    fn append_blob(&mut self, tag: &str, data: &[u8], mime_hint: Option<&str>) -> SinkResult {
        (**self).append_blob(tag, data, mime_hint)
    }

    fn append_text(&mut self, tag: &str, text: &str) -> SinkResult {
        (**self).append_text(tag, text)
    }

    fn append_tensor(&mut self, tag: &str, shape: &[u64], values: &[f64]) -> SinkResult {
        (**self).append_tensor(tag, shape, values)
    }

    fn flush(&mut self) -> SinkResult {
        (**self).flush()
    }
}
