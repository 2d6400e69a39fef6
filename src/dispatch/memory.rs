// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! In-memory sink that records every call.

use std::io;

use super::sink::{Sink, SinkResult};
use crate::core::SinkError;

/// One recorded sink call.
#[derive(Debug, Clone, PartialEq)]
pub enum SinkCall {
    SetTime { step: i64, wall_time: f64 },
    Scalar { tag: String, value: f64 },
    Blob {
        tag: String,
        data: Vec<u8>,
        mime: Option<String>,
    },
    Text { tag: String, text: String },
    Tensor {
        tag: String,
        shape: Vec<u64>,
        values: Vec<f64>,
    },
}

impl SinkCall {
    /// Tag of an append call; `None` for time context changes.
    pub fn tag(&self) -> Option<&str> {
        match self {
            SinkCall::SetTime { .. } => None,
            SinkCall::Scalar { tag, .. }
            | SinkCall::Blob { tag, .. }
            | SinkCall::Text { tag, .. }
            | SinkCall::Tensor { tag, .. } => Some(tag),
        }
    }
}

/// Sink that keeps calls in a `Vec`, in order.
///
/// Can be told to fail after a number of calls to exercise error paths.
#[derive(Debug, Default)]
pub struct MemorySink {
    calls: Vec<SinkCall>,
    fail_after: Option<usize>,
    flushes: usize,
}

impl MemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a sink that accepts `n` calls and fails every call after that
    /// with a broken pipe.
    pub fn failing_after(n: usize) -> Self {
        Self {
            fail_after: Some(n),
            ..Self::default()
        }
    }

    /// Recorded calls, oldest first.
    pub fn calls(&self) -> &[SinkCall] {
        &self.calls
    }

    /// Take ownership of the recorded calls.
    pub fn into_calls(self) -> Vec<SinkCall> {
        self.calls
    }

    /// Number of times `flush` was called.
    pub fn flush_count(&self) -> usize {
        self.flushes
    }

    fn record(&mut self, call: SinkCall) -> SinkResult {
        if self.fail_after.is_some_and(|n| self.calls.len() >= n) {
            return Err(SinkError::Io(io::Error::new(
                io::ErrorKind::BrokenPipe,
                "memory sink closed",
            )));
        }
        self.calls.push(call);
        Ok(())
    }
}

impl Sink for MemorySink {
    fn set_time_context(&mut self, step: i64, wall_time: f64) -> SinkResult {
        self.record(SinkCall::SetTime { step, wall_time })
    }

    fn append_scalar(&mut self, tag: &str, value: f64) -> SinkResult {
        self.record(SinkCall::Scalar {
            tag: tag.to_string(),
            value,
        })
    }

    fn append_blob(&mut self, tag: &str, data: &[u8], mime_hint: Option<&str>) -> SinkResult {
        self.record(SinkCall::Blob {
            tag: tag.to_string(),
            data: data.to_vec(),
            mime: mime_hint.map(str::to_string),
        })
    }

    fn append_text(&mut self, tag: &str, text: &str) -> SinkResult {
        self.record(SinkCall::Text {
            tag: tag.to_string(),
            text: text.to_string(),
        })
    }

    fn append_tensor(&mut self, tag: &str, shape: &[u64], values: &[f64]) -> SinkResult {
        self.record(SinkCall::Tensor {
            tag: tag.to_string(),
            shape: shape.to_vec(),
            values: values.to_vec(),
        })
    }

    fn flush(&mut self) -> SinkResult {
        self.flushes += 1;
        Ok(())
    }
}
