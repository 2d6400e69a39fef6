// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Load statistics.

use std::collections::BTreeMap;

use tracing::info;

use crate::core::ValueKind;
use crate::encoding::SkipReason;

/// Counters for one load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadStats {
    /// Frames read and checksum-verified
    pub frames: u64,
    /// Container bytes consumed by those frames
    pub bytes_read: u64,
    /// Events handed to the sink
    pub events_dispatched: u64,
    /// Scalars handed to the sink
    pub scalars: u64,
    /// Images handed to the sink
    pub images: u64,
    /// Texts handed to the sink
    pub texts: u64,
    /// Tensors handed to the sink
    pub tensors: u64,
    /// Skipped value entries, by reason
    pub skipped: BTreeMap<&'static str, u64>,
    /// Malformed value entries that were skipped
    pub decode_errors: u64,
    /// Histograms recognized but not forwarded
    pub histograms_unsupported: u64,
}

impl LoadStats {
    /// Create empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_frame(&mut self, encoded_len: u64) {
        self.frames += 1;
        self.bytes_read += encoded_len;
    }

    pub(crate) fn record_dispatched(&mut self, kind: ValueKind) {
        self.events_dispatched += 1;
        match kind {
            ValueKind::Scalar => self.scalars += 1,
            ValueKind::Image => self.images += 1,
            ValueKind::Text => self.texts += 1,
            ValueKind::Tensor => self.tensors += 1,
            ValueKind::Histogram => {}
        }
    }

    pub(crate) fn record_skip(&mut self, reason: &SkipReason) {
        *self.skipped.entry(reason.as_str()).or_insert(0) += 1;
    }

    /// Total skipped value entries across all reasons.
    pub fn total_skipped(&self) -> u64 {
        self.skipped.values().sum()
    }

    /// Log a one-line summary.
    pub fn log_summary(&self) {
        info!(
            frames = self.frames,
            bytes_read = self.bytes_read,
            events = self.events_dispatched,
            scalars = self.scalars,
            images = self.images,
            texts = self.texts,
            tensors = self.tensors,
            skipped = self.total_skipped(),
            decode_errors = self.decode_errors,
            histograms_unsupported = self.histograms_unsupported,
            "load finished"
        );
    }
}
