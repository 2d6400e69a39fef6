// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Decoded event and value types.
//!
//! An [`Event`] is one named, typed sample together with the clocks the
//! producer recorded it at. Events are transient: the decoder builds one,
//! the dispatcher consumes it by value.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::error::DecodeError;

/// One decoded summary sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Producer-controlled sequence index. Non-decreasing by convention only.
    pub step: i64,
    /// Seconds since a producer-defined epoch
    pub wall_time: f64,
    /// Name of the time series this sample belongs to (never empty)
    pub tag: String,
    /// The sample itself
    pub value: Value,
}

impl Event {
    /// Create a new event.
    pub fn new(step: i64, wall_time: f64, tag: impl Into<String>, value: Value) -> Self {
        Self {
            step,
            wall_time,
            tag: tag.into(),
            value,
        }
    }
}

/// Typed payload of an [`Event`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Value {
    /// A single numeric sample
    Scalar { value: f64 },

    /// An encoded image, passed through untouched
    Image {
        data: Vec<u8>,
        /// Format guessed from the leading bytes, if recognizable
        mime: Option<String>,
    },

    /// A UTF-8 string
    Text { text: String },

    /// A dense numeric array with a validated shape
    Tensor(TensorValue),

    /// A histogram. Recognized, but not forwarded to sinks.
    Histogram(HistogramSummary),
}

impl Value {
    /// Get the kind of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Scalar { .. } => ValueKind::Scalar,
            Value::Image { .. } => ValueKind::Image,
            Value::Text { .. } => ValueKind::Text,
            Value::Tensor(_) => ValueKind::Tensor,
            Value::Histogram(_) => ValueKind::Histogram,
        }
    }

    /// Create a scalar value.
    pub fn scalar(value: f64) -> Self {
        Value::Scalar { value }
    }

    /// Create a text value.
    pub fn text(text: impl Into<String>) -> Self {
        Value::Text { text: text.into() }
    }
}

/// Discriminant of [`Value`], used for logging and statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ValueKind {
    Scalar,
    Image,
    Text,
    Tensor,
    Histogram,
}

impl ValueKind {
    /// Convert to string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueKind::Scalar => "scalar",
            ValueKind::Image => "image",
            ValueKind::Text => "text",
            ValueKind::Tensor => "tensor",
            ValueKind::Histogram => "histogram",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Row-major numeric array whose element count matches its shape.
///
/// The invariant is enforced at construction, so a `TensorValue` held by a
/// dispatcher is always safe to reshape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TensorValue {
    shape: Vec<u64>,
    data: Vec<f64>,
}

impl TensorValue {
    /// Build a tensor, checking that `data.len()` equals the product of `shape`.
    ///
    /// An empty shape is a rank-0 tensor and holds exactly one element.
    pub fn new(
        tag: &str,
        shape: Vec<i64>,
        data: Vec<f64>,
    ) -> std::result::Result<Self, DecodeError> {
        let mut dims = Vec::with_capacity(shape.len());
        let mut expected: u64 = 1;
        for &dim in &shape {
            let dim = u64::try_from(dim).map_err(|_| {
                DecodeError::invalid_value(tag, format!("negative dimension {dim} in {shape:?}"))
            })?;
            expected = expected.checked_mul(dim).ok_or_else(|| {
                DecodeError::invalid_value(tag, format!("shape {shape:?} overflows"))
            })?;
            dims.push(dim);
        }

        if data.len() as u64 != expected {
            return Err(DecodeError::ShapeMismatch {
                tag: tag.to_string(),
                shape,
                expected,
                actual: data.len(),
            });
        }

        Ok(Self { shape: dims, data })
    }

    /// Dimension sizes, outermost first.
    pub fn shape(&self) -> &[u64] {
        &self.shape
    }

    /// Flat element data in row-major order.
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Number of dimensions.
    pub fn rank(&self) -> usize {
        self.shape.len()
    }

    /// Total element count.
    pub fn num_elements(&self) -> usize {
        self.data.len()
    }

    /// Split into shape and data.
    pub fn into_parts(self) -> (Vec<u64>, Vec<f64>) {
        (self.shape, self.data)
    }
}

/// Summary statistics carried by a histogram record.
///
/// Records using the legacy serialized histogram field decode to the
/// default (all zero, no buckets).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistogramSummary {
    pub min: f64,
    pub max: f64,
    pub num: f64,
    pub sum: f64,
    pub sum_squares: f64,
    pub bucket_limits: Vec<f64>,
    pub buckets: Vec<f64>,
}

impl HistogramSummary {
    /// Number of buckets.
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }
}
