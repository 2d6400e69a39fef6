// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! TensorBoard event decoder.
//!
//! Turns one frame payload into an [`Event`], a [`Decoded::Skip`] for
//! records with nothing to dispatch, or a [`DecodeError`] for records that
//! are recognized but malformed.
//!
//! # Value Selection
//!
//! A summary value may populate more than one of its union members if the
//! producer misbehaves. The first populated member in this order wins:
//!
//! 1. `image`
//! 2. `simple_value` (scalar)
//! 3. `histo` / `obsolete_old_style_histogram`
//! 4. `tensor` with plugin name `"text"`
//! 5. `tensor` with plugin name `"tensor"`
//!
//! A tensor with any other plugin name (or none) is skipped, as are audio
//! values.
//!
//! ## Example
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use tfrecord_loader::encoding::{Decoded, EventDecoder};
//!
//! # let payload = vec![0u8; 0];
//! let decoder = EventDecoder::new();
//! match decoder.decode(&payload)? {
//!     Decoded::Event(event) => println!("{} @ {}", event.tag, event.step),
//!     Decoded::Skip(reason) => println!("skipped: {reason}"),
//! }
//! # Ok(())
//! # }
//! ```

use std::fmt;

use prost::Message;

use super::mime::sniff_image_mime;
use super::proto::{EventProto, SummaryValueProto};
use super::tensor;
use crate::core::{DecodeError, Event, HistogramSummary, Value};

/// Plugin name routing a tensor value to [`Value::Text`].
pub const TEXT_PLUGIN: &str = "text";

/// Plugin name routing a tensor value to [`Value::Tensor`].
pub const TENSOR_PLUGIN: &str = "tensor";

/// Result of decoding one value entry.
pub type DecodeResult = std::result::Result<Decoded, DecodeError>;

/// Successful decode outcome.
#[derive(Debug, Clone, PartialEq)]
pub enum Decoded {
    /// A dispatchable event
    Event(Event),
    /// Nothing to dispatch; not an error
    Skip(SkipReason),
}

impl Decoded {
    /// Get the event, if this is one.
    pub fn into_event(self) -> Option<Event> {
        match self {
            Decoded::Event(event) => Some(event),
            Decoded::Skip(_) => None,
        }
    }
}

/// Why a record produced no event.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SkipReason {
    /// Record carries no summary (file version header, graph, session log, ...)
    NoSummary,
    /// Summary with an empty value list
    EmptyValueList,
    /// Value entry with none of the known members populated
    NoValue,
    /// Audio values are recognized but not handled
    Audio,
    /// Tensor whose plugin name routes nowhere
    UnrecognizedPlugin(String),
}

impl SkipReason {
    /// Stable short name for statistics and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            SkipReason::NoSummary => "no_summary",
            SkipReason::EmptyValueList => "empty_value_list",
            SkipReason::NoValue => "no_value",
            SkipReason::Audio => "audio",
            SkipReason::UnrecognizedPlugin(_) => "unrecognized_plugin",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::UnrecognizedPlugin(name) if name.is_empty() => {
                write!(f, "tensor without plugin name")
            }
            SkipReason::UnrecognizedPlugin(name) => write!(f, "unrecognized plugin '{name}'"),
            other => f.write_str(other.as_str()),
        }
    }
}

/// Decoder for TensorBoard `Event` payloads.
///
/// Stateless; one instance can decode any number of payloads.
#[derive(Debug, Clone, Default)]
pub struct EventDecoder {
    _private: (),
}

impl EventDecoder {
    /// Create a new decoder.
    pub fn new() -> Self {
        Self { _private: () }
    }

    /// Decode the first value entry of a payload.
    ///
    /// Further entries in the same record are ignored; use
    /// [`decode_all`](Self::decode_all) to see them.
    pub fn decode(&self, payload: &[u8]) -> DecodeResult {
        let proto = EventProto::decode(payload)?;
        let Some(summary) = proto.summary else {
            return Ok(Decoded::Skip(SkipReason::NoSummary));
        };
        match summary.value.into_iter().next() {
            Some(value) => decode_value(proto.step, proto.wall_time, value),
            None => Ok(Decoded::Skip(SkipReason::EmptyValueList)),
        }
    }

    /// Decode every value entry of a payload, in list order.
    ///
    /// Always returns at least one result: a payload that fails to parse
    /// yields a single error, one without values a single skip.
    pub fn decode_all(&self, payload: &[u8]) -> Vec<DecodeResult> {
        let proto = match EventProto::decode(payload) {
            Ok(proto) => proto,
            Err(e) => return vec![Err(e.into())],
        };
        let Some(summary) = proto.summary else {
            return vec![Ok(Decoded::Skip(SkipReason::NoSummary))];
        };
        if summary.value.is_empty() {
            return vec![Ok(Decoded::Skip(SkipReason::EmptyValueList))];
        }

        summary
            .value
            .into_iter()
            .map(|value| decode_value(proto.step, proto.wall_time, value))
            .collect()
    }
}

/// Decode a single summary value entry.
fn decode_value(step: i64, wall_time: f64, mut value: SummaryValueProto) -> DecodeResult {
    let decoded = select_value(&mut value)?;
    let Some(decoded) = decoded else {
        return Ok(Decoded::Skip(skip_reason(&value)));
    };

    if value.tag.is_empty() {
        return Err(DecodeError::malformed(format!(
            "{} value has an empty tag",
            decoded.kind()
        )));
    }

    Ok(Decoded::Event(Event {
        step,
        wall_time,
        tag: value.tag,
        value: decoded,
    }))
}

/// Pick the dispatchable member of a value entry, by priority.
fn select_value(value: &mut SummaryValueProto) -> Result<Option<Value>, DecodeError> {
    if let Some(image) = value.image.take() {
        let data = image.encoded_image_string;
        let mime = sniff_image_mime(&data).map(str::to_string);
        return Ok(Some(Value::Image { data, mime }));
    }

    if let Some(simple) = value.simple_value {
        return Ok(Some(Value::scalar(f64::from(simple))));
    }

    if let Some(histo) = &value.histo {
        return Ok(Some(Value::Histogram(HistogramSummary {
            min: histo.min,
            max: histo.max,
            num: histo.num,
            sum: histo.sum,
            sum_squares: histo.sum_squares,
            bucket_limits: histo.bucket_limit.clone(),
            buckets: histo.bucket.clone(),
        })));
    }
    if value.obsolete_old_style_histogram.is_some() {
        return Ok(Some(Value::Histogram(HistogramSummary::default())));
    }

    if let Some(tensor_proto) = &value.tensor {
        return match value.plugin_name() {
            Some(TEXT_PLUGIN) => {
                let text = tensor::first_string(&value.tag, tensor_proto)?;
                Ok(Some(Value::Text { text }))
            }
            Some(TENSOR_PLUGIN) => {
                let tensor = tensor::to_tensor_value(&value.tag, tensor_proto)?;
                Ok(Some(Value::Tensor(tensor)))
            }
            _ => Ok(None),
        };
    }

    Ok(None)
}

/// Explain why [`select_value`] found nothing.
fn skip_reason(value: &SummaryValueProto) -> SkipReason {
    if value.tensor.is_some() {
        SkipReason::UnrecognizedPlugin(value.plugin_name().unwrap_or_default().to_string())
    } else if value.audio.is_some() {
        SkipReason::Audio
    } else {
        SkipReason::NoValue
    }
}
