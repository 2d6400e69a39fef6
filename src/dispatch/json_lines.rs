// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Newline-delimited JSON sink.
//!
//! Each sink call becomes one JSON object on its own line. The first line
//! identifies the recording the entries belong to:
//!
//! ```text
//! {"type":"recording","application_id":"...","recording_id":"..."}
//! {"type":"time","step":0,"wall_time":1700000000.5}
//! {"type":"scalar","entity":"loss","value":0.5}
//! {"type":"blob","entity":"sample","mime":"image/png","data":"89504e47..."}
//! ```
//!
//! Blob bytes are hex encoded. Non-finite floats are written as the strings
//! `"NaN"`, `"inf"` and `"-inf"`.

use std::io::Write;

use serde::{Serialize, Serializer};

use super::sink::{RecordingInfo, Sink, SinkResult};
use crate::core::SinkError;

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum Record<'a> {
    Recording {
        application_id: &'a str,
        recording_id: &'a str,
    },
    Time {
        step: i64,
        wall_time: JsonFloat,
    },
    Scalar {
        entity: &'a str,
        value: JsonFloat,
    },
    Blob {
        entity: &'a str,
        mime: Option<&'a str>,
        data: String,
    },
    Text {
        entity: &'a str,
        text: &'a str,
    },
    Tensor {
        entity: &'a str,
        shape: &'a [u64],
        data: JsonFloats<'a>,
    },
}

/// Float that keeps NaN and the infinities apart instead of collapsing them to `null`.
#[derive(Debug, Clone, Copy)]
struct JsonFloat(f64);

impl JsonFloat {
    fn label(self) -> Option<&'static str> {
        if self.0.is_nan() {
            Some("NaN")
        } else if self.0 == f64::INFINITY {
            Some("inf")
        } else if self.0 == f64::NEG_INFINITY {
            Some("-inf")
        } else {
            None
        }
    }
}

impl Serialize for JsonFloat {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.label() {
            Some(label) => serializer.serialize_str(label),
            None => serializer.serialize_f64(self.0),
        }
    }
}

struct JsonFloats<'a>(&'a [f64]);

impl Serialize for JsonFloats<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.iter().copied().map(JsonFloat))
    }
}

/// Sink writing JSON lines to any [`Write`].
pub struct JsonLinesSink<W: Write> {
    writer: W,
    lines: u64,
}

impl<W: Write> JsonLinesSink<W> {
    /// Create a sink and write the recording header line.
    pub fn new(writer: W, recording: &RecordingInfo) -> Result<Self, SinkError> {
        let mut sink = Self { writer, lines: 0 };
        sink.write_record(&Record::Recording {
            application_id: &recording.application_id,
            recording_id: &recording.recording_id,
        })?;
        Ok(sink)
    }

    /// Lines written so far, header included.
    pub fn lines_written(&self) -> u64 {
        self.lines
    }

    /// Get the underlying writer back.
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_record(&mut self, record: &Record<'_>) -> SinkResult {
        serde_json::to_writer(&mut self.writer, record).map_err(|e| {
            if e.is_io() {
                SinkError::Io(e.into())
            } else {
                SinkError::Serialize(e)
            }
        })?;
        self.writer.write_all(b"\n")?;
        self.lines += 1;
        Ok(())
    }
}

impl<W: Write> Sink for JsonLinesSink<W> {
    fn set_time_context(&mut self, step: i64, wall_time: f64) -> SinkResult {
        self.write_record(&Record::Time {
            step,
            wall_time: JsonFloat(wall_time),
        })
    }

    fn append_scalar(&mut self, tag: &str, value: f64) -> SinkResult {
        self.write_record(&Record::Scalar {
            entity: tag,
            value: JsonFloat(value),
        })
    }

    fn append_blob(&mut self, tag: &str, data: &[u8], mime_hint: Option<&str>) -> SinkResult {
        self.write_record(&Record::Blob {
            entity: tag,
            mime: mime_hint,
            data: hex::encode(data),
        })
    }

    fn append_text(&mut self, tag: &str, text: &str) -> SinkResult {
        self.write_record(&Record::Text { entity: tag, text })
    }

    fn append_tensor(&mut self, tag: &str, shape: &[u64], values: &[f64]) -> SinkResult {
        self.write_record(&Record::Tensor {
            entity: tag,
            shape,
            data: JsonFloats(values),
        })
    }

    fn flush(&mut self) -> SinkResult {
        self.writer.flush()?;
        Ok(())
    }
}
