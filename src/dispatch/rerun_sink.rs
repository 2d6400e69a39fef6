// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Sink logging into a Rerun recording stream.
//!
//! This is the transport the viewer expects from an external loader: the
//! recording is streamed to stdout in the RRD format and the viewer merges it
//! into the recording named by the recording id.
//!
//! | Sink call            | Rerun                                           |
//! |----------------------|-------------------------------------------------|
//! | `set_time_context`   | `step` sequence, `wall_time` timestamp timeline |
//! | `append_scalar`      | `Scalars`                                       |
//! | `append_blob`        | `EncodedImage`                                  |
//! | `append_text`        | `TextDocument`                                  |
//! | `append_tensor`      | `Tensor` with `f64` elements                    |

use rerun::archetypes::{EncodedImage, Scalars, Tensor, TextDocument};
use rerun::datatypes::{TensorBuffer, TensorData};
use rerun::{RecordingStream, RecordingStreamBuilder};
use tracing::debug;

use super::sink::{RecordingInfo, Sink, SinkResult};
use crate::core::SinkError;

/// Timeline carrying the event step.
pub const STEP_TIMELINE: &str = "step";

/// Timeline carrying the event wall time.
pub const WALL_TIME_TIMELINE: &str = "wall_time";

/// Sink writing to a [`RecordingStream`].
pub struct RerunSink {
    rec: RecordingStream,
}

impl RerunSink {
    /// Wrap an existing recording stream.
    pub fn new(rec: RecordingStream) -> Self {
        Self { rec }
    }

    /// Stream the recording to stdout for the host viewer.
    pub fn stdout(recording: &RecordingInfo) -> Result<Self, SinkError> {
        debug!(
            application_id = %recording.application_id,
            recording_id = %recording.recording_id,
            "opening stdout recording stream"
        );
        let rec = RecordingStreamBuilder::new(recording.application_id.clone())
            .recording_id(recording.recording_id.clone())
            .stdout()?;
        Ok(Self::new(rec))
    }

    /// The underlying recording stream.
    pub fn recording(&self) -> &RecordingStream {
        &self.rec
    }
}

impl Sink for RerunSink {
    fn set_time_context(&mut self, step: i64, wall_time: f64) -> SinkResult {
        self.rec.set_time_sequence(STEP_TIMELINE, step);
        self.rec.set_timestamp_secs_since_epoch(WALL_TIME_TIMELINE, wall_time);
        Ok(())
    }

    fn append_scalar(&mut self, tag: &str, value: f64) -> SinkResult {
        self.rec.log(tag, &Scalars::new([value]))?;
        Ok(())
    }

    fn append_blob(&mut self, tag: &str, data: &[u8], mime_hint: Option<&str>) -> SinkResult {
        let mut image = EncodedImage::from_file_contents(data.to_vec());
        if let Some(mime) = mime_hint {
            image = image.with_media_type(mime.to_owned());
        }
        self.rec.log(tag, &image)?;
        Ok(())
    }

    fn append_text(&mut self, tag: &str, text: &str) -> SinkResult {
        self.rec.log(tag, &TextDocument::new(text))?;
        Ok(())
    }

    fn append_tensor(&mut self, tag: &str, shape: &[u64], values: &[f64]) -> SinkResult {
        let data = TensorData::new(shape.to_vec(), TensorBuffer::F64(values.to_vec().into()));
        self.rec.log(tag, &Tensor::new(data))?;
        Ok(())
    }

    fn flush(&mut self) -> SinkResult {
        self.rec.flush_blocking();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memory_sink() -> (RerunSink, rerun::sink::MemorySinkStorage) {
        let (rec, storage) = RecordingStreamBuilder::new("tfrecord_loader_test")
            .recording_id("rec-1")
            .memory()
            .unwrap();
        (RerunSink::new(rec), storage)
    }

    #[test]
    fn test_every_value_kind_is_logged() {
        let (mut sink, storage) = memory_sink();
        sink.set_time_context(3, 1_700_000_000.5).unwrap();
        sink.append_scalar("loss", 0.25).unwrap();
        sink.append_blob("sample", &[0x89, b'P', b'N', b'G'], Some("image/png")).unwrap();
        sink.append_blob("raw", &[1, 2, 3], None).unwrap();
        sink.append_text("note", "hello").unwrap();
        sink.append_tensor("m", &[2, 3], &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        sink.append_tensor("s", &[], &[7.0]).unwrap();
        sink.flush().unwrap();

        assert!(!storage.take().is_empty());
    }

    #[test]
    fn test_disabled_stream_accepts_calls() {
        let mut sink = RerunSink::new(RecordingStream::disabled());
        assert!(!sink.recording().is_enabled());
        sink.set_time_context(0, 0.0).unwrap();
        sink.append_scalar("loss", f64::NAN).unwrap();
        sink.append_text("note", "").unwrap();
        sink.flush().unwrap();
    }
}
