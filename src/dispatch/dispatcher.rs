// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Event to sink dispatch.
//!
//! Every dispatchable event becomes exactly two sink calls, in this order:
//! `set_time_context(step, wall_time)` followed by one typed append keyed by
//! the event's tag. Histograms produce no sink calls at all and are
//! reported back as [`DispatchOutcome::Unsupported`] so callers can count
//! them.

use tracing::trace;

use super::sink::Sink;
use crate::core::{Event, SinkError, Value, ValueKind};

/// What happened to a dispatched event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Forwarded to the sink
    Written(ValueKind),
    /// Recognized but not forwarded
    Unsupported(ValueKind),
}

/// Routes events to a sink it owns exclusively.
///
/// Holds no state between events beyond the sink itself.
pub struct ValueDispatcher<S: Sink> {
    sink: S,
}

impl<S: Sink> ValueDispatcher<S> {
    /// Create a dispatcher over `sink`.
    pub fn new(sink: S) -> Self {
        Self { sink }
    }

    /// Dispatch one event.
    ///
    /// Sink failures are returned as-is. A failure can leave the time
    /// context set without the matching append, so the caller must not
    /// retry.
    pub fn dispatch(&mut self, event: Event) -> Result<DispatchOutcome, SinkError> {
        let kind = event.value.kind();
        if let Value::Histogram(_) = event.value {
            return Ok(DispatchOutcome::Unsupported(kind));
        }

        self.sink.set_time_context(event.step, event.wall_time)?;
        self.append(&event.tag, &event.value)?;

        trace!(tag = %event.tag, step = event.step, kind = kind.as_str(), "dispatched");
        Ok(DispatchOutcome::Written(kind))
    }

    fn append(&mut self, tag: &str, value: &Value) -> Result<(), SinkError> {
        match value {
            Value::Scalar { value } => self.sink.append_scalar(tag, *value),
            Value::Image { data, mime } => self.sink.append_blob(tag, data, mime.as_deref()),
            Value::Text { text } => self.sink.append_text(tag, text),
            Value::Tensor(tensor) => self.sink.append_tensor(tag, tensor.shape(), tensor.data()),
            Value::Histogram(_) => Ok(()),
        }
    }

    /// Flush the sink.
    pub fn flush(&mut self) -> Result<(), SinkError> {
        self.sink.flush()
    }

    /// Borrow the sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Get the sink back.
    pub fn into_sink(self) -> S {
        self.sink
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{HistogramSummary, TensorValue};
    use crate::dispatch::{MemorySink, SinkCall};

    fn dispatch_one(value: Value) -> (DispatchOutcome, Vec<SinkCall>) {
        let mut dispatcher = ValueDispatcher::new(MemorySink::new());
        let outcome = dispatcher
            .dispatch(Event::new(7, 100.5, "tag", value))
            .unwrap();
        (outcome, dispatcher.into_sink().into_calls())
    }

    fn time() -> SinkCall {
        SinkCall::SetTime {
            step: 7,
            wall_time: 100.5,
        }
    }

    #[test]
    fn test_scalar() {
        let (outcome, calls) = dispatch_one(Value::scalar(0.5));
        assert_eq!(outcome, DispatchOutcome::Written(ValueKind::Scalar));
        assert_eq!(
            calls,
            vec![
                time(),
                SinkCall::Scalar {
                    tag: "tag".into(),
                    value: 0.5
                }
            ]
        );
    }

    #[test]
    fn test_image() {
        let (_, calls) = dispatch_one(Value::Image {
            data: vec![1, 2, 3],
            mime: None,
        });
        assert_eq!(
            calls[1],
            SinkCall::Blob {
                tag: "tag".into(),
                data: vec![1, 2, 3],
                mime: None
            }
        );
    }

    #[test]
    fn test_text() {
        let (_, calls) = dispatch_one(Value::text("hello"));
        assert_eq!(calls[0], time());
        assert_eq!(
            calls[1],
            SinkCall::Text {
                tag: "tag".into(),
                text: "hello".into()
            }
        );
    }

    #[test]
    fn test_tensor_uses_validated_shape() {
        let tensor = TensorValue::new("tag", vec![2, 2], vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        let (outcome, calls) = dispatch_one(Value::Tensor(tensor));
        assert_eq!(outcome, DispatchOutcome::Written(ValueKind::Tensor));
        assert_eq!(
            calls[1],
            SinkCall::Tensor {
                tag: "tag".into(),
                shape: vec![2, 2],
                values: vec![1.0, 2.0, 3.0, 4.0]
            }
        );
    }

    #[test]
    fn test_histogram_not_dispatched() {
        let (outcome, calls) = dispatch_one(Value::Histogram(HistogramSummary::default()));
        assert_eq!(outcome, DispatchOutcome::Unsupported(ValueKind::Histogram));
        assert!(calls.is_empty());
    }

    #[test]
    fn test_sink_error_propagates() {
        let mut dispatcher = ValueDispatcher::new(MemorySink::failing_after(1));
        let err = dispatcher
            .dispatch(Event::new(0, 0.0, "x", Value::scalar(1.0)))
            .unwrap_err();
        assert!(err.is_broken_pipe());
        assert_eq!(dispatcher.sink().calls().len(), 1);
    }
}
