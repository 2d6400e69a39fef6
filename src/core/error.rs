// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core error types for tfrecord-loader.
//!
//! The taxonomy mirrors the stages of the loading pipeline:
//! - [`LoaderError`] - anything that ends a load (corrupt framing, sink failure, I/O)
//! - [`DecodeError`] - one malformed record; the pipeline policy decides whether it is fatal
//! - [`SinkError`] - a write to the downstream sink failed
//!
//! A record that decodes to nothing dispatchable is *not* an error; see
//! [`crate::encoding::Decoded::Skip`].

use thiserror::Error;

/// Errors that end a load.
#[derive(Debug, Error)]
pub enum LoaderError {
    /// Framing is broken: checksum mismatch, truncated record or oversized length.
    ///
    /// The stream cannot be resynchronized past this point.
    #[error("Corrupt container at byte offset {offset}: {reason}")]
    CorruptContainer {
        /// Offset of the first byte of the failing record
        offset: u64,
        /// What was wrong with the record
        reason: String,
    },

    /// A record was malformed and the pipeline is configured to fail fast.
    #[error("Failed to decode record at byte offset {offset}: {source}")]
    Decode {
        /// Offset of the record that failed to decode
        offset: u64,
        /// Underlying decode error
        #[source]
        source: DecodeError,
    },

    /// The sink rejected a write.
    #[error(transparent)]
    Sink(#[from] SinkError),

    /// Reading the input failed for reasons other than truncation.
    #[error("I/O error in {context}: {message}")]
    Io {
        /// Operation that failed
        context: String,
        /// Error message
        message: String,
    },

    /// Configuration could not be loaded or is inconsistent.
    #[error("Invalid configuration: {reason}")]
    InvalidConfig {
        /// Why the configuration was rejected
        reason: String,
    },
}

impl LoaderError {
    /// Create a corrupt container error.
    pub fn corrupt(offset: u64, reason: impl Into<String>) -> Self {
        LoaderError::CorruptContainer {
            offset,
            reason: reason.into(),
        }
    }

    /// Wrap a decode error with the offset of its record.
    pub fn decode(offset: u64, source: DecodeError) -> Self {
        LoaderError::Decode { offset, source }
    }

    /// Create an I/O error.
    pub fn io(context: impl Into<String>, message: impl Into<String>) -> Self {
        LoaderError::Io {
            context: context.into(),
            message: message.into(),
        }
    }

    /// Create an invalid configuration error.
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        LoaderError::InvalidConfig {
            reason: reason.into(),
        }
    }

    /// Byte offset of the record the error refers to, if any.
    pub fn offset(&self) -> Option<u64> {
        match self {
            LoaderError::CorruptContainer { offset, .. } | LoaderError::Decode { offset, .. } => {
                Some(*offset)
            }
            _ => None,
        }
    }

    /// Get structured fields for logging.
    pub fn log_fields(&self) -> Vec<(&'static str, String)> {
        match self {
            LoaderError::CorruptContainer { offset, reason } => {
                vec![("offset", offset.to_string()), ("reason", reason.clone())]
            }
            LoaderError::Decode { offset, source } => {
                let mut fields = vec![("offset", offset.to_string())];
                fields.extend(source.log_fields());
                fields
            }
            LoaderError::Sink(err) => vec![("sink", err.to_string())],
            LoaderError::Io { context, message } => {
                vec![("context", context.clone()), ("message", message.clone())]
            }
            LoaderError::InvalidConfig { reason } => vec![("reason", reason.clone())],
        }
    }
}

impl From<std::io::Error> for LoaderError {
    fn from(err: std::io::Error) -> Self {
        LoaderError::io("IO", err.to_string())
    }
}

/// A record was recognized but its contents are malformed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeError {
    /// The payload is not a valid event message.
    #[error("Malformed event payload: {message}")]
    Malformed {
        /// Parser message
        message: String,
    },

    /// Tensor element count does not match the product of its shape.
    #[error("Tensor '{tag}' has {actual} elements but shape {shape:?} requires {expected}")]
    ShapeMismatch {
        /// Tag of the offending value
        tag: String,
        /// Declared shape
        shape: Vec<i64>,
        /// Product of the declared shape
        expected: u64,
        /// Number of elements found
        actual: usize,
    },

    /// A value field is present but cannot be interpreted.
    #[error("Invalid value '{tag}': {reason}")]
    InvalidValue {
        /// Tag of the offending value
        tag: String,
        /// What is wrong with it
        reason: String,
    },
}

impl DecodeError {
    /// Create a malformed payload error.
    pub fn malformed(message: impl Into<String>) -> Self {
        DecodeError::Malformed {
            message: message.into(),
        }
    }

    /// Create an invalid value error.
    pub fn invalid_value(tag: impl Into<String>, reason: impl Into<String>) -> Self {
        DecodeError::InvalidValue {
            tag: tag.into(),
            reason: reason.into(),
        }
    }

    /// Tag of the value the error refers to, if known.
    pub fn tag(&self) -> Option<&str> {
        match self {
            DecodeError::Malformed { .. } => None,
            DecodeError::ShapeMismatch { tag, .. } | DecodeError::InvalidValue { tag, .. } => {
                Some(tag)
            }
        }
    }

    /// Get structured fields for logging.
    pub fn log_fields(&self) -> Vec<(&'static str, String)> {
        match self {
            DecodeError::Malformed { message } => vec![("message", message.clone())],
            DecodeError::ShapeMismatch {
                tag,
                shape,
                expected,
                actual,
            } => vec![
                ("tag", tag.clone()),
                ("shape", format!("{shape:?}")),
                ("expected", expected.to_string()),
                ("actual", actual.to_string()),
            ],
            DecodeError::InvalidValue { tag, reason } => {
                vec![("tag", tag.clone()), ("reason", reason.clone())]
            }
        }
    }
}

impl From<prost::DecodeError> for DecodeError {
    fn from(err: prost::DecodeError) -> Self {
        DecodeError::malformed(err.to_string())
    }
}

/// A write to the sink failed.
#[derive(Debug, Error)]
pub enum SinkError {
    /// The underlying transport failed (closed pipe, full disk, ...).
    #[error("Sink I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An entry could not be serialized for the transport.
    #[error("Sink serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The Rerun recording stream rejected an entry or could not be opened.
    #[error("Recording stream error: {0}")]
    Recording(#[from] rerun::RecordingStreamError),
}

impl SinkError {
    /// Whether the downstream reader went away.
    pub fn is_broken_pipe(&self) -> bool {
        matches!(self, SinkError::Io(e) if e.kind() == std::io::ErrorKind::BrokenPipe)
    }
}

/// Result type for tfrecord-loader operations.
pub type Result<T> = std::result::Result<T, LoaderError>;
