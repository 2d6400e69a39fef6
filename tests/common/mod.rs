// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Common utilities for integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use prost::Message;

use tfrecord_loader::encoding::proto::{
    EventProto, HistogramProto, ImageProto, PluginDataProto, SummaryMetadataProto, SummaryProto,
    SummaryValueProto, TensorProto, TensorShapeDimProto, TensorShapeProto,
};
use tfrecord_loader::FrameWriter;

// ============================================================================
// Temp Files
// ============================================================================

/// Removes a directory tree when dropped.
#[derive(Debug)]
pub struct CleanupGuard(pub PathBuf);

impl Drop for CleanupGuard {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.0);
    }
}

/// Create a unique temp directory for one test.
pub fn temp_dir(prefix: &str) -> (PathBuf, CleanupGuard) {
    let random = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let thread_id = format!("{:?}", std::thread::current().id())
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .collect::<String>();
    let dir = std::env::temp_dir().join(format!(
        "tfrecord_loader_{}_{}_{}_{}",
        prefix,
        std::process::id(),
        thread_id,
        random
    ));
    fs::create_dir_all(&dir).unwrap();
    (dir.clone(), CleanupGuard(dir))
}

/// Write `bytes` to `dir/name` and return the path.
pub fn write_file(dir: &Path, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, bytes).unwrap();
    path
}

// ============================================================================
// Containers
// ============================================================================

/// Frame each payload into one container.
pub fn container(payloads: &[Vec<u8>]) -> Vec<u8> {
    let mut writer = FrameWriter::new(Vec::new());
    for payload in payloads {
        writer.write_frame(payload).unwrap();
    }
    writer.into_inner()
}

/// Encoded length of a frame with a payload of `len` bytes.
pub fn frame_len(len: usize) -> u64 {
    (len + 16) as u64
}

// ============================================================================
// Event Payloads
// ============================================================================

/// Event with a summary holding `values`.
pub fn event(step: i64, wall_time: f64, values: Vec<SummaryValueProto>) -> Vec<u8> {
    EventProto {
        wall_time,
        step,
        summary: Some(SummaryProto { value: values }),
        ..Default::default()
    }
    .encode_to_vec()
}

/// The header record summary writers put first in every file.
pub fn file_version(wall_time: f64) -> Vec<u8> {
    EventProto {
        wall_time,
        file_version: Some("brain.Event:2".to_string()),
        ..Default::default()
    }
    .encode_to_vec()
}

pub fn scalar_value(tag: &str, value: f32) -> SummaryValueProto {
    SummaryValueProto {
        tag: tag.to_string(),
        simple_value: Some(value),
        ..Default::default()
    }
}

pub fn image_value(tag: &str, encoded: &[u8]) -> SummaryValueProto {
    SummaryValueProto {
        tag: tag.to_string(),
        image: Some(ImageProto {
            height: 1,
            width: 1,
            colorspace: 3,
            encoded_image_string: encoded.to_vec(),
        }),
        ..Default::default()
    }
}

pub fn histogram_value(tag: &str) -> SummaryValueProto {
    SummaryValueProto {
        tag: tag.to_string(),
        histo: Some(HistogramProto {
            min: 0.0,
            max: 1.0,
            num: 2.0,
            sum: 1.0,
            sum_squares: 1.0,
            bucket_limit: vec![0.5, 1.0],
            bucket: vec![1.0, 1.0],
        }),
        ..Default::default()
    }
}

/// Tensor value routed by `plugin` (no metadata when `None`).
pub fn plugin_tensor(tag: &str, plugin: Option<&str>, tensor: TensorProto) -> SummaryValueProto {
    SummaryValueProto {
        tag: tag.to_string(),
        tensor: Some(tensor),
        metadata: plugin.map(|name| SummaryMetadataProto {
            plugin_data: Some(PluginDataProto {
                plugin_name: name.to_string(),
                content: Vec::new(),
            }),
            ..Default::default()
        }),
        ..Default::default()
    }
}

pub fn text_value(tag: &str, text: &str) -> SummaryValueProto {
    plugin_tensor(
        tag,
        Some("text"),
        TensorProto {
            dtype: 7,
            tensor_shape: Some(shape(&[])),
            string_val: vec![text.as_bytes().to_vec()],
            ..Default::default()
        },
    )
}

pub fn double_tensor_value(tag: &str, dims: &[i64], values: Vec<f64>) -> SummaryValueProto {
    plugin_tensor(
        tag,
        Some("tensor"),
        TensorProto {
            dtype: 2,
            tensor_shape: Some(shape(dims)),
            double_val: values,
            ..Default::default()
        },
    )
}

pub fn shape(dims: &[i64]) -> TensorShapeProto {
    TensorShapeProto {
        dim: dims
            .iter()
            .map(|&size| TensorShapeDimProto {
                size,
                name: String::new(),
            })
            .collect(),
        unknown_rank: false,
    }
}
