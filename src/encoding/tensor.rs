// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Element extraction from `TensorProto`.
//!
//! A tensor stores its elements either in one of the typed `*_val` lists or
//! packed little-endian in `tensor_content`, interpreted according to
//! `dtype`. Everything numeric is widened to `f64`.

use byteorder::{ByteOrder, LittleEndian};

use super::proto::TensorProto;
use crate::core::{DecodeError, TensorValue};

/// TensorFlow element types the loader understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    Float,
    Double,
    Int32,
    UInt8,
    Int16,
    Int8,
    String,
    Int64,
    Bool,
    /// Any other `DataType` enum value
    Other(i32),
}

impl DataType {
    /// Map a raw `tensorflow.DataType` value.
    pub fn from_raw(raw: i32) -> Self {
        match raw {
            1 => DataType::Float,
            2 => DataType::Double,
            3 => DataType::Int32,
            4 => DataType::UInt8,
            5 => DataType::Int16,
            6 => DataType::Int8,
            7 => DataType::String,
            9 => DataType::Int64,
            10 => DataType::Bool,
            other => DataType::Other(other),
        }
    }

    /// Width of one element in `tensor_content`, for fixed-width types.
    pub fn element_width(&self) -> Option<usize> {
        match self {
            DataType::Float | DataType::Int32 => Some(4),
            DataType::Double | DataType::Int64 => Some(8),
            DataType::Int16 => Some(2),
            DataType::UInt8 | DataType::Int8 | DataType::Bool => Some(1),
            DataType::String | DataType::Other(_) => None,
        }
    }
}

/// Declared dimension sizes of a tensor. Missing shape means rank 0.
pub fn declared_shape(tensor: &TensorProto) -> Vec<i64> {
    tensor
        .tensor_shape
        .as_ref()
        .map(|s| s.dim.iter().map(|d| d.size).collect())
        .unwrap_or_default()
}

/// Extract all numeric elements of `tensor`, widened to `f64`.
pub fn elements(tag: &str, tensor: &TensorProto) -> Result<Vec<f64>, DecodeError> {
    if !tensor.double_val.is_empty() {
        return Ok(tensor.double_val.clone());
    }
    if !tensor.float_val.is_empty() {
        return Ok(tensor.float_val.iter().map(|&v| f64::from(v)).collect());
    }
    if !tensor.int64_val.is_empty() {
        return Ok(tensor.int64_val.iter().map(|&v| v as f64).collect());
    }
    if !tensor.int_val.is_empty() {
        return Ok(tensor.int_val.iter().map(|&v| f64::from(v)).collect());
    }
    if !tensor.bool_val.is_empty() {
        return Ok(tensor
            .bool_val
            .iter()
            .map(|&v| if v { 1.0 } else { 0.0 })
            .collect());
    }
    if tensor.tensor_content.is_empty() {
        return Ok(Vec::new());
    }

    unpack_content(tag, DataType::from_raw(tensor.dtype), &tensor.tensor_content)
}

/// Decode `tensor_content` bytes for a fixed-width `dtype`.
fn unpack_content(tag: &str, dtype: DataType, content: &[u8]) -> Result<Vec<f64>, DecodeError> {
    let width = dtype.element_width().ok_or_else(|| {
        DecodeError::invalid_value(tag, format!("unsupported tensor dtype {dtype:?}"))
    })?;
    if content.len() % width != 0 {
        return Err(DecodeError::invalid_value(
            tag,
            format!(
                "tensor_content length {} is not a multiple of {width} for {dtype:?}",
                content.len()
            ),
        ));
    }

    let values = content
        .chunks_exact(width)
        .map(|chunk| match dtype {
            DataType::Float => f64::from(LittleEndian::read_f32(chunk)),
            DataType::Double => LittleEndian::read_f64(chunk),
            DataType::Int32 => f64::from(LittleEndian::read_i32(chunk)),
            DataType::Int64 => LittleEndian::read_i64(chunk) as f64,
            DataType::Int16 => f64::from(LittleEndian::read_i16(chunk)),
            DataType::UInt8 => f64::from(chunk[0]),
            DataType::Int8 => f64::from(chunk[0] as i8),
            DataType::Bool => {
                if chunk[0] != 0 {
                    1.0
                } else {
                    0.0
                }
            }
            // element_width() returned None for these above
            DataType::String | DataType::Other(_) => f64::NAN,
        })
        .collect();

    Ok(values)
}

/// Build a shape-checked [`TensorValue`].
pub fn to_tensor_value(tag: &str, tensor: &TensorProto) -> Result<TensorValue, DecodeError> {
    let data = elements(tag, tensor)?;
    TensorValue::new(tag, declared_shape(tensor), data)
}

/// First entry of `string_val`, as UTF-8 text.
pub fn first_string(tag: &str, tensor: &TensorProto) -> Result<String, DecodeError> {
    let first = tensor
        .string_val
        .first()
        .ok_or_else(|| DecodeError::invalid_value(tag, "text tensor has no string values"))?;

    String::from_utf8(first.clone())
        .map_err(|e| DecodeError::invalid_value(tag, format!("text is not valid UTF-8: {e}")))
}
