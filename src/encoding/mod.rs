// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Payload decoding.
//!
//! - [`proto`] - prost message declarations for TensorBoard events
//! - [`decoder`] - [`EventDecoder`], payload to [`crate::Event`]
//! - [`tensor`] - tensor element and shape extraction
//! - [`mime`] - image signature sniffing

pub mod decoder;
pub mod mime;
pub mod proto;
pub mod tensor;

pub use decoder::{DecodeResult, Decoded, EventDecoder, SkipReason, TENSOR_PLUGIN, TEXT_PLUGIN};
