// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Container I/O.
//!
//! - [`crc`] - masked CRC-32C checksums
//! - [`frame`] - [`FrameReader`], validated record iteration
//! - [`writer`] - [`FrameWriter`], the inverse
//! - [`detection`] - plugin input eligibility

pub mod crc;
pub mod detection;
pub mod frame;
pub mod writer;

pub use detection::{check_input, Eligibility, INCOMPATIBLE_EXIT_CODE};
pub use frame::{Frame, FrameReader, DEFAULT_MAX_RECORD_LEN};
pub use writer::{encode_frame, FrameWriter};
