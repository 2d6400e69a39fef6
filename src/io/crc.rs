// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Masked CRC-32C as used by TFRecord framing.
//!
//! A raw CRC stored next to the data it covers is easy to confuse with data
//! that happens to contain CRCs of its own, so TFRecord rotates the value
//! and adds a constant before writing it.

/// Constant added after rotation.
const MASK_DELTA: u32 = 0xa282_ead8;

/// Mask a raw CRC-32C value.
pub fn mask(crc: u32) -> u32 {
    crc.rotate_right(15).wrapping_add(MASK_DELTA)
}

/// Invert [`mask`].
pub fn unmask(masked: u32) -> u32 {
    masked.wrapping_sub(MASK_DELTA).rotate_left(15)
}

/// Compute the masked CRC-32C of `data`.
pub fn masked_crc32c(data: &[u8]) -> u32 {
    mask(crc32c::crc32c(data))
}

/// Check `data` against a stored masked checksum.
pub fn verify(data: &[u8], expected: u32) -> bool {
    masked_crc32c(data) == expected
}
