// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! TFRecord frame writer.
//!
//! Produces the framing read by [`super::FrameReader`]. Used to build
//! fixtures and by producer-side tooling.

use std::io::Write;

use byteorder::{LittleEndian, WriteBytesExt};

use super::crc;
use super::frame::{FOOTER_LEN, HEADER_LEN};
use crate::Result;

/// Writes payloads as checksummed TFRecord frames.
pub struct FrameWriter<W: Write> {
    writer: W,
    offset: u64,
    frame_count: u64,
}

impl<W: Write> FrameWriter<W> {
    /// Create a writer over `writer`.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            offset: 0,
            frame_count: 0,
        }
    }

    /// Write one frame and return the offset it starts at.
    pub fn write_frame(&mut self, payload: &[u8]) -> Result<u64> {
        let start = self.offset;
        let len = (payload.len() as u64).to_le_bytes();

        self.writer.write_all(&len)?;
        self.writer
            .write_u32::<LittleEndian>(crc::masked_crc32c(&len))?;
        self.writer.write_all(payload)?;
        self.writer
            .write_u32::<LittleEndian>(crc::masked_crc32c(payload))?;

        self.offset += (HEADER_LEN + FOOTER_LEN + payload.len()) as u64;
        self.frame_count += 1;
        Ok(start)
    }

    /// Number of frames written so far.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Bytes written so far.
    pub fn bytes_written(&self) -> u64 {
        self.offset
    }

    /// Flush the underlying writer.
    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    /// Get the underlying writer back.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

/// Encode a single payload as a standalone frame.
pub fn encode_frame(payload: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(HEADER_LEN + FOOTER_LEN + payload.len());
    out.extend_from_slice(&(payload.len() as u64).to_le_bytes());
    out.extend_from_slice(&crc::masked_crc32c(&out[..8]).to_le_bytes());
    out.extend_from_slice(payload);
    out.extend_from_slice(&crc::masked_crc32c(payload).to_le_bytes());
    out
}
