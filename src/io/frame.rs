// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Sequential TFRecord frame reader.
//!
//! # Record Format
//!
//! ```text
//! record := length(u64 LE) length_crc(u32 LE) payload(length bytes) payload_crc(u32 LE)
//! stream := record* EOF
//! ```
//!
//! Both checksums are masked CRC-32C (see [`super::crc`]). The reader
//! validates each record fully before handing out its payload and stops at
//! the first bad record: without a trusted length prefix there is no way to
//! find the next record boundary.

use std::fs::File;
use std::io::{BufReader, ErrorKind, Read};
use std::iter::FusedIterator;
use std::path::Path;

use byteorder::{ByteOrder, LittleEndian, ReadBytesExt};
use tracing::trace;

use super::crc;
use crate::{LoaderError, Result};

/// Size of the length prefix plus its checksum.
pub const HEADER_LEN: usize = 12;

/// Size of the trailing payload checksum.
pub const FOOTER_LEN: usize = 4;

/// Largest record accepted by default (1 GiB).
pub const DEFAULT_MAX_RECORD_LEN: u64 = 1 << 30;

/// Upper bound on the up-front payload allocation; larger payloads grow as read.
const INITIAL_PAYLOAD_CAPACITY: u64 = 64 * 1024;

/// One validated record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Offset of the record's length prefix in the input
    pub offset: u64,
    /// Record payload
    pub payload: Vec<u8>,
}

impl Frame {
    /// Total bytes the record occupies in the container.
    pub fn encoded_len(&self) -> u64 {
        (HEADER_LEN + FOOTER_LEN) as u64 + self.payload.len() as u64
    }
}

/// Forward-only reader over TFRecord frames.
///
/// Implements [`Iterator`] yielding `Result<Frame>`. After the first error,
/// or after a clean end of input, the iterator is exhausted for good.
///
/// # Example
///
/// ```rust,no_run
/// use tfrecord_loader::io::FrameReader;
///
/// for frame in FrameReader::open("events.out.tfevents.123")? {
///     let frame = frame?;
///     println!("{} bytes at offset {}", frame.payload.len(), frame.offset);
/// }
/// # Ok::<(), tfrecord_loader::LoaderError>(())
/// ```
pub struct FrameReader<R> {
    reader: R,
    /// Offset of the next record
    offset: u64,
    max_record_len: u64,
    finished: bool,
}

impl FrameReader<BufReader<File>> {
    /// Open a file for frame reading.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        open_buffered(path.as_ref(), "FrameReader::open").map(Self::new)
    }
}

/// Open `path` as a buffered source, naming `context` in the error.
pub(crate) fn open_buffered(path: &Path, context: &'static str) -> Result<BufReader<File>> {
    let file = File::open(path).map_err(|e| {
        LoaderError::io(context, format!("Failed to open {}: {e}", path.display()))
    })?;
    Ok(BufReader::new(file))
}

impl<R: Read> FrameReader<R> {
    /// Wrap a byte source. The reader takes exclusive ownership of it.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            offset: 0,
            max_record_len: DEFAULT_MAX_RECORD_LEN,
            finished: false,
        }
    }

    /// Reject records whose declared length exceeds `max`.
    pub fn with_max_record_len(mut self, max: u64) -> Self {
        self.max_record_len = max;
        self
    }

    /// Offset of the next record to be read.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Release the underlying byte source.
    pub fn into_inner(self) -> R {
        self.reader
    }

    /// Read the next record.
    ///
    /// Returns `Ok(None)` when the input ends exactly on a record boundary.
    pub fn read_frame(&mut self) -> Result<Option<Frame>> {
        let start = self.offset;

        let mut header = [0u8; HEADER_LEN];
        let filled = read_full(&mut self.reader, &mut header)
            .map_err(|e| LoaderError::io("FrameReader::read_frame", e.to_string()))?;
        if filled == 0 {
            return Ok(None);
        }
        if filled < HEADER_LEN {
            return Err(LoaderError::corrupt(
                start,
                format!("truncated record header: {filled} of {HEADER_LEN} bytes"),
            ));
        }

        let len_bytes = &header[..8];
        let len = LittleEndian::read_u64(len_bytes);
        let len_crc = LittleEndian::read_u32(&header[8..]);
        if !crc::verify(len_bytes, len_crc) {
            return Err(LoaderError::corrupt(start, "length checksum mismatch"));
        }
        if len > self.max_record_len {
            return Err(LoaderError::corrupt(
                start,
                format!(
                    "record length {len} exceeds limit of {} bytes",
                    self.max_record_len
                ),
            ));
        }

        let mut payload = Vec::with_capacity(len.min(INITIAL_PAYLOAD_CAPACITY) as usize);
        (&mut self.reader)
            .take(len)
            .read_to_end(&mut payload)
            .map_err(|e| LoaderError::io("FrameReader::read_frame", e.to_string()))?;
        if (payload.len() as u64) < len {
            return Err(LoaderError::corrupt(
                start,
                format!("truncated payload: {} of {len} bytes", payload.len()),
            ));
        }

        let payload_crc = match self.reader.read_u32::<LittleEndian>() {
            Ok(v) => v,
            Err(e) if e.kind() == ErrorKind::UnexpectedEof => {
                return Err(LoaderError::corrupt(start, "truncated payload checksum"));
            }
            Err(e) => return Err(LoaderError::io("FrameReader::read_frame", e.to_string())),
        };
        if !crc::verify(&payload, payload_crc) {
            return Err(LoaderError::corrupt(start, "payload checksum mismatch"));
        }

        let frame = Frame {
            offset: start,
            payload,
        };
        self.offset += frame.encoded_len();
        trace!(offset = start, len, "read frame");
        Ok(Some(frame))
    }
}

impl<R: Read> Iterator for FrameReader<R> {
    type Item = Result<Frame>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.read_frame() {
            Ok(Some(frame)) => Some(Ok(frame)),
            Ok(None) => {
                self.finished = true;
                None
            }
            Err(e) => {
                self.finished = true;
                Some(Err(e))
            }
        }
    }
}

impl<R: Read> FusedIterator for FrameReader<R> {}

/// Fill `buf` as far as the input allows. Returns the number of bytes read,
/// which is short only at end of input.
fn read_full<R: Read>(reader: &mut R, buf: &mut [u8]) -> std::io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}
