// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Input eligibility for the data-loader plugin protocol.
//!
//! The host viewer offers every file it opens to every loader plugin. A
//! plugin that cannot handle the file must say so with a reserved exit
//! status, before it writes anything to its output stream.
//!
//! TensorBoard summary writers name their files
//! `events.out.tfevents.<timestamp>.<hostname>[.<suffix>]`, so the check is
//! on the file name rather than the extension.
//!
//! Only the final path component is matched. This departs from the usual
//! substring test on the whole path: `runs.tfevents/notes.txt` contains the
//! marker but is reported as [`Eligibility::NotEventFile`].
//!
//! # Example
//!
//! ```rust,no_run
//! use tfrecord_loader::io::detection::{check_input, INCOMPATIBLE_EXIT_CODE};
//!
//! if !check_input("events.out.tfevents.1700000000.host").is_supported() {
//!     std::process::exit(INCOMPATIBLE_EXIT_CODE);
//! }
//! ```

use std::fmt;
use std::path::Path;

/// Exit status telling the host that this loader does not handle the input.
pub const INCOMPATIBLE_EXIT_CODE: i32 = 66;

/// Substring that identifies a TensorBoard event file name.
pub const TFEVENTS_MARKER: &str = ".tfevents";

/// Outcome of [`check_input`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Eligibility {
    /// A regular file with an event-file name
    Supported,
    /// Nothing exists at the path
    Missing,
    /// The path exists but is a directory or special file
    NotAFile,
    /// The file name does not look like an event file
    NotEventFile,
}

impl Eligibility {
    /// Whether the loader should accept the input.
    pub fn is_supported(&self) -> bool {
        matches!(self, Eligibility::Supported)
    }
}

impl fmt::Display for Eligibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Eligibility::Supported => "supported",
            Eligibility::Missing => "file does not exist",
            Eligibility::NotAFile => "not a regular file",
            Eligibility::NotEventFile => "file name does not contain '.tfevents'",
        };
        f.write_str(text)
    }
}

/// Check whether `path` names a TensorBoard event file this loader handles.
pub fn check_input<P: AsRef<Path>>(path: P) -> Eligibility {
    let path = path.as_ref();

    if !is_event_file_name(path) {
        return Eligibility::NotEventFile;
    }

    match std::fs::metadata(path) {
        Ok(meta) if meta.is_file() => Eligibility::Supported,
        Ok(_) => Eligibility::NotAFile,
        Err(_) => Eligibility::Missing,
    }
}

/// Whether the file name component contains the event-file marker.
pub fn is_event_file_name(path: &Path) -> bool {
    path.file_name()
        .map(|name| name.to_string_lossy().contains(TFEVENTS_MARKER))
        .unwrap_or(false)
}
