//! Chunked byte copying between files and sinks
//!
//! Every snapshot is a full, independent byte copy of its source, made by
//! streaming the content through a fixed-size buffer. The destination is
//! created if absent and truncated first, so no leftover bytes from a
//! previous version survive an overwrite.

use crate::error::Result;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use tracing::trace;

/// Size of the intermediate copy buffer
const COPY_BUF_SIZE: usize = 4096;

/// Copy the full content of `src` into `dst`, truncating `dst` first
///
/// The destination file is created if it does not exist. Returns the
/// number of bytes copied.
///
/// # Errors
///
/// Returns [`crate::VcpError::Io`] if either file cannot be opened or an
/// I/O error occurs mid-copy. On a mid-copy failure the destination is
/// left partially written; callers that need stronger guarantees must
/// provide them.
pub fn copy_contents(src: &Path, dst: &Path) -> Result<u64> {
    let mut reader = File::open(src)?;
    let mut writer = File::create(dst)?;
    let copied = stream(&mut reader, &mut writer)?;
    trace!(src = %src.display(), dst = %dst.display(), copied, "copied file content");
    Ok(copied)
}

/// Stream the full content of `src` into an arbitrary sink
///
/// Used by `view` to write a stored snapshot to stdout (or any other
/// writer). Returns the number of bytes written.
pub fn stream_to(src: &Path, sink: &mut dyn Write) -> Result<u64> {
    let mut reader = File::open(src)?;
    stream(&mut reader, sink)
}

fn stream(reader: &mut dyn Read, writer: &mut dyn Write) -> Result<u64> {
    let mut buf = [0u8; COPY_BUF_SIZE];
    let mut total = 0u64;
    loop {
        let n = reader.read(&mut buf)?;
        if n == 0 {
            break;
        }
        writer.write_all(&buf[..n])?;
        total += n as u64;
    }
    writer.flush()?;
    Ok(total)
}
