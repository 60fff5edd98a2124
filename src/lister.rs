//! Enumeration of valid slot entries in a version directory
//!
//! A version directory can contain things besides live snapshots: stale
//! entries, subdirectories, names that merely resemble slot names. Listing
//! filters all of those out and yields only *valid slot entries*: regular
//! files whose names pass structural validation and carry an extractable
//! slot number.
//!
//! Per-entry problems (unreadable metadata, non-UTF-8 names, structurally
//! valid names with no usable slot number) are logged and skipped so one
//! bad entry never aborts the whole listing. Only a missing or wrongly
//! typed directory fails the call.

use crate::error::{Result, VcpError};
use crate::slot_name::{extract_slot_number, is_valid_slot_name};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// One valid slot entry found in a version directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotEntry {
    /// The stored name, e.g. `Version2_notes.txt`
    pub name: String,
    /// The slot number parsed from the name, in `1..=3`
    pub slot: u8,
}

/// List the valid slot entries of `dir`, sorted by slot number
///
/// Each call re-reads the directory fresh; there is no cached cursor.
///
/// # Errors
///
/// - [`VcpError::DirectoryNotFound`] if `dir` does not exist or cannot be
///   opened
/// - [`VcpError::NotADirectory`] if `dir` exists but is not a directory
///
/// Per-entry failures are recovered locally: the entry is skipped with a
/// warning and enumeration continues.
pub fn list_valid_slots(dir: &Path) -> Result<Vec<SlotEntry>> {
    let meta = fs::metadata(dir).map_err(|_| VcpError::DirectoryNotFound {
        path: dir.to_path_buf(),
    })?;
    if !meta.is_dir() {
        return Err(VcpError::NotADirectory {
            path: dir.to_path_buf(),
        });
    }

    let mut entries = Vec::new();
    for entry in fs::read_dir(dir).map_err(|_| VcpError::DirectoryNotFound {
        path: dir.to_path_buf(),
    })? {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                warn!(dir = %dir.display(), error = %e, "unreadable directory entry, skipping");
                continue;
            }
        };
        let name = match entry.file_name().into_string() {
            Ok(n) => n,
            Err(os) => {
                warn!(dir = %dir.display(), name = ?os, "non-UTF-8 entry name, skipping");
                continue;
            }
        };
        let file_type = match entry.file_type() {
            Ok(t) => t,
            Err(e) => {
                warn!(entry = %name, error = %e, "unable to stat entry, skipping");
                continue;
            }
        };
        // Subdirectories are excluded even when their name would validate
        if !file_type.is_file() {
            continue;
        }
        if !is_valid_slot_name(&name) {
            continue;
        }
        match extract_slot_number(&name) {
            Ok(slot) => entries.push(SlotEntry { name, slot }),
            Err(_) => {
                // Structurally valid but carries no slot number in 1..=3
                // (e.g. Version0_/Version4_ prefixes); not a live slot
                warn!(entry = %name, "slot name without extractable slot number, skipping");
            }
        }
    }

    entries.sort_by_key(|e| e.slot);
    debug!(dir = %dir.display(), count = entries.len(), "listed valid slots");
    Ok(entries)
}

/// Count the valid slot entries of `dir`
///
/// The rotation decision in the store only needs the count, not the names.
pub fn count_valid_slots(dir: &Path) -> Result<usize> {
    Ok(list_valid_slots(dir)?.len())
}
