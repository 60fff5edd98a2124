//! Path derivation for the version store layout
//!
//! All persisted state lives under a single root directory (default `/vctl`).
//! Each tracked file gets one subdirectory named after it, and each saved
//! snapshot is a regular file inside that subdirectory:
//!
//! ```text
//! /vctl/                                (root)
//! /vctl/notes.txt/                      (version directory for "notes.txt")
//! /vctl/notes.txt/Version1_notes.txt    (slot 1, oldest)
//! /vctl/notes.txt/Version2_notes.txt    (slot 2)
//! /vctl/notes.txt/Version3_notes.txt    (slot 3, newest)
//! ```
//!
//! This module is pure path construction: no I/O happens here. The root is
//! injected rather than hardcoded so tests can point the whole store at a
//! temporary directory.

use crate::error::{Result, VcpError};
use std::path::{Path, PathBuf};

/// Maximum number of version slots kept per tracked file
pub const MAX_VERSIONS: u8 = 3;

/// Default location of the version root directory
pub const DEFAULT_ROOT: &str = "/vctl";

/// Derives every on-disk path used by the version store
///
/// `VersionPaths` owns the configured root and turns (filename, slot)
/// pairs into concrete paths. Slot numbers outside `1..=MAX_VERSIONS`
/// are rejected here, before any path reaches the filesystem layer.
#[derive(Debug, Clone)]
pub struct VersionPaths {
    root: PathBuf,
}

impl VersionPaths {
    /// Create a path builder rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        VersionPaths { root: root.into() }
    }

    /// The root directory holding all per-file version directories
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the version directory for `filename`: `<root>/<filename>`
    ///
    /// No validation is applied beyond what the caller already guarantees
    /// (a non-empty final path component).
    pub fn version_dir(&self, filename: &str) -> PathBuf {
        self.root.join(filename)
    }

    /// Path of one version slot:
    /// `<root>/<filename>/Version<slot>_<filename>`
    ///
    /// # Errors
    ///
    /// Returns [`VcpError::InvalidSlotNumber`] if `slot` is outside
    /// `1..=MAX_VERSIONS`. The slot-name encoding is only defined for
    /// that range.
    pub fn slot_path(&self, filename: &str, slot: u8) -> Result<PathBuf> {
        Ok(self
            .version_dir(filename)
            .join(slot_file_name(filename, slot)?))
    }
}

impl Default for VersionPaths {
    fn default() -> Self {
        VersionPaths::new(DEFAULT_ROOT)
    }
}

/// Format the stored name of one slot: `Version<slot>_<filename>`
///
/// This is the single formatting rule for slot names; parsing lives in
/// [`crate::slot_name`].
///
/// # Errors
///
/// Returns [`VcpError::InvalidSlotNumber`] if `slot` is outside
/// `1..=MAX_VERSIONS`.
pub fn slot_file_name(filename: &str, slot: u8) -> Result<String> {
    if slot < 1 || slot > MAX_VERSIONS {
        return Err(VcpError::InvalidSlotNumber { slot: slot as u64 });
    }
    Ok(format!("Version{}_{}", slot, filename))
}
