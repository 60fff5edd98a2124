//! The version store: save with rotation, list, and view
//!
//! `VersionStore` owns the fixed-capacity slot policy. Each tracked file
//! holds up to [`MAX_VERSIONS`] snapshots; a save either fills the next
//! free slot or, once the directory is full, rotates the existing slots
//! (2 into 1, 3 into 2, live file into 3) after an explicit confirmation.
//! Rotation overwrites slot *content* in place; directory entries are
//! never renamed or deleted, so occupancy never drops once reached.
//!
//! The confirmation step is an injected callback so the interactive
//! stdin prompt never leaks into library code paths; tests supply
//! deterministic answers.
//!
//! Rotation is not atomic: a failure partway through leaves the earlier
//! completed copies in place. Each individual copy truncates its
//! destination first, so no slot ever mixes bytes from two snapshots.

use crate::copier::{copy_contents, stream_to};
use crate::error::{Result, VcpError};
use crate::lister::{count_valid_slots, list_valid_slots, SlotEntry};
use crate::paths::{slot_file_name, VersionPaths, DEFAULT_ROOT, MAX_VERSIONS};
use std::fmt;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Confirmation callback invoked before a rotation overwrites the oldest slot
pub type ConfirmFn = Box<dyn FnMut() -> bool>;

/// What a call to [`VersionStore::save`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// A fresh slot was filled; no existing slot was touched
    Saved {
        /// The slot that now holds the new snapshot
        slot: u8,
    },
    /// All slots were occupied; the store rotated and the newest snapshot
    /// landed in slot 3
    Rotated,
    /// All slots were occupied and the confirmation callback declined;
    /// nothing changed on disk
    Declined,
}

/// Builder for [`VersionStore`]
///
/// Configures the root directory (default `/vctl`) and the overwrite
/// confirmation callback (default: interactive y/n prompt on stdin).
///
/// # Example
///
/// ```rust,no_run
/// use vcp::VersionStoreBuilder;
///
/// let mut store = VersionStoreBuilder::new()
///     .root("/vctl")
///     .confirmation(|| true) // always overwrite, no prompt
///     .build();
/// store.save(std::path::Path::new("notes.txt")).unwrap();
/// ```
pub struct VersionStoreBuilder {
    root: PathBuf,
    confirm: Option<ConfirmFn>,
}

impl VersionStoreBuilder {
    /// Create a builder with default settings
    pub fn new() -> Self {
        VersionStoreBuilder {
            root: PathBuf::from(DEFAULT_ROOT),
            confirm: None,
        }
    }

    /// Set the root directory holding all version directories
    pub fn root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    /// Set the callback consulted before rotation overwrites the oldest slot
    pub fn confirmation(mut self, confirm: impl FnMut() -> bool + 'static) -> Self {
        self.confirm = Some(Box::new(confirm));
        self
    }

    /// Build the store
    pub fn build(self) -> VersionStore {
        VersionStore {
            paths: VersionPaths::new(self.root),
            confirm: self.confirm.unwrap_or_else(|| Box::new(stdin_confirmation)),
        }
    }
}

impl Default for VersionStoreBuilder {
    fn default() -> Self {
        VersionStoreBuilder::new()
    }
}

/// Interactive default confirmation: prompt on stdout, read one line from
/// stdin, proceed only if the first character is a lowercase `y`
fn stdin_confirmation() -> bool {
    print!(
        "Maximum number of versions reached for this file. \
         Do you want to overwrite the oldest version? (y/n): "
    );
    let _ = io::stdout().flush();
    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line).is_err() {
        return false;
    }
    line.starts_with('y')
}

/// Fixed-capacity version store over a single root directory
///
/// See the [module docs](self) for the slot policy. Construct with
/// [`VersionStoreBuilder`].
pub struct VersionStore {
    paths: VersionPaths,
    confirm: ConfirmFn,
}

impl fmt::Debug for VersionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VersionStore")
            .field("root", &self.paths.root())
            .finish_non_exhaustive()
    }
}

impl VersionStore {
    /// The root directory this store operates under
    pub fn root(&self) -> &Path {
        self.paths.root()
    }

    /// Save a snapshot of `source`
    ///
    /// The tracked filename is the final component of `source`; the file's
    /// current bytes become the newest snapshot. Root and version
    /// directories are created on demand.
    ///
    /// While fewer than [`MAX_VERSIONS`] valid slots exist, the snapshot
    /// fills the next free slot and nothing else is touched. Once the
    /// directory is full the confirmation callback decides: declined means
    /// no filesystem change at all; confirmed triggers the rotation
    /// 2→1, 3→2, live→3.
    ///
    /// # Errors
    ///
    /// - [`VcpError::EmptyFilename`] if `source` has no usable final
    ///   component
    /// - [`VcpError::DirectoryCreate`] if the root or version directory
    ///   cannot be created
    /// - [`VcpError::SourceFileNotFound`] if `source` cannot be opened
    /// - [`VcpError::SlotNotFound`] if the directory is full but slot 1 is
    ///   missing (a corrupt layout; rotation refuses to run)
    /// - [`VcpError::Io`] on copy failures; earlier completed rotation
    ///   steps stay in place
    pub fn save(&mut self, source: &Path) -> Result<SaveOutcome> {
        let filename = tracked_filename(source)?;
        ensure_dir(self.paths.root())?;
        let dir = self.paths.version_dir(&filename);
        ensure_dir(&dir)?;

        let count = count_valid_slots(&dir)?;
        debug!(file = %filename, count, "valid slots before save");

        if count < MAX_VERSIONS as usize {
            let slot = count as u8 + 1;
            let dst = self.paths.slot_path(&filename, slot)?;
            copy_live_file(source, &dst)?;
            info!(file = %filename, slot, "saved new version");
            return Ok(SaveOutcome::Saved { slot });
        }

        if !(self.confirm)() {
            info!(file = %filename, "overwrite declined, no changes made");
            return Ok(SaveOutcome::Declined);
        }
        self.rotate(&filename, source, count)?;
        info!(file = %filename, "rotated versions, newest saved in slot 3");
        Ok(SaveOutcome::Rotated)
    }

    /// Shift slot contents 2→1 and 3→2, then write the live file into 3
    ///
    /// A full directory without an openable slot 1 is treated as corrupt:
    /// no copies are performed and the caller gets [`VcpError::SlotNotFound`]
    /// for slot 1. A missing slot 2 or 3 only skips its own shift; the live
    /// file still lands in slot 3.
    fn rotate(&self, filename: &str, source: &Path, count: usize) -> Result<()> {
        let slot1 = self.paths.slot_path(filename, 1)?;
        let slot2 = self.paths.slot_path(filename, 2)?;
        let slot3 = self.paths.slot_path(filename, 3)?;

        if !slot1.is_file() {
            return Err(VcpError::SlotNotFound {
                name: slot_file_name(filename, 1)?,
                available: count,
            });
        }

        if slot2.is_file() {
            copy_contents(&slot2, &slot1)?;
        } else {
            warn!(file = %filename, "slot 2 missing, skipping shift 2->1");
        }
        if slot3.is_file() {
            copy_contents(&slot3, &slot2)?;
        } else {
            warn!(file = %filename, "slot 3 missing, skipping shift 3->2");
        }
        copy_live_file(source, &slot3)
    }

    /// List the valid slot entries saved for `filename`, oldest first
    ///
    /// # Errors
    ///
    /// [`VcpError::DirectoryNotFound`] if the file has no version
    /// directory; callers usually present that as "no versions saved".
    pub fn list(&self, filename: &str) -> Result<Vec<SlotEntry>> {
        list_valid_slots(&self.paths.version_dir(filename))
    }

    /// Stream the content of the slot named `slot_name` into `sink`
    ///
    /// `slot_name` must have the stored form `Version<1-3>_<filename>`.
    /// Returns the number of bytes written.
    ///
    /// # Errors
    ///
    /// - [`VcpError::MalformedSlotName`] if the name fails structural
    ///   validation or parsing
    /// - [`VcpError::DirectoryCreate`] if the root or version directory
    ///   cannot be created
    /// - [`VcpError::SlotNotFound`] if the slot file cannot be opened; the
    ///   error carries the current valid-slot count for diagnostics
    pub fn view(&self, slot_name: &str, sink: &mut dyn Write) -> Result<u64> {
        let filename = crate::slot_name::extract_filename(slot_name)?.to_string();
        ensure_dir(self.paths.root())?;
        let dir = self.paths.version_dir(&filename);
        ensure_dir(&dir)?;

        if !crate::slot_name::is_valid_slot_name(slot_name) {
            return Err(VcpError::malformed(
                slot_name,
                "expected a case-insensitive 'Version' prefix followed by a digit 0-4",
            ));
        }
        let slot = crate::slot_name::extract_slot_number(slot_name)?;
        let path = self.paths.slot_path(&filename, slot)?;

        if !path.is_file() {
            return Err(VcpError::SlotNotFound {
                name: slot_name.to_string(),
                available: count_valid_slots(&dir).unwrap_or(0),
            });
        }
        stream_to(&path, sink)
    }
}

/// Resolve the tracked filename from a source path (its final component)
fn tracked_filename(source: &Path) -> Result<String> {
    source
        .file_name()
        .and_then(|n| n.to_str())
        .filter(|n| !n.is_empty())
        .map(str::to_string)
        .ok_or_else(|| VcpError::EmptyFilename {
            path: source.to_path_buf(),
        })
}

/// Create `path` (and any missing parents) if it does not already exist
fn ensure_dir(path: &Path) -> Result<()> {
    if path.is_dir() {
        return Ok(());
    }
    fs::create_dir_all(path).map_err(|_| VcpError::DirectoryCreate {
        path: path.to_path_buf(),
    })
}

/// Copy the live file into a slot, mapping an unopenable source to
/// [`VcpError::SourceFileNotFound`]
fn copy_live_file(source: &Path, dst: &Path) -> Result<()> {
    if !source.is_file() {
        return Err(VcpError::SourceFileNotFound {
            path: source.to_path_buf(),
        });
    }
    copy_contents(source, dst)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::fs;
    use std::rc::Rc;
    use tempfile::TempDir;

    fn store_in(root: &Path, answer: bool) -> VersionStore {
        VersionStoreBuilder::new()
            .root(root)
            .confirmation(move || answer)
            .build()
    }

    fn write_source(dir: &TempDir, name: &str, content: &[u8]) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_first_save_creates_slot_one() {
        let root = TempDir::new().unwrap();
        let work = TempDir::new().unwrap();
        let src = write_source(&work, "notes.txt", b"first");
        let mut store = store_in(root.path(), true);

        let outcome = store.save(&src).unwrap();
        assert_eq!(outcome, SaveOutcome::Saved { slot: 1 });

        let slot1 = root.path().join("notes.txt/Version1_notes.txt");
        assert_eq!(fs::read(&slot1).unwrap(), b"first");
        assert_eq!(store.list("notes.txt").unwrap().len(), 1);
    }

    #[test]
    fn test_saves_fill_successive_slots() {
        let root = TempDir::new().unwrap();
        let work = TempDir::new().unwrap();
        let src = write_source(&work, "a.txt", b"v1");
        let mut store = store_in(root.path(), true);

        assert_eq!(store.save(&src).unwrap(), SaveOutcome::Saved { slot: 1 });
        fs::write(&src, b"v2").unwrap();
        assert_eq!(store.save(&src).unwrap(), SaveOutcome::Saved { slot: 2 });
        fs::write(&src, b"v3").unwrap();
        assert_eq!(store.save(&src).unwrap(), SaveOutcome::Saved { slot: 3 });

        let dir = root.path().join("a.txt");
        assert_eq!(fs::read(dir.join("Version1_a.txt")).unwrap(), b"v1");
        assert_eq!(fs::read(dir.join("Version2_a.txt")).unwrap(), b"v2");
        assert_eq!(fs::read(dir.join("Version3_a.txt")).unwrap(), b"v3");
    }

    #[test]
    fn test_rotation_shifts_and_keeps_occupancy() {
        let root = TempDir::new().unwrap();
        let work = TempDir::new().unwrap();
        let src = write_source(&work, "a.txt", b"v1");
        let mut store = store_in(root.path(), true);

        for content in [b"v1" as &[u8], b"v2", b"v3"] {
            fs::write(&src, content).unwrap();
            store.save(&src).unwrap();
        }
        fs::write(&src, b"v4").unwrap();
        assert_eq!(store.save(&src).unwrap(), SaveOutcome::Rotated);

        let dir = root.path().join("a.txt");
        assert_eq!(fs::read(dir.join("Version1_a.txt")).unwrap(), b"v2");
        assert_eq!(fs::read(dir.join("Version2_a.txt")).unwrap(), b"v3");
        assert_eq!(fs::read(dir.join("Version3_a.txt")).unwrap(), b"v4");
        assert_eq!(store.list("a.txt").unwrap().len(), 3);
    }

    #[test]
    fn test_declined_rotation_changes_nothing() {
        let root = TempDir::new().unwrap();
        let work = TempDir::new().unwrap();
        let src = write_source(&work, "a.txt", b"v1");
        let mut store = store_in(root.path(), false);

        for content in [b"v1" as &[u8], b"v2", b"v3"] {
            fs::write(&src, content).unwrap();
            store.save(&src).unwrap();
        }
        fs::write(&src, b"v4").unwrap();
        assert_eq!(store.save(&src).unwrap(), SaveOutcome::Declined);

        let dir = root.path().join("a.txt");
        assert_eq!(fs::read(dir.join("Version1_a.txt")).unwrap(), b"v1");
        assert_eq!(fs::read(dir.join("Version2_a.txt")).unwrap(), b"v2");
        assert_eq!(fs::read(dir.join("Version3_a.txt")).unwrap(), b"v3");
    }

    #[test]
    fn test_confirmation_not_consulted_below_capacity() {
        let root = TempDir::new().unwrap();
        let work = TempDir::new().unwrap();
        let src = write_source(&work, "a.txt", b"v1");
        let asked = Rc::new(Cell::new(false));
        let asked_in_cb = Rc::clone(&asked);
        let mut store = VersionStoreBuilder::new()
            .root(root.path())
            .confirmation(move || {
                asked_in_cb.set(true);
                true
            })
            .build();

        store.save(&src).unwrap();
        store.save(&src).unwrap();
        store.save(&src).unwrap();
        assert!(!asked.get());

        store.save(&src).unwrap();
        assert!(asked.get());
    }

    #[test]
    fn test_rotation_refuses_without_slot_one() {
        let root = TempDir::new().unwrap();
        let work = TempDir::new().unwrap();
        let src = write_source(&work, "a.txt", b"v");
        let mut store = store_in(root.path(), true);

        for _ in 0..3 {
            store.save(&src).unwrap();
        }
        let dir = root.path().join("a.txt");
        fs::remove_file(dir.join("Version1_a.txt")).unwrap();
        // Refill occupancy so the store sees a full directory again
        fs::write(dir.join("VERSION1_a.txt"), b"imposter").unwrap();

        let err = store.save(&src).unwrap_err();
        assert!(matches!(err, VcpError::SlotNotFound { .. }));
        // Slots 2 and 3 untouched
        assert_eq!(fs::read(dir.join("Version2_a.txt")).unwrap(), b"v");
        assert_eq!(fs::read(dir.join("Version3_a.txt")).unwrap(), b"v");
    }

    #[test]
    fn test_rotation_skips_missing_middle_slot() {
        let root = TempDir::new().unwrap();
        let work = TempDir::new().unwrap();
        let src = write_source(&work, "a.txt", b"v1");
        let mut store = store_in(root.path(), true);

        for content in [b"v1" as &[u8], b"v2", b"v3"] {
            fs::write(&src, content).unwrap();
            store.save(&src).unwrap();
        }
        let dir = root.path().join("a.txt");
        fs::remove_file(dir.join("Version2_a.txt")).unwrap();
        // Keep the directory at full occupancy with a name that counts but
        // is not the canonical slot 2 path
        fs::write(dir.join("VERSION2_a.txt"), b"filler").unwrap();

        fs::write(&src, b"v4").unwrap();
        assert_eq!(store.save(&src).unwrap(), SaveOutcome::Rotated);

        // Shift 2->1 skipped (slot 2 absent), shift 3->2 and live->3 ran
        assert_eq!(fs::read(dir.join("Version1_a.txt")).unwrap(), b"v1");
        assert_eq!(fs::read(dir.join("Version2_a.txt")).unwrap(), b"v3");
        assert_eq!(fs::read(dir.join("Version3_a.txt")).unwrap(), b"v4");
    }

    #[test]
    fn test_save_missing_source() {
        let root = TempDir::new().unwrap();
        let mut store = store_in(root.path(), true);
        let err = store.save(Path::new("/definitely/not/here.txt")).unwrap_err();
        assert!(matches!(err, VcpError::SourceFileNotFound { .. }));
    }

    #[test]
    fn test_list_unknown_file() {
        let root = TempDir::new().unwrap();
        let store = store_in(root.path(), true);
        let err = store.list("never-saved.txt").unwrap_err();
        assert!(err.is_no_versions());
    }

    #[test]
    fn test_view_roundtrip() {
        let root = TempDir::new().unwrap();
        let work = TempDir::new().unwrap();
        let src = write_source(&work, "notes.txt", b"exact bytes back");
        let mut store = store_in(root.path(), true);
        store.save(&src).unwrap();

        let mut out = Vec::new();
        let n = store.view("Version1_notes.txt", &mut out).unwrap();
        assert_eq!(n, 16);
        assert_eq!(out, b"exact bytes back");
    }

    #[test]
    fn test_view_missing_slot_reports_count() {
        let root = TempDir::new().unwrap();
        let work = TempDir::new().unwrap();
        let src = write_source(&work, "notes.txt", b"x");
        let mut store = store_in(root.path(), true);
        store.save(&src).unwrap();

        let mut out = Vec::new();
        let err = store.view("Version3_notes.txt", &mut out).unwrap_err();
        match err {
            VcpError::SlotNotFound { name, available } => {
                assert_eq!(name, "Version3_notes.txt");
                assert_eq!(available, 1);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(out.is_empty());
    }

    #[test]
    fn test_view_malformed_name() {
        let root = TempDir::new().unwrap();
        let store = store_in(root.path(), true);
        let mut out = Vec::new();
        let err = store.view("Vers2_foo.txt", &mut out).unwrap_err();
        assert!(matches!(err, VcpError::MalformedSlotName { .. }));
    }

    #[test]
    fn test_save_source_with_directory_path() {
        // The tracked name is the final component; parent directories are
        // not part of the key
        let root = TempDir::new().unwrap();
        let work = TempDir::new().unwrap();
        fs::create_dir(work.path().join("sub")).unwrap();
        let src = work.path().join("sub/deep.txt");
        fs::write(&src, b"deep").unwrap();
        let mut store = store_in(root.path(), true);

        store.save(&src).unwrap();
        assert!(root.path().join("deep.txt/Version1_deep.txt").is_file());
    }
}
