//! # vcp - fixed-capacity file versioning
//!
//! A small library (and CLI) that saves, lists, and views rotating
//! snapshots of individual files. Each tracked file gets its own version
//! directory under a single root (default `/vctl`), holding up to three
//! full-copy snapshots named `Version<N>_<filename>`.
//!
//! ## Overview
//!
//! - Saving while free slots remain fills the next slot (1, then 2, then 3)
//!   without touching existing snapshots
//! - Saving into a full directory rotates: slot 2's bytes move into slot 1,
//!   slot 3's into slot 2, and the live file lands in slot 3 - gated behind
//!   an explicit confirmation, so the oldest snapshot is never dropped
//!   silently
//! - Every snapshot is a full, independent byte copy; viewing a slot
//!   reproduces exactly the bytes saved
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use vcp::VersionStoreBuilder;
//! use std::path::Path;
//!
//! # fn main() -> vcp::Result<()> {
//! let mut store = VersionStoreBuilder::new()
//!     .root("/vctl")
//!     .confirmation(|| true) // overwrite without prompting
//!     .build();
//!
//! // Snapshot the current content of notes.txt
//! store.save(Path::new("notes.txt"))?;
//!
//! // Enumerate saved snapshots
//! for entry in store.list("notes.txt")? {
//!     println!("{}", entry.name);
//! }
//!
//! // Stream a snapshot's bytes to stdout
//! store.view("Version1_notes.txt", &mut std::io::stdout())?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Layout on disk
//!
//! ```text
//! /vctl/                              (root)
//! /vctl/<filename>/                   (per-file version directory)
//! /vctl/<filename>/Version1_<filename>  (oldest snapshot)
//! /vctl/<filename>/Version2_<filename>
//! /vctl/<filename>/Version3_<filename>  (newest snapshot)
//! ```
//!
//! Root and version directories are created lazily and never deleted.
//! Rotation overwrites slot content in place; filesystem entries are never
//! renamed, and a mid-rotation failure leaves earlier completed copies in
//! place (no rollback).
//!
//! ## Concurrency
//!
//! One invocation runs to completion on one thread with blocking I/O. No
//! locking is taken around the count-then-write sequence, so concurrent
//! invocations against the same filename are not safe.
//!
//! ## Module Organization
//!
//! - [`store`]: the stateful core - save with rotation, list, view
//! - [`lister`]: enumeration of valid slot entries in a version directory
//! - [`slot_name`]: slot-name validation and parsing
//! - [`paths`]: path derivation for the on-disk layout
//! - [`copier`]: chunked byte copying
//! - [`error`]: error types and handling

pub mod copier;
pub mod error;
pub mod lister;
pub mod paths;
pub mod slot_name;
pub mod store;

// Re-export main types for convenience
pub use error::{Result, VcpError};
pub use lister::SlotEntry;
pub use paths::{VersionPaths, DEFAULT_ROOT, MAX_VERSIONS};
pub use store::{SaveOutcome, VersionStore, VersionStoreBuilder};
