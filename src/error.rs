//! Error types for the vcp library
//!
//! This module defines all error types that can occur during vcp operations.
//! Errors are designed to be informative and actionable, providing clear context
//! about what went wrong and potential remediation steps.

use std::path::PathBuf;
use thiserror::Error;

/// Type alias for Results in the vcp library
pub type Result<T> = std::result::Result<T, VcpError>;

/// Main error type for all vcp operations
#[derive(Debug, Error)]
pub enum VcpError {
    /// I/O errors during file operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A required directory could not be created
    #[error("Failed to create directory: {path:?}")]
    DirectoryCreate {
        /// Path that could not be created
        path: PathBuf,
    },

    /// A version directory does not exist or could not be opened
    #[error("Directory not found: {path:?}")]
    DirectoryNotFound {
        /// Path that could not be opened
        path: PathBuf,
    },

    /// A path expected to be a directory is something else
    #[error("Not a directory: {path:?}")]
    NotADirectory {
        /// The offending path
        path: PathBuf,
    },

    /// A slot name failed structural validation or parsing
    #[error("Malformed slot name '{name}': {reason}")]
    MalformedSlotName {
        /// The name that failed to parse
        name: String,
        /// What was wrong with it
        reason: String,
    },

    /// A slot number outside the fixed capacity range
    #[error("Invalid slot number {slot}: must be between 1 and 3")]
    InvalidSlotNumber {
        /// The rejected slot number
        slot: u64,
    },

    /// The live file to snapshot could not be opened
    #[error("Source file not found: {path:?}")]
    SourceFileNotFound {
        /// Path to the missing source file
        path: PathBuf,
    },

    /// A requested version slot does not exist on disk
    #[error("Slot not found: {name} ({available} valid version(s) exist for this file)")]
    SlotNotFound {
        /// The slot name that could not be opened
        name: String,
        /// How many valid slots currently exist for the tracked file
        available: usize,
    },

    /// A source path with no usable final component
    #[error("Empty or invalid filename: {path:?}")]
    EmptyFilename {
        /// The path that yielded no filename
        path: PathBuf,
    },
}

impl VcpError {
    /// Create a malformed-slot-name error with a custom reason
    pub fn malformed(name: impl Into<String>, reason: impl Into<String>) -> Self {
        VcpError::MalformedSlotName {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Check if this error means the tracked file simply has no versions yet
    pub fn is_no_versions(&self) -> bool {
        matches!(self, VcpError::DirectoryNotFound { .. })
    }

    /// Get a user-friendly error message with suggestions
    pub fn user_message(&self) -> String {
        match self {
            VcpError::DirectoryNotFound { path } => {
                format!(
                    "No version directory at {:?}. There may be no saved versions of this file yet - run 'vcp save <filename>' first.",
                    path
                )
            }
            VcpError::MalformedSlotName { name, reason } => {
                format!(
                    "'{}' is not a valid slot name ({}). Expected the form 'Version<1-3>_<filename>', e.g. 'Version2_notes.txt'.",
                    name, reason
                )
            }
            VcpError::SlotNotFound { name, available } => {
                format!(
                    "Version '{}' does not exist. There are {} valid version(s) under this file name - check the slot number and filename with 'vcp list'.",
                    name, available
                )
            }
            VcpError::SourceFileNotFound { path } => {
                format!(
                    "Cannot open {:?}. Check that the file exists and the name is spelled correctly.",
                    path
                )
            }
            _ => self.to_string(),
        }
    }
}
