//! Slot-name validation and parsing
//!
//! Stored snapshots are named `Version<N>_<filename>` (see
//! [`crate::paths::slot_file_name`]). This module is the inverse direction:
//! deciding whether an arbitrary directory-entry name is structurally a slot
//! name, and pulling the tracked filename and slot number back out of one.
//!
//! Two quirks of the name grammar are load-bearing and covered by tests:
//!
//! - [`is_valid_slot_name`] accepts any 8th character in `'0'..='4'`, even
//!   though the store only ever produces `1`-`3`. Structural validation is
//!   deliberately more lenient than slot-number extraction.
//! - [`is_valid_slot_name`] checks a fixed position (the 8th character),
//!   while [`extract_slot_number`] checks the character immediately before
//!   the first `_`. The two coincide for canonical names; callers apply
//!   both rather than assuming one implies the other.

use crate::error::{Result, VcpError};

/// Byte length of the literal `Version` prefix
const PREFIX_LEN: usize = 7;

/// Check whether `name` is structurally a slot name
///
/// True iff `name` is at least 8 bytes long, begins with the
/// case-insensitive literal `VERSION`, and its 8th byte is an ASCII digit
/// in `'0'..='4'`.
///
/// Note that this accepts digits `0` and `4`, which no slot ever uses;
/// a name passing here can still fail [`extract_slot_number`].
pub fn is_valid_slot_name(name: &str) -> bool {
    let bytes = name.as_bytes();
    if bytes.len() < PREFIX_LEN + 1 {
        return false;
    }
    if !bytes[..PREFIX_LEN].eq_ignore_ascii_case(b"version") {
        return false;
    }
    (b'0'..=b'4').contains(&bytes[PREFIX_LEN])
}

/// Extract the tracked filename from a slot name
///
/// Returns everything after the first `_`, so underscores inside the
/// filename itself are preserved:
/// `Version2_my_file.txt` parses to `my_file.txt`.
///
/// # Errors
///
/// Returns [`VcpError::MalformedSlotName`] if `name` contains no `_`.
pub fn extract_filename(name: &str) -> Result<&str> {
    match name.split_once('_') {
        Some((_, filename)) => Ok(filename),
        None => Err(VcpError::malformed(name, "missing '_' separator")),
    }
}

/// Extract the slot number from a slot name
///
/// Scans to the first `_` (or the end of the name if there is none) and
/// reads the byte immediately before it, which must be an ASCII digit in
/// `'1'..='3'` sitting past the `Version` prefix.
///
/// # Errors
///
/// Returns [`VcpError::MalformedSlotName`] if the digit is absent or
/// outside `1..=3`.
pub fn extract_slot_number(name: &str) -> Result<u8> {
    let bytes = name.as_bytes();
    let sep = bytes
        .iter()
        .position(|&b| b == b'_')
        .unwrap_or(bytes.len());
    if sep > PREFIX_LEN {
        let digit = bytes[sep - 1];
        if (b'1'..=b'3').contains(&digit) {
            return Ok(digit - b'0');
        }
    }
    Err(VcpError::malformed(name, "missing slot number 1-3"))
}
