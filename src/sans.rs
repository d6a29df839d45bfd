//! Protocol building blocks, free of any I/O.
//!
//! This module is intended for applications that need to drive the
//! instrument over their own transport, or that receive record blobs from
//! elsewhere. See [`crate::avec`] for decoding complete blobs into canonical
//! records and for talking to a device.
//!
//! Record layouts are fixed: a blob either matches its layout byte-for-byte
//! or decoding fails with a [`FramingError`]. Structures read from a blob are
//! plain values; nothing borrows the blob after parsing.

use thiserror::Error;

pub mod bcd;
pub mod command;
pub mod cursor;
pub mod live;
pub mod logger;
pub mod saved;
pub mod setting;
pub mod status;
pub mod timestamp;

/// An error reading the structure of a record blob.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FramingError {
    /// Incorrect magic marker.
    #[error("Incorrect {structure} marker (expected {expected:02x?}, found {found:02x?}).")]
    Magic {
        structure: &'static str,
        expected: [u8; 2],
        found: [u8; 2],
    },
    /// Unexpectedly reached the end of the blob.
    #[error("Unexpectedly reached the end of the blob reading a {structure} ({needed} bytes needed, {available} available).")]
    EndOfSlice {
        structure: &'static str,
        needed: usize,
        available: usize,
    },
    /// Reserved bytes of a logger group were not zero.
    #[error("Reserved bytes of a logger group are not zero ({found:02x?}).")]
    Reserved { found: [u8; 2] },
}
