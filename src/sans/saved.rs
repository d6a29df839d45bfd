//! Manually saved readings.
//!
//! The instrument always transmits all of its storage registers. Registers
//! are filled in order, and the first one holding position zero marks the end
//! of the saved readings; it and everything after it may contain stale data.

use zerocopy::FromBytes;

use super::{FramingError, cursor::Cursor, timestamp::RawTimestamp};

/// Magic marker opening the saved readings.
pub const SAVED_MAGIC: [u8; 2] = [0xBB, 0x88];

/// Number of storage registers.
pub const SLOTS: usize = 99;

/// A single storage register as received.
#[repr(C, packed)]
#[derive(Debug, Clone, Copy, FromBytes)]
pub struct SavedSlot {
    /// Nominally zero, but not always.
    _unused: u8,
    pub timestamp: RawTimestamp,
    /// Storage position, 1 to 99, or zero for an unused register.
    pub pos: u8,
    /// Reading, as a pair of base-100 digits.
    pub dat: [u8; 2],
    pub stat0: u8,
    pub stat1: u8,
}

/// The full register bank as received.
#[repr(C, packed)]
#[derive(Debug, Clone, Copy, FromBytes)]
pub struct SavedFrame {
    pub magic: [u8; 2],
    pub slots: [SavedSlot; SLOTS],
}

impl SavedFrame {
    /// Read all storage registers from the tip of the cursor.
    pub fn parse(r: &mut Cursor) -> Result<Self, FramingError> {
        let bytes = r.take::<{ size_of::<SavedFrame>() }>("saved readings")?;
        let frame: Self = zerocopy::transmute!(bytes);

        let magic = frame.magic;
        if magic != SAVED_MAGIC {
            Err(FramingError::Magic {
                structure: "saved readings",
                expected: SAVED_MAGIC,
                found: magic,
            })?;
        }

        Ok(frame)
    }
}
