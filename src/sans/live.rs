//! Live record layout.

use zerocopy::FromBytes;

use super::{FramingError, cursor::Cursor, timestamp::RawTimestamp};

/// Magic marker opening a live record.
pub const LIVE_MAGIC: [u8; 2] = [0xAA, 0xDD];

/// A live record as received, with BCD and bitfield bytes still packed.
#[repr(C, packed)]
#[derive(Debug, Clone, Copy, FromBytes)]
pub struct LiveFrame {
    pub magic: [u8; 2],
    _padding: u8,
    pub timestamp: RawTimestamp,
    /// Underlying raw reading, as a pair of base-100 digits.
    pub dat0: [u8; 2],
    /// Displayed reading, as a pair of base-100 digits.
    pub dat1: [u8; 2],
    pub stat0: u8,
    pub stat1: u8,
    /// Number of manually saved readings.
    pub mem_no: u8,
    /// Cursor position in manual storage.
    pub read_no: u8,
}

impl LiveFrame {
    /// Read a live record from the tip of the cursor.
    pub fn parse(r: &mut Cursor) -> Result<Self, FramingError> {
        let bytes = r.take::<{ size_of::<LiveFrame>() }>("live record")?;
        let frame: Self = zerocopy::transmute!(bytes);

        let magic = frame.magic;
        if magic != LIVE_MAGIC {
            Err(FramingError::Magic {
                structure: "live record",
                expected: LIVE_MAGIC,
                found: magic,
            })?;
        }

        Ok(frame)
    }
}
