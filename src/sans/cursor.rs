//! Byte cursor with fixed-size lookahead.

use super::FramingError;

/// A read position over an immutable blob.
///
/// Reads consume bytes from the tip; peeks inspect them without advancing,
/// which is how datapoint sequences in logger records find their end.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    r: &'a [u8],
    i: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(r: &'a [u8]) -> Self {
        Self { r, i: 0 }
    }

    /// Offset of the tip from the start of the blob.
    pub fn position(&self) -> usize {
        self.i
    }

    /// Number of bytes left after the tip.
    pub fn remaining(&self) -> usize {
        self.r.len() - self.i
    }

    /// Take an exact number of bytes from the tip, advancing it.
    ///
    /// `structure` names what was being read, for error reporting.
    pub fn take<const N: usize>(&mut self, structure: &'static str) -> Result<[u8; N], FramingError> {
        let bytes = self.peek::<N>().ok_or(FramingError::EndOfSlice {
            structure,
            needed: N,
            available: self.remaining(),
        })?;

        self.i += N;

        Ok(bytes)
    }

    /// Inspect an exact number of bytes at the tip without advancing.
    pub fn peek<const N: usize>(&self) -> Option<[u8; N]> {
        self.r.get(self.i..self.i + N)?.try_into().ok()
    }
}
