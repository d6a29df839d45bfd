#![allow(dead_code)]

//! Builders for synthetic record blobs.

/// Encode a value below 100 as a BCD byte.
pub fn bcd(v: u8) -> u8 {
    (v / 10) << 4 | (v % 10)
}

/// BCD timestamp bytes: year, weekday, month, day, hour, minute, second.
pub fn stamp(year: u8, weekday: u8, month: u8, day: u8, hour: u8, minute: u8, second: u8) -> [u8; 7] {
    [year, weekday, month, day, hour, minute, second].map(bcd)
}

/// Pack a first status byte. `range` is the index into the unit's range table.
pub fn stat0(apo_off: bool, hold: bool, mode: u8, fc: bool, range: u8) -> u8 {
    (apo_off as u8) << 7 | (hold as u8) << 6 | (mode & 0b111) << 3 | (fc as u8) << 2 | (range & 0b11)
}

/// Pack a second status byte.
pub fn stat1(low: bool, negative: bool, view: u8, memstat: u8) -> u8 {
    (low as u8) << 5 | (negative as u8) << 4 | (view & 0b11) << 2 | (memstat & 0b11)
}

pub struct Live {
    pub stamp: [u8; 7],
    pub dat0: [u8; 2],
    pub dat1: [u8; 2],
    pub stat0: u8,
    pub stat1: u8,
    pub mem_no: u8,
    pub read_no: u8,
}

impl Default for Live {
    /// 2024-03-15 14:30:00, a Friday, reading 120 lux in the 4k range.
    fn default() -> Self {
        Self {
            stamp: stamp(24, 5, 3, 15, 14, 30, 0),
            dat0: [1, 23],
            dat1: [1, 20],
            stat0: stat0(true, false, 0, false, 2),
            stat1: stat1(false, false, 0, 0),
            mem_no: 5,
            read_no: 2,
        }
    }
}

impl Live {
    pub fn blob(&self) -> Vec<u8> {
        let mut blob = vec![0xAA, 0xDD, 0x00];
        blob.extend_from_slice(&self.stamp);
        blob.extend_from_slice(&self.dat0);
        blob.extend_from_slice(&self.dat1);
        blob.extend_from_slice(&[self.stat0, self.stat1, self.mem_no, self.read_no]);
        blob
    }
}

/// A storage register.
pub fn slot(stamp: [u8; 7], pos: u8, dat: [u8; 2], stat0: u8, stat1: u8) -> [u8; 13] {
    let mut slot = [0; 13];
    slot[1..8].copy_from_slice(&stamp);
    slot[8] = pos;
    slot[9..11].copy_from_slice(&dat);
    slot[11] = stat0;
    slot[12] = stat1;
    slot
}

/// A saved-readings blob. Registers beyond those given are filled with
/// `filler`.
pub fn saved(slots: &[[u8; 13]], filler: [u8; 13]) -> Vec<u8> {
    let mut blob = vec![0xBB, 0x88];
    for i in 0..99 {
        blob.extend_from_slice(slots.get(i).unwrap_or(&filler));
    }
    blob
}

/// A logger group with its datapoints.
pub fn group(groupno: u8, sampling: u8, stamp: [u8; 7], points: &[[u8; 3]]) -> Vec<u8> {
    let mut blob = vec![0xAA, 0x56, groupno, sampling, 0x00, 0x00];
    blob.extend_from_slice(&stamp);
    for point in points {
        blob.extend_from_slice(point);
    }
    blob
}

/// A logger blob declaring `count` groups.
pub fn logger(count: u8, groups: &[Vec<u8>]) -> Vec<u8> {
    let mut blob = vec![0xAA, 0xCC, count, 0x10, 0x00];
    for group in groups {
        blob.extend_from_slice(group);
    }
    blob
}
