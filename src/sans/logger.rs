//! Data-logger sessions.
//!
//! A logger blob holds a header followed by a number of groups, one per
//! logging session. Groups carry no length: each is followed by datapoints
//! until the next two bytes are the group magic marker, or the blob ends.
//!
//! # Architecture
//!
//! Framing is expressed as a small finite-state machine. Every state is a
//! non-copy token; calling its `advance` method with the bytes it expects
//! returns the extracted data and a successor token. [`LoggerFrame::parse`]
//! drives the machine over a [`Cursor`], and is the place to start when
//! adapting it to another byte source.

use alloc::vec::Vec;

use either::Either::{self, Left, Right};
use zerocopy::FromBytes;

use super::{FramingError, cursor::Cursor, timestamp::RawTimestamp};

/// Magic marker opening a logger blob.
pub const LOGGER_MAGIC: [u8; 2] = [0xAA, 0xCC];

/// Magic marker opening each group.
pub const GROUP_MAGIC: [u8; 2] = [0xAA, 0x56];

/// Fields of the logger header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    /// Number of groups following the header.
    pub groups: u8,
    /// Buffer size reported by the instrument. Not used for framing.
    pub bufsize: u16,
}

/// State token to decode the logger header.
#[derive(Debug)]
pub struct LoggerHeader;

impl LoggerHeader {
    /// Transition to another state by decoding the logger header.
    ///
    /// Returns the header fields, and a successor state token.
    pub fn advance(r: [u8; 5]) -> Result<(Header, Either<GroupHeader, End>), FramingError> {
        #[repr(C, packed)]
        #[derive(FromBytes)]
        struct HeaderFrame {
            magic: [u8; 2],
            groups: u8,
            bufsize: [u8; 2],
        }

        let HeaderFrame {
            magic,
            groups,
            bufsize,
        } = zerocopy::transmute!(r);

        if magic != LOGGER_MAGIC {
            Err(FramingError::Magic {
                structure: "logger header",
                expected: LOGGER_MAGIC,
                found: magic,
            })?;
        }

        let header = Header {
            groups,
            bufsize: u16::from_be_bytes(bufsize),
        };

        Ok((header, GroupHeader::successor(groups)))
    }
}

/// A group header as received.
#[repr(C, packed)]
#[derive(Debug, Clone, Copy, FromBytes)]
pub struct GroupFrame {
    pub magic: [u8; 2],
    pub groupno: u8,
    /// Seconds between datapoints.
    pub sampling: u8,
    pub reserved: [u8; 2],
    /// Time of the first datapoint.
    pub timestamp: RawTimestamp,
}

/// State token to decode a group header.
#[derive(Debug)]
pub struct GroupHeader {
    groups_remaining: u8,
}

impl GroupHeader {
    fn successor(groups_remaining: u8) -> Either<Self, End> {
        if groups_remaining != 0 {
            Left(Self { groups_remaining })
        } else {
            Right(End(()))
        }
    }

    /// Transition to another state by decoding a group header.
    ///
    /// Returns the header, and a successor state token. Every group holds at
    /// least one datapoint.
    pub fn advance(self, r: [u8; 13]) -> Result<(GroupFrame, Datapoint), FramingError> {
        let group: GroupFrame = zerocopy::transmute!(r);

        let magic = group.magic;
        if magic != GROUP_MAGIC {
            Err(FramingError::Magic {
                structure: "logger group",
                expected: GROUP_MAGIC,
                found: magic,
            })?;
        }

        let reserved = group.reserved;
        if reserved != [0x00, 0x00] {
            Err(FramingError::Reserved { found: reserved })?;
        }

        let successor = Datapoint {
            groups_remaining: self.groups_remaining - 1,
        };

        Ok((group, successor))
    }
}

/// A datapoint as received.
#[repr(C, packed)]
#[derive(Debug, Clone, Copy, FromBytes)]
pub struct PointFrame {
    /// Reading, as a pair of base-100 digits.
    pub dat: [u8; 2],
    pub stat0: u8,
}

/// State token to decode a datapoint.
#[derive(Debug)]
pub struct Datapoint {
    groups_remaining: u8,
}

impl Datapoint {
    /// Transition to another state by decoding a datapoint.
    ///
    /// `next` holds the two bytes following the datapoint without consuming
    /// them, or `None` if fewer remain. The sequence of datapoints ends when
    /// they are the group magic marker or absent.
    ///
    /// Returns the datapoint, and a successor state token.
    pub fn advance(
        self,
        r: [u8; 3],
        next: Option<[u8; 2]>,
    ) -> (PointFrame, Either<Datapoint, Either<GroupHeader, End>>) {
        let point = zerocopy::transmute!(r);

        let successor = match next {
            Some(next) if next != GROUP_MAGIC => Left(self),
            _ => Right(GroupHeader::successor(self.groups_remaining)),
        };

        (point, successor)
    }
}

/// State token marking the end of the logger blob.
#[derive(Debug)]
pub struct End(());

/// A group with its datapoints, as received.
#[derive(Debug, Clone)]
pub struct RawGroup {
    /// Offset of the group's magic marker within the blob.
    pub offset: usize,
    pub header: GroupFrame,
    pub points: Vec<PointFrame>,
}

/// A complete logger blob, as received.
#[derive(Debug, Clone)]
pub struct LoggerFrame {
    pub header: Header,
    pub groups: Vec<RawGroup>,
}

impl LoggerFrame {
    /// Read a logger blob from the tip of the cursor.
    ///
    /// Bytes following the last group are left unread.
    pub fn parse(r: &mut Cursor) -> Result<Self, FramingError> {
        let (header, mut successor) = LoggerHeader::advance(r.take("logger header")?)?;

        let mut groups = Vec::with_capacity(header.groups as usize);

        while let Left(state) = successor {
            let offset = r.position();
            let (group, mut state) = state.advance(r.take("logger group")?)?;

            let mut points = Vec::new();

            successor = loop {
                let bytes = r.take("logger datapoint")?;
                let (point, next) = state.advance(bytes, r.peek());
                points.push(point);

                state = match next {
                    Left(state) => state,
                    Right(successor) => break successor,
                };
            };

            groups.push(RawGroup {
                offset,
                header: group,
                points,
            });
        }

        Ok(Self { header, groups })
    }
}
