//! Slice-based decoder implementation.

use alloc::{string::String, vec::Vec};
use core::fmt;

use thiserror::Error;

use crate::{
    csv,
    record::{LiveRecord, LoggerRecord, SavedRecord},
    sans::{
        FramingError, command::Dataset, cursor::Cursor, live::LiveFrame, logger::LoggerFrame,
        saved::SavedFrame, status::FieldDecodeError,
    },
};

/// Errors occurring while decoding from a slice.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// The blob does not match its layout.
    #[error(transparent)]
    Framing(#[from] FramingError),
    /// A record holds a value outside its field's domain.
    #[error("Cannot decode the {location}: {source}")]
    Field {
        location: Location,
        source: FieldDecodeError,
    },
}

/// The record a field error was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    Live,
    /// A storage register, by its index from zero.
    Saved { slot: usize },
    /// The header of a logger group.
    Group { groupno: u8 },
    Datapoint { groupno: u8, id: usize },
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Live => write!(f, "live record"),
            Self::Saved { slot } => write!(f, "saved reading in slot {slot}"),
            Self::Group { groupno } => write!(f, "header of logger group {groupno}"),
            Self::Datapoint { groupno, id } => {
                write!(f, "datapoint {id} of logger group {groupno}")
            }
        }
    }
}

trait At<T> {
    fn at(self, location: Location) -> Result<T, Error>;
}

impl<T> At<T> for Result<T, FieldDecodeError> {
    fn at(self, location: Location) -> Result<T, Error> {
        self.map_err(|source| Error::Field { location, source })
    }
}

/// Decode a live record.
pub fn decode_live(r: &[u8]) -> Result<LiveRecord, Error> {
    let frame = LiveFrame::parse(&mut Cursor::new(r))?;
    LiveRecord::assemble(&frame).at(Location::Live)
}

/// Decode the saved readings, up to the first unused register.
pub fn decode_saved(r: &[u8]) -> Result<Vec<SavedRecord>, Error> {
    let frame = SavedFrame::parse(&mut Cursor::new(r))?;

    let mut records = Vec::new();

    let slots = frame.slots;

    for (slot, raw) in slots.iter().enumerate() {
        let Some(record) = SavedRecord::assemble(raw).at(Location::Saved { slot })? else {
            break;
        };
        records.push(record);
    }

    Ok(records)
}

/// Decode the datapoints of all logger groups, in order.
pub fn decode_logger(r: &[u8]) -> Result<Vec<LoggerRecord>, Error> {
    let frame = LoggerFrame::parse(&mut Cursor::new(r))?;

    let mut records = Vec::new();

    for group in &frame.groups {
        let groupno = group.header.groupno;
        let start = group.header.timestamp.decode();
        let origin = start.to_naive().at(Location::Group { groupno })?;

        for (id, point) in group.points.iter().enumerate() {
            let record = LoggerRecord::assemble(&group.header, origin, start.weekday, id, point)
                .at(Location::Datapoint { groupno, id })?;
            records.push(record);
        }
    }

    Ok(records)
}

/// Canonical records decoded from a blob of any dataset.
#[derive(Debug, Clone, PartialEq)]
pub enum Records {
    Live(LiveRecord),
    Saved(Vec<SavedRecord>),
    Logger(Vec<LoggerRecord>),
}

impl Records {
    /// Render as delimiter-separated text.
    pub fn to_csv(&self, sep: &str, header: bool) -> String {
        match self {
            Self::Live(record) => csv::encode(core::slice::from_ref(record), sep, header),
            Self::Saved(records) => csv::encode(records, sep, header),
            Self::Logger(records) => csv::encode(records, sep, header),
        }
    }
}

/// Decode a blob of the given dataset.
pub fn decode(dataset: Dataset, r: &[u8]) -> Result<Records, Error> {
    Ok(match dataset {
        Dataset::Live => Records::Live(decode_live(r)?),
        Dataset::Saved => Records::Saved(decode_saved(r)?),
        Dataset::Logger => Records::Logger(decode_logger(r)?),
    })
}
