//! BCD timestamps shared by all record layouts.
//!
//! The instrument's clock is reported field by field and is not validated:
//! an unset clock reads as all zeroes, and a glitched nibble can push a field
//! out of its range. Decoding keeps whatever the fields say. Only date
//! arithmetic, needed to place logger datapoints, requires a real calendar
//! date and time.

use core::fmt;

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use zerocopy::FromBytes;

use super::{bcd, status::FieldDecodeError};

/// Seven BCD bytes of a timestamp, as stored by the instrument.
#[repr(C, packed)]
#[derive(Debug, Clone, Copy, FromBytes)]
pub struct RawTimestamp {
    pub year: u8,
    pub weekday: u8,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

/// A date as reported by the instrument, which need not exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Date {
    pub year: u16,
    pub month: u8,
    pub day: u8,
}

impl Date {
    pub fn new(year: u16, month: u8, day: u8) -> Self {
        Self { year, month, day }
    }

    /// The date on the calendar, if there is one.
    pub fn to_naive(self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year as i32, self.month as u32, self.day as u32)
    }
}

impl From<NaiveDate> for Date {
    fn from(date: NaiveDate) -> Self {
        Self {
            year: date.year() as u16,
            month: date.month() as u8,
            day: date.day() as u8,
        }
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

/// A time of day as reported by the instrument, which need not exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Time {
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl Time {
    pub fn new(hour: u8, minute: u8, second: u8) -> Self {
        Self {
            hour,
            minute,
            second,
        }
    }

    pub fn to_naive(self) -> Option<NaiveTime> {
        NaiveTime::from_hms_opt(self.hour as u32, self.minute as u32, self.second as u32)
    }
}

impl From<NaiveTime> for Time {
    fn from(time: NaiveTime) -> Self {
        Self {
            hour: time.hour() as u8,
            minute: time.minute() as u8,
            second: time.second() as u8,
        }
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hour, self.minute, self.second)
    }
}

/// A decoded timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timestamp {
    pub date: Date,
    /// Day of the week, 1 to 7.
    pub weekday: u8,
    pub time: Time,
    /// Number of nibbles across all fields that were not decimal digits.
    pub pseudo_tetrades: u8,
}

impl Timestamp {
    /// The timestamp as a point in time, for date arithmetic.
    pub fn to_naive(self) -> Result<NaiveDateTime, FieldDecodeError> {
        let (Some(date), Some(time)) = (self.date.to_naive(), self.time.to_naive()) else {
            Err(FieldDecodeError::Timestamp {
                date: self.date,
                time: self.time,
            })?
        };

        Ok(date.and_time(time))
    }
}

impl RawTimestamp {
    /// Decode the BCD fields, placing the year in the 2000s.
    pub fn decode(self) -> Timestamp {
        let Self {
            year,
            weekday,
            month,
            day,
            hour,
            minute,
            second,
        } = self;

        let mut pseudo_tetrades = 0;
        let mut field = |name, byte| {
            let bcd = bcd::decode_field(name, byte);
            pseudo_tetrades += bcd.pseudo_tetrades;
            // Two nibbles of at most 15 each stay below 166.
            bcd.value as u8
        };

        let date = Date::new(
            2000 + field("year", year) as u16,
            field("month", month),
            field("day", day),
        );
        let weekday = field("weekday", weekday);
        let time = Time::new(
            field("hour", hour),
            field("minute", minute),
            field("second", second),
        );

        Timestamp {
            date,
            weekday,
            time,
            pseudo_tetrades,
        }
    }
}
