//! Canonical measurement records.
//!
//! Records are assembled from the raw structures in [`crate::sans`]: BCD
//! fields are decoded, status bytes resolved through their tables, and
//! readings scaled to their physical value. Field order matches the CSV
//! column order of each record kind.

use core::{fmt, num::NonZeroU8};

use chrono::{NaiveDateTime, TimeDelta};

use crate::{
    csv::Columns,
    sans::{
        live::LiveFrame,
        logger::{GroupFrame, PointFrame},
        saved::SavedSlot,
        setting::{Setting, Variable},
        status::{
            Apo, FieldDecodeError, Hold, Memstat, Mode, Power, Range, Sign, Unit, View,
            decode_stat0, decode_stat1,
        },
        timestamp::{Date, Time, Timestamp},
    },
};

/// A scaled reading.
///
/// Prints in its shortest exact form, always with a decimal point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    value: f64,
}

impl Reading {
    /// Scale a pair of base-100 digits, most significant first.
    pub fn new(dat: [u8; 2], sign: Sign, range: Range) -> Self {
        let [high, low] = dat;
        let raw = 100 * high as u32 + low as u32;

        // Avoid a negative zero.
        let sign = if raw == 0 { Sign::Positive } else { sign };

        Self {
            value: sign.factor() * range.scale(raw),
        }
    }

    pub fn value(self) -> f64 {
        self.value
    }
}

impl From<Reading> for f64 {
    fn from(reading: Reading) -> Self {
        reading.value
    }
}

impl PartialEq<f64> for Reading {
    fn eq(&self, other: &f64) -> bool {
        self.value == *other
    }
}

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.value, f)
    }
}

/// The reading currently displayed, with the instrument's state.
#[derive(Debug, Clone, PartialEq, Columns)]
pub struct LiveRecord {
    #[column]
    pub date: Date,
    /// Day of the week, 1 to 7.
    #[column]
    pub weekday: u8,
    #[column]
    pub time: Time,
    /// Displayed reading.
    #[column]
    pub value: Reading,
    /// Underlying reading, unsigned.
    #[column]
    pub rawvalue: Reading,
    #[column]
    pub unit: Unit,
    #[column]
    pub range: Range,
    #[column]
    pub mode: Mode,
    #[column]
    pub hold: Hold,
    #[column]
    pub apo: Apo,
    #[column]
    pub power: Power,
    #[column]
    pub view: View,
    #[column]
    pub memstat: Memstat,
    /// Number of manually saved readings.
    #[column]
    pub mem_no: u8,
    /// Cursor position in manual storage.
    #[column]
    pub read_no: u8,
    /// Nibbles of the timestamp that were not decimal digits.
    pub pseudo_tetrades: u8,
}

impl LiveRecord {
    pub fn assemble(frame: &LiveFrame) -> Result<Self, FieldDecodeError> {
        let LiveFrame {
            timestamp,
            dat0,
            dat1,
            stat0,
            stat1,
            mem_no,
            read_no,
            ..
        } = *frame;

        let Timestamp {
            date,
            weekday,
            time,
            pseudo_tetrades,
        } = timestamp.decode();
        let stat0 = decode_stat0(stat0)?;
        let stat1 = decode_stat1(stat1);

        Ok(Self {
            date,
            weekday,
            time,
            value: Reading::new(dat1, stat1.sign, stat0.range),
            rawvalue: Reading::new(dat0, Sign::Positive, stat0.range),
            unit: stat0.unit,
            range: stat0.range,
            mode: stat0.mode,
            hold: stat0.hold,
            apo: stat0.apo,
            power: stat1.power,
            view: stat1.view,
            memstat: stat1.memstat,
            mem_no,
            read_no,
            pseudo_tetrades,
        })
    }

    /// The current value of a settable variable.
    pub fn setting(&self, variable: Variable) -> Setting {
        match variable {
            Variable::Mode => Setting::Mode(self.mode),
            Variable::Hold => Setting::Hold(self.hold),
            Variable::Range => Setting::Range(self.range),
            Variable::Unit => Setting::Unit(self.unit),
            Variable::Apo => Setting::Apo(self.apo),
            Variable::View => Setting::View(self.view),
        }
    }
}

/// A manually saved reading.
#[derive(Debug, Clone, PartialEq, Columns)]
pub struct SavedRecord {
    /// Storage position, 1 to 99.
    #[column]
    pub pos: NonZeroU8,
    #[column]
    pub date: Date,
    #[column]
    pub weekday: u8,
    #[column]
    pub time: Time,
    #[column]
    pub value: Reading,
    #[column]
    pub unit: Unit,
    #[column]
    pub range: Range,
    #[column]
    pub mode: Mode,
    #[column]
    pub hold: Hold,
    #[column]
    pub apo: Apo,
    #[column]
    pub power: Power,
    #[column]
    pub view: View,
    #[column]
    pub memstat: Memstat,
    /// Nibbles of the timestamp that were not decimal digits.
    pub pseudo_tetrades: u8,
}

impl SavedRecord {
    /// Assemble a storage register, or `None` if it is unused.
    pub fn assemble(slot: &SavedSlot) -> Result<Option<Self>, FieldDecodeError> {
        let SavedSlot {
            timestamp,
            pos,
            dat,
            stat0,
            stat1,
            ..
        } = *slot;

        let Some(pos) = NonZeroU8::new(pos) else {
            return Ok(None);
        };

        let Timestamp {
            date,
            weekday,
            time,
            pseudo_tetrades,
        } = timestamp.decode();
        let stat0 = decode_stat0(stat0)?;
        let stat1 = decode_stat1(stat1);

        Ok(Some(Self {
            pos,
            date,
            weekday,
            time,
            value: Reading::new(dat, stat1.sign, stat0.range),
            unit: stat0.unit,
            range: stat0.range,
            mode: stat0.mode,
            hold: stat0.hold,
            apo: stat0.apo,
            power: stat1.power,
            view: stat1.view,
            memstat: stat1.memstat,
            pseudo_tetrades,
        }))
    }
}

/// A datapoint of a logging session.
#[derive(Debug, Clone, PartialEq, Columns)]
pub struct LoggerRecord {
    #[column]
    pub groupno: u8,
    /// Index of the datapoint within its group, from zero.
    #[column]
    pub id: usize,
    #[column]
    pub date: Date,
    #[column]
    pub weekday: u8,
    #[column]
    pub time: Time,
    /// Reading. The instrument does not log a sign.
    #[column]
    pub value: Reading,
    #[column]
    pub unit: Unit,
    #[column]
    pub range: Range,
    #[column]
    pub mode: Mode,
    #[column]
    pub hold: Hold,
    #[column]
    pub apo: Apo,
    /// Seconds between datapoints of the group.
    pub sampling: u8,
}

impl LoggerRecord {
    /// Assemble the `id`th datapoint of a group starting at `start`, on the
    /// day of the week `weekday`.
    ///
    /// Datapoints carry no timestamp of their own; theirs is derived from the
    /// group's start and sampling interval.
    pub fn assemble(
        group: &GroupFrame,
        start: NaiveDateTime,
        weekday: u8,
        id: usize,
        point: &PointFrame,
    ) -> Result<Self, FieldDecodeError> {
        let GroupFrame {
            groupno, sampling, ..
        } = *group;
        let PointFrame { dat, stat0 } = *point;

        let stat0 = decode_stat0(stat0)?;

        let elapsed = TimeDelta::seconds(id as i64 * sampling as i64);
        let datetime = start + elapsed;

        let days = (datetime.date() - start.date()).num_days();
        let weekday = if days == 0 {
            weekday
        } else {
            ((weekday as i64 - 1 + days).rem_euclid(7) + 1) as u8
        };

        Ok(Self {
            groupno,
            id,
            date: datetime.date().into(),
            weekday,
            time: datetime.time().into(),
            value: Reading::new(dat, Sign::Positive, stat0.range),
            unit: stat0.unit,
            range: stat0.range,
            mode: stat0.mode,
            hold: stat0.hold,
            apo: stat0.apo,
            sampling,
        })
    }
}
