//! Status bitfields describing the instrument's state.
//!
//! Every record carries a `Stat0` byte, and live and saved records also a
//! `Stat1` byte. Their bit groups are resolved through fixed tables into the
//! enumerations below. A code outside its table fails decoding rather than
//! falling back to a default.

use core::{fmt, str::FromStr};

use tartan_bitfield::bitfield;
use thiserror::Error;

use super::timestamp::{Date, Time};

/// An error resolving a coded field.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FieldDecodeError {
    /// A bit group held a code outside its table.
    #[error("Invalid `{field}` code ({code}) in status byte {byte:#04x}.")]
    Code {
        field: &'static str,
        code: u8,
        byte: u8,
    },
    /// A timestamp used for date arithmetic is not a calendar date and time.
    #[error("Invalid timestamp {date} {time}.")]
    Timestamp { date: Date, time: Time },
}

/// A label did not name any value of the enumeration.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("Unknown label.")]
pub struct UnknownLabel;

macro_rules! labelled {
    ($(#[$attr:meta])* $t:ident { $($variant:ident => $label:literal),+ $(,)? }) => {
        $(#[$attr])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $t {
            $($variant),+
        }

        impl $t {
            /// Every value of the enumeration.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// The label printed on the instrument and in CSV output.
            pub fn label(self) -> &'static str {
                match self {
                    $(Self::$variant => $label),+
                }
            }
        }

        impl fmt::Display for $t {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        impl FromStr for $t {
            type Err = UnknownLabel;

            /// Parse a label, ignoring case.
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.label().eq_ignore_ascii_case(s))
                    .ok_or(UnknownLabel)
            }
        }
    };
}

labelled!(
    /// Auto-power-off.
    Apo { On => "on", Off => "off" }
);
labelled!(
    /// Whether the display is frozen.
    Hold { Cont => "cont", Hold => "hold" }
);
labelled!(
    /// Measurement mode.
    Mode {
        Normal => "normal",
        Pmin => "Pmin",
        Pmax => "Pmax",
        Max => "max",
        Min => "min",
        Rel => "rel",
    }
);
labelled!(
    /// Unit of illuminance.
    Unit { Lux => "lux", Fc => "fc" }
);
labelled!(
    /// Measurement range, named after its full-scale reading.
    Range {
        R40 => "40",
        R400 => "400",
        R4K => "4k",
        R40K => "40k",
        R400K => "400k",
    }
);
labelled!(
    /// Battery state.
    Power { Ok => "ok", Low => "low" }
);
labelled!(
    /// What the secondary display shows.
    View {
        Time => "time",
        Day => "day",
        Sampling => "sampling",
        Year => "year",
    }
);
labelled!(
    /// Memory activity.
    Memstat {
        None => "none",
        Store => "store",
        Recall => "recall",
        Logging => "logging",
    }
);

impl Mode {
    fn from_code(code: u8) -> Option<Self> {
        Some(match code {
            0b000 => Self::Normal,
            0b010 => Self::Pmin,
            0b011 => Self::Pmax,
            0b100 => Self::Max,
            0b101 => Self::Min,
            0b110 => Self::Rel,
            _ => return None,
        })
    }
}

/// Ranges in the order of their 2-bit code, which is also the order the
/// range button cycles through them.
const LUX_RANGES: [Range; 4] = [Range::R400K, Range::R400, Range::R4K, Range::R40K];
const FC_RANGES: [Range; 4] = [Range::R40K, Range::R40, Range::R400, Range::R4K];

impl Unit {
    /// The ranges available in this unit, in code order.
    pub fn ranges(self) -> &'static [Range; 4] {
        match self {
            Self::Lux => &LUX_RANGES,
            Self::Fc => &FC_RANGES,
        }
    }
}

impl Range {
    /// Factor placing the decimal point of a reading taken in this range.
    pub fn factor(self) -> f64 {
        match self {
            Self::R40 => 0.01,
            Self::R400 => 0.1,
            Self::R4K => 1.0,
            Self::R40K => 10.0,
            Self::R400K => 100.0,
        }
    }

    /// Place the decimal point of a reading taken in this range.
    ///
    /// Dividing rather than multiplying by [`Range::factor`] keeps the result
    /// the closest value to the decimal reading.
    pub fn scale(self, raw: u32) -> f64 {
        let raw = raw as f64;
        match self {
            Self::R40 => raw / 100.0,
            Self::R400 => raw / 10.0,
            Self::R4K => raw,
            Self::R40K => raw * 10.0,
            Self::R400K => raw * 100.0,
        }
    }
}

/// Sign of a reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sign {
    Positive,
    Negative,
}

impl Sign {
    pub fn factor(self) -> f64 {
        match self {
            Self::Positive => 1.0,
            Self::Negative => -1.0,
        }
    }
}

/// Decoded first status byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stat0 {
    pub apo: Apo,
    pub hold: Hold,
    pub mode: Mode,
    pub unit: Unit,
    pub range: Range,
}

impl Stat0 {
    /// Factor placing the decimal point of readings taken in this state.
    pub fn factor(&self) -> f64 {
        self.range.factor()
    }
}

/// Decode the first status byte.
pub fn decode_stat0(byte: u8) -> Result<Stat0, FieldDecodeError> {
    bitfield! {
        struct Stat0Bits(u8) {
            [0..2] range: u8,
            [2] unit,
            [3..6] mode: u8,
            [6] hold,
            [7] apo,
        }
    }

    let bits = Stat0Bits(byte);

    let unit = if bits.unit() { Unit::Fc } else { Unit::Lux };

    let mode = Mode::from_code(bits.mode()).ok_or(FieldDecodeError::Code {
        field: "mode",
        code: bits.mode(),
        byte,
    })?;

    Ok(Stat0 {
        apo: if bits.apo() { Apo::Off } else { Apo::On },
        hold: if bits.hold() { Hold::Hold } else { Hold::Cont },
        mode,
        unit,
        range: unit.ranges()[bits.range() as usize],
    })
}

/// Decoded second status byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stat1 {
    pub power: Power,
    pub sign: Sign,
    pub view: View,
    pub memstat: Memstat,
}

/// Decode the second status byte.
///
/// Every 2-bit code of this byte is assigned, so decoding cannot fail.
pub fn decode_stat1(byte: u8) -> Stat1 {
    bitfield! {
        struct Stat1Bits(u8) {
            [0..2] memstat: u8,
            [2..4] view: u8,
            [4] sign,
            [5] power,
        }
    }

    let bits = Stat1Bits(byte);

    Stat1 {
        power: if bits.power() { Power::Low } else { Power::Ok },
        sign: if bits.sign() {
            Sign::Negative
        } else {
            Sign::Positive
        },
        view: View::ALL[bits.view() as usize],
        memstat: Memstat::ALL[bits.memstat() as usize],
    }
}
