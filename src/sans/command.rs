//! Command bytes understood by the instrument.
//!
//! The host sends every command as a fixed two-byte prefix followed by a
//! single code. Most codes emulate a press of one of the instrument's
//! buttons; a few request data or change state directly.

use core::{fmt, str::FromStr};

use thiserror::Error;

/// Prefix of every command frame.
pub const PREFIX: [u8; 2] = [0x87, 0x83];

/// A physical button, pressed briefly or held.
///
/// Several buttons carry more than one legend on the instrument; these share
/// a code and are reachable through every legend's name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    Units,
    Light,
    /// Also `apo`.
    Range,
    Rec,
    /// Also `left`.
    Peak,
    /// Also `right`.
    Rel,
    /// Also `min` and `up`.
    Max,
    /// Also `down`.
    Hold,
    Off,
    /// Held `rec`.
    RecLong,
    /// Held `peak`, also `LEFT`.
    PeakLong,
    /// Held `light`, also `LOAD`.
    LightLong,
    /// Held `rel`, also `RIGHT`.
    RelLong,
}

/// Canonical names, lower case for a brief press and upper case for a held one.
const BUTTONS: &[(&str, Button)] = &[
    ("units", Button::Units),
    ("light", Button::Light),
    ("range", Button::Range),
    ("rec", Button::Rec),
    ("peak", Button::Peak),
    ("rel", Button::Rel),
    ("max", Button::Max),
    ("hold", Button::Hold),
    ("off", Button::Off),
    ("REC", Button::RecLong),
    ("PEAK", Button::PeakLong),
    ("LIGHT", Button::LightLong),
    ("REL", Button::RelLong),
];

/// Alternative legends, mapped to their canonical names.
const ALIASES: &[(&str, &str)] = &[
    ("load", "light"),
    ("apo", "range"),
    ("left", "peak"),
    ("right", "rel"),
    ("min", "max"),
    ("up", "max"),
    ("down", "hold"),
    ("LEFT", "PEAK"),
    ("RIGHT", "REL"),
    ("LOAD", "LIGHT"),
];

/// Resolve an alternative legend to its canonical button name.
pub fn normalize(name: &str) -> &str {
    ALIASES
        .iter()
        .find(|(alias, _)| *alias == name)
        .map_or(name, |&(_, canonical)| canonical)
}

impl Button {
    /// The command code emulating a press of this button.
    pub fn code(self) -> u8 {
        match self {
            Self::Units => 0xFE,
            Self::Light => 0xFD,
            Self::Range => 0x7F,
            Self::Rec => 0xFB,
            Self::Peak => 0xF7,
            Self::Rel => 0xDF,
            Self::Max => 0xBF,
            Self::Hold => 0xEF,
            Self::Off => 0xF3,
            Self::RecLong => 0xDC,
            Self::PeakLong => 0xDA,
            Self::LightLong => 0xDB,
            Self::RelLong => 0xDE,
        }
    }

    /// The canonical name of this button.
    pub fn name(self) -> &'static str {
        BUTTONS
            .iter()
            .find(|(_, b)| *b == self)
            .map_or("", |&(name, _)| name)
    }
}

impl fmt::Display for Button {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A button name did not match any legend.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("Unknown button.")]
pub struct UnknownButton;

impl FromStr for Button {
    type Err = UnknownButton;

    /// Look up a button by any of its legends. Names are case-sensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = normalize(s);

        BUTTONS
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, b)| *b)
            .ok_or(UnknownButton)
    }
}

/// A kind of record blob the instrument can send.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dataset {
    /// The reading currently displayed.
    Live,
    /// Manually saved readings.
    Saved,
    /// Data-logger sessions.
    Logger,
}

impl FromStr for Dataset {
    type Err = UnknownDataset;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "live" => Self::Live,
            "saved" => Self::Saved,
            "logger" => Self::Logger,
            _ => Err(UnknownDataset)?,
        })
    }
}

/// A dataset name was not `live`, `saved` or `logger`.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("Unknown dataset.")]
pub struct UnknownDataset;

/// A host command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Press(Button),
    Read(Dataset),
    /// Enter or leave setup.
    Setup,
    /// Enable auto-power-off.
    ApoOn,
    /// Disable auto-power-off.
    ApoOff,
}

impl Command {
    pub fn code(self) -> u8 {
        match self {
            Self::Press(button) => button.code(),
            Self::Read(Dataset::Live) => 0x11,
            Self::Read(Dataset::Saved) => 0x12,
            Self::Read(Dataset::Logger) => 0x13,
            Self::Setup => 0xFA,
            Self::ApoOn => 0x7B,
            Self::ApoOff => 0x7C,
        }
    }

    /// The bytes to send for this command.
    pub fn frame(self) -> [u8; 3] {
        [PREFIX[0], PREFIX[1], self.code()]
    }
}
