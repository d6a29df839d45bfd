//! Planning setting changes as button presses.
//!
//! The instrument has no command to set a variable directly. Instead, the
//! host emulates the button presses a user would make, starting from the
//! state read from a live record. [`plan`] computes those presses; executing
//! them and verifying the result is left to [`crate::avec::device`].

use alloc::{string::String, vec, vec::Vec};
use core::{fmt, str::FromStr};

use thiserror::Error;

use super::{
    command::{Button, Command},
    status::{Apo, Hold, Mode, Range, Unit, View},
};
use crate::record::LiveRecord;

/// A variable that can be set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variable {
    Mode,
    Hold,
    Range,
    Unit,
    Apo,
    View,
}

impl Variable {
    pub const ALL: &'static [Self] = &[
        Self::Mode,
        Self::Hold,
        Self::Range,
        Self::Unit,
        Self::Apo,
        Self::View,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Mode => "mode",
            Self::Hold => "hold",
            Self::Range => "range",
            Self::Unit => "unit",
            Self::Apo => "apo",
            Self::View => "view",
        }
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Variable {
    type Err = SettingRejected;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|v| v.name() == s)
            .ok_or_else(|| SettingRejected::UnknownVariable(s.into()))
    }
}

/// A requested setting change was rejected before any button was pressed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SettingRejected {
    /// No such variable can be set.
    #[error("`{0}` is not a settable variable.")]
    UnknownVariable(String),
    /// The value is not one the variable can take.
    #[error("`{value}` is not a valid value for `{variable}`.")]
    InvalidValue { variable: Variable, value: String },
    /// The range does not exist in the current unit.
    #[error("`{range}` is not a valid range for unit `{unit}`; set the unit before the range.")]
    RangeForUnit { range: Range, unit: Unit },
}

/// A variable together with a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Setting {
    Mode(Mode),
    Hold(Hold),
    Range(Range),
    Unit(Unit),
    Apo(Apo),
    View(View),
}

impl Setting {
    /// Parse a variable name and a value label.
    pub fn parse(variable: &str, value: &str) -> Result<Self, SettingRejected> {
        let variable: Variable = variable.parse()?;

        let setting = match variable {
            Variable::Mode => value.parse().map(Self::Mode),
            Variable::Hold => value.parse().map(Self::Hold),
            Variable::Range => value.parse().map(Self::Range),
            Variable::Unit => value.parse().map(Self::Unit),
            Variable::Apo => value.parse().map(Self::Apo),
            Variable::View => value.parse().map(Self::View),
        };

        setting.map_err(|_| SettingRejected::InvalidValue {
            variable,
            value: value.into(),
        })
    }

    pub fn variable(self) -> Variable {
        match self {
            Self::Mode(_) => Variable::Mode,
            Self::Hold(_) => Variable::Hold,
            Self::Range(_) => Variable::Range,
            Self::Unit(_) => Variable::Unit,
            Self::Apo(_) => Variable::Apo,
            Self::View(_) => Variable::View,
        }
    }
}

impl fmt::Display for Setting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mode(v) => v.fmt(f),
            Self::Hold(v) => v.fmt(f),
            Self::Range(v) => v.fmt(f),
            Self::Unit(v) => v.fmt(f),
            Self::Apo(v) => v.fmt(f),
            Self::View(v) => v.fmt(f),
        }
    }
}

/// Order in which a held `rel` cycles through views. This differs from the
/// order of their codes in the status byte.
pub const VIEW_CYCLE: [View; 4] = [View::Time, View::Day, View::Year, View::Sampling];

/// Number of presses of a cycling button needed to move from `current` to
/// `target`, wrapping around the end of `order`.
///
/// Returns `None` if either value is missing from `order`.
pub fn press_distance<T: PartialEq>(current: &T, target: &T, order: &[T]) -> Option<usize> {
    let p0 = order.iter().position(|v| v == current)?;
    let p1 = order.iter().position(|v| v == target)?;

    Some((p1 + order.len() - p0) % order.len())
}

/// Commands that carry out a setting change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    pub commands: Vec<Command>,
    /// Whether reading the variable back reflects the change.
    pub verify: bool,
}

impl Plan {
    fn presses(button: Button, n: usize) -> Self {
        Self {
            commands: vec![Command::Press(button); n],
            verify: true,
        }
    }

    /// Whether the setting already holds its target value.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

/// Plan the commands that change the instrument from the `current` state to
/// the `target` setting.
///
/// Auto-power-off cannot be read back reliably, as requesting a live record
/// appears to reset it. Its command is always sent, and the plan is marked
/// as not verifiable.
pub fn plan(target: Setting, current: &LiveRecord) -> Result<Plan, SettingRejected> {
    if let Setting::Range(range) = target {
        // Validated up front, as the range list depends on the current unit.
        if !current.unit.ranges().contains(&range) {
            Err(SettingRejected::RangeForUnit {
                range,
                unit: current.unit,
            })?;
        }
    }

    let plan = match target {
        Setting::Apo(apo) => Plan {
            commands: vec![match apo {
                Apo::On => Command::ApoOn,
                Apo::Off => Command::ApoOff,
            }],
            verify: false,
        },
        _ if current.setting(target.variable()) == target => Plan {
            commands: Vec::new(),
            verify: true,
        },
        Setting::Unit(_) => Plan::presses(Button::Units, 1),
        Setting::Hold(_) => Plan::presses(Button::Hold, 1),
        Setting::Range(range) => {
            let order = current.unit.ranges();
            let n = press_distance(&current.range, &range, order).unwrap_or_default();
            Plan::presses(Button::Range, n)
        }
        Setting::View(view) => {
            let n = press_distance(&current.view, &view, &VIEW_CYCLE).unwrap_or_default();
            Plan::presses(Button::RelLong, n)
        }
        Setting::Mode(mode) => {
            // Two presses of `rel` return any mode to normal.
            let n = if current.mode != Mode::Normal { 2 } else { 0 };
            let mut plan = Plan::presses(Button::Rel, n);

            let (button, n) = match mode {
                Mode::Normal => (Button::Rel, 0),
                Mode::Rel => (Button::Rel, 1),
                Mode::Max => (Button::Max, 1),
                Mode::Min => (Button::Max, 2),
                Mode::Pmax => (Button::Peak, 1),
                Mode::Pmin => (Button::Peak, 2),
            };

            plan.commands.extend(vec![Command::Press(button); n]);
            plan
        }
    };

    Ok(plan)
}
