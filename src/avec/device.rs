//! Reader/writer-based instrument driver.
//!
//! _Requires Cargo feature `std`._

use std::{
    io::{self, Read, Write},
    thread,
    time::Duration,
    vec::Vec,
};

use thiserror::Error;

use super::slice::{self, Records};
use crate::{
    record::{LiveRecord, LoggerRecord, SavedRecord},
    sans::{
        command::{Button, Command, Dataset, UnknownButton},
        setting::{self, Setting, SettingRejected, Variable},
    },
};

extern crate std;

/// Errors occurring while talking to an instrument.
#[derive(Debug, Error)]
pub enum Error {
    /// An error from the underlying transport.
    #[error(transparent)]
    Io(#[from] io::Error),
    /// The instrument's response could not be decoded.
    #[error("Cannot decode response: {0}")]
    Decode(#[from] slice::Error),
    /// A setting change was rejected before any button was pressed.
    #[error(transparent)]
    Rejected(#[from] SettingRejected),
    /// After pressing buttons, the variable did not hold its target value.
    #[error("Failed to set `{variable}` to `{expected}` (read back `{found}`).")]
    Verification {
        variable: Variable,
        expected: Setting,
        found: Setting,
    },
    /// A button name did not match any legend.
    #[error(transparent)]
    Button(#[from] UnknownButton),
}

/// Delays giving the instrument time to react.
///
/// Presses sent faster than the instrument debounces its buttons are lost.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    /// Wait after reading state before changing it, and after changing it
    /// before reading it back.
    pub settle: Duration,
    /// Wait between consecutive presses.
    pub press_gap: Duration,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            settle: Duration::from_millis(250),
            press_gap: Duration::from_millis(250),
        }
    }
}

/// Result of a successful setting change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The variable already held its target value; nothing was sent.
    Unchanged,
    /// The change was read back and confirmed.
    Verified,
    /// The change was sent, but cannot be read back.
    Unverified,
}

/// An instrument attached to a byte transport.
///
/// Reads from the transport are expected to fail with
/// [`io::ErrorKind::TimedOut`] (or return zero bytes) once the instrument
/// stops sending; a response is everything received until then.
#[derive(Debug)]
pub struct Device<T> {
    port: T,
    timing: Timing,
}

impl<T: Read + Write> Device<T> {
    pub fn new(port: T, timing: Timing) -> Self {
        Self { port, timing }
    }

    /// Release the underlying transport.
    pub fn into_inner(self) -> T {
        self.port
    }

    pub fn timing(&self) -> Timing {
        self.timing
    }

    /// Send a single command without waiting for a response.
    pub fn send(&mut self, command: Command) -> Result<(), Error> {
        let frame = command.frame();
        log::debug!("Sending {command:?} ({frame:02x?}).");

        self.port.write_all(&frame)?;
        self.port.flush()?;

        Ok(())
    }

    /// Send commands in order, pausing between them.
    fn run(&mut self, commands: &[Command]) -> Result<(), Error> {
        for (i, command) in commands.iter().enumerate() {
            if i != 0 {
                thread::sleep(self.timing.press_gap);
            }
            self.send(*command)?;
        }

        Ok(())
    }

    /// Read everything the instrument sends until the transport times out.
    fn receive(&mut self) -> Result<Vec<u8>, Error> {
        let mut blob = Vec::new();
        let mut buf = [0; 256];

        loop {
            match self.port.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => blob.extend_from_slice(&buf[..n]),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) if matches!(e.kind(), io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock) => {
                    break;
                }
                Err(e) => Err(e)?,
            }
        }

        log::debug!("Received {} bytes.", blob.len());

        Ok(blob)
    }

    /// Press a button `n` times.
    pub fn press(&mut self, button: Button, n: usize) -> Result<(), Error> {
        self.run(&std::vec![Command::Press(button); n])
    }

    /// Press a button, looked up by any of its legends, `n` times.
    pub fn press_named(&mut self, name: &str, n: usize) -> Result<(), Error> {
        self.press(name.parse()?, n)
    }

    /// Enter or leave setup.
    pub fn toggle_setup(&mut self) -> Result<(), Error> {
        self.send(Command::Setup)
    }

    /// Request a record blob, returning it undecoded.
    pub fn read_raw(&mut self, dataset: Dataset) -> Result<Vec<u8>, Error> {
        self.send(Command::Read(dataset))?;
        self.receive()
    }

    /// Request and decode a record blob.
    pub fn read(&mut self, dataset: Dataset) -> Result<Records, Error> {
        let blob = self.read_raw(dataset)?;
        Ok(slice::decode(dataset, &blob)?)
    }

    /// Read the currently displayed reading and the instrument's state.
    pub fn read_live(&mut self) -> Result<LiveRecord, Error> {
        let blob = self.read_raw(Dataset::Live)?;
        Ok(slice::decode_live(&blob)?)
    }

    /// Read the manually saved readings.
    pub fn read_saved(&mut self) -> Result<Vec<SavedRecord>, Error> {
        let blob = self.read_raw(Dataset::Saved)?;
        Ok(slice::decode_saved(&blob)?)
    }

    /// Read the datapoints of all logging sessions.
    pub fn read_logger(&mut self) -> Result<Vec<LoggerRecord>, Error> {
        let blob = self.read_raw(Dataset::Logger)?;
        Ok(slice::decode_logger(&blob)?)
    }

    /// Read the current value of a settable variable.
    pub fn get(&mut self, variable: Variable) -> Result<Setting, Error> {
        Ok(self.read_live()?.setting(variable))
    }

    /// Change a setting by emulating button presses, then read it back.
    ///
    /// A failed verification is reported, not retried; the presses already
    /// sent are not undone.
    pub fn set(&mut self, target: Setting) -> Result<Outcome, Error> {
        let current = self.read_live()?;
        let plan = setting::plan(target, &current)?;

        if plan.is_empty() {
            log::debug!("`{}` is already `{target}`.", target.variable());
            return Ok(Outcome::Unchanged);
        }

        thread::sleep(self.timing.settle);
        self.run(&plan.commands)?;

        if !plan.verify {
            log::info!("Sent `{}` = `{target}` without verification.", target.variable());
            return Ok(Outcome::Unverified);
        }

        thread::sleep(self.timing.settle);
        let found = self.get(target.variable())?;

        if found != target {
            log::warn!("Failed to set `{}` to `{target}`, found `{found}`.", target.variable());
            Err(Error::Verification {
                variable: target.variable(),
                expected: target,
                found,
            })?;
        }

        log::info!("Set `{}` to `{target}`.", target.variable());

        Ok(Outcome::Verified)
    }
}
