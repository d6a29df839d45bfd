//! Serial port transport.
//!
//! _Requires Cargo feature `serial`._

use std::{boxed::Box, time::Duration};

use serialport::{DataBits, Parity, SerialPort, StopBits};

use super::device::{Device, Timing};

extern crate std;

#[cfg(unix)]
pub const DEFAULT_PORT: &str = "/dev/ttyUSB0";
#[cfg(windows)]
pub const DEFAULT_PORT: &str = "COM1";

pub const BAUD_RATE: u32 = 9600;

/// How long to wait for further bytes before a response is complete.
pub const TIMEOUT: Duration = Duration::from_millis(100);

/// Open the instrument on a serial port, at 9600 baud 8N1.
pub fn open(path: &str, timing: Timing) -> Result<Device<Box<dyn SerialPort>>, serialport::Error> {
    let port = serialport::new(path, BAUD_RATE)
        .data_bits(DataBits::Eight)
        .parity(Parity::None)
        .stop_bits(StopBits::One)
        .timeout(TIMEOUT)
        .open()?;

    log::info!("Opened {path}.");

    Ok(Device::new(port, timing))
}
