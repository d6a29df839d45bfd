//! Tethered logging: live readings at a fixed interval.
//!
//! _Requires Cargo feature `std`._

use std::{
    io::{Read, Write},
    sync::atomic::{AtomicBool, Ordering},
    thread,
    time::Duration,
};

use super::device::{Device, Error};
use crate::record::LiveRecord;

extern crate std;

/// Iterator over live readings taken at a fixed interval.
///
/// Stops once the requested number of samples has been read, or once the
/// stop flag is raised. Both are checked between readings, never during one.
#[derive(Debug)]
pub struct Tether<'a, T> {
    device: &'a mut Device<T>,
    remaining: Option<usize>,
    interval: Duration,
    stop: Option<&'a AtomicBool>,
    started: bool,
}

impl<'a, T: Read + Write> Tether<'a, T> {
    /// Stop early when `stop` is raised, for example from a signal handler.
    pub fn with_stop(mut self, stop: &'a AtomicBool) -> Self {
        self.stop = Some(stop);
        self
    }

    fn stopped(&self) -> bool {
        self.remaining == Some(0) || self.stop.is_some_and(|s| s.load(Ordering::Relaxed))
    }
}

impl<T: Read + Write> Iterator for Tether<'_, T> {
    type Item = Result<LiveRecord, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.stopped() {
            return None;
        }

        if self.started {
            thread::sleep(self.interval);

            if self.stopped() {
                return None;
            }
        }

        self.started = true;

        if let Some(n) = &mut self.remaining {
            *n -= 1;
        }

        Some(self.device.read_live())
    }
}

impl<T: Read + Write> Device<T> {
    /// Read live records every `interval`, `samples` times or indefinitely.
    pub fn tether(&mut self, samples: Option<usize>, interval: Duration) -> Tether<'_, T> {
        Tether {
            device: self,
            remaining: samples,
            interval,
            stop: None,
            started: false,
        }
    }
}
