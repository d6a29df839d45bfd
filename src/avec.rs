//! Convenience interfaces for decoding blobs and driving the instrument.
//!
//! The functions in [`slice`] decode complete record blobs into canonical
//! records. With the `std` feature, [`Device`] talks to an instrument over
//! any byte transport: it reads records, emulates button presses, and changes
//! settings with read-back verification.

pub mod slice;

#[cfg(feature = "std")]
pub mod device;
#[cfg(feature = "serial")]
pub mod serial;
#[cfg(feature = "std")]
pub mod tether;

pub use slice::{Records, decode};

#[cfg(feature = "std")]
pub use device::{Device, Outcome, Timing};
