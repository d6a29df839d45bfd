#![no_std]

//! A driver and record decoder for the PCE-174 lightmeter/logger, and
//! compatible devices such as the Extech HD450.
//!
//! The instrument sends three kinds of binary record over its serial link: the
//! live reading, up to 99 manually saved readings, and data-logger sessions.
//! This crate decodes them into canonical measurement records, renders those
//! as CSV, and changes instrument settings by emulating button presses.
//!
//! Most users should begin with [`avec::Device`] to talk to an instrument, or
//! the functions in [`avec::slice`] to decode blobs received elsewhere. The
//! building blocks of the protocol are exposed in the [`sans`] module.
//!
//! ## Cargo Features
//!
//! The following crate feature flags are available:
//!
//! - `std`: enable the reader/writer-based device driver (default).
//! - `serial`: enable opening the instrument on a serial port.

extern crate alloc;

pub mod avec;
pub mod csv;
pub mod output;
pub mod record;
pub mod sans;
