//! Output formats for record blobs.

use alloc::{
    format,
    string::{String, ToString},
    vec::Vec,
};
use core::str::FromStr;

use thiserror::Error;

use crate::{
    avec::slice::{self, decode},
    sans::command::Dataset,
};

/// How to present a record blob.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Format {
    /// The decoded records, pretty-printed.
    Value,
    /// Delimiter-separated text.
    #[default]
    Csv,
    /// The blob as received.
    Raw,
    /// The blob as lowercase hexadecimal text.
    Hex,
}

/// A format name was not recognised.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("Unknown output format.")]
pub struct UnknownFormat;

impl FromStr for Format {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "repr" | "value" => Self::Value,
            "csv" => Self::Csv,
            "raw" => Self::Raw,
            "hex" => Self::Hex,
            _ => Err(UnknownFormat)?,
        })
    }
}

/// Output configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    pub format: Format,
    /// Field separator for CSV output.
    pub separator: String,
    /// Whether CSV output starts with a header line.
    pub header: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            format: Format::Csv,
            separator: ",".to_string(),
            header: true,
        }
    }
}

/// Render a blob of the given dataset.
///
/// The blob is decoded in every format, so an invalid blob is rejected even
/// when it would be passed through unchanged.
pub fn render(dataset: Dataset, blob: &[u8], options: &Options) -> Result<Vec<u8>, slice::Error> {
    let records = decode(dataset, blob)?;

    Ok(match options.format {
        Format::Value => format!("{records:#?}").into_bytes(),
        Format::Csv => records.to_csv(&options.separator, options.header).into_bytes(),
        Format::Raw => blob.to_vec(),
        Format::Hex => hex::encode(blob).into_bytes(),
    })
}
