//! Delimiter-separated text output.
//!
//! Each record kind has a fixed column order, declared by its [`Columns`]
//! implementation. Output has one line per record, in the order given,
//! optionally preceded by a single header line. Lines are joined by `\n`
//! without a trailing newline.

use alloc::{
    string::{String, ToString},
    vec::Vec,
};
use core::fmt::Display;

/// Derive [`Columns`] for a record struct.
///
/// Fields annotated with `#[column]` become columns, in declaration order,
/// named after the field. Supply a name to override it, as in
/// `#[column("date")]`. Column values are printed with [`Display`].
///
/// ```
/// #[derive(Columns)]
/// struct Sample {
///     #[column]
///     value: f64,
///     #[column("unit")]
///     unit_label: &'static str,
///     note: String,
/// }
/// ```
pub use pce174_derive::Columns;

/// A record with a fixed sequence of named columns.
///
/// See the [`Columns`](macro@Columns) derive macro for an automatic
/// implementation of this trait.
pub trait Columns {
    /// Column names, in output order.
    const COLUMNS: &'static [&'static str];

    /// Call `f` with the value of each column, in output order.
    fn visit(&self, f: &mut dyn FnMut(&dyn Display));
}

/// Render the header line of a record kind.
pub fn header<R: Columns>(sep: &str) -> String {
    R::COLUMNS.join(sep)
}

/// Render a single record as a line.
pub fn line<R: Columns>(record: &R, sep: &str) -> String {
    let mut out = String::new();
    let mut first = true;

    record.visit(&mut |value| {
        if !first {
            out.push_str(sep);
        }
        first = false;
        out.push_str(&value.to_string());
    });

    out
}

/// Render a sequence of records, with a header line if requested.
pub fn encode<R: Columns>(records: &[R], sep: &str, include_header: bool) -> String {
    let head = include_header.then(|| header::<R>(sep));
    let lines = records.iter().map(|r| line(r, sep));

    head.into_iter().chain(lines).collect::<Vec<_>>().join("\n")
}
