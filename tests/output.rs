mod common;

use common::Live;
use pce174::{
    avec::slice::Error,
    output::{Format, Options, UnknownFormat, render},
    sans::{FramingError, command::Dataset},
};

fn options(format: Format) -> Options {
    Options {
        format,
        ..Options::default()
    }
}

#[test]
fn default_options() {
    let options = Options::default();

    assert_eq!(options.format, Format::Csv);
    assert_eq!(options.separator, ",");
    assert!(options.header);
}

#[test]
fn parse_format_names() {
    assert_eq!("repr".parse::<Format>(), Ok(Format::Value));
    assert_eq!("value".parse::<Format>(), Ok(Format::Value));
    assert_eq!("csv".parse::<Format>(), Ok(Format::Csv));
    assert_eq!("raw".parse::<Format>(), Ok(Format::Raw));
    assert_eq!("hex".parse::<Format>(), Ok(Format::Hex));
    assert_eq!("json".parse::<Format>(), Err(UnknownFormat));
}

#[test]
fn render_raw() {
    let blob = Live::default().blob();
    let out = render(Dataset::Live, &blob, &options(Format::Raw)).unwrap();
    assert_eq!(out, blob);
}

#[test]
fn render_hex() {
    let blob = Live::default().blob();
    let out = render(Dataset::Live, &blob, &options(Format::Hex)).unwrap();

    let text = String::from_utf8(out).unwrap();
    assert_eq!(text.len(), 2 * blob.len());
    assert!(text.starts_with("aadd00240503151430"));
}

#[test]
fn render_csv() {
    let blob = Live::default().blob();

    let options = Options {
        separator: ";".into(),
        header: false,
        ..Options::default()
    };
    let out = render(Dataset::Live, &blob, &options).unwrap();

    assert_eq!(
        String::from_utf8(out).unwrap(),
        "2024-03-15;5;14:30:00;120.0;123.0;lux;4k;normal;cont;off;ok;time;none;5;2"
    );
}

#[test]
fn render_value() {
    let blob = Live::default().blob();
    let out = render(Dataset::Live, &blob, &options(Format::Value)).unwrap();

    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("LiveRecord"));
    assert!(text.contains("mem_no: 5"));
}

#[test]
fn reject_invalid_blob_in_every_format() {
    let mut blob = Live::default().blob();
    blob[0] = 0xBB;

    for format in [Format::Value, Format::Csv, Format::Raw, Format::Hex] {
        assert!(matches!(
            render(Dataset::Live, &blob, &options(format)),
            Err(Error::Framing(FramingError::Magic { .. }))
        ));
    }
}

#[test]
fn render_empty_saved_bank() {
    let blob = common::saved(&[], [0; 13]);
    let out = render(Dataset::Saved, &blob, &Options::default()).unwrap();

    assert_eq!(
        String::from_utf8(out).unwrap(),
        "pos,date,weekday,time,value,unit,range,mode,hold,apo,power,view,memstat"
    );
}
