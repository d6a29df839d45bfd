mod common;

use common::{Live, stamp, stat0, stat1};
use pce174::{
    avec::slice::{Error, Location, decode_live},
    sans::{
        FramingError,
        status::{Apo, FieldDecodeError, Hold, Memstat, Mode, Power, Range, Unit, View},
        timestamp::{Date, Time},
    },
};

#[test]
fn decode_reference_reading() {
    let record = decode_live(&Live::default().blob()).unwrap();

    assert_eq!(record.date, Date::new(2024, 3, 15));
    assert_eq!(record.date.to_string(), "2024-03-15");
    assert_eq!(record.time, Time::new(14, 30, 0));
    assert_eq!(record.time.to_string(), "14:30:00");
    assert_eq!(record.weekday, 5);
    assert_eq!(record.value, 120.0);
    assert_eq!(record.value.to_string(), "120.0");
    assert_eq!(record.rawvalue, 123.0);
    assert_eq!(record.unit, Unit::Lux);
    assert_eq!(record.range, Range::R4K);
    assert_eq!(record.mode, Mode::Normal);
    assert_eq!(record.hold, Hold::Cont);
    assert_eq!(record.apo, Apo::Off);
    assert_eq!(record.power, Power::Ok);
    assert_eq!(record.view, View::Time);
    assert_eq!(record.memstat, Memstat::None);
    assert_eq!(record.mem_no, 5);
    assert_eq!(record.read_no, 2);
    assert_eq!(record.pseudo_tetrades, 0);
}

#[test]
fn decode_signed_scaled_reading() {
    let live = Live {
        dat0: [12, 34],
        dat1: [12, 30],
        // Foot-candles, range index 1 is "40".
        stat0: stat0(false, true, 6, true, 1),
        stat1: stat1(true, true, 1, 2),
        ..Live::default()
    };

    let record = decode_live(&live.blob()).unwrap();

    assert_eq!(record.unit, Unit::Fc);
    assert_eq!(record.range, Range::R40);
    assert_eq!(record.mode, Mode::Rel);
    assert_eq!(record.hold, Hold::Hold);
    assert_eq!(record.power, Power::Low);
    assert_eq!(record.view, View::Day);
    assert_eq!(record.memstat, Memstat::Recall);

    // The displayed value is signed, the raw value is not.
    assert!((record.value.value() + 12.30).abs() < 1e-9);
    assert!((record.rawvalue.value() - 12.34).abs() < 1e-9);
    assert_eq!(record.value.to_string(), "-12.3");
    assert_eq!(record.rawvalue.to_string(), "12.34");
}

#[test]
fn decode_ignores_trailing_bytes() {
    let mut blob = Live::default().blob();
    blob.extend_from_slice(&[0xAA, 0xDD, 0x00]);
    assert!(decode_live(&blob).is_ok());
}

#[test]
fn decode_pseudo_tetrade_proceeds() {
    let mut live = Live::default();
    live.stamp[3] = 0x1A;

    let record = decode_live(&live.blob()).unwrap();
    assert_eq!(record.date, Date::new(2024, 3, 20));
    assert_eq!(record.pseudo_tetrades, 1);
}

#[test]
fn reject_incorrect_magic() {
    let mut blob = Live::default().blob();
    blob[1] = 0xCC;

    assert_eq!(
        decode_live(&blob),
        Err(Error::Framing(FramingError::Magic {
            structure: "live record",
            expected: [0xAA, 0xDD],
            found: [0xAA, 0xCC],
        }))
    );
}

#[test]
fn reject_short_blob() {
    let blob = Live::default().blob();

    assert_eq!(
        decode_live(&blob[..16]),
        Err(Error::Framing(FramingError::EndOfSlice {
            structure: "live record",
            needed: 18,
            available: 16,
        }))
    );
    assert!(decode_live(&[]).is_err());
}

#[test]
fn reject_unassigned_mode() {
    let live = Live {
        stat0: stat0(false, false, 7, false, 0),
        ..Live::default()
    };

    let err = decode_live(&live.blob()).unwrap_err();
    assert_eq!(
        err,
        Error::Field {
            location: Location::Live,
            source: FieldDecodeError::Code {
                field: "mode",
                code: 7,
                byte: 0b0011_1000,
            },
        }
    );
    assert!(err.to_string().contains("live record"));
}

#[test]
fn decode_out_of_range_minute() {
    let mut live = Live::default();
    live.stamp[5] = 0x5A;

    let record = decode_live(&live.blob()).unwrap();
    assert_eq!(record.time, Time::new(14, 60, 0));
    assert_eq!(record.time.to_string(), "14:60:00");
    assert_eq!(record.pseudo_tetrades, 1);
    assert_eq!(record.value, 120.0);
}

#[test]
fn decode_unset_clock() {
    let live = Live {
        stamp: [0; 7],
        ..Live::default()
    };

    let record = decode_live(&live.blob()).unwrap();
    assert_eq!(record.date.to_string(), "2000-00-00");
    assert_eq!(record.time.to_string(), "00:00:00");
    assert_eq!(record.weekday, 0);
}

#[test]
fn decode_impossible_date() {
    let live = Live {
        stamp: stamp(24, 5, 2, 30, 14, 30, 0),
        ..Live::default()
    };

    let record = decode_live(&live.blob()).unwrap();
    assert_eq!(record.date.to_string(), "2024-02-30");
    assert_eq!(record.date.to_naive(), None);
    assert_eq!(record.pseudo_tetrades, 0);
}
