mod common;

use common::{group, logger, stamp, stat0};
use pce174::{
    avec::slice::{Error, Location, decode_logger},
    sans::{
        FramingError,
        cursor::Cursor,
        logger::{GROUP_MAGIC, LoggerFrame},
        status::{FieldDecodeError, Range},
        timestamp::{Date, Time},
    },
};

fn point(dat: [u8; 2]) -> [u8; 3] {
    [dat[0], dat[1], stat0(false, false, 0, false, 2)]
}

/// Two groups; the first crosses midnight and holds a datapoint starting
/// with the first byte of the group marker.
fn two_groups() -> Vec<u8> {
    logger(
        2,
        &[
            group(
                1,
                10,
                stamp(24, 5, 3, 15, 23, 59, 50),
                &[point([1, 0]), point([0xAA, 0x10]), point([2, 0])],
            ),
            group(
                2,
                1,
                stamp(24, 6, 3, 16, 8, 0, 0),
                &[point([3, 0]), point([4, 0])],
            ),
        ],
    )
}

#[test]
fn split_groups_at_marker() {
    let blob = two_groups();
    let mut r = Cursor::new(&blob);
    let frame = LoggerFrame::parse(&mut r).unwrap();

    assert_eq!(frame.header.groups, 2);
    assert_eq!(frame.header.bufsize, 0x1000);
    assert_eq!(frame.groups.len(), 2);

    let [first, second] = &frame.groups[..] else {
        panic!("expected two groups");
    };

    assert_eq!(first.offset, 5);
    assert_eq!(first.points.len(), 3);

    // The second group starts exactly where the first one's datapoints end.
    assert_eq!(second.offset, 5 + 13 + 3 * 3);
    assert_eq!(blob[second.offset..second.offset + 2], GROUP_MAGIC);
    assert_eq!(second.points.len(), 2);

    assert_eq!(r.position(), blob.len());
}

#[test]
fn decode_derived_timestamps() {
    let records = decode_logger(&two_groups()).unwrap();

    assert_eq!(records.len(), 5);

    let ids: Vec<_> = records.iter().map(|r| (r.groupno, r.id)).collect();
    assert_eq!(ids, [(1, 0), (1, 1), (1, 2), (2, 0), (2, 1)]);

    let times: Vec<_> = records.iter().map(|r| r.time.to_string()).collect();
    assert_eq!(
        times,
        ["23:59:50", "00:00:00", "00:00:10", "08:00:00", "08:00:01"]
    );

    assert_eq!(records[0].date, Date::new(2024, 3, 15));
    assert_eq!(records[1].date, Date::new(2024, 3, 16));
    assert_eq!(records[0].weekday, 5);
    assert_eq!(records[1].weekday, 6);
    assert_eq!(records[4].time, Time::new(8, 0, 1));

    assert_eq!(records[0].sampling, 10);
    assert_eq!(records[3].sampling, 1);
}

#[test]
fn decode_unsigned_values() {
    let records = decode_logger(&two_groups()).unwrap();

    let values: Vec<_> = records.iter().map(|r| r.value.value()).collect();
    assert_eq!(values, [100.0, 17016.0, 200.0, 300.0, 400.0]);
    assert!(records.iter().all(|r| r.range == Range::R4K));
}

#[test]
fn decode_no_groups() {
    let records = decode_logger(&logger(0, &[])).unwrap();
    assert!(records.is_empty());
}

#[test]
fn stop_at_single_trailing_byte() {
    let mut blob = logger(1, &[group(1, 1, stamp(24, 1, 1, 1, 0, 0, 0), &[point([1, 0])])]);
    blob.push(0x00);

    let records = decode_logger(&blob).unwrap();
    assert_eq!(records.len(), 1);
}

#[test]
fn ignore_undeclared_groups() {
    let blob = logger(
        1,
        &[
            group(1, 1, stamp(24, 1, 1, 1, 0, 0, 0), &[point([1, 0])]),
            group(2, 1, stamp(24, 1, 1, 1, 0, 0, 0), &[point([2, 0])]),
        ],
    );

    let records = decode_logger(&blob).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].groupno, 1);
}

#[test]
fn reject_missing_group() {
    let blob = logger(3, &[group(1, 1, stamp(24, 1, 1, 1, 0, 0, 0), &[point([1, 0])])]);

    assert_eq!(
        decode_logger(&blob),
        Err(Error::Framing(FramingError::EndOfSlice {
            structure: "logger group",
            needed: 13,
            available: 0,
        }))
    );
}

#[test]
fn reject_group_without_datapoints() {
    let blob = logger(1, &[group(1, 1, stamp(24, 1, 1, 1, 0, 0, 0), &[])]);

    assert!(matches!(
        decode_logger(&blob),
        Err(Error::Framing(FramingError::EndOfSlice {
            structure: "logger datapoint",
            ..
        }))
    ));
}

#[test]
fn reject_nonzero_reserved_bytes() {
    let mut blob = two_groups();
    blob[5 + 4] = 0x01;

    assert_eq!(
        decode_logger(&blob),
        Err(Error::Framing(FramingError::Reserved { found: [0x01, 0x00] }))
    );
}

#[test]
fn reject_incorrect_header_marker() {
    let mut blob = two_groups();
    blob[1] = 0xDD;

    assert!(matches!(
        decode_logger(&blob),
        Err(Error::Framing(FramingError::Magic {
            structure: "logger header",
            ..
        }))
    ));
}

#[test]
fn report_datapoint_of_undecodable_status() {
    let blob = logger(
        1,
        &[group(
            7,
            1,
            stamp(24, 1, 1, 1, 0, 0, 0),
            &[point([1, 0]), [0, 0, stat0(false, false, 1, false, 0)]],
        )],
    );

    assert!(matches!(
        decode_logger(&blob),
        Err(Error::Field {
            location: Location::Datapoint { groupno: 7, id: 1 },
            ..
        })
    ));
}

#[test]
fn reject_group_start_off_calendar() {
    let blob = logger(
        1,
        &[group(4, 1, stamp(24, 1, 2, 30, 0, 0, 0), &[point([1, 0])])],
    );

    assert_eq!(
        decode_logger(&blob),
        Err(Error::Field {
            location: Location::Group { groupno: 4 },
            source: FieldDecodeError::Timestamp {
                date: Date::new(2024, 2, 30),
                time: Time::new(0, 0, 0),
            },
        })
    );
}
