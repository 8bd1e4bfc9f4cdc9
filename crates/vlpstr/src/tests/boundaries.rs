use std::vec;

use rstest::rstest;

use crate::{
    Header, Layout, Terminator, checked_required_size, data_offset, decode_length, encode,
    fits_width, minimal_width, required_size, write_prefix,
};

#[rstest]
#[case::empty(0, 0, 2)]
#[case::short_max(127, 0, 129)]
#[case::first_extended(128, 1, 131)]
#[case::one_byte_max(255, 1, 258)]
#[case::two_bytes(256, 2, 260)]
#[case::two_bytes_max(65_535, 2, 65_539)]
#[case::three_bytes(65_536, 3, 65_541)]
fn encoded_size_matches_required_size(
    #[case] len: usize,
    #[case] width: u8,
    #[case] size: usize,
) {
    assert_eq!(minimal_width(len as u64), width);
    assert_eq!(required_size(len, Terminator::Nul), size);
    assert_eq!(required_size(len, Terminator::Omit), size - 1);

    let payload = vec![b'z'; len];
    let mut buf = vec![0xff_u8; size];
    assert_eq!(encode(&mut buf, &payload, Terminator::Nul), size);

    let expected_header = if width == 0 {
        len as u8
    } else {
        0x80 | width
    };
    assert_eq!(buf[0], expected_header);
    assert_eq!(data_offset(&buf), 1 + usize::from(width));
    assert_eq!(decode_length(&buf), len as u64);
    assert_eq!(&buf[data_offset(&buf)..size - 1], &payload[..]);
    assert_eq!(buf[size - 1], 0);
}

#[rstest]
#[case(0, 0)]
#[case(127, 0)]
#[case(128, 1)]
#[case(255, 1)]
#[case(256, 2)]
#[case(65_535, 2)]
#[case(65_536, 3)]
#[case(0xff_ffff, 3)]
#[case(0x100_0000, 4)]
#[case(u64::from(u32::MAX), 4)]
#[case(1 << 32, 5)]
#[case((1 << 40) - 1, 5)]
#[case(1 << 40, 6)]
#[case(1 << 48, 7)]
#[case(1 << 56, 8)]
#[case(1 << 63, 8)]
#[case(u64::MAX, 8)]
fn prefix_width_per_length(#[case] len: u64, #[case] width: u8) {
    assert_eq!(minimal_width(len), width);

    let mut buf = [0u8; 9];
    let offset = write_prefix(&mut buf, len);
    assert_eq!(offset, 1 + usize::from(width));
    assert_eq!(data_offset(&buf), offset);
    assert_eq!(decode_length(&buf), len);
    assert!(!Layout::for_len(len).is_overlong());

    if width > 0 {
        assert!(fits_width(len, width));
        assert!(!fits_width(len, width - 1));
    }
}

#[test]
fn empty_string_is_a_single_zero_byte() {
    let mut buf = [0xaa_u8; 2];
    assert_eq!(encode(&mut buf, b"", Terminator::Nul), 2);
    assert_eq!(buf, [0, 0]);

    let mut bare = [0xaa_u8; 1];
    assert_eq!(encode(&mut bare, b"", Terminator::Omit), 1);
    assert_eq!(bare, [0]);
    assert_eq!(decode_length(&bare), 0);
    assert_eq!(data_offset(&bare), 1);
}

#[test]
fn header_bytes_convert_both_ways() {
    assert_eq!(Header::from_byte(0x00), Header::Short { len: 0 });
    assert_eq!(Header::from_byte(0x7f), Header::Short { len: 127 });
    assert_eq!(Header::from_byte(0x81), Header::Extended { width: 1 });
    assert_eq!(Header::from_byte(0x88), Header::Extended { width: 8 });
    // Reserved bits are dropped on the way in and never written out.
    assert_eq!(Header::from_byte(0xf2), Header::Extended { width: 2 });
    assert_eq!(Header::Extended { width: 2 }.to_byte(), 0x82);
    assert_eq!(Header::Short { len: 6 }.to_byte(), 0x06);

    assert_eq!(Header::for_len(127), Header::Short { len: 127 });
    assert_eq!(Header::for_len(128), Header::Extended { width: 1 });
    assert_eq!(Header::Short { len: 9 }.data_offset(), 1);
    assert_eq!(Header::Extended { width: 7 }.data_offset(), 8);
}

#[test]
fn checked_required_size_reports_overflow() {
    assert_eq!(checked_required_size(0, Terminator::Nul), Some(2));
    assert_eq!(checked_required_size(128, Terminator::Omit), Some(130));
    assert_eq!(checked_required_size(usize::MAX, Terminator::Omit), None);

    let len = usize::MAX - 64;
    let width = usize::from(minimal_width(len as u64));
    assert_eq!(
        checked_required_size(len, Terminator::Nul),
        Some(len + width + 2)
    );
}
