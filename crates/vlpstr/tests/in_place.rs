#![allow(missing_docs)]

use vlpstr::{
    Error, Layout, Terminator, Validation, VlpStr, VlpStrMut, data_offset, decode_length,
    write_prefix_with_width,
};

const LINE: &[u8] = b"According to all known laws of aviation, there is no way a bee should be \
able to fly. Its wings are too small to get its fat little body off the ground. The bee, of \
course, flies anyway because bees don't care what humans think is impossible.";

/// Lays out `LINE` behind a prefix of the given width, followed by a terminator.
fn reserved(width: u8, capacity: usize) -> Vec<u8> {
    let mut buf = vec![0u8; capacity];
    let offset = write_prefix_with_width(&mut buf, LINE.len() as u64, width).unwrap();
    buf[offset..offset + LINE.len()].copy_from_slice(LINE);
    buf[offset + LINE.len()] = 0;
    buf
}

#[test]
fn repeated_truncation_never_moves_the_payload() {
    let mut buf = reserved(8, 256);
    let offset = data_offset(&buf);
    assert_eq!(offset, 9);

    for len in (0..LINE.len()).rev().step_by(17) {
        let mut s = VlpStrMut::parse_with(&mut buf, Validation::Strict).unwrap();
        s.truncate(len, Terminator::Nul);
        assert_eq!(s.as_cstr().unwrap().to_bytes(), &LINE[..len]);

        assert_eq!(decode_length(&buf), len as u64);
        assert_eq!(data_offset(&buf), offset);
        assert!(VlpStr::parse(&buf).unwrap().layout().is_overlong());
    }
}

#[test]
fn growing_back_restores_bytes_left_behind() {
    let mut buf = reserved(2, 256);

    let mut s = VlpStrMut::parse(&mut buf).unwrap();
    s.truncate(20, Terminator::Omit);
    assert_eq!(s.as_bytes(), &LINE[..20]);
    s.set_len(LINE.len()).unwrap();
    assert_eq!(s.as_bytes(), LINE);
    assert!(s.is_terminated());
}

#[test]
fn one_byte_width_stops_at_255() {
    let mut buf = vec![0u8; 512];
    write_prefix_with_width(&mut buf, 200, 1).unwrap();

    let mut s = VlpStrMut::parse(&mut buf).unwrap();
    assert_eq!(s.set_len(255), Ok(()));
    assert_eq!(
        s.set_len(256),
        Err(Error::WidthExceeded { len: 256, width: 1 })
    );
    assert_eq!(s.layout(), Layout::for_len(255));
}
