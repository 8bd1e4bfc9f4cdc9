#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use vlpstr::{
    Error, Terminator, Validation, VlpStr, VlpStrMut, data_offset, decode_layout, decode_length,
    minimal_width, required_size, try_encode, write_prefix_with_width,
};

#[derive(Debug, Arbitrary)]
enum Input {
    /// Encode a payload, optionally behind an overlong prefix, and read it back.
    Roundtrip {
        payload: Vec<u8>,
        terminated: bool,
        extra_width: u8,
        cut: usize,
    },
    /// Decode arbitrary bytes; checked decoding must never panic.
    Decode { bytes: Vec<u8>, strict: bool },
}

fn roundtrip(payload: &[u8], terminated: bool, extra_width: u8, cut: usize) {
    let terminator = Terminator::from(terminated);
    let size = required_size(payload.len(), terminator);
    let mut buf = vec![0u8; size + 8];

    assert_eq!(
        try_encode(&mut buf[..size - 1], payload, terminator),
        Err(Error::BufferTooSmall {
            needed: size,
            available: size - 1
        })
    );
    assert_eq!(try_encode(&mut buf, payload, terminator), Ok(size));
    assert_eq!(decode_length(&buf), payload.len() as u64);
    assert_eq!(&buf[data_offset(&buf)..][..payload.len()], payload);

    // Re-lay the same payload behind a wider prefix.
    let minimal = minimal_width(payload.len() as u64).max(1);
    let width = (minimal + extra_width % 8).min(8);
    let offset = write_prefix_with_width(&mut buf, payload.len() as u64, width)
        .expect("width holds the payload length");
    buf[offset..offset + payload.len()].copy_from_slice(payload);

    let mut view = VlpStrMut::parse_with(&mut buf, Validation::Strict).expect("valid prefix");
    assert_eq!(view.as_bytes(), payload);

    let cut = if payload.is_empty() { 0 } else { cut % payload.len() };
    view.truncate(cut, Terminator::Nul);
    assert_eq!(view.as_bytes(), &payload[..cut]);
    assert_eq!(view.data_offset(), offset);
}

fn decode(bytes: &[u8], strict: bool) {
    let validation = if strict {
        Validation::Strict
    } else {
        Validation::Trusting
    };
    if let Ok(layout) = decode_layout(bytes, validation) {
        assert!(layout.data_offset() <= bytes.len());
        assert_eq!(layout.len, decode_length(bytes));
    }
    if let Ok(view) = VlpStr::parse_with(bytes, validation) {
        assert!(view.encoded_len() <= bytes.len());
        let _ = view.as_cstr();
    }
}

fuzz_target!(|input: Input| {
    match input {
        Input::Roundtrip {
            payload,
            terminated,
            extra_width,
            cut,
        } => roundtrip(&payload, terminated, extra_width, cut),
        Input::Decode { bytes, strict } => decode(&bytes, strict),
    }
});
