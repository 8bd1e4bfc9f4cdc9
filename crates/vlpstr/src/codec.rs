//! Encoding and decoding over caller-owned buffers.
//!
//! The plain functions trust their input: a destination that is too small,
//! or a source that ends early, panics on slice indexing. The `try_*`
//! variants check first and report [`Error`] without touching the buffer.

use core::ffi::CStr;

use crate::{
    error::Error,
    layout::{Header, Layout, MAX_WIDTH, RESERVED_MASK, checked_required_size, fits_width},
    options::{Terminator, Validation},
};

/// Writes the minimal header and length bytes for `len`, returning the
/// offset at which the payload belongs.
///
/// # Panics
///
/// Panics if `buf` is shorter than the prefix.
pub fn write_prefix(buf: &mut [u8], len: u64) -> usize {
    put_prefix(buf, Header::for_len(len), len)
}

/// [`write_prefix`] with a capacity check.
///
/// # Errors
///
/// [`Error::BufferTooSmall`] if `buf` cannot hold the prefix.
pub fn try_write_prefix(buf: &mut [u8], len: u64) -> Result<usize, Error> {
    let header = Header::for_len(len);
    ensure_capacity(buf, header.data_offset())?;
    Ok(put_prefix(buf, header, len))
}

/// Writes an extended-form prefix with exactly `width` length bytes, which
/// may be more than `len` needs.
///
/// Reserving width up front lets the string later shrink, or grow within
/// its buffer, by rewriting the prefix alone.
///
/// # Errors
///
/// - [`Error::InvalidWidth`] unless `1 <= width <= 8`.
/// - [`Error::WidthExceeded`] if `len` needs more than `width` bytes.
/// - [`Error::BufferTooSmall`] if `buf` cannot hold the prefix.
pub fn write_prefix_with_width(buf: &mut [u8], len: u64, width: u8) -> Result<usize, Error> {
    if width == 0 || width > MAX_WIDTH {
        return Err(Error::InvalidWidth(width));
    }
    if !fits_width(len, width) {
        return Err(Error::WidthExceeded { len, width });
    }
    let header = Header::Extended { width };
    ensure_capacity(buf, header.data_offset())?;
    Ok(put_prefix(buf, header, len))
}

/// Writes the minimal encoding of `payload` into `buf` and returns the
/// number of bytes written, terminator included.
///
/// `buf` must provide [`required_size`]`(payload.len(), terminator)` bytes.
///
/// # Panics
///
/// Panics if `buf` is too small. Bytes before the failing index may already
/// have been written.
///
/// [`required_size`]: crate::required_size
pub fn encode(buf: &mut [u8], payload: &[u8], terminator: Terminator) -> usize {
    let offset = write_prefix(buf, payload.len() as u64);
    let end = offset + payload.len();
    buf[offset..end].copy_from_slice(payload);
    if terminator.is_empty() {
        end
    } else {
        buf[end] = 0;
        end + 1
    }
}

/// [`encode`] with a capacity check; nothing is written on failure.
///
/// # Errors
///
/// [`Error::BufferTooSmall`] if `buf` cannot hold the encoding.
pub fn try_encode(buf: &mut [u8], payload: &[u8], terminator: Terminator) -> Result<usize, Error> {
    let needed = checked_required_size(payload.len(), terminator).unwrap_or(usize::MAX);
    ensure_capacity(buf, needed)?;
    Ok(encode(buf, payload, terminator))
}

/// Copies a C string into `buf`, terminator included.
///
/// # Panics
///
/// Panics if `buf` is smaller than
/// [`required_size`](crate::required_size)`(src.count_bytes(), Terminator::Nul)`.
pub fn import_cstr(buf: &mut [u8], src: &CStr) -> usize {
    encode(buf, src.to_bytes(), Terminator::Nul)
}

/// [`import_cstr`] with a capacity check.
///
/// # Errors
///
/// [`Error::BufferTooSmall`] if `buf` cannot hold the encoding.
pub fn try_import_cstr(buf: &mut [u8], src: &CStr) -> Result<usize, Error> {
    try_encode(buf, src.to_bytes(), Terminator::Nul)
}

/// Reads the payload length, honoring overlong prefixes.
///
/// # Panics
///
/// Panics if `buf` ends before the declared length bytes.
#[must_use]
pub fn decode_length(buf: &[u8]) -> u64 {
    let header = Header::from_byte(buf[0]);
    read_len(header, &buf[1..header.data_offset()])
}

/// Offset of the first payload byte: 1, or 1 plus the declared width.
///
/// # Panics
///
/// Panics if `buf` is empty.
#[must_use]
pub fn data_offset(buf: &[u8]) -> usize {
    Header::from_byte(buf[0]).data_offset()
}

/// The payload of the encoding at the start of `buf`.
///
/// # Panics
///
/// Panics if `buf` ends before the declared payload does.
#[must_use]
pub fn payload(buf: &[u8]) -> &[u8] {
    let offset = data_offset(buf);
    let len = usize::try_from(decode_length(buf)).unwrap_or(usize::MAX);
    &buf[offset..offset.saturating_add(len)]
}

/// Mutable access to the payload of the encoding at the start of `buf`.
///
/// # Panics
///
/// Panics if `buf` ends before the declared payload does.
#[must_use]
pub fn payload_mut(buf: &mut [u8]) -> &mut [u8] {
    let offset = data_offset(buf);
    let len = usize::try_from(decode_length(buf)).unwrap_or(usize::MAX);
    &mut buf[offset..offset.saturating_add(len)]
}

/// Reads and checks the prefix at the start of `buf`.
///
/// Only the prefix has to be present; the payload is not checked against
/// the end of `buf`.
///
/// # Errors
///
/// - [`Error::Truncated`] if `buf` ends inside the prefix.
/// - [`Error::ReservedBits`] and [`Error::InvalidWidth`] under
///   [`Validation::Strict`].
pub fn decode_layout(buf: &[u8], validation: Validation) -> Result<Layout, Error> {
    let Some(&byte) = buf.first() else {
        return Err(Error::Truncated {
            needed: 1,
            available: 0,
        });
    };
    let header = Header::from_byte(byte);
    if let (Header::Extended { width }, Validation::Strict) = (header, validation) {
        if byte & RESERVED_MASK != 0 {
            return Err(Error::ReservedBits(byte));
        }
        if width == 0 || width > MAX_WIDTH {
            return Err(Error::InvalidWidth(width));
        }
    }
    let offset = header.data_offset();
    let Some(len_bytes) = buf.get(1..offset) else {
        return Err(Error::Truncated {
            needed: offset,
            available: buf.len(),
        });
    };
    Ok(Layout {
        header,
        len: read_len(header, len_bytes),
    })
}

/// [`decode_length`] with bounds and header checks.
///
/// # Errors
///
/// As [`decode_layout`].
pub fn try_decode_length(buf: &[u8], validation: Validation) -> Result<u64, Error> {
    decode_layout(buf, validation).map(|layout| layout.len)
}

/// [`data_offset`] with bounds and header checks.
///
/// # Errors
///
/// As [`decode_layout`].
pub fn try_data_offset(buf: &[u8], validation: Validation) -> Result<usize, Error> {
    decode_layout(buf, validation).map(|layout| layout.data_offset())
}

pub(crate) fn put_prefix(buf: &mut [u8], header: Header, len: u64) -> usize {
    debug_assert!(
        header.is_short() || fits_width(len, header.width() as u8),
        "length {len} does not fit {header:?}"
    );
    buf[0] = header.to_byte();
    let width = header.width();
    let stored = width.min(MAX_WIDTH as usize);
    buf[1..=stored].copy_from_slice(&len.to_le_bytes()[..stored]);
    1 + width
}

fn read_len(header: Header, len_bytes: &[u8]) -> u64 {
    match header {
        Header::Short { len } => u64::from(len),
        Header::Extended { .. } => {
            // Bytes past the eighth cannot be represented and are skipped.
            let mut raw = [0u8; MAX_WIDTH as usize];
            let stored = len_bytes.len().min(raw.len());
            raw[..stored].copy_from_slice(&len_bytes[..stored]);
            u64::from_le_bytes(raw)
        }
    }
}

fn ensure_capacity(buf: &[u8], needed: usize) -> Result<(), Error> {
    if buf.len() < needed {
        return Err(Error::BufferTooSmall {
            needed,
            available: buf.len(),
        });
    }
    Ok(())
}
