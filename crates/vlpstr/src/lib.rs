//! Strings with a variable-length size prefix.
//!
//! An encoded string is a header byte, zero to eight little-endian length
//! bytes, the payload and, optionally, a `0` terminator:
//!
//! ```text
//! [ header ][ length bytes ][ payload ][ 0? ]
//! ```
//!
//! Payloads shorter than 128 bytes keep their length in the header, so they
//! cost no more than a C string. Longer payloads set the header's high bit
//! and store the number of length bytes in its low four bits. Prefixes may
//! be overlong, using more length bytes than needed, which lets a string
//! shrink in place without moving its payload.
//!
//! The crate never allocates: every operation reads or writes a buffer the
//! caller owns.
//!
//! ```rust
//! use vlpstr::{Terminator, data_offset, decode_length, encode, required_size};
//!
//! let text = b"According to all known laws of aviation";
//! let mut buf = [0u8; 64];
//! assert!(buf.len() >= required_size(text.len(), Terminator::Nul));
//!
//! let written = encode(&mut buf, text, Terminator::Nul);
//! assert_eq!(written, text.len() + 2);
//!
//! let offset = data_offset(&buf);
//! let len = decode_length(&buf) as usize;
//! assert_eq!(&buf[offset..offset + len], text);
//! ```

#![no_std]
#![forbid(unsafe_code)]

#[cfg(test)]
extern crate std;

mod codec;
mod error;
mod layout;
mod options;
mod view;

#[cfg(test)]
mod tests;

pub use codec::{
    data_offset, decode_layout, decode_length, encode, import_cstr, payload, payload_mut,
    try_data_offset, try_decode_length, try_encode, try_import_cstr, try_write_prefix,
    write_prefix, write_prefix_with_width,
};
pub use error::Error;
pub use layout::{
    Header, Layout, MAX_WIDTH, SHORT_MAX, checked_required_size, fits_width, minimal_width,
    required_size,
};
pub use options::{Terminator, Validation};
pub use view::{VlpStr, VlpStrMut};
