//! Header byte and prefix layout.
//!
//! ```text
//! short:     [ 0lllllll ][ payload .. ][ 0? ]
//! extended:  [ 1rrrkkkk ][ k length bytes, LE ][ payload .. ][ 0? ]
//! ```
//!
//! `l` is the payload length (0..=127), `k` the number of length bytes and
//! `r` reserved bits, written as zero.

use crate::options::Terminator;

/// Largest length stored directly in a short-form header.
pub const SHORT_MAX: u8 = 0x7f;

/// Most length bytes an extended-form header can declare meaningfully.
pub const MAX_WIDTH: u8 = 8;

pub(crate) const EXTENDED_FLAG: u8 = 0x80;
pub(crate) const RESERVED_MASK: u8 = 0x70;
pub(crate) const WIDTH_MASK: u8 = 0x0f;

/// The first byte of every encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Header {
    /// Length is held in the header itself.
    Short {
        /// Payload length, at most [`SHORT_MAX`].
        len: u8,
    },
    /// Length follows in `width` little-endian bytes.
    Extended {
        /// Number of length bytes, the low four bits of the header.
        width: u8,
    },
}

impl Header {
    /// Interprets a raw header byte. Reserved bits are dropped; use
    /// [`Validation::Strict`](crate::Validation::Strict) to reject them.
    #[must_use]
    pub const fn from_byte(byte: u8) -> Self {
        if byte & EXTENDED_FLAG == 0 {
            Self::Short { len: byte }
        } else {
            Self::Extended {
                width: byte & WIDTH_MASK,
            }
        }
    }

    /// The raw header byte, with reserved bits clear.
    #[must_use]
    pub const fn to_byte(self) -> u8 {
        match self {
            Self::Short { len } => len & SHORT_MAX,
            Self::Extended { width } => EXTENDED_FLAG | (width & WIDTH_MASK),
        }
    }

    /// The header a minimal encoding of `len` starts with.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn for_len(len: u64) -> Self {
        if len <= SHORT_MAX as u64 {
            Self::Short { len: len as u8 }
        } else {
            Self::Extended {
                width: minimal_width(len),
            }
        }
    }

    /// Number of length bytes after the header.
    #[must_use]
    pub const fn width(self) -> usize {
        match self {
            Self::Short { .. } => 0,
            Self::Extended { width } => width as usize,
        }
    }

    /// Offset of the first payload byte.
    #[must_use]
    pub const fn data_offset(self) -> usize {
        1 + self.width()
    }

    /// Whether the length is held in the header itself.
    #[must_use]
    pub const fn is_short(self) -> bool {
        matches!(self, Self::Short { .. })
    }
}

/// Length bytes needed by the minimal encoding of `len`; 0 for short form.
///
/// ```rust
/// use vlpstr::minimal_width;
///
/// assert_eq!(minimal_width(127), 0);
/// assert_eq!(minimal_width(128), 1);
/// assert_eq!(minimal_width(256), 2);
/// assert_eq!(minimal_width(u64::MAX), 8);
/// ```
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub const fn minimal_width(len: u64) -> u8 {
    if len <= SHORT_MAX as u64 {
        return 0;
    }
    let bits = u64::BITS - len.leading_zeros();
    bits.div_ceil(8) as u8
}

/// Whether `len` can be stored in `width` length bytes.
///
/// Widths of eight or more hold any `u64`.
#[must_use]
pub const fn fits_width(len: u64, width: u8) -> bool {
    width >= MAX_WIDTH || len >> (8 * width as u32) == 0
}

/// A decoded or planned prefix: header plus the length it carries.
///
/// [`Layout::for_len`] plans the minimal encoding; [`decode_layout`] reads
/// whatever a buffer holds, overlong prefixes included.
///
/// [`decode_layout`]: crate::decode_layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Layout {
    /// The header byte, interpreted.
    pub header: Header,
    /// Payload length in bytes.
    pub len: u64,
}

impl Layout {
    /// The minimal layout for a payload of `len` bytes.
    #[must_use]
    pub const fn for_len(len: u64) -> Self {
        Self {
            header: Header::for_len(len),
            len,
        }
    }

    /// Number of length bytes after the header.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.header.width()
    }

    /// Offset of the first payload byte, which is also the prefix size.
    #[must_use]
    pub const fn data_offset(&self) -> usize {
        self.header.data_offset()
    }

    /// Whether this prefix uses more length bytes than `len` needs.
    #[must_use]
    pub const fn is_overlong(&self) -> bool {
        match self.header {
            Header::Short { .. } => false,
            Header::Extended { width } => width > minimal_width(self.len),
        }
    }

    /// Total bytes for prefix, payload and terminator, or `None` if that
    /// exceeds `usize`.
    #[must_use]
    pub const fn encoded_size(&self, terminator: Terminator) -> Option<usize> {
        if self.len > usize::MAX as u64 {
            return None;
        }
        #[allow(clippy::cast_possible_truncation)]
        let len = self.len as usize;
        match len.checked_add(self.data_offset()) {
            Some(size) => size.checked_add(terminator.len()),
            None => None,
        }
    }
}

/// Bytes a buffer needs for the minimal encoding of a `len`-byte payload.
///
/// # Panics
///
/// Overflows for lengths within a few bytes of `usize::MAX`; see
/// [`checked_required_size`].
///
/// ```rust
/// use vlpstr::{Terminator, required_size};
///
/// assert_eq!(required_size(0, Terminator::Nul), 2);
/// assert_eq!(required_size(127, Terminator::Nul), 129);
/// assert_eq!(required_size(128, Terminator::Nul), 131);
/// assert_eq!(required_size(128, Terminator::Omit), 130);
/// ```
#[must_use]
pub const fn required_size(len: usize, terminator: Terminator) -> usize {
    1 + minimal_width(len as u64) as usize + len + terminator.len()
}

/// [`required_size`], returning `None` instead of overflowing.
#[must_use]
pub const fn checked_required_size(len: usize, terminator: Terminator) -> Option<usize> {
    Layout::for_len(len as u64).encoded_size(terminator)
}
