use thiserror::Error;

/// Failures reported by the checked (`try_*`) operations and by the views.
///
/// The unchecked operations never return these: they trust the buffer and
/// panic on out-of-bounds access, like slice indexing does.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The destination cannot hold the encoding.
    #[error("buffer too small: need {needed} bytes, have {available}")]
    BufferTooSmall {
        /// Bytes the operation would write.
        needed: usize,
        /// Bytes the destination provides.
        available: usize,
    },
    /// The source ends before the prefix or payload it declares.
    #[error("encoding truncated: need {needed} bytes, have {available}")]
    Truncated {
        /// Bytes the encoding declares.
        needed: usize,
        /// Bytes the source provides.
        available: usize,
    },
    /// An extended-form header has bits 4-6 set.
    #[error("reserved header bits set in {0:#04x}")]
    ReservedBits(u8),
    /// An extended-form header declares zero or more than eight length bytes.
    #[error("invalid length width {0}")]
    InvalidWidth(u8),
    /// A length does not fit the width available for it.
    #[error("length {len} does not fit in {width} length bytes")]
    WidthExceeded {
        /// The length that was to be stored.
        len: u64,
        /// Length bytes available; zero means the short-form header.
        width: u8,
    },
    /// A decoded length is larger than the address space.
    #[error("length {0} exceeds usize")]
    LengthOverflow(u64),
    /// No terminator byte follows the payload.
    #[error("payload is not followed by a terminator")]
    NotTerminated,
    /// The payload holds a zero byte at the given offset.
    #[error("payload contains a nul byte at {0}")]
    InteriorNul(usize),
}
