/// How much a decoder trusts the header byte it reads.
///
/// Extended-form headers carry three reserved bits and a four-bit width
/// field that only has meaning for the values 1 through 8. Writers in this
/// crate never produce anything else, so by default decoders take the
/// header at face value.
///
/// # Examples
///
/// ```rust
/// use vlpstr::{Error, Validation, VlpStr};
///
/// // Reserved bit 4 set, one length byte, length 3.
/// let buf = [0x91, 3, b'a', b'b', b'c'];
///
/// assert_eq!(VlpStr::parse(&buf).unwrap().as_bytes(), b"abc");
/// assert_eq!(
///     VlpStr::parse_with(&buf, Validation::Strict).unwrap_err(),
///     Error::ReservedBits(0x91)
/// );
/// ```
///
/// # Default
///
/// [`Validation::Trusting`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Validation {
    /// Ignore reserved bits and read whatever width the header declares.
    ///
    /// A width of 0 decodes as an empty string starting right after the
    /// header. Widths above 8 move the payload start accordingly, but only
    /// the first eight length bytes contribute to the length.
    #[default]
    Trusting,
    /// Reject reserved bits with [`Error::ReservedBits`] and widths outside
    /// `1..=8` with [`Error::InvalidWidth`].
    ///
    /// [`Error::ReservedBits`]: crate::Error::ReservedBits
    /// [`Error::InvalidWidth`]: crate::Error::InvalidWidth
    Strict,
}

impl Validation {
    /// Whether malformed headers are rejected.
    #[must_use]
    pub const fn is_strict(self) -> bool {
        matches!(self, Self::Strict)
    }
}

/// Whether a `0` byte is written, or budgeted for, after the payload.
///
/// The terminator is never counted in the encoded length. Keeping it lets
/// the payload be handed to anything expecting a C string.
///
/// # Default
///
/// [`Terminator::Nul`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Terminator {
    /// Payload is followed by a `0` byte.
    #[default]
    Nul,
    /// Payload is the last byte of the encoding.
    Omit,
}

impl Terminator {
    /// Bytes the terminator occupies: 1 or 0.
    #[must_use]
    pub const fn len(self) -> usize {
        match self {
            Self::Nul => 1,
            Self::Omit => 0,
        }
    }

    /// Whether no terminator is written.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        matches!(self, Self::Omit)
    }
}

impl From<bool> for Terminator {
    fn from(with_terminator: bool) -> Self {
        if with_terminator { Self::Nul } else { Self::Omit }
    }
}
