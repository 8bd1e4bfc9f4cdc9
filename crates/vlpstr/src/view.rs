use core::{ffi::CStr, fmt};

use bstr::BStr;

use crate::{
    codec::{decode_layout, put_prefix},
    error::Error,
    layout::{Header, Layout, SHORT_MAX, fits_width},
    options::{Terminator, Validation},
};

/// A checked, read-only view of an encoded string.
///
/// The view borrows the whole buffer it was parsed from, so bytes after the
/// payload (a terminator, spare capacity) remain visible to it.
///
/// ```rust
/// use vlpstr::{Terminator, VlpStr, encode};
///
/// let mut buf = [0u8; 16];
/// encode(&mut buf, b"Hello!", Terminator::Nul);
///
/// let s = VlpStr::parse(&buf)?;
/// assert_eq!(s.len(), 6);
/// assert_eq!(s.as_bytes(), b"Hello!");
/// assert_eq!(s.as_cstr()?, c"Hello!");
/// # Ok::<(), vlpstr::Error>(())
/// ```
#[derive(Clone, Copy)]
pub struct VlpStr<'a> {
    buf: &'a [u8],
    layout: Layout,
    len: usize,
}

impl<'a> VlpStr<'a> {
    /// Parses the encoding at the start of `buf` with
    /// [`Validation::Trusting`].
    ///
    /// # Errors
    ///
    /// [`Error::Truncated`] if `buf` ends before the payload does, and
    /// [`Error::LengthOverflow`] if the length exceeds `usize`.
    pub fn parse(buf: &'a [u8]) -> Result<Self, Error> {
        Self::parse_with(buf, Validation::default())
    }

    /// Parses the encoding at the start of `buf`.
    ///
    /// # Errors
    ///
    /// As [`VlpStr::parse`], plus the header checks of
    /// [`Validation::Strict`].
    pub fn parse_with(buf: &'a [u8], validation: Validation) -> Result<Self, Error> {
        let (layout, len) = checked_layout(buf, validation)?;
        Ok(Self { buf, layout, len })
    }

    /// Payload length in bytes.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Whether the payload is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The header byte, interpreted.
    #[must_use]
    pub const fn header(&self) -> Header {
        self.layout.header
    }

    /// The prefix as read, overlong or not.
    #[must_use]
    pub const fn layout(&self) -> Layout {
        self.layout
    }

    /// Offset of the first payload byte.
    #[must_use]
    pub const fn data_offset(&self) -> usize {
        self.layout.data_offset()
    }

    /// Prefix plus payload, excluding any terminator.
    #[must_use]
    pub const fn encoded_len(&self) -> usize {
        self.data_offset() + self.len
    }

    /// The payload bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &'a [u8] {
        &self.buf[self.data_offset()..self.encoded_len()]
    }

    /// The payload as a byte string, for display.
    #[must_use]
    pub fn as_bstr(&self) -> &'a BStr {
        BStr::new(self.as_bytes())
    }

    /// Whether a `0` byte follows the payload.
    #[must_use]
    pub fn is_terminated(&self) -> bool {
        self.buf.get(self.encoded_len()) == Some(&0)
    }

    /// The payload as a C string.
    ///
    /// # Errors
    ///
    /// [`Error::NotTerminated`] without a terminator, and
    /// [`Error::InteriorNul`] if the payload itself contains a zero byte.
    pub fn as_cstr(&self) -> Result<&'a CStr, Error> {
        as_cstr(self.buf, self.data_offset(), self.len)
    }
}

impl fmt::Debug for VlpStr<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VlpStr")
            .field("header", &self.layout.header)
            .field("data", &self.as_bstr())
            .finish()
    }
}

/// A checked, mutable view of an encoded string.
///
/// Besides the payload, the view can rewrite the length in place. Because
/// overlong prefixes are valid, shrinking never moves payload bytes, and
/// growing only requires that the new length still fits the existing
/// prefix and buffer.
///
/// ```rust
/// use vlpstr::{Terminator, VlpStrMut, decode_length, write_prefix_with_width};
///
/// let mut buf = [0u8; 32];
/// // Two length bytes reserved for a 3-byte payload.
/// let offset = write_prefix_with_width(&mut buf, 3, 2)?;
/// buf[offset..offset + 3].copy_from_slice(b"abc");
///
/// let mut s = VlpStrMut::parse(&mut buf)?;
/// s.set_len(20)?;
/// s.as_bytes_mut()[3..].fill(b'x');
/// s.truncate(5, Terminator::Nul);
///
/// assert_eq!(decode_length(&buf), 5);
/// assert_eq!(&buf[offset..offset + 6], b"abcxx\0");
/// # Ok::<(), vlpstr::Error>(())
/// ```
pub struct VlpStrMut<'a> {
    buf: &'a mut [u8],
    layout: Layout,
    len: usize,
}

impl<'a> VlpStrMut<'a> {
    /// Parses the encoding at the start of `buf` with
    /// [`Validation::Trusting`].
    ///
    /// # Errors
    ///
    /// As [`VlpStr::parse`].
    pub fn parse(buf: &'a mut [u8]) -> Result<Self, Error> {
        Self::parse_with(buf, Validation::default())
    }

    /// Parses the encoding at the start of `buf`.
    ///
    /// # Errors
    ///
    /// As [`VlpStr::parse_with`].
    pub fn parse_with(buf: &'a mut [u8], validation: Validation) -> Result<Self, Error> {
        let (layout, len) = checked_layout(buf, validation)?;
        Ok(Self { buf, layout, len })
    }

    /// A read-only view of the same string.
    #[must_use]
    pub fn as_view(&self) -> VlpStr<'_> {
        VlpStr {
            buf: &self.buf[..],
            layout: self.layout,
            len: self.len,
        }
    }

    /// Payload length in bytes.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Whether the payload is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The prefix as currently written.
    #[must_use]
    pub const fn layout(&self) -> Layout {
        self.layout
    }

    /// Offset of the first payload byte.
    #[must_use]
    pub const fn data_offset(&self) -> usize {
        self.layout.data_offset()
    }

    /// Payload bytes the buffer can hold without moving the payload.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buf.len() - self.data_offset()
    }

    /// The payload bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[self.data_offset()..self.data_offset() + self.len]
    }

    /// The payload bytes, mutably.
    #[must_use]
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        let offset = self.data_offset();
        &mut self.buf[offset..offset + self.len]
    }

    /// Rewrites the length in place, leaving payload bytes where they are.
    ///
    /// Bytes newly covered by a longer length keep whatever the buffer held.
    ///
    /// # Errors
    ///
    /// - [`Error::WidthExceeded`] if `len` does not fit the current prefix;
    ///   short form holds at most 127.
    /// - [`Error::BufferTooSmall`] if the payload would run past the buffer.
    #[allow(clippy::cast_possible_truncation)]
    pub fn set_len(&mut self, len: usize) -> Result<(), Error> {
        let wide = len as u64;
        let fits = match self.layout.header {
            Header::Short { .. } => wide <= u64::from(SHORT_MAX),
            Header::Extended { width } => fits_width(wide, width),
        };
        if !fits {
            return Err(Error::WidthExceeded {
                len: wide,
                width: self.layout.width() as u8,
            });
        }
        let needed = self.data_offset().saturating_add(len);
        if needed > self.buf.len() {
            return Err(Error::BufferTooSmall {
                needed,
                available: self.buf.len(),
            });
        }
        self.write_len(len);
        Ok(())
    }

    /// Shortens the string to `len` bytes without moving the payload.
    ///
    /// Does nothing if `len` is not shorter than the current length, except
    /// that a requested terminator is still written when the buffer has room
    /// for it.
    pub fn truncate(&mut self, len: usize, terminator: Terminator) {
        if len < self.len {
            self.write_len(len);
        }
        if !terminator.is_empty() {
            let end = self.data_offset() + self.len;
            if let Some(byte) = self.buf.get_mut(end) {
                *byte = 0;
            }
        }
    }

    /// Whether a `0` byte follows the payload.
    #[must_use]
    pub fn is_terminated(&self) -> bool {
        self.as_view().is_terminated()
    }

    /// The payload as a C string.
    ///
    /// # Errors
    ///
    /// As [`VlpStr::as_cstr`].
    pub fn as_cstr(&self) -> Result<&CStr, Error> {
        as_cstr(&self.buf[..], self.data_offset(), self.len)
    }

    #[allow(clippy::cast_possible_truncation)]
    fn write_len(&mut self, len: usize) {
        let header = match self.layout.header {
            Header::Short { .. } => Header::Short { len: len as u8 },
            extended @ Header::Extended { .. } => extended,
        };
        put_prefix(self.buf, header, len as u64);
        self.layout = Layout {
            header,
            len: len as u64,
        };
        self.len = len;
    }
}

impl fmt::Debug for VlpStrMut<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VlpStrMut")
            .field("header", &self.layout.header)
            .field("data", &BStr::new(self.as_bytes()))
            .finish()
    }
}

fn checked_layout(buf: &[u8], validation: Validation) -> Result<(Layout, usize), Error> {
    let layout = decode_layout(buf, validation)?;
    let len = usize::try_from(layout.len).map_err(|_| Error::LengthOverflow(layout.len))?;
    let needed = layout.data_offset().saturating_add(len);
    if needed > buf.len() {
        return Err(Error::Truncated {
            needed,
            available: buf.len(),
        });
    }
    Ok((layout, len))
}

fn as_cstr(buf: &[u8], offset: usize, len: usize) -> Result<&CStr, Error> {
    match CStr::from_bytes_until_nul(&buf[offset..]) {
        Ok(cstr) if cstr.count_bytes() == len => Ok(cstr),
        Ok(cstr) if cstr.count_bytes() < len => Err(Error::InteriorNul(cstr.count_bytes())),
        _ => Err(Error::NotTerminated),
    }
}
