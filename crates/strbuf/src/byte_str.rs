//! Read-only operations shared by owners and views.
//!
//! Everything in [`ByteStr`] works on the visible window of bytes only, so a
//! [`ByteString`] with an advanced offset and a [`ByteView`] taken from it
//! answer identically for identical content.

use crate::{
    ByteString, ByteView, Result, StringError, compare::compare_bytes, numbers, search::find_naive,
};

/// Resolves a possibly negative `index` counted back from `len`.
///
/// Returns `None` when a negative index reaches before the start. Upper bounds
/// are left to the caller because they differ per operation.
#[inline]
pub(crate) fn normalize(index: isize, len: usize) -> Option<usize> {
    if index >= 0 {
        Some(index.unsigned_abs())
    } else {
        len.checked_sub(index.unsigned_abs())
    }
}

/// Saturating `usize` to `isize` conversion for error context.
#[inline]
pub(crate) fn signed(n: usize) -> isize {
    isize::try_from(n).unwrap_or(isize::MAX)
}

/// Validates a `[start, end)` slice request against `len`.
///
/// A negative `end` counts back from one past the end, so `-1` selects up to
/// and including the last byte.
pub(crate) fn resolve_range(start: isize, end: isize, len: usize) -> Result<(usize, usize)> {
    let invalid = StringError::InvalidRange {
        start,
        end,
        length: len,
    };
    let Ok(s) = usize::try_from(start) else {
        return Err(invalid);
    };
    match normalize(end, len + 1) {
        Some(e) if e <= len && s < e => Ok((s, e)),
        _ => Err(invalid),
    }
}

/// Read-only byte-string surface.
///
/// Implemented by [`ByteString`] and [`ByteView`]. Bring it into scope to
/// inspect either.
pub trait ByteStr {
    /// The visible bytes.
    fn as_bytes(&self) -> &[u8];

    /// Absolute position of the first visible byte inside the allocation it
    /// lives in.
    fn origin(&self) -> usize;

    /// Number of bytes that fit in the visible window without reallocating.
    ///
    /// Views cannot grow, so for them this equals [`ByteStr::len`].
    fn capacity(&self) -> usize {
        self.len()
    }

    /// Number of visible bytes.
    fn len(&self) -> usize {
        self.as_bytes().len()
    }

    /// `true` when no byte is visible.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Byte at `index`; negative indices count back from the end.
    ///
    /// # Errors
    ///
    /// [`StringError::IndexOutOfBounds`] when the resolved index is outside
    /// `[0, len)`.
    fn access(&self, index: isize) -> Result<u8> {
        let bytes = self.as_bytes();
        normalize(index, bytes.len())
            .and_then(|i| bytes.get(i).copied())
            .ok_or(StringError::IndexOutOfBounds {
                index,
                bound: bytes.len(),
            })
    }

    /// Borrows `[start, end)` without copying. A negative `end` counts back
    /// from one past the end (`-1` reaches the last byte).
    ///
    /// # Errors
    ///
    /// [`StringError::InvalidRange`] when `start` is negative, `end` is past
    /// the end, or the range is empty.
    fn slice(&self, start: isize, end: isize) -> Result<ByteView<'_>> {
        let bytes = self.as_bytes();
        let (s, e) = resolve_range(start, end, bytes.len())?;
        Ok(ByteView::new(&bytes[s..e], self.origin() + s))
    }

    /// First position at or after `start` where `key` occurs.
    ///
    /// Negative `start` counts back from the end. An empty key matches at
    /// `start`. Out-of-range starts find nothing.
    fn contains(&self, start: isize, key: impl AsRef<[u8]>) -> Option<usize>
    where
        Self: Sized,
    {
        let bytes = self.as_bytes();
        let start = normalize(start, bytes.len())?;
        find_naive(bytes, start, key.as_ref())
    }

    /// Like [`ByteStr::contains`], reporting a miss as an error.
    ///
    /// # Errors
    ///
    /// [`StringError::KeyNotFound`] when `key` does not occur.
    fn find(&self, start: isize, key: impl AsRef<[u8]>) -> Result<usize>
    where
        Self: Sized,
    {
        self.contains(start, key).ok_or(StringError::KeyNotFound)
    }

    /// Signed byte-wise comparison, see [`compare_bytes`].
    fn compare(&self, other: impl AsRef<[u8]>) -> isize
    where
        Self: Sized,
    {
        compare_bytes(self.as_bytes(), other.as_ref())
    }

    /// Parses the whole content as a signed decimal integer.
    ///
    /// # Errors
    ///
    /// [`StringError::InvalidNumericLiteral`] at the first byte that is not
    /// part of the literal, or at the digit that overflows `i64`.
    fn parse_integer(&self) -> Result<i64> {
        numbers::parse_integer(self.as_bytes())
    }

    /// Parses the whole content as a decimal number with an optional
    /// fraction.
    ///
    /// # Errors
    ///
    /// [`StringError::InvalidNumericLiteral`] at the first byte that is not
    /// part of the literal.
    fn parse_float(&self) -> Result<f64> {
        numbers::parse_float(self.as_bytes())
    }

    /// Copies the visible bytes into a new, mutable owner sized to fit them.
    ///
    /// # Errors
    ///
    /// [`StringError::AllocationFailure`] if the copy cannot be allocated.
    fn to_byte_string(&self) -> Result<ByteString> {
        ByteString::init_from(self.as_bytes())
    }
}
