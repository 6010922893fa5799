//! Borrowed windows and detached spans.
//!
//! A [`ByteView`] is valid only as long as the borrow of its owner; a
//! [`Span`] is a plain position pair that outlives reallocation and is turned
//! back into a view with [`ByteString::resolve`](crate::ByteString::resolve).

use core::fmt;

use bstr::BStr;

use crate::{ByteStr, Result, byte_str::resolve_range};

/// A read-only window into bytes owned by a [`ByteString`](crate::ByteString).
///
/// Views are borrows: the owner cannot be mutated, reallocated or dropped
/// while a view taken from it is alive, so a view never observes a moved
/// allocation.
#[derive(Clone, Copy)]
pub struct ByteView<'a> {
    bytes: &'a [u8],
    origin: usize,
}

impl<'a> ByteView<'a> {
    pub(crate) fn new(bytes: &'a [u8], origin: usize) -> Self {
        Self { bytes, origin }
    }

    /// The viewed bytes, for the full lifetime of the owner borrow.
    #[must_use]
    pub fn bytes(&self) -> &'a [u8] {
        self.bytes
    }

    /// Narrows the view to `[start, end)` of itself, keeping the owner
    /// lifetime.
    ///
    /// # Errors
    ///
    /// Same as [`ByteStr::slice`].
    pub fn subview(&self, start: isize, end: isize) -> Result<ByteView<'a>> {
        let (s, e) = resolve_range(start, end, self.bytes.len())?;
        Ok(ByteView::new(&self.bytes[s..e], self.origin + s))
    }
}

impl ByteStr for ByteView<'_> {
    fn as_bytes(&self) -> &[u8] {
        self.bytes
    }

    fn origin(&self) -> usize {
        self.origin
    }
}

impl AsRef<[u8]> for ByteView<'_> {
    fn as_ref(&self) -> &[u8] {
        self.bytes
    }
}

impl fmt::Debug for ByteView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ByteView")
            .field("bytes", &BStr::new(self.bytes))
            .field("origin", &self.origin)
            .finish()
    }
}

impl fmt::Display for ByteView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(BStr::new(self.bytes), f)
    }
}

impl PartialEq for ByteView<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.bytes == other.bytes
    }
}

impl Eq for ByteView<'_> {}

impl PartialOrd for ByteView<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ByteView<'_> {
    fn cmp(&self, other: &Self) -> core::cmp::Ordering {
        self.bytes.cmp(other.bytes)
    }
}

impl core::hash::Hash for ByteView<'_> {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        self.bytes.hash(state);
    }
}

/// Location of bytes that [`ByteString::slice_owned`](crate::ByteString::slice_owned)
/// moved behind the offset.
///
/// A span carries no borrow; turn it back into a [`ByteView`] with
/// [`ByteString::resolve`](crate::ByteString::resolve) on the same owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    pub(crate) start: usize,
    pub(crate) len: usize,
}

impl Span {
    /// Absolute start position inside the owner's allocation.
    #[must_use]
    pub fn start(&self) -> usize {
        self.start
    }

    /// Number of bytes covered.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// `true` for a span covering nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// One past the last covered position.
    #[must_use]
    pub fn end(&self) -> usize {
        self.start + self.len
    }
}
