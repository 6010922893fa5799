//! The owning byte string.
//!
//! Layout of the single allocation behind a [`ByteString`]:
//!
//! ```text
//! storage: [ consumed (offset) | visible (len) | spare            ]
//!          ^                   ^               ^                  ^
//!          0                   offset          offset + len       storage.len()
//! ```
//!
//! - `storage.len()` is the allocated capacity of the whole allocation. Every
//!   slot is initialised, so writes between `len` and the capacity are safe.
//! - The visible window starts at `offset`. Advancing the offset hides bytes
//!   from the front without moving them; `rewind` shows them again.
//! - Growth is computed over the whole allocation, so the offset survives a
//!   reallocation unchanged.

use alloc::vec::Vec;
use core::{cmp::Ordering, fmt};

use bstr::BStr;

use crate::{
    BufferOptions, ByteStr, ByteView, Result, Span, StringError,
    byte_str::{normalize, resolve_range, signed},
};

/// Capacity sentinel for [`ByteString::declare`]: start small and grow on
/// demand.
pub const SCALABLE: isize = 0;

/// Byte that truncates the logical length when written with
/// [`ByteString::modify`].
pub const TERMINATOR: u8 = 0;

/// A growable, explicitly-owned byte string.
///
/// # Examples
///
/// ```rust
/// use strbuf::{ByteStr, ByteString};
///
/// let mut s = ByteString::init_from("roses are rose").unwrap();
/// s.replace_all("rose", "orange").unwrap();
/// assert_eq!(s, "oranges are orange");
/// ```
pub struct ByteString {
    storage: Vec<u8>,
    offset: usize,
    len: usize,
    mutable: bool,
    options: BufferOptions,
}

fn allocate(capacity: usize) -> Result<Vec<u8>> {
    let mut storage = Vec::new();
    storage
        .try_reserve_exact(capacity)
        .map_err(|_| StringError::AllocationFailure {
            requested: capacity,
        })?;
    storage.resize(capacity, 0);
    Ok(storage)
}

impl ByteString {
    /// An empty byte string that has not allocated yet.
    #[must_use]
    pub fn new() -> Self {
        Self::from_parts(Vec::new(), 0, BufferOptions::default())
    }

    fn from_parts(storage: Vec<u8>, len: usize, options: BufferOptions) -> Self {
        Self {
            storage,
            offset: 0,
            len,
            mutable: true,
            options,
        }
    }

    pub(crate) fn with_exact_capacity(capacity: usize, options: BufferOptions) -> Result<Self> {
        Ok(Self::from_parts(allocate(capacity)?, 0, options))
    }

    /// Allocates an empty byte string holding `capacity` bytes.
    ///
    /// [`SCALABLE`] requests the minimal growable start configured in
    /// [`BufferOptions::scalable_capacity`].
    ///
    /// # Errors
    ///
    /// - [`StringError::InvalidSize`] for a negative capacity.
    /// - [`StringError::AllocationFailure`] if the allocator refuses.
    pub fn declare(capacity: isize) -> Result<Self> {
        Self::declare_with(capacity, BufferOptions::default())
    }

    /// [`ByteString::declare`] with an explicit growth policy.
    ///
    /// # Errors
    ///
    /// See [`ByteString::declare`].
    pub fn declare_with(capacity: isize, options: BufferOptions) -> Result<Self> {
        let capacity = match usize::try_from(capacity) {
            Ok(0) => options.scalable_capacity,
            Ok(n) => n,
            Err(_) => return Err(StringError::InvalidSize {
                requested: capacity,
            }),
        };
        log::trace!("declaring byte string with capacity {capacity}");
        Self::with_exact_capacity(capacity, options)
    }

    /// Copies `bytes` into a byte string whose capacity equals their length.
    ///
    /// # Errors
    ///
    /// [`StringError::AllocationFailure`] if the allocator refuses.
    pub fn init_from(bytes: impl AsRef<[u8]>) -> Result<Self> {
        let bytes = bytes.as_ref();
        let mut storage = allocate(bytes.len())?;
        storage.copy_from_slice(bytes);
        Ok(Self::from_parts(storage, bytes.len(), BufferOptions::default()))
    }

    /// Joins `a` and `b` into a new byte string with capacity
    /// `a.capacity() + b.capacity()`. Neither input is touched.
    ///
    /// # Errors
    ///
    /// [`StringError::AllocationFailure`] if the allocator refuses.
    pub fn join(a: &impl ByteStr, b: &impl ByteStr) -> Result<Self> {
        let (a, b, capacity) = (a.as_bytes(), b.as_bytes(), a.capacity() + b.capacity());
        let mut joined = Self::with_exact_capacity(capacity, BufferOptions::default())?;
        joined.storage[..a.len()].copy_from_slice(a);
        joined.storage[a.len()..a.len() + b.len()].copy_from_slice(b);
        joined.len = a.len() + b.len();
        Ok(joined)
    }

    /// A mutable copy with the same capacity and growth policy.
    ///
    /// # Errors
    ///
    /// [`StringError::AllocationFailure`] if the allocator refuses.
    pub fn dup(&self) -> Result<Self> {
        let mut dup = Self::with_exact_capacity(self.capacity(), self.options)?;
        dup.storage[..self.len].copy_from_slice(self.as_bytes());
        dup.len = self.len;
        Ok(dup)
    }

    /// Releases the allocation. Consuming `self` makes a second release, or
    /// any use afterwards, a compile error.
    pub fn release(self) {
        log::trace!("releasing byte string of {} bytes", self.storage.len());
        drop(self);
    }

    /// The growth policy this byte string was declared with.
    #[must_use]
    pub fn options(&self) -> BufferOptions {
        self.options
    }

    /// Number of bytes hidden in front of the visible window.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Whether mutating operations are permitted.
    #[must_use]
    pub fn is_mutable(&self) -> bool {
        self.mutable
    }

    /// Forbids every further mutation. Offset moves stay available since
    /// they do not touch the bytes.
    pub fn freeze(&mut self) {
        self.mutable = false;
    }

    pub(crate) fn check_mutable(&self) -> Result<()> {
        if self.mutable {
            Ok(())
        } else {
            log::debug!("rejected mutation of a frozen byte string");
            Err(StringError::IllegalMutation)
        }
    }

    /// Makes room for a visible window of `required` bytes.
    ///
    /// Growth is applied to the whole allocation, offset prefix included, and
    /// the window is left where it was.
    pub(crate) fn ensure_capacity(&mut self, required: usize) -> Result<()> {
        if required <= self.capacity() {
            return Ok(());
        }
        let total = self
            .offset
            .checked_add(required)
            .ok_or(StringError::AllocationFailure {
                requested: usize::MAX,
            })?;
        let grown = self.options.grown_capacity(self.storage.len(), total);
        log::trace!(
            "growing byte string from {} to {grown} bytes (offset {})",
            self.storage.len(),
            self.offset
        );
        self.storage
            .try_reserve_exact(grown - self.storage.len())
            .map_err(|_| StringError::AllocationFailure { requested: grown })?;
        self.storage.resize(grown, 0);
        Ok(())
    }

    pub(crate) fn window_mut(&mut self) -> &mut [u8] {
        &mut self.storage[self.offset..self.offset + self.len]
    }

    pub(crate) fn set_len(&mut self, len: usize) {
        debug_assert!(len <= self.capacity());
        self.len = len;
    }

    /// The visible bytes, writable in place.
    ///
    /// # Errors
    ///
    /// [`StringError::IllegalMutation`] on a frozen byte string.
    pub fn as_bytes_mut(&mut self) -> Result<&mut [u8]> {
        self.check_mutable()?;
        Ok(self.window_mut())
    }

    /// Overwrites the byte at `index`; negative indices count back from the
    /// end.
    ///
    /// The index may point past the logical length as long as it is inside
    /// the capacity; the length then extends to `index + 1`. Writing
    /// [`TERMINATOR`] truncates the length to `index` instead.
    ///
    /// # Errors
    ///
    /// - [`StringError::IllegalMutation`] on a frozen byte string.
    /// - [`StringError::IndexOutOfBounds`] outside `[0, capacity)`.
    pub fn modify(&mut self, index: isize, value: u8) -> Result<()> {
        self.check_mutable()?;
        let capacity = self.capacity();
        let i = normalize(index, self.len)
            .filter(|&i| i < capacity)
            .ok_or(StringError::IndexOutOfBounds {
                index,
                bound: capacity,
            })?;
        self.storage[self.offset + i] = value;
        if value == TERMINATOR {
            self.len = self.len.min(i);
        } else if i >= self.len {
            self.len = i + 1;
        }
        Ok(())
    }

    /// Inserts `value` before `position`, shifting the tail right.
    ///
    /// Negative positions count back from one past the end, so `-1` appends.
    /// A full byte string grows by its growth factor first.
    ///
    /// # Errors
    ///
    /// - [`StringError::IllegalMutation`] on a frozen byte string.
    /// - [`StringError::IndexOutOfBounds`] outside `[0, len]`.
    /// - [`StringError::AllocationFailure`] if growing fails.
    pub fn insert(&mut self, position: isize, value: u8) -> Result<()> {
        self.check_mutable()?;
        let len = self.len;
        let i = normalize(position, len + 1)
            .filter(|&i| i <= len)
            .ok_or(StringError::IndexOutOfBounds {
                index: position,
                bound: len,
            })?;
        self.ensure_capacity(len + 1)?;
        let at = self.offset + i;
        self.storage.copy_within(at..self.offset + len, at + 1);
        self.storage[at] = value;
        self.len += 1;
        Ok(())
    }

    /// Appends one byte.
    ///
    /// # Errors
    ///
    /// See [`ByteString::insert`].
    pub fn push(&mut self, value: u8) -> Result<()> {
        self.insert(-1, value)
    }

    /// Removes and returns the byte at `position`, shifting the tail left.
    ///
    /// # Errors
    ///
    /// - [`StringError::IllegalMutation`] on a frozen byte string.
    /// - [`StringError::EmptyBuffer`] when there is nothing to remove.
    /// - [`StringError::IndexOutOfBounds`] outside `[0, len)`.
    pub fn remove(&mut self, position: isize) -> Result<u8> {
        self.check_mutable()?;
        if self.len == 0 {
            return Err(StringError::EmptyBuffer);
        }
        let len = self.len;
        let i = normalize(position, len)
            .filter(|&i| i < len)
            .ok_or(StringError::IndexOutOfBounds {
                index: position,
                bound: len,
            })?;
        let at = self.offset + i;
        let removed = self.storage[at];
        self.storage.copy_within(at + 1..self.offset + len, at);
        self.len -= 1;
        Ok(removed)
    }

    /// Shortens the visible content to `len` bytes. Longer lengths are
    /// ignored.
    ///
    /// # Errors
    ///
    /// [`StringError::IllegalMutation`] on a frozen byte string.
    pub fn truncate(&mut self, len: usize) -> Result<()> {
        self.check_mutable()?;
        self.len = self.len.min(len);
        Ok(())
    }

    /// Drops the visible content, keeping the allocation.
    ///
    /// # Errors
    ///
    /// [`StringError::IllegalMutation`] on a frozen byte string.
    pub fn clear(&mut self) -> Result<()> {
        self.truncate(0)
    }

    /// Moves `[start, end)` to the front of the visible window and hides it
    /// behind the offset.
    ///
    /// Afterwards the byte string reads as if the range had been cut out, and
    /// the returned [`Span`] addresses the moved bytes. Nothing is allocated,
    /// which lets a parser consume one allocation from the front piece by
    /// piece.
    ///
    /// ```rust
    /// use strbuf::{ByteStr, ByteString};
    ///
    /// let mut s = ByteString::init_from("key=value").unwrap();
    /// let key = s.slice_owned(0, 3).unwrap();
    /// assert_eq!(s, "=value");
    /// assert_eq!(s.resolve(key).unwrap(), "key");
    /// ```
    ///
    /// # Errors
    ///
    /// - [`StringError::IllegalMutation`] on a frozen byte string.
    /// - [`StringError::InvalidRange`] as for [`ByteStr::slice`].
    pub fn slice_owned(&mut self, start: isize, end: isize) -> Result<Span> {
        self.check_mutable()?;
        let (s, e) = resolve_range(start, end, self.len)?;
        self.storage[self.offset..self.offset + e].rotate_left(s);
        let span = Span {
            start: self.offset,
            len: e - s,
        };
        self.offset += span.len;
        self.len -= span.len;
        log::trace!("moved {} bytes behind offset {}", span.len, self.offset);
        Ok(span)
    }

    /// Views the bytes a [`Span`] addresses in the current allocation.
    ///
    /// # Errors
    ///
    /// [`StringError::InvalidRange`] if the span reaches past the
    /// allocation.
    pub fn resolve(&self, span: Span) -> Result<ByteView<'_>> {
        self.storage
            .get(span.start..span.end())
            .map(|bytes| ByteView::new(bytes, span.start))
            .ok_or(StringError::InvalidRange {
                start: signed(span.start),
                end: signed(span.end()),
                length: self.storage.len(),
            })
    }

    /// The bytes currently hidden behind the offset.
    #[must_use]
    pub fn consumed(&self) -> ByteView<'_> {
        ByteView::new(&self.storage[..self.offset], 0)
    }

    /// Moves the start of the visible window by `delta` bytes without moving
    /// memory. Positive deltas hide bytes, negative deltas reveal hidden ones.
    ///
    /// # Errors
    ///
    /// [`StringError::InvalidOffset`] when `delta` exceeds the visible length
    /// or would move the offset below zero.
    pub fn advance_offset(&mut self, delta: isize) -> Result<()> {
        let invalid = StringError::InvalidOffset {
            delta,
            offset: self.offset,
            length: self.len,
        };
        let step = delta.unsigned_abs();
        if delta >= 0 {
            if step > self.len {
                return Err(invalid);
            }
            self.offset += step;
            self.len -= step;
        } else {
            if step > self.offset {
                return Err(invalid);
            }
            self.offset -= step;
            self.len += step;
        }
        log::trace!("offset moved by {delta} to {}", self.offset);
        Ok(())
    }

    /// Shows every byte hidden by the offset again.
    pub fn rewind(&mut self) {
        self.len += self.offset;
        self.offset = 0;
    }

    /// Appends `src`, growing by at least its length when needed.
    ///
    /// # Errors
    ///
    /// - [`StringError::IllegalMutation`] on a frozen byte string.
    /// - [`StringError::AllocationFailure`] if growing fails.
    pub fn concat(&mut self, src: impl AsRef<[u8]>) -> Result<()> {
        self.check_mutable()?;
        let src = src.as_ref();
        self.ensure_capacity(self.len + src.len())?;
        let end = self.offset + self.len;
        self.storage[end..end + src.len()].copy_from_slice(src);
        self.len += src.len();
        Ok(())
    }

    /// Replaces the visible content with `src`, growing when needed.
    ///
    /// # Errors
    ///
    /// - [`StringError::IllegalMutation`] on a frozen byte string.
    /// - [`StringError::AllocationFailure`] if growing fails.
    pub fn copy_from(&mut self, src: impl AsRef<[u8]>) -> Result<()> {
        self.check_mutable()?;
        let src = src.as_ref();
        self.ensure_capacity(src.len())?;
        self.storage[self.offset..self.offset + src.len()].copy_from_slice(src);
        self.len = src.len();
        Ok(())
    }
}

impl ByteStr for ByteString {
    fn as_bytes(&self) -> &[u8] {
        &self.storage[self.offset..self.offset + self.len]
    }

    fn origin(&self) -> usize {
        self.offset
    }

    fn capacity(&self) -> usize {
        self.storage.len() - self.offset
    }

    fn len(&self) -> usize {
        self.len
    }
}

impl Default for ByteString {
    fn default() -> Self {
        Self::new()
    }
}

impl AsRef<[u8]> for ByteString {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl TryFrom<&[u8]> for ByteString {
    type Error = StringError;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        Self::init_from(bytes)
    }
}

impl TryFrom<&str> for ByteString {
    type Error = StringError;

    fn try_from(s: &str) -> Result<Self> {
        Self::init_from(s)
    }
}

impl fmt::Write for ByteString {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.concat(s).map_err(|_| fmt::Error)
    }
}

impl fmt::Debug for ByteString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ByteString")
            .field("bytes", &BStr::new(self.as_bytes()))
            .field("len", &self.len)
            .field("capacity", &self.capacity())
            .field("offset", &self.offset)
            .field("mutable", &self.mutable)
            .finish()
    }
}

impl fmt::Display for ByteString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(BStr::new(self.as_bytes()), f)
    }
}

impl PartialEq for ByteString {
    fn eq(&self, other: &Self) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl Eq for ByteString {}

impl PartialOrd for ByteString {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ByteString {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_bytes().cmp(other.as_bytes())
    }
}

impl core::hash::Hash for ByteString {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        self.as_bytes().hash(state);
    }
}

// Content comparisons against plain byte and text literals, so tests and
// callers can write `assert_eq!(s, "abc")`.
macro_rules! impl_content_eq {
    ($owner:ty => $($other:ty),+) => {
        $(
            impl PartialEq<$other> for $owner {
                fn eq(&self, other: &$other) -> bool {
                    ByteStr::as_bytes(self) == AsRef::<[u8]>::as_ref(other)
                }
            }

            impl PartialEq<$owner> for $other {
                fn eq(&self, other: &$owner) -> bool {
                    other == self
                }
            }
        )+
    };
}

impl_content_eq!(ByteString => [u8], &[u8], str, &str, Vec<u8>);
impl_content_eq!(ByteView<'_> => [u8], &[u8], str, &str, Vec<u8>);

impl PartialEq<ByteView<'_>> for ByteString {
    fn eq(&self, other: &ByteView<'_>) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl PartialEq<ByteString> for ByteView<'_> {
    fn eq(&self, other: &ByteString) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl<const N: usize> PartialEq<[u8; N]> for ByteString {
    fn eq(&self, other: &[u8; N]) -> bool {
        self.as_bytes() == other
    }
}

impl<const N: usize> PartialEq<&[u8; N]> for ByteString {
    fn eq(&self, other: &&[u8; N]) -> bool {
        self.as_bytes() == *other
    }
}

impl<const N: usize> PartialEq<&[u8; N]> for ByteView<'_> {
    fn eq(&self, other: &&[u8; N]) -> bool {
        self.as_bytes() == *other
    }
}

#[cfg(feature = "serde")]
mod serde_impls {
    use core::fmt;

    use serde::{
        Deserialize, Deserializer, Serialize, Serializer,
        de::{self, SeqAccess, Visitor},
    };

    use super::ByteString;
    use crate::ByteStr;

    impl Serialize for ByteString {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.serialize_bytes(self.as_bytes())
        }
    }

    struct ByteStringVisitor;

    impl<'de> Visitor<'de> for ByteStringVisitor {
        type Value = ByteString;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a byte string")
        }

        fn visit_bytes<E: de::Error>(self, v: &[u8]) -> Result<ByteString, E> {
            ByteString::init_from(v).map_err(E::custom)
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<ByteString, E> {
            self.visit_bytes(v.as_bytes())
        }

        fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<ByteString, A::Error> {
            let mut out = ByteString::new();
            while let Some(byte) = seq.next_element::<u8>()? {
                out.push(byte).map_err(de::Error::custom)?;
            }
            Ok(out)
        }
    }

    impl<'de> Deserialize<'de> for ByteString {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<ByteString, D::Error> {
            deserializer.deserialize_byte_buf(ByteStringVisitor)
        }
    }
}
