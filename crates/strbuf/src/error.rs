use alloc::string::String;
use core::fmt::Write;

use thiserror::Error;

/// Every failure a byte-string operation can report.
///
/// Positions are reported the way the caller passed them (possibly negative)
/// together with the bound they were checked against.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StringError {
    /// A negative capacity was requested.
    #[error("invalid capacity {requested}: capacity must not be negative")]
    InvalidSize {
        /// The capacity passed in.
        requested: isize,
    },
    /// The allocator could not provide the requested bytes.
    #[error("allocation of {requested} bytes failed")]
    AllocationFailure {
        /// Total bytes the allocation would have held.
        requested: usize,
    },
    /// A resolved index fell outside the valid range.
    #[error("index {index} out of bounds for length {bound}")]
    IndexOutOfBounds {
        /// The index as passed, before resolving negative values.
        index: isize,
        /// Exclusive upper bound the index was checked against.
        bound: usize,
    },
    /// An offset move would leave the window or go below zero.
    #[error("cannot move offset by {delta}: offset is {offset}, length is {length}")]
    InvalidOffset {
        /// Requested move; negative values reveal hidden bytes.
        delta: isize,
        /// Offset before the move.
        offset: usize,
        /// Visible length before the move.
        length: usize,
    },
    /// A slice range was empty, reversed or past the end.
    #[error("invalid range {start}..{end} for length {length}")]
    InvalidRange {
        /// Inclusive start as passed.
        start: isize,
        /// Exclusive end as passed.
        end: isize,
        /// Length the range was resolved against.
        length: usize,
    },
    /// A mutating operation was attempted on a frozen byte string.
    #[error("attempted to mutate an immutable byte string")]
    IllegalMutation,
    /// Removal from a byte string of length zero.
    #[error("cannot remove from an empty byte string")]
    EmptyBuffer,
    /// The content was not entirely a numeric literal.
    #[error("invalid numeric literal: unexpected byte {byte:#04x} at position {position}")]
    InvalidNumericLiteral {
        /// Index of the offending byte in the visible window.
        position: usize,
        /// The offending byte.
        byte: u8,
    },
    /// The searched key does not occur.
    #[error("key not found")]
    KeyNotFound,
    /// A `Display` implementation reported an error while composing.
    #[error("formatting failed")]
    FormatError,
}

/// Shorthand for results carrying a [`StringError`].
pub type Result<T> = core::result::Result<T, StringError>;

impl StringError {
    /// `false` for outcomes that are an expected answer rather than a failure.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        !matches!(self, StringError::KeyNotFound)
    }

    /// Renders `source` with a caret under the offending byte of an
    /// [`StringError::InvalidNumericLiteral`].
    ///
    /// ```text
    /// 12a
    ///   ^ invalid character found.
    /// ```
    ///
    /// Returns `None` for every other variant.
    #[must_use]
    pub fn caret(&self, source: &[u8]) -> Option<String> {
        let StringError::InvalidNumericLiteral { position, .. } = *self else {
            return None;
        };
        let mut out = String::with_capacity(source.len() * 2 + 32);
        // Writing into a `String` cannot fail.
        let _ = writeln!(out, "{}", bstr::BStr::new(source));
        out.extend(core::iter::repeat_n(' ', position));
        out.push_str("^ invalid character found.");
        Some(out)
    }
}
