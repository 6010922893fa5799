//! Buffered diagnostics.
//!
//! [`ErrorReport`] keeps a human-readable message for the most recent
//! outcome in a fixed buffer, for callers that prefer inspecting a status
//! after the fact over matching on every `Result`. Each recorded call
//! overwrites the previous message; an empty message means success.

use core::fmt::{self, Write};

use crate::{Result, StringError};

/// Size of the message buffer of an [`ErrorReport`].
pub const ERROR_BUFFER_CAPACITY: usize = 256;

/// Fixed-size record of the last outcome passed through it.
///
/// ```rust
/// use strbuf::{ByteStr, ByteString, ErrorReport};
///
/// let mut report = ErrorReport::new();
/// let s = ByteString::init_from("abc").unwrap();
/// let _ = report.record(s.access(5));
/// assert_eq!(report.message(), "index 5 out of bounds for length 3");
/// let _ = report.record(s.access(0));
/// assert!(report.is_success());
/// ```
#[derive(Clone)]
pub struct ErrorReport {
    buffer: [u8; ERROR_BUFFER_CAPACITY],
    len: usize,
    truncated: bool,
    last: Option<StringError>,
}

impl ErrorReport {
    /// An empty report.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            buffer: [0; ERROR_BUFFER_CAPACITY],
            len: 0,
            truncated: false,
            last: None,
        }
    }

    /// Records the outcome of `result` and hands it back unchanged.
    pub fn record<T>(&mut self, result: Result<T>) -> Result<T> {
        self.clear();
        if let Err(e) = &result {
            let _ = write!(self, "{e}");
            self.last = Some(e.clone());
        }
        result
    }

    /// Like [`ErrorReport::record`], and for numeric literal errors also
    /// renders `source` with a caret under the offending byte.
    pub fn record_with_source<T>(&mut self, source: &[u8], result: Result<T>) -> Result<T> {
        let result = self.record(result);
        if let Some(caret) = result.as_ref().err().and_then(|e| e.caret(source)) {
            let _ = write!(self, "\n{caret}");
        }
        result
    }

    /// The message of the last recorded outcome; empty after a success.
    #[must_use]
    pub fn message(&self) -> &str {
        // Only whole characters are ever written.
        core::str::from_utf8(&self.buffer[..self.len]).unwrap_or_default()
    }

    /// The error of the last recorded outcome.
    #[must_use]
    pub fn last_error(&self) -> Option<&StringError> {
        self.last.as_ref()
    }

    /// `true` when the last recorded outcome succeeded.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.last.is_none()
    }

    /// `true` when the last message did not fit the buffer.
    #[must_use]
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    /// Forgets the last outcome.
    pub fn clear(&mut self) {
        self.len = 0;
        self.truncated = false;
        self.last = None;
    }
}

impl Default for ErrorReport {
    fn default() -> Self {
        Self::new()
    }
}

impl Write for ErrorReport {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let room = ERROR_BUFFER_CAPACITY - self.len;
        let mut take = s.len().min(room);
        while !s.is_char_boundary(take) {
            take -= 1;
        }
        self.buffer[self.len..self.len + take].copy_from_slice(&s.as_bytes()[..take]);
        self.len += take;
        if take < s.len() {
            self.truncated = true;
        }
        Ok(())
    }
}

impl fmt::Debug for ErrorReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErrorReport")
            .field("message", &self.message())
            .field("truncated", &self.truncated)
            .finish()
    }
}
