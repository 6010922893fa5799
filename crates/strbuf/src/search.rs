//! Substring search and in-place replacement.
//!
//! Search is a plain quadratic scan; keys are expected to be short. A
//! replacement resizes the gap left by the key in place:
//!
//! ```text
//! shrink:  [head][key....][tail]  ->  [head][rep][tail]        tail moves left
//! grow:    [head][key][tail]      ->  [head][rep.....][tail]   tail moves right
//! ```
//!
//! Growing reallocates through the owner's growth policy, so the offset
//! window is preserved across the reallocation.

use core::cmp::Ordering;

use crate::{ByteStr, ByteString, Result, StringError, byte_str::normalize};

/// First occurrence of `key` in `haystack` at or after `start`.
pub(crate) fn find_naive(haystack: &[u8], start: usize, key: &[u8]) -> Option<usize> {
    if start > haystack.len() {
        return None;
    }
    if key.is_empty() {
        return Some(start);
    }
    let last = haystack.len().checked_sub(key.len())?;
    (start..=last).find(|&i| haystack[i..i + key.len()] == *key)
}

impl ByteString {
    /// Replaces the first `key` found at or after `start` with
    /// `replacement`.
    ///
    /// Returns the position right after the written replacement, suitable as
    /// the `start` of the next call, or `None` when `key` does not occur. A
    /// byte-identical `key` and `replacement` are located but not written. An
    /// empty key never matches.
    ///
    /// ```rust
    /// use strbuf::ByteString;
    ///
    /// let mut s = ByteString::init_from("a tool, nor a goal").unwrap();
    /// let next = s.replace_first(0, "tool", "TOOL").unwrap().unwrap();
    /// assert_eq!(next, 6);
    /// s.replace_first(next as isize, "nor", "or").unwrap();
    /// assert_eq!(s, "a TOOL, or a goal");
    /// ```
    ///
    /// # Errors
    ///
    /// - [`StringError::IllegalMutation`] on a frozen byte string.
    /// - [`StringError::IndexOutOfBounds`] when `start` is negative or past
    ///   the end.
    /// - [`StringError::AllocationFailure`] if growing fails.
    pub fn replace_first(
        &mut self,
        start: isize,
        key: impl AsRef<[u8]>,
        replacement: impl AsRef<[u8]>,
    ) -> Result<Option<usize>> {
        self.check_mutable()?;
        let len = self.len();
        let from = usize::try_from(start)
            .ok()
            .filter(|&s| s <= len)
            .ok_or(StringError::IndexOutOfBounds {
                index: start,
                bound: len,
            })?;
        self.replace_from(from, key.as_ref(), replacement.as_ref())
    }

    /// Replaces every occurrence of `key` with `replacement`, left to right.
    ///
    /// Each scan resumes right after the previous replacement, so text that a
    /// replacement wrote is never matched again and the call terminates even
    /// when `replacement` contains `key`. Returns the number of replacements.
    ///
    /// # Errors
    ///
    /// - [`StringError::IllegalMutation`] on a frozen byte string.
    /// - [`StringError::AllocationFailure`] if growing fails. Replacements
    ///   made before the failure stay applied.
    pub fn replace_all(
        &mut self,
        key: impl AsRef<[u8]>,
        replacement: impl AsRef<[u8]>,
    ) -> Result<usize> {
        self.check_mutable()?;
        let (key, replacement) = (key.as_ref(), replacement.as_ref());
        if key.is_empty() || key == replacement {
            return Ok(0);
        }
        let mut count = 0;
        let mut from = 0;
        while let Some(next) = self.replace_from(from, key, replacement)? {
            count += 1;
            from = next;
        }
        log::trace!("replaced {count} occurrences");
        Ok(count)
    }

    /// Number of non-overlapping occurrences of `key` from `start` on.
    #[must_use]
    pub fn count(&self, start: isize, key: impl AsRef<[u8]>) -> usize {
        let (bytes, key) = (self.as_bytes(), key.as_ref());
        let Some(mut from) = normalize(start, bytes.len()) else {
            return 0;
        };
        if key.is_empty() {
            return 0;
        }
        let mut count = 0;
        while let Some(at) = find_naive(bytes, from, key) {
            count += 1;
            from = at + key.len();
        }
        count
    }

    fn replace_from(
        &mut self,
        from: usize,
        key: &[u8],
        replacement: &[u8],
    ) -> Result<Option<usize>> {
        if key.is_empty() {
            return Ok(None);
        }
        let Some(at) = find_naive(self.as_bytes(), from, key) else {
            return Ok(None);
        };
        let key_end = at + key.len();
        if key == replacement {
            return Ok(Some(key_end));
        }

        let len = self.len();
        let rep_end = at + replacement.len();
        match replacement.len().cmp(&key.len()) {
            Ordering::Less => {
                self.window_mut().copy_within(key_end..len, rep_end);
                self.set_len(len - (key.len() - replacement.len()));
            }
            Ordering::Greater => {
                let new_len = len + (replacement.len() - key.len());
                self.ensure_capacity(new_len)?;
                self.set_len(new_len);
                self.window_mut().copy_within(key_end..len, rep_end);
            }
            Ordering::Equal => {}
        }
        self.window_mut()[at..rep_end].copy_from_slice(replacement);
        Ok(Some(rep_end))
    }
}
