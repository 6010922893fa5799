//! Formatted construction into an exactly sized byte string.

use core::fmt::{self, Write};

use crate::{BufferOptions, ByteStr, ByteString, Result, StringError};

/// Counts the bytes a formatting pass would produce.
struct LengthProbe(usize);

impl Write for LengthProbe {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.0 = self.0.checked_add(s.len()).ok_or(fmt::Error)?;
        Ok(())
    }
}

/// Writes into preallocated capacity and refuses to grow.
struct Exact<'a>(&'a mut ByteString);

impl Write for Exact<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        if self.0.len() + s.len() > self.0.capacity() {
            return Err(fmt::Error);
        }
        self.0.concat(s).map_err(|_| fmt::Error)
    }
}

impl ByteString {
    /// Formats `args` into a byte string allocated to exactly the rendered
    /// length.
    ///
    /// The arguments are rendered twice: once to measure, once to write. The
    /// [`compose!`](crate::compose!) macro builds the arguments.
    ///
    /// # Errors
    ///
    /// - [`StringError::FormatError`] if a `Display` implementation fails, or
    ///   renders a different length on the second pass than on the first.
    /// - [`StringError::AllocationFailure`] if the allocator refuses.
    pub fn compose(args: fmt::Arguments<'_>) -> Result<Self> {
        let mut probe = LengthProbe(0);
        fmt::write(&mut probe, args).map_err(|_| StringError::FormatError)?;
        let mut composed = Self::with_exact_capacity(probe.0, BufferOptions::default())?;
        fmt::write(&mut Exact(&mut composed), args).map_err(|_| StringError::FormatError)?;
        if composed.len() != probe.0 {
            return Err(StringError::FormatError);
        }
        Ok(composed)
    }
}

/// Formats into a [`ByteString`] of exactly the rendered length.
///
/// ```rust
/// use strbuf::{ByteStr, compose};
///
/// let s = compose!("{}-{:03}", "id", 7).unwrap();
/// assert_eq!(s, "id-007");
/// assert_eq!(s.capacity(), 6);
/// ```
#[macro_export]
macro_rules! compose {
    ($($arg:tt)*) => {
        $crate::ByteString::compose(::core::format_args!($($arg)*))
    };
}
