//! Growable, explicitly-owned byte strings.
//!
//! - [`ByteString`] owns one allocation with a tracked length, capacity and a
//!   front offset that hides consumed bytes without moving memory.
//! - [`ByteView`] borrows a window of an owner; [`Span`] addresses bytes an
//!   owner moved behind its offset and is resolved back into a view on demand.
//! - [`ByteStr`] is the read-only surface both share: indexed access,
//!   slicing, search, comparison and numeric conversion.
//!
//! Every fallible operation returns [`Result`]; [`ErrorReport`] offers a
//! buffered, message-based view of the same outcomes. Content is raw bytes,
//! no Unicode awareness is implied.
//!
//! ```rust
//! use strbuf::{ByteStr, ByteString};
//!
//! let mut s = ByteString::init_from("hello").unwrap();
//! assert_eq!(s.slice(1, 4).unwrap(), "ell");
//! s.insert(-1, b'!').unwrap();
//! assert_eq!(s.access(-1), Ok(b'!'));
//! ```

#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod byte_str;
mod byte_string;
mod compare;
mod compose;
mod error;
mod numbers;
mod options;
mod report;
mod search;
mod view;

#[cfg(test)]
mod tests;

pub use byte_str::ByteStr;
pub use byte_string::{ByteString, SCALABLE, TERMINATOR};
pub use compare::compare_bytes;
pub use error::{Result, StringError};
pub use options::BufferOptions;
pub use report::{ERROR_BUFFER_CAPACITY, ErrorReport};
pub use view::{ByteView, Span};
