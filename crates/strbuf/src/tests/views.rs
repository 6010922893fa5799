use crate::{ByteStr, ByteString, Span, StringError};

fn s(text: &str) -> ByteString {
    ByteString::init_from(text).unwrap()
}

#[test]
fn slice_hello() {
    let owner = s("hello");
    let view = owner.slice(1, 4).unwrap();
    assert_eq!(view, "ell");
    assert_eq!(view.len(), 3);
    assert_eq!(view.origin(), 1);
}

#[test]
fn slice_shares_storage() {
    let owner = s("shared storage");
    let view = owner.slice(7, -1).unwrap();
    assert_eq!(view, "storage");
    assert_eq!(view.bytes().as_ptr(), owner.as_bytes()[7..].as_ptr());
}

#[test]
fn slice_rejects_bad_ranges() {
    let owner = s("hello");
    for (start, end) in [(0, 6), (3, 3), (4, 2), (-1, 2)] {
        assert_eq!(
            owner.slice(start, end).unwrap_err(),
            StringError::InvalidRange {
                start,
                end,
                length: 5
            }
        );
    }
}

#[test]
fn slice_of_slice_narrows() {
    let owner = s("abcdefgh");
    let outer = owner.slice(2, 7).unwrap();
    let inner = outer.subview(1, 3).unwrap();
    assert_eq!(inner, "de");
    assert_eq!(inner.origin(), 3);
    assert_eq!(outer.slice(0, -1).unwrap(), "cdefg");
}

#[test]
fn view_reads_like_an_owner() {
    let owner = s("count: 42");
    let digits = owner.slice(7, -1).unwrap();
    assert_eq!(digits.parse_integer(), Ok(42));
    assert_eq!(owner.contains(0, "42"), Some(7));
    assert_eq!(digits.contains(0, "2"), Some(1));
    assert_eq!(digits.to_byte_string().unwrap(), "42");
}

#[test]
fn contains_honours_start() {
    let owner = s("abcabc");
    assert_eq!(owner.contains(0, "bc"), Some(1));
    assert_eq!(owner.contains(2, "bc"), Some(4));
    assert_eq!(owner.contains(-2, "bc"), Some(4));
    assert_eq!(owner.contains(5, "bc"), None);
    assert_eq!(owner.contains(-7, "a"), None);
    assert_eq!(owner.contains(9, ""), None);
}

#[test]
fn advance_and_rewind() {
    let mut b = s("prefix:payload");
    b.advance_offset(7).unwrap();
    assert_eq!(b, "payload");
    assert_eq!(b.offset(), 7);
    assert_eq!(b.capacity(), 7);
    assert_eq!(b.consumed(), "prefix:");
    b.advance_offset(-1).unwrap();
    assert_eq!(b, ":payload");
    b.rewind();
    assert_eq!(b, "prefix:payload");
    assert_eq!(b.offset(), 0);
    b.rewind();
    assert_eq!(b.len(), 14);
}

#[test]
fn advance_offset_bounds() {
    let mut b = s("abc");
    assert_eq!(
        b.advance_offset(4),
        Err(StringError::InvalidOffset {
            delta: 4,
            offset: 0,
            length: 3
        })
    );
    assert_eq!(
        b.advance_offset(-1),
        Err(StringError::InvalidOffset {
            delta: -1,
            offset: 0,
            length: 3
        })
    );
    b.advance_offset(3).unwrap();
    assert!(b.is_empty());
    assert_eq!(
        b.advance_offset(-4),
        Err(StringError::InvalidOffset {
            delta: -4,
            offset: 3,
            length: 0
        })
    );
}

#[test]
fn indices_are_relative_to_the_window() {
    let mut b = s("0123456789");
    b.advance_offset(4).unwrap();
    assert_eq!(b.access(0), Ok(b'4'));
    assert_eq!(b.access(-1), Ok(b'9'));
    assert_eq!(b.slice(1, 3).unwrap(), "56");
    assert_eq!(b.slice(1, 3).unwrap().origin(), 5);
    b.insert(0, b'x').unwrap();
    b.rewind();
    assert_eq!(b, "0123x456789");
}

#[test]
fn slice_owned_consumes_from_the_front() {
    let mut b = s("GET /index HTTP/1.1");
    let method = b.slice_owned(0, 3).unwrap();
    b.advance_offset(1).unwrap();
    let path = b.slice_owned(0, 6).unwrap();
    b.advance_offset(1).unwrap();
    assert_eq!(b, "HTTP/1.1");
    assert_eq!(b.resolve(method).unwrap(), "GET");
    assert_eq!(b.resolve(path).unwrap(), "/index");
    assert_eq!(path.start(), 4);
    assert_eq!(path.len(), 6);
    assert_eq!(b.capacity(), 8);
}

#[test]
fn slice_owned_from_the_middle_rotates() {
    let mut b = s("aaXYbb");
    let span = b.slice_owned(2, 4).unwrap();
    assert_eq!(b, "aabb");
    assert_eq!(b.resolve(span).unwrap(), "XY");
    assert_eq!(b.offset(), 2);
    b.rewind();
    assert_eq!(b, "XYaabb");
}

#[test]
fn spans_survive_reallocation() {
    let mut b = s("word rest");
    let word = b.slice_owned(0, 4).unwrap();
    b.concat(" plus a much longer tail").unwrap();
    assert_eq!(b.resolve(word).unwrap(), "word");
    assert_eq!(b, " rest plus a much longer tail");
}

#[test]
fn resolve_rejects_foreign_spans() {
    let b = s("abc");
    let span = Span { start: 2, len: 5 };
    assert_eq!(
        b.resolve(span).unwrap_err(),
        StringError::InvalidRange {
            start: 2,
            end: 7,
            length: 3
        }
    );
}

#[test]
fn slice_owned_rejects_bad_ranges() {
    let mut b = s("abc");
    assert_eq!(
        b.slice_owned(1, 1),
        Err(StringError::InvalidRange {
            start: 1,
            end: 1,
            length: 3
        })
    );
    assert_eq!(b, "abc");
    assert_eq!(b.offset(), 0);
}
