use alloc::vec::Vec;

use crate::{BufferOptions, ByteStr, ByteString, SCALABLE, StringError};

#[test]
fn declare_allocates_requested_capacity() {
    let s = ByteString::declare(16).unwrap();
    assert_eq!(s.len(), 0);
    assert_eq!(s.capacity(), 16);
    assert!(s.is_mutable());
    assert_eq!(s.offset(), 0);
}

#[test]
fn declare_scalable_starts_small() {
    let s = ByteString::declare(SCALABLE).unwrap();
    assert_eq!(s.capacity(), BufferOptions::default().scalable_capacity);
    assert!(s.is_empty());
}

#[test]
fn declare_negative_is_invalid_size() {
    assert_eq!(
        ByteString::declare(-3).unwrap_err(),
        StringError::InvalidSize { requested: -3 }
    );
}

#[test]
fn declare_absurd_capacity_fails_allocation() {
    assert_eq!(
        ByteString::declare(isize::MAX).unwrap_err(),
        StringError::AllocationFailure {
            requested: isize::MAX.unsigned_abs()
        }
    );
}

#[test]
fn init_from_sizes_exactly() {
    let s = ByteString::init_from("hello").unwrap();
    assert_eq!(s.len(), 5);
    assert_eq!(s.capacity(), 5);
    assert_eq!(s, "hello");
}

#[test]
fn init_from_empty_has_no_capacity() {
    let s = ByteString::init_from("").unwrap();
    assert!(s.is_empty());
    assert_eq!(s.capacity(), 0);
    assert_eq!(s, ByteString::new());
}

#[test]
fn init_from_round_trips_through_access() {
    let bytes = b"\x00bytes \xff with \x7f edges";
    let s = ByteString::init_from(bytes).unwrap();
    let read: Vec<u8> = (0..s.len())
        .map(|i| s.access(isize::try_from(i).unwrap()).unwrap())
        .collect();
    assert_eq!(read, bytes);
}

#[test]
fn join_sums_capacities_and_leaves_inputs() {
    let mut a = ByteString::declare(10).unwrap();
    a.concat("foo").unwrap();
    let b = ByteString::init_from("bar").unwrap();
    let joined = ByteString::join(&a, &b).unwrap();
    assert_eq!(joined, "foobar");
    assert_eq!(joined.capacity(), 13);
    assert_eq!(a, "foo");
    assert_eq!(b, "bar");
}

#[test]
fn join_accepts_views() {
    let owner = ByteString::init_from("left|right").unwrap();
    let left = owner.slice(0, 4).unwrap();
    let right = owner.slice(5, -1).unwrap();
    let joined = ByteString::join(&right, &left).unwrap();
    assert_eq!(joined, "rightleft");
    assert_eq!(joined.capacity(), 9);
}

#[test]
fn dup_is_independent_and_mutable() {
    let mut original = ByteString::declare(8).unwrap();
    original.concat("abc").unwrap();
    original.freeze();
    let mut copy = original.dup().unwrap();
    assert!(copy.is_mutable());
    assert_eq!(copy.capacity(), 8);
    copy.push(b'd').unwrap();
    assert_eq!(copy, "abcd");
    assert_eq!(original, "abc");
}

#[test]
fn dup_copies_capacity_and_options() {
    let options = BufferOptions {
        scalable_capacity: 16,
        growth_factor: 3,
    };
    let mut s = ByteString::declare_with(SCALABLE, options).unwrap();
    s.concat("same").unwrap();
    let copy = s.dup().unwrap();
    assert_eq!(copy, s);
    assert_eq!(copy.capacity(), 16);
    assert_eq!(copy.options(), options);
}

#[test]
fn dup_keeps_only_the_visible_window() {
    let mut s = ByteString::init_from("skip:keep").unwrap();
    s.advance_offset(5).unwrap();
    let copy = s.dup().unwrap();
    assert_eq!(copy, "keep");
    assert_eq!(copy.offset(), 0);
    assert_eq!(copy.capacity(), 4);
}

#[test]
fn release_consumes_the_owner() {
    let s = ByteString::init_from("bye").unwrap();
    s.release();
}

#[test]
fn compare_orders_by_first_difference() {
    let a = ByteString::init_from("apple").unwrap();
    let b = ByteString::init_from("apply").unwrap();
    assert_eq!(a.compare(&b), isize::from(b'e') - isize::from(b'y'));
    assert!(a < b);
    assert_eq!(a.compare("apple"), 0);
    assert_eq!(a.compare("app"), 2);
}

#[test]
fn try_from_literals() {
    let s = ByteString::try_from("text").unwrap();
    let t = ByteString::try_from(&b"text"[..]).unwrap();
    assert_eq!(s, t);
}

#[test]
fn write_macro_appends() {
    use core::fmt::Write;

    let mut s = ByteString::new();
    write!(s, "{}:{}", "k", 1).unwrap();
    assert_eq!(s, "k:1");

    s.freeze();
    assert!(write!(s, "more").is_err());
}
