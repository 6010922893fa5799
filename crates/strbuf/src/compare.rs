/// Byte-wise comparison of `a` and `b`.
///
/// Returns the signed difference of the first mismatching byte, or the
/// difference of the lengths when one input is a prefix of the other. The sign
/// always agrees with `a.cmp(b)`.
///
/// ```rust
/// use strbuf::compare_bytes;
///
/// assert_eq!(compare_bytes(b"abc", b"abc"), 0);
/// assert_eq!(compare_bytes(b"abd", b"abc"), 1);
/// assert_eq!(compare_bytes(b"ab", b"abcd"), -2);
/// ```
#[must_use]
pub fn compare_bytes(a: &[u8], b: &[u8]) -> isize {
    if let Some((x, y)) = a.iter().zip(b).find(|(x, y)| x != y) {
        return isize::from(*x) - isize::from(*y);
    }
    // Slice lengths never exceed `isize::MAX`.
    #[allow(clippy::cast_possible_wrap)]
    let diff = a.len() as isize - b.len() as isize;
    diff
}
