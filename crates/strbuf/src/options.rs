/// Growth policy of a [`ByteString`](crate::ByteString).
///
/// Options are fixed when a byte string is declared and are carried along by
/// every operation that reallocates it.
///
/// # Examples
///
/// ```rust
/// use strbuf::{BufferOptions, ByteStr, ByteString, SCALABLE};
///
/// let options = BufferOptions {
///     scalable_capacity: 64,
///     ..Default::default()
/// };
/// let s = ByteString::declare_with(SCALABLE, options).unwrap();
/// assert_eq!(s.capacity(), 64);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferOptions {
    /// Capacity allocated when a byte string is declared with
    /// [`SCALABLE`](crate::SCALABLE).
    ///
    /// # Default
    ///
    /// `8`
    pub scalable_capacity: usize,

    /// Factor the capacity is multiplied by whenever a mutation needs more
    /// room than is allocated. Values below 2 behave like 2.
    ///
    /// A single growth step always allocates at least as much as the
    /// mutation needs, so large appends never grow repeatedly.
    ///
    /// # Default
    ///
    /// `2`
    pub growth_factor: usize,
}

impl Default for BufferOptions {
    fn default() -> Self {
        Self {
            scalable_capacity: 8,
            growth_factor: 2,
        }
    }
}

impl BufferOptions {
    /// Capacity to grow to from `current` so that at least `required` bytes
    /// fit.
    pub(crate) fn grown_capacity(&self, current: usize, required: usize) -> usize {
        let factor = self.growth_factor.max(2);
        current
            .saturating_mul(factor)
            .max(self.scalable_capacity)
            .max(required)
    }
}
