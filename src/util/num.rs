/// Safely converts an `i64` to a `usize`, returning `error` if the value is
/// negative or does not fit.
///
/// Used for array subscripts and declared array sizes, where a failed
/// conversion means the index is out of range rather than a host-level
/// panic.
///
/// ## Example
/// ```
/// use cmm::util::num::i64_to_usize_checked;
///
/// assert_eq!(i64_to_usize_checked(42, "out of range"), Ok(42));
/// assert!(i64_to_usize_checked(-1, "out of range").is_err());
/// ```
pub fn i64_to_usize_checked<E>(value: i64, error: E) -> Result<usize, E> {
    usize::try_from(value).map_err(|_| error)
}
