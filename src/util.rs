/// Checked numeric conversions.
///
/// The interpreter computes subscripts and array sizes as `i64` and needs
/// them as `usize` without silent wrapping; these helpers make the failure
/// an explicit error value chosen by the caller.
pub mod num;
