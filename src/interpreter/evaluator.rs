/// Declarations, assignments, and element navigation, including the
/// character-replacement write into a string.
pub mod assign;
/// Unary, binary, logical, and comparison operator evaluation.
pub mod binary;
/// The built-in operations: `print`, `scan`, the conversions, and the
/// boolean literals.
pub mod builtin;
/// Control flow: `if`, `while`, `for`, and `switch` with fallthrough.
pub mod control;
/// The interpreter core: statement dispatch, expression dispatch, and the
/// `Flow` result that models `break`.
pub mod core;

pub use self::core::{Flow, Interpreter};
