/// Boolean expression parsing.
///
/// Implements the boolean precedence chain (`||` over `&&` over `!`) and
/// the boolean factor alternatives, including the speculative choice
/// between a comparison, a parenthesized boolean expression, and a boolean
/// identifier.
pub mod boolean;
/// The parser core: cursor management, checkpoint/rollback, token
/// expectation helpers, and the `create_syntax_tree` entry point.
pub mod core;
/// Arithmetic and string expression parsing, identifier-use resolution with
/// indexation checking, and comparison parsing with kind-mismatch
/// detection.
pub mod expression;
/// The scope stack: lexical block tracking and parse-time binding of
/// identifiers into the flat identifier table.
pub mod scope;
/// Statement parsing: declarations, assignments, control flow, switch
/// labels, and compound blocks.
pub mod statement;
