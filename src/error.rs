/// Lexical errors.
///
/// Defines all error types that can occur while splitting source text into
/// tokens: unknown symbols, malformed literals, unbalanced braces, and
/// operators that are only valid in doubled form.
pub mod lexer_error;
/// Parsing errors.
///
/// Defines all error types that can occur during syntax analysis, including
/// scope and type violations detected while parsing (double declarations,
/// uses of undeclared variables, kind-mismatched comparisons) and the
/// aggregating error produced when every speculative alternative fails.
pub mod parser_error;
/// Runtime errors.
///
/// Contains the error type raised during execution: failed conversions,
/// out-of-range subscripts, division by a computed zero, and internal
/// dispatch failures.
pub mod runtime_error;
/// Semantic errors.
///
/// Contains the error types raised by the second tree pass for checks that
/// are not expressible left-to-right during parsing.
pub mod semantic_error;

pub use lexer_error::LexerError;
pub use parser_error::ParserError;
pub use runtime_error::RuntimeError;
pub use semantic_error::SemanticError;
