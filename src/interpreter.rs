/// Executes the syntax tree.
///
/// This module walks the finished tree and carries out its statements:
/// declarations, assignments, control flow with `break`, the `switch`
/// fallthrough discipline, and the built-in conversions and console
/// operations.
///
/// # Responsibilities
/// - Dispatches statements and expressions over the node kinds.
/// - Stores and reads variable values through the shared identifier table.
/// - Reports failures as positioned runtime errors instead of panicking.
pub mod evaluator;
/// Turns source text into a token stream.
///
/// This module owns the token shape, the keyword list, and the interning of
/// every operator, keyword, literal, and identifier spelling into the
/// shared tables.
///
/// # Responsibilities
/// - Tokenizes with exact line and column positions.
/// - Validates string escapes and numeric literal endings.
/// - Balances braces so a missing `{` or `}` fails before parsing starts.
pub mod lexer;
/// Builds the syntax tree.
///
/// This module holds the recursive-descent parser, which resolves scopes
/// and identifier types while it parses: declarations bind records in the
/// identifier table and every use is checked against its binding.
///
/// # Responsibilities
/// - Parses statements and the three expression kinds.
/// - Tracks lexical blocks and rejects redeclarations and unknown names.
/// - Backtracks over ambiguous forms, collecting every failed attempt.
pub mod parser;
/// Checks the finished tree before execution.
///
/// # Responsibilities
/// - Rejects division by a literal zero and `%` on double operands.
/// - Rejects double-valued `switch` expressions and repeated `default`
///   labels.
pub mod semantic;
/// The symbol tables shared by every phase.
///
/// # Responsibilities
/// - Interns operator, keyword, literal, and identifier spellings.
/// - Holds the variable records that carry declared types, declaring
///   blocks, and runtime values.
pub mod tables;
/// Runtime value representation and conversions.
pub mod value;
