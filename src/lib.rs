//! # cmm
//!
//! cmm is an interpreter for a small, statically typed imperative language
//! with `int`, `double`, `bool`, and `string` scalars, fixed-size
//! multi-dimensional arrays, C-style control flow including `switch` with
//! fallthrough, and console input and output.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use std::io::{BufRead, Write};

use crate::interpreter::{
    evaluator::Interpreter,
    lexer::tokenize,
    parser::core::create_syntax_tree,
    semantic::check,
};

/// Defines the structure of parsed code.
///
/// This module declares the node and marker types that represent the
/// syntactic structure of a program as a tree. The tree is built by the
/// parser and traversed by the semantic analyzer and the evaluator.
///
/// # Responsibilities
/// - Defines the node kinds for operators, keywords, identifiers, literals,
///   and synthetic constructs.
/// - Attaches source positions to every node for error reporting.
/// - Provides the classification helpers the later phases dispatch on.
pub mod ast;
/// Provides unified error types for every phase.
///
/// This module defines all errors that can be raised while lexing, parsing,
/// analyzing, or executing a program. Each family carries the source line
/// and column of its failure, and every error displays as
/// `<message> (<line>:<column>)`.
///
/// # Responsibilities
/// - Defines one error family per phase.
/// - Attaches positions and detailed messages for context.
/// - Supports integration with standard error handling traits.
pub mod error;
/// Orchestrates the entire process of program execution.
///
/// This module ties together lexing, parsing, semantic analysis,
/// evaluation, value representation, and the shared symbol tables to
/// provide a complete runtime for the language.
///
/// # Responsibilities
/// - Coordinates all core components: lexer, parser, analyzer, evaluator.
/// - Owns the shared tables the phases communicate through.
/// - Manages the flow of data and errors between phases.
pub mod interpreter;
/// General utilities for safe numeric conversion.
///
/// # Responsibilities
/// - Safely convert between integer widths without silent data loss.
pub mod util;

/// Runs a program from source to completion.
///
/// The four phases run in order: the lexer builds the token stream and the
/// shared tables, the parser builds the syntax tree and binds identifiers,
/// the semantic analyzer checks the tree, and the interpreter executes it
/// against the given input and output streams.
///
/// # Errors
/// Returns the first error any phase raises; later phases do not run after
/// a failure.
///
/// # Examples
/// ```
/// use std::io::Cursor;
///
/// use cmm::run_program;
///
/// let mut output = Vec::new();
/// let res = run_program("int x = 2 + 3; print(to_string(x));",
///                       Cursor::new(""),
///                       &mut output);
/// assert!(res.is_ok());
/// assert_eq!(output, b"5".to_vec());
/// ```
pub fn run_program<R: BufRead, W: Write>(source: &str,
                                         input: R,
                                         output: W)
                                         -> Result<(), Box<dyn std::error::Error>> {
    let (tokens, mut tables) = tokenize(source)?;
    let tree = create_syntax_tree(&tokens, &mut tables)?;
    check(&tree, &tables)?;
    Interpreter::new(&mut tables, input, output).run(&tree)?;
    Ok(())
}
