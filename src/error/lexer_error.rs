#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can occur while tokenizing source text.
pub enum LexerError {
    /// A specific piece of text was expected but not found (e.g. the second
    /// character of `&&`/`||`, or a `}` still open at end of input).
    Expected {
        /// What was expected.
        expected: String,
        /// The source line where the error occurred.
        line:     usize,
        /// The source column where the error occurred.
        column:   usize,
    },
    /// A string literal contains an escape sequence the language does not
    /// define.
    InvalidEscapeSequence {
        /// The offending sequence, including the backslash.
        sequence: String,
        /// The source line where the error occurred.
        line:     usize,
        /// The source column where the error occurred.
        column:   usize,
    },
    /// A `}` was found with no `{` still open.
    NoMatchingLeftBrace {
        /// The source line where the error occurred.
        line:   usize,
        /// The source column where the error occurred.
        column: usize,
    },
    /// A string literal was opened but never closed.
    QuotesNotClosed {
        /// The source line where the error occurred.
        line:   usize,
        /// The source column where the error occurred.
        column: usize,
    },
    /// A character that is not part of the language's alphabet.
    UnknownSymbol {
        /// The offending text.
        symbol: String,
        /// The source line where the error occurred.
        line:   usize,
        /// The source column where the error occurred.
        column: usize,
    },
    /// A numeric literal runs directly into identifier characters, such as
    /// `12ab`.
    UnexpectedNumberEnding {
        /// The offending text.
        text:   String,
        /// The source line where the error occurred.
        line:   usize,
        /// The source column where the error occurred.
        column: usize,
    },
}

impl std::fmt::Display for LexerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Expected { expected, line, column } => {
                write!(f, "expected '{expected}' ({line}:{column})")
            },
            Self::InvalidEscapeSequence { sequence, line, column } => {
                write!(f, "invalid escape sequence '{sequence}' ({line}:{column})")
            },
            Self::NoMatchingLeftBrace { line, column } => {
                write!(f, "no matching left brace ({line}:{column})")
            },
            Self::QuotesNotClosed { line, column } => {
                write!(f, "quotes not closed ({line}:{column})")
            },
            Self::UnknownSymbol { symbol, line, column } => {
                write!(f, "unknown symbol '{symbol}' ({line}:{column})")
            },
            Self::UnexpectedNumberEnding { text, line, column } => {
                write!(f, "unexpected number ending in '{text}' ({line}:{column})")
            },
        }
    }
}

impl std::error::Error for LexerError {}
