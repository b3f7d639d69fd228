use logos::Logos;

use crate::{
    ast::{Node, NodeKind},
    error::LexerError,
    interpreter::tables::{Constant, ConstType, Tables},
};

/// Every keyword of the language, including the type names, the built-in
/// conversions, and the boolean literals (which live in the keyword table
/// because the constants table only holds int, double, and string
/// literals).
pub const KEYWORDS: &[&str] = &["int", "double", "bool", "string", "if", "else", "while", "for",
                               "switch", "case", "default", "break", "print", "scan", "atoi",
                               "atof", "atob", "to_string", "true", "false"];

/// Additional information carried by the lexer during tokenization.
///
/// Tracks the current line number and the byte offset of its first
/// character, so every token can be given a 1-based `(line, column)`
/// position.
#[derive(Default)]
pub struct LexerExtras {
    /// The current line number in the source being tokenized.
    pub line:       usize,
    /// Byte offset at which the current line starts.
    pub line_start: usize,
}

/// The raw shapes recognized in source text, before interning.
///
/// Classification into the four token classes (and all table bookkeeping)
/// happens in [`tokenize`]; this enum only distinguishes the lexical
/// shapes, including the malformed ones that carry their own error.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(extras = LexerExtras)]
#[logos(skip r"[ \t\r\f]+")]
#[logos(skip r"//[^\n]*")]
pub enum RawToken {
    /// Floating-point literal tokens, such as `3.14`.
    #[regex(r"[0-9]+\.[0-9]+")]
    DoubleLit,
    /// Integer literal tokens, such as `42`.
    #[regex(r"[0-9]+")]
    IntLit,
    /// A numeric literal running directly into identifier characters, such
    /// as `12ab`. Matched as one token so the error points at the whole
    /// malformed spelling.
    #[regex(r"([0-9]+\.[0-9]+|[0-9]+)[A-Za-z_][A-Za-z0-9_]*")]
    BadNumber,
    /// String literal tokens, quotes included, escapes still raw.
    #[regex(r#""([^"\\\n]|\\[^\n])*""#)]
    StrLit,
    /// A string literal that reaches a newline or end of input before its
    /// closing quote.
    #[regex(r#""([^"\\\n]|\\[^\n])*"#)]
    UnterminatedStr,
    /// Keyword or identifier spellings.
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Word,
    /// Any complete operator or punctuation spelling.
    #[regex(r"==|!=|<=|>=|&&|\|\||[+*/%<>=!;:,(){}\[\]-]")]
    Operator,
    /// A lone `&`; only `&&` is an operator.
    #[token("&")]
    Amp,
    /// A lone `|`; only `||` is an operator.
    #[token("|")]
    Pipe,
    /// Newlines; skipped, but they advance the position tracking.
    #[token("\n", newline)]
    Newline,
}

fn newline(lex: &mut logos::Lexer<RawToken>) -> logos::Skip {
    lex.extras.line += 1;
    lex.extras.line_start = lex.span().end;
    logos::Skip
}

/// Classifies a lexical token by the table it was interned into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// An operator; the payload indexes the operators table.
    Operator(usize),
    /// A keyword; the payload indexes the keywords table.
    Keyword(usize),
    /// An identifier; the payload indexes the identifier table (the shared
    /// placeholder record for this spelling, until the parser re-binds it).
    Identifier(usize),
    /// A literal; the payload indexes the constants table.
    Constant(usize),
}

/// A lexical token: a table reference plus a 1-based source position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    /// Which table entry this token denotes.
    pub kind:   TokenKind,
    /// 1-based source line.
    pub line:   usize,
    /// 1-based source column.
    pub column: usize,
}

impl Token {
    /// Whether this token is the given operator.
    pub fn is_operator(&self, tables: &Tables, text: &str) -> bool {
        matches!(self.kind, TokenKind::Operator(index) if tables.operator(index) == text)
    }

    /// Whether this token is any of the given operators.
    pub fn is_any_operator(&self, tables: &Tables, texts: &[&str]) -> bool {
        matches!(self.kind, TokenKind::Operator(index)
                 if texts.contains(&tables.operator(index)))
    }

    /// Whether this token is the given keyword.
    pub fn is_keyword(&self, tables: &Tables, text: &str) -> bool {
        matches!(self.kind, TokenKind::Keyword(index) if tables.keyword(index) == text)
    }

    /// Whether this token is any of the given keywords.
    pub fn is_any_keyword(&self, tables: &Tables, texts: &[&str]) -> bool {
        matches!(self.kind, TokenKind::Keyword(index)
                 if texts.contains(&tables.keyword(index)))
    }

    /// The identifier-table index, if this token is an identifier.
    pub fn identifier_index(&self) -> Option<usize> {
        match self.kind {
            TokenKind::Identifier(index) => Some(index),
            _ => None,
        }
    }

    /// The constants-table index, if this token is a constant.
    pub fn constant_index(&self) -> Option<usize> {
        match self.kind {
            TokenKind::Constant(index) => Some(index),
            _ => None,
        }
    }

    /// Whether this token is a constant of the given type.
    pub fn is_constant_of_type(&self, tables: &Tables, ty: ConstType) -> bool {
        matches!(self.kind, TokenKind::Constant(index) if tables.constant(index).ty == ty)
    }

    /// A childless syntax-tree node denoting the same table entry.
    pub const fn to_node(self) -> Node {
        let kind = match self.kind {
            TokenKind::Operator(index) => NodeKind::Operator(index),
            TokenKind::Keyword(index) => NodeKind::Keyword(index),
            TokenKind::Identifier(index) => NodeKind::Identifier(index),
            TokenKind::Constant(index) => NodeKind::Constant(index),
        };
        Node::leaf(kind, self.line, self.column)
    }
}

/// Splits source text into tokens and populates the four tables.
///
/// Every operator, keyword, and constant spelling is deduplicated, so equal
/// tokens across the program share one table slot; every distinct
/// identifier spelling gets one unbound placeholder record. Brace balance
/// is checked here so the parser can rely on every `}` having an opener.
///
/// # Errors
/// Returns a [`LexerError`] for unknown symbols, malformed or unterminated
/// literals, invalid escape sequences, a `}` with no open `{`, or a `{`
/// still open at end of input.
pub fn tokenize(source: &str) -> Result<(Vec<Token>, Tables), LexerError> {
    let mut lexer = RawToken::lexer_with_extras(source, LexerExtras { line: 1, line_start: 0 });
    let mut tables = Tables::new();
    let mut tokens = Vec::new();
    let mut brace_depth = 0usize;
    let mut last_position = (1, 1);

    while let Some(raw) = lexer.next() {
        let slice = lexer.slice();
        let line = lexer.extras.line;
        let column = lexer.span().start - lexer.extras.line_start + 1;
        last_position = (line, column);

        let kind = match raw {
            Ok(RawToken::IntLit) => {
                TokenKind::Constant(tables.intern_constant(Constant::new(slice, ConstType::Int)))
            },
            Ok(RawToken::DoubleLit) => {
                TokenKind::Constant(tables.intern_constant(Constant::new(slice,
                                                                         ConstType::Double)))
            },
            Ok(RawToken::StrLit) => {
                let contents = &slice[1..slice.len() - 1];
                validate_escapes(contents, line, column)?;
                TokenKind::Constant(tables.intern_constant(Constant::new(contents,
                                                                         ConstType::Str)))
            },
            Ok(RawToken::Word) => {
                if KEYWORDS.contains(&slice) {
                    TokenKind::Keyword(tables.intern_keyword(slice))
                } else {
                    TokenKind::Identifier(tables.intern_identifier(slice))
                }
            },
            Ok(RawToken::Operator) => {
                match slice {
                    "{" => brace_depth += 1,
                    "}" => {
                        if brace_depth == 0 {
                            return Err(LexerError::NoMatchingLeftBrace { line, column });
                        }
                        brace_depth -= 1;
                    },
                    _ => {},
                }
                TokenKind::Operator(tables.intern_operator(slice))
            },
            Ok(RawToken::Amp) => {
                return Err(LexerError::Expected { expected: "&&".to_string(), line, column });
            },
            Ok(RawToken::Pipe) => {
                return Err(LexerError::Expected { expected: "||".to_string(), line, column });
            },
            Ok(RawToken::BadNumber) => {
                return Err(LexerError::UnexpectedNumberEnding { text: slice.to_string(),
                                                                line,
                                                                column });
            },
            Ok(RawToken::UnterminatedStr) => {
                return Err(LexerError::QuotesNotClosed { line, column });
            },
            Ok(RawToken::Newline) => continue,
            Err(()) => {
                return Err(LexerError::UnknownSymbol { symbol: slice.to_string(),
                                                       line,
                                                       column });
            },
        };

        tokens.push(Token { kind, line, column });
    }

    if brace_depth > 0 {
        let (line, column) = last_position;
        return Err(LexerError::Expected { expected: "}".to_string(), line, column });
    }

    Ok((tokens, tables))
}

/// Decodes the escape sequences of a raw string constant.
///
/// Constants keep their raw, still-escaped source spelling in the table;
/// the evaluator calls this at the point of use.
pub fn decode_escapes(raw: &str) -> String {
    let mut decoded = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            decoded.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => decoded.push('\n'),
            Some('t') => decoded.push('\t'),
            Some('r') => decoded.push('\r'),
            Some('0') => decoded.push('\0'),
            Some(other) => decoded.push(other), // \\ \" \' decode to themselves
            None => {},
        }
    }
    decoded
}

fn validate_escapes(raw: &str, line: usize, column: usize) -> Result<(), LexerError> {
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            continue;
        }
        match chars.next() {
            Some('n' | 't' | 'r' | '0' | '\\' | '"' | '\'') => {},
            Some(other) => {
                return Err(LexerError::InvalidEscapeSequence { sequence: format!("\\{other}"),
                                                               line,
                                                               column });
            },
            None => {
                return Err(LexerError::InvalidEscapeSequence { sequence: "\\".to_string(),
                                                               line,
                                                               column });
            },
        }
    }
    Ok(())
}
