use crate::{
    ast::{Marker, Node},
    error::ParserError,
    interpreter::{
        lexer::Token,
        parser::scope::ScopeStack,
        tables::Tables,
    },
};

pub type ParseResult<T> = Result<T, ParserError>;

/// The expression kinds a speculative parse chooses between.
///
/// Comparisons require both operands to resolve to the same kind, and a
/// `switch` remembers its kind so `case` labels can be checked against it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExprKind {
    /// An int- or double-valued expression.
    Arithmetic,
    /// A string-valued expression.
    Text,
}

/// Builds the syntax tree for a whole token stream.
///
/// Identifier binding happens as a side effect: the identifier table is
/// back-filled with types and scopes as declarations are parsed, and every
/// identifier node in the returned tree references the specific variable
/// record for the scope it is used in.
///
/// # Errors
/// Returns the first [`ParserError`] encountered; the parser never
/// recovers and continues past a failure.
pub fn create_syntax_tree(tokens: &[Token], tables: &mut Tables) -> ParseResult<Node> {
    Parser::new(tokens, tables).parse_program()
}

/// The recursive-descent syntax, scope, and type analyzer.
///
/// The parser owns a cursor into the token slice. Speculative productions
/// record the cursor with [`Parser::checkpoint`], attempt one candidate,
/// and restore it exactly with [`Parser::rollback`] before attempting the
/// next, collecting every failure so diagnostics do not collapse to the
/// least specific error.
pub struct Parser<'t> {
    tokens: &'t [Token],
    pos:    usize,
    pub(crate) tables: &'t mut Tables,
    pub(crate) scopes: ScopeStack,
    /// How many loop bodies enclose the current position.
    pub(crate) loop_depth: usize,
    /// The kinds of every enclosing `switch`, innermost last.
    pub(crate) switch_kinds: Vec<ExprKind>,
}

impl<'t> Parser<'t> {
    /// Creates a parser positioned at the first token.
    pub fn new(tokens: &'t [Token], tables: &'t mut Tables) -> Self {
        Self { tokens,
               pos: 0,
               tables,
               scopes: ScopeStack::new(),
               loop_depth: 0,
               switch_kinds: Vec::new() }
    }

    /// Parses the whole token stream into a `Program` node.
    pub fn parse_program(&mut self) -> ParseResult<Node> {
        let mut statements = Vec::new();
        while self.peek().is_some() {
            statements.push(self.parse_statement()?);
        }
        Ok(Node::marker(Marker::Program, statements, 1, 1))
    }

    /// The current token, without consuming it.
    pub(crate) fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos).copied()
    }

    /// Consumes and returns the current token.
    pub(crate) fn advance(&mut self) -> Option<Token> {
        let token = self.peek();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    /// Records the cursor for a later [`Parser::rollback`].
    pub(crate) const fn checkpoint(&self) -> usize {
        self.pos
    }

    /// Restores the cursor recorded by [`Parser::checkpoint`].
    pub(crate) const fn rollback(&mut self, checkpoint: usize) {
        self.pos = checkpoint;
    }

    /// The source position of the current token, or of the last token when
    /// the stream is exhausted.
    pub(crate) fn position(&self) -> (usize, usize) {
        self.tokens
            .get(self.pos)
            .or_else(|| self.tokens.last())
            .map_or((1, 1), |token| (token.line, token.column))
    }

    /// An `Expected` error at the current position, or `Unexpected` when
    /// the stream ended prematurely.
    pub(crate) fn err_expected(&self, expected: &str) -> ParserError {
        let (line, column) = self.position();
        if self.pos >= self.tokens.len() {
            ParserError::Unexpected { line, column }
        } else {
            ParserError::Expected { expected: expected.to_string(), line, column }
        }
    }

    /// Whether the current token is the given operator.
    pub(crate) fn check_operator(&self, text: &str) -> bool {
        self.peek().is_some_and(|token| token.is_operator(self.tables, text))
    }

    /// Whether the current token is the given keyword.
    pub(crate) fn check_keyword(&self, text: &str) -> bool {
        self.peek().is_some_and(|token| token.is_keyword(self.tables, text))
    }

    /// Consumes the current token if it is the given operator.
    pub(crate) fn eat_operator(&mut self, text: &str) -> Option<Token> {
        if self.check_operator(text) { self.advance() } else { None }
    }

    /// Consumes the current token if it is any of the given operators.
    pub(crate) fn eat_any_operator(&mut self, texts: &[&str]) -> Option<Token> {
        if self.peek().is_some_and(|token| token.is_any_operator(self.tables, texts)) {
            self.advance()
        } else {
            None
        }
    }

    /// Consumes the current token if it is the given keyword.
    pub(crate) fn eat_keyword(&mut self, text: &str) -> Option<Token> {
        if self.check_keyword(text) { self.advance() } else { None }
    }

    /// Consumes the given operator or fails with `Expected`.
    pub(crate) fn expect_operator(&mut self, text: &str) -> ParseResult<Token> {
        self.eat_operator(text)
            .ok_or_else(|| self.err_expected(&format!("'{text}'")))
    }

    /// Consumes the given keyword or fails with `Expected`.
    pub(crate) fn expect_keyword(&mut self, text: &str) -> ParseResult<Token> {
        self.eat_keyword(text)
            .ok_or_else(|| self.err_expected(&format!("'{text}'")))
    }

    /// Consumes an identifier token, returning it together with its
    /// spelling.
    pub(crate) fn expect_identifier(&mut self) -> ParseResult<(Token, String)> {
        match self.peek() {
            Some(token) => match token.identifier_index() {
                Some(index) => {
                    self.advance();
                    Ok((token, self.tables.variable(index).name.clone()))
                },
                None => Err(self.err_expected("an identifier")),
            },
            None => Err(self.err_expected("an identifier")),
        }
    }

    /// Attempts each alternative in order, restoring the cursor between
    /// attempts.
    ///
    /// The first success wins. A `CannotCompare` failure is definitive and
    /// propagates immediately; any other failure is recorded and the next
    /// candidate tried. When every candidate fails the collected failures
    /// are returned as one `Compound` error.
    pub(crate) fn try_alternatives(&mut self,
                                   alternatives: &[fn(&mut Self) -> ParseResult<Node>])
                                   -> ParseResult<Node> {
        let start = self.checkpoint();
        let mut attempts = Vec::new();
        for parse in alternatives {
            match parse(self) {
                Ok(node) => return Ok(node),
                Err(error @ ParserError::CannotCompare { .. }) => return Err(error),
                Err(error) => {
                    attempts.push(error);
                    self.rollback(start);
                },
            }
        }
        Err(ParserError::Compound { attempts })
    }

    /// Parses an expression of the given kind.
    pub(crate) fn parse_expression_of_kind(&mut self, kind: ExprKind) -> ParseResult<Node> {
        match kind {
            ExprKind::Arithmetic => self.parse_arith_expression(),
            ExprKind::Text => self.parse_string_expression(),
        }
    }
}

/// An interior node denoting the same table entry as `token`, with the
/// given children.
pub(crate) fn node_with_children(token: Token, children: Vec<Node>) -> Node {
    let mut node = token.to_node();
    node.children = children;
    node
}
