use crate::{
    ast::{Marker, Node, NodeKind},
    error::ParserError,
    interpreter::{
        parser::core::{ExprKind, ParseResult, Parser, node_with_children},
        tables::{ConstType, ScalarType},
    },
    util::num::i64_to_usize_checked,
};

/// The comparison operators, longest spellings first.
pub(crate) const COMPARISON_OPERATORS: &[&str] = &["==", "!=", "<=", ">=", "<", ">"];

impl Parser<'_> {
    /// Parses an arithmetic expression.
    ///
    /// Grammar: `arith := term (("+" | "-") term)*`, left-associative.
    pub(crate) fn parse_arith_expression(&mut self) -> ParseResult<Node> {
        let mut left = self.parse_arith_term()?;
        while let Some(op) = self.eat_any_operator(&["+", "-"]) {
            let right = self.parse_arith_term()?;
            left = node_with_children(op, vec![left, right]);
        }
        Ok(left)
    }

    /// Grammar: `term := signed_factor (("*" | "/" | "%") signed_factor)*`
    fn parse_arith_term(&mut self) -> ParseResult<Node> {
        let mut left = self.parse_signed_factor()?;
        while let Some(op) = self.eat_any_operator(&["*", "/", "%"]) {
            let right = self.parse_signed_factor()?;
            left = node_with_children(op, vec![left, right]);
        }
        Ok(left)
    }

    /// Grammar: `signed_factor := ("+" | "-")? signed_factor | factor`
    ///
    /// A leading `-` becomes a one-child operator node; a leading `+` is
    /// transparent.
    fn parse_signed_factor(&mut self) -> ParseResult<Node> {
        if let Some(minus) = self.eat_operator("-") {
            let operand = self.parse_signed_factor()?;
            return Ok(node_with_children(minus, vec![operand]));
        }
        if self.eat_operator("+").is_some() {
            return self.parse_signed_factor();
        }
        self.parse_arith_factor()
    }

    /// Grammar: `factor := literal | "(" arith ")" | atoi | atof |
    /// identifier indexation*`
    fn parse_arith_factor(&mut self) -> ParseResult<Node> {
        if let Some(token) = self.peek() {
            if token.is_constant_of_type(self.tables, ConstType::Int)
               || token.is_constant_of_type(self.tables, ConstType::Double)
            {
                self.advance();
                return Ok(token.to_node());
            }
            if self.eat_operator("(").is_some() {
                let inner = self.parse_arith_expression()?;
                self.expect_operator(")")?;
                return Ok(inner);
            }
            if token.is_any_keyword(self.tables, &["atoi", "atof"]) {
                self.advance();
                self.expect_operator("(")?;
                let argument = self.parse_string_expression()?;
                self.expect_operator(")")?;
                return Ok(node_with_children(token, vec![argument]));
            }
            if token.identifier_index().is_some() {
                return self.parse_identifier_use(&[ScalarType::Int, ScalarType::Double]);
            }
        }
        Err(self.err_expected("an arithmetic operand"))
    }

    /// Parses a string expression.
    ///
    /// Grammar: `string := string_factor ("+" string_factor)*`
    /// (concatenation, left-associative).
    pub(crate) fn parse_string_expression(&mut self) -> ParseResult<Node> {
        let mut left = self.parse_string_factor()?;
        while let Some(op) = self.eat_operator("+") {
            let right = self.parse_string_factor()?;
            left = node_with_children(op, vec![left, right]);
        }
        Ok(left)
    }

    /// Grammar: `string_factor := literal | to_string | scan |
    /// identifier indexation*`
    fn parse_string_factor(&mut self) -> ParseResult<Node> {
        if let Some(token) = self.peek() {
            if token.is_constant_of_type(self.tables, ConstType::Str) {
                self.advance();
                return Ok(token.to_node());
            }
            if token.is_keyword(self.tables, "to_string") {
                self.advance();
                self.expect_operator("(")?;
                // The argument's kind is ambiguous from its first token;
                // attempt boolean, then arithmetic, then string.
                let argument = self.try_alternatives(&[Self::parse_bool_expression,
                                                       Self::parse_arith_expression,
                                                       Self::parse_string_expression])?;
                self.expect_operator(")")?;
                return Ok(node_with_children(token, vec![argument]));
            }
            if token.is_keyword(self.tables, "scan") {
                self.advance();
                self.expect_operator("(")?;
                self.expect_operator(")")?;
                return Ok(token.to_node());
            }
            if token.identifier_index().is_some() {
                return self.parse_identifier_use(&[ScalarType::Str]);
            }
        }
        Err(self.err_expected("a string operand"))
    }

    /// Parses a comparison between two operands of the same kind.
    ///
    /// Attempts arithmetic operands first, then string operands, restoring
    /// the cursor between attempts. When both fail but the operands *do*
    /// parse as different kinds, the mismatch is reported as
    /// `CannotCompare` rather than a generic compound failure.
    pub(crate) fn parse_comparison(&mut self) -> ParseResult<Node> {
        let start = self.checkpoint();
        let mut attempts = Vec::new();
        for kind in [ExprKind::Arithmetic, ExprKind::Text] {
            match self.parse_comparison_of_kind(kind) {
                Ok(node) => return Ok(node),
                Err(error @ ParserError::CannotCompare { .. }) => return Err(error),
                Err(error) => {
                    attempts.push(error);
                    self.rollback(start);
                },
            }
        }
        if let Some(mismatch) = self.detect_kind_mismatch(start) {
            self.rollback(start);
            return Err(mismatch);
        }
        self.rollback(start);
        Err(ParserError::Compound { attempts })
    }

    fn parse_comparison_of_kind(&mut self, kind: ExprKind) -> ParseResult<Node> {
        let left = self.parse_expression_of_kind(kind)?;
        let op = self.eat_any_operator(COMPARISON_OPERATORS)
                     .ok_or_else(|| self.err_expected("a comparison operator"))?;
        let right = self.parse_expression_of_kind(kind)?;
        Ok(node_with_children(op, vec![left, right]))
    }

    /// Checks whether the operands around a comparison operator parse as
    /// *different* kinds, which is a `CannotCompare` error at the
    /// operator's position.
    fn detect_kind_mismatch(&mut self, start: usize) -> Option<ParserError> {
        for (left_kind, right_kind) in [(ExprKind::Arithmetic, ExprKind::Text),
                                        (ExprKind::Text, ExprKind::Arithmetic)]
        {
            self.rollback(start);
            if self.parse_expression_of_kind(left_kind).is_err() {
                continue;
            }
            let Some(op) = self.eat_any_operator(COMPARISON_OPERATORS) else {
                continue;
            };
            if self.parse_expression_of_kind(right_kind).is_ok() {
                return Some(ParserError::CannotCompare { line: op.line, column: op.column });
            }
        }
        None
    }

    /// Parses a use of a variable, with any index brackets, and checks that
    /// its effective type is one of `allowed`.
    ///
    /// # Errors
    /// - `UsingOfNotDeclared` if no enclosing block declares the name.
    /// - `IncorrectNumOfIndexes` if the bracket count does not match the
    ///   declared dimensionality.
    /// - `InvalidVarType` if the effective type does not fit the context.
    pub(crate) fn parse_identifier_use(&mut self, allowed: &[ScalarType]) -> ParseResult<Node> {
        let (node, effective) = self.parse_variable_access()?;
        if allowed.contains(&effective) {
            return Ok(node);
        }
        let (line, column) = (node.line, node.column);
        Err(ParserError::InvalidVarType { name: self.access_name(&node), line, column })
    }

    /// Parses a variable use with its index brackets, resolving the name
    /// through the scope stack and validating the index count.
    ///
    /// Returns the access node (a bare identifier or an `Indexation`
    /// marker) and the effective scalar type of the access. A string
    /// variable or string array element may take one extra index, which
    /// selects a single character and is itself string-typed.
    pub(crate) fn parse_variable_access(&mut self) -> ParseResult<(Node, ScalarType)> {
        let (token, name) = self.expect_identifier()?;
        let record = self.scopes.resolve(self.tables, &name, token.line, token.column)?;
        let ident = Node::leaf(NodeKind::Identifier(record), token.line, token.column);

        let Some(ty) = self.tables.variable(record).ty.clone() else {
            return Err(ParserError::UsingOfNotDeclared { name,
                                                         line: token.line,
                                                         column: token.column });
        };

        let mut indexes = Vec::new();
        while self.eat_operator("[").is_some() {
            indexes.push(self.parse_arith_expression()?);
            self.expect_operator("]")?;
        }

        let dims = ty.dims.len();
        let effective = if indexes.len() == dims {
            ty.element
        } else if indexes.len() == dims + 1 && ty.element == ScalarType::Str {
            // One extra index selects a single character of a string.
            ScalarType::Str
        } else {
            return Err(ParserError::IncorrectNumOfIndexes { name,
                                                            found: indexes.len(),
                                                            line: token.line,
                                                            column: token.column });
        };

        if indexes.is_empty() {
            return Ok((ident, effective));
        }

        let mut children = vec![ident];
        children.append(&mut indexes);
        Ok((Node::marker(Marker::Indexation, children, token.line, token.column), effective))
    }

    /// The variable name behind an access node, for diagnostics.
    pub(crate) fn access_name(&self, node: &Node) -> String {
        let ident = if node.is_marker(Marker::Indexation) { &node.children[0] } else { node };
        ident.identifier_index()
             .map_or_else(String::new, |index| self.tables.variable(index).name.clone())
    }

    /// Parses a declared array dimension: a positive integer literal.
    ///
    /// # Errors
    /// `ArrSizeLessThanOne` for `0` (or a size too large for the host);
    /// `Expected` if the token is not an integer literal.
    pub(crate) fn parse_array_size(&mut self) -> ParseResult<usize> {
        let Some(token) = self.peek() else {
            return Err(self.err_expected("an array size"));
        };
        let Some(index) = token.constant_index() else {
            return Err(self.err_expected("an integer array size"));
        };
        let constant = self.tables.constant(index);
        if constant.ty != ConstType::Int {
            return Err(self.err_expected("an integer array size"));
        }
        let less_than_one = ParserError::ArrSizeLessThanOne { line:   token.line,
                                                             column: token.column, };
        let size = constant.value
                           .parse::<i64>()
                           .map_err(|_| less_than_one.clone())
                           .and_then(|v| i64_to_usize_checked(v, less_than_one.clone()))?;
        if size < 1 {
            return Err(less_than_one);
        }
        self.advance();
        Ok(size)
    }
}
