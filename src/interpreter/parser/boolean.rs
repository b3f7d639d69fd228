use crate::{
    ast::Node,
    interpreter::{
        parser::core::{ParseResult, Parser, node_with_children},
        tables::ScalarType,
    },
};

impl Parser<'_> {
    /// Parses a boolean expression.
    ///
    /// Grammar: `bool := bool_and ("||" bool_and)*`, left-associative.
    pub(crate) fn parse_bool_expression(&mut self) -> ParseResult<Node> {
        let mut left = self.parse_bool_and()?;
        while let Some(op) = self.eat_operator("||") {
            let right = self.parse_bool_and()?;
            left = node_with_children(op, vec![left, right]);
        }
        Ok(left)
    }

    /// Grammar: `bool_and := bool_not ("&&" bool_not)*`
    fn parse_bool_and(&mut self) -> ParseResult<Node> {
        let mut left = self.parse_bool_not()?;
        while let Some(op) = self.eat_operator("&&") {
            let right = self.parse_bool_not()?;
            left = node_with_children(op, vec![left, right]);
        }
        Ok(left)
    }

    /// Grammar: `bool_not := "!" bool_not | bool_factor`
    fn parse_bool_not(&mut self) -> ParseResult<Node> {
        if let Some(bang) = self.eat_operator("!") {
            let operand = self.parse_bool_not()?;
            return Ok(node_with_children(bang, vec![operand]));
        }
        self.parse_bool_factor()
    }

    /// Parses a boolean factor.
    ///
    /// The candidates are ambiguous from the first token alone (a `(` may
    /// open a nested boolean expression *or* a parenthesized comparison
    /// operand), so each is attempted speculatively in a fixed order:
    /// literal, `atob`, comparison, parenthesized boolean, boolean
    /// identifier.
    fn parse_bool_factor(&mut self) -> ParseResult<Node> {
        self.try_alternatives(&[Self::parse_bool_literal,
                                Self::parse_atob,
                                Self::parse_comparison,
                                Self::parse_parenthesized_bool,
                                Self::parse_bool_identifier])
    }

    /// `true` or `false`.
    fn parse_bool_literal(&mut self) -> ParseResult<Node> {
        if let Some(token) = self.peek()
           && token.is_any_keyword(self.tables, &["true", "false"])
        {
            self.advance();
            return Ok(token.to_node());
        }
        Err(self.err_expected("'true' or 'false'"))
    }

    /// `atob(` string `)`.
    fn parse_atob(&mut self) -> ParseResult<Node> {
        let token = self.expect_keyword("atob")?;
        self.expect_operator("(")?;
        let argument = self.parse_string_expression()?;
        self.expect_operator(")")?;
        Ok(node_with_children(token, vec![argument]))
    }

    /// `(` bool `)`.
    fn parse_parenthesized_bool(&mut self) -> ParseResult<Node> {
        self.expect_operator("(")?;
        let inner = self.parse_bool_expression()?;
        self.expect_operator(")")?;
        Ok(inner)
    }

    /// A use of a `bool`-typed variable (scalar, or array element with a
    /// full set of indexes).
    fn parse_bool_identifier(&mut self) -> ParseResult<Node> {
        self.parse_identifier_use(&[ScalarType::Bool])
    }
}
