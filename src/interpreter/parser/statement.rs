use crate::{
    ast::{Marker, Node, NodeKind},
    error::ParserError,
    interpreter::{
        lexer::TokenKind,
        parser::core::{ExprKind, ParseResult, Parser, node_with_children},
        tables::{ConstType, ScalarType, VarType},
    },
};

impl Parser<'_> {
    /// Parses a single statement.
    ///
    /// A statement is a compound block, an assignment, or one of the
    /// keyword-introduced constructs (declaration, control flow, switch
    /// label, `break`, `print`).
    pub(crate) fn parse_statement(&mut self) -> ParseResult<Node> {
        let Some(token) = self.peek() else {
            return Err(self.err_expected("a statement"));
        };

        if token.is_operator(self.tables, "{") {
            return self.parse_compound_statement();
        }
        if token.identifier_index().is_some() {
            let assignment = self.parse_assignment()?;
            self.expect_operator(";")?;
            return Ok(assignment);
        }
        if let TokenKind::Keyword(index) = token.kind {
            let keyword = self.tables.keyword(index).to_string();
            return match keyword.as_str() {
                "if" => self.parse_if(),
                "while" => self.parse_while(),
                "for" => self.parse_for(),
                "switch" => self.parse_switch(),
                "case" => self.parse_case(),
                "default" => self.parse_default(),
                "break" => self.parse_break(),
                "print" => self.parse_print(),
                "int" | "double" | "bool" | "string" => self.parse_declaration(),
                _ => Err(self.err_expected("a statement")),
            };
        }
        Err(self.err_expected("a statement"))
    }

    /// Parses a `{}`-delimited block, entering and leaving a scope frame.
    pub(crate) fn parse_compound_statement(&mut self) -> ParseResult<Node> {
        let brace = self.expect_operator("{")?;
        self.scopes.enter_block();
        let mut statements = Vec::new();
        loop {
            if self.eat_operator("}").is_some() {
                break;
            }
            if self.peek().is_none() {
                return Err(self.err_expected("'}'"));
            }
            statements.push(self.parse_statement()?);
        }
        self.scopes.exit_block();
        Ok(Node::marker(Marker::CompoundStatement, statements, brace.line, brace.column))
    }

    /// Parses a declaration statement.
    ///
    /// Grammar: `declaration := type declarator ("," declarator)* ";"` with
    /// `declarator := name ("[" size "]")* ("=" initializer)?`. Array
    /// declarators reject initializers; the initializer of a scalar is
    /// parsed according to the declared type.
    fn parse_declaration(&mut self) -> ParseResult<Node> {
        let Some(type_token) = self.advance() else {
            return Err(self.err_expected("a type name"));
        };
        let element = if type_token.is_keyword(self.tables, "int") {
            ScalarType::Int
        } else if type_token.is_keyword(self.tables, "double") {
            ScalarType::Double
        } else if type_token.is_keyword(self.tables, "bool") {
            ScalarType::Bool
        } else if type_token.is_keyword(self.tables, "string") {
            ScalarType::Str
        } else {
            return Err(self.err_expected("a type name"));
        };

        let mut declarators = Vec::new();
        loop {
            let (name_token, name) = self.expect_identifier()?;

            let mut dims = Vec::new();
            while self.eat_operator("[").is_some() {
                dims.push(self.parse_array_size()?);
                self.expect_operator("]")?;
            }
            let is_array = !dims.is_empty();

            let record = self.scopes.declare(self.tables,
                                             &name,
                                             VarType { element, dims },
                                             name_token.line,
                                             name_token.column)?;
            let ident = Node::leaf(NodeKind::Identifier(record),
                                   name_token.line,
                                   name_token.column);

            if let Some(eq) = self.eat_operator("=") {
                if is_array {
                    return Err(ParserError::ArrayInitialization { line:   eq.line,
                                                                  column: eq.column, });
                }
                let value = self.parse_initializer(element)?;
                declarators.push(node_with_children(eq, vec![ident, value]));
            } else {
                declarators.push(ident);
            }

            if self.eat_operator(",").is_none() {
                break;
            }
        }
        self.expect_operator(";")?;

        Ok(Node::marker(Marker::Declare, declarators, type_token.line, type_token.column))
    }

    /// Parses an initializer or assignment right-hand side for a target of
    /// the given scalar type.
    fn parse_initializer(&mut self, element: ScalarType) -> ParseResult<Node> {
        match element {
            ScalarType::Int | ScalarType::Double => self.parse_arith_expression(),
            ScalarType::Bool => self.parse_bool_expression(),
            ScalarType::Str => self.parse_string_expression(),
        }
    }

    /// Parses an assignment without its trailing `;` (so `for` clauses can
    /// reuse it).
    ///
    /// The target is a variable access with any index brackets; the
    /// right-hand side is parsed according to the access's effective type,
    /// so a string-element character write takes a string expression.
    pub(crate) fn parse_assignment(&mut self) -> ParseResult<Node> {
        let (target, effective) = self.parse_variable_access()?;
        let eq = self.expect_operator("=")?;
        let value = self.parse_initializer(effective)?;
        Ok(node_with_children(eq, vec![target, value]))
    }

    /// Grammar: `if := "if" "(" bool ")" statement ("else" statement)?`
    fn parse_if(&mut self) -> ParseResult<Node> {
        let kw = self.expect_keyword("if")?;
        self.expect_operator("(")?;
        let condition = self.parse_bool_expression()?;
        self.expect_operator(")")?;
        let then_branch = self.parse_statement()?;
        let mut children = vec![condition, then_branch];
        if self.eat_keyword("else").is_some() {
            children.push(self.parse_statement()?);
        }
        Ok(node_with_children(kw, children))
    }

    /// Grammar: `while := "while" "(" bool ")" statement`
    fn parse_while(&mut self) -> ParseResult<Node> {
        let kw = self.expect_keyword("while")?;
        self.expect_operator("(")?;
        let condition = self.parse_bool_expression()?;
        self.expect_operator(")")?;
        self.loop_depth += 1;
        let body = self.parse_statement();
        self.loop_depth -= 1;
        Ok(node_with_children(kw, vec![condition, body?]))
    }

    /// Grammar: `for := "for" "(" assignment? ";" bool? ";" assignment? ")"
    /// statement`
    ///
    /// Each clause is optional; an absent clause becomes an empty compound
    /// node, and the interpreter treats an absent condition as always true.
    fn parse_for(&mut self) -> ParseResult<Node> {
        let kw = self.expect_keyword("for")?;
        self.expect_operator("(")?;
        let init = if self.check_operator(";") {
            self.empty_clause()
        } else {
            self.parse_assignment()?
        };
        self.expect_operator(";")?;
        let condition = if self.check_operator(";") {
            self.empty_clause()
        } else {
            self.parse_bool_expression()?
        };
        self.expect_operator(";")?;
        let step = if self.check_operator(")") {
            self.empty_clause()
        } else {
            self.parse_assignment()?
        };
        self.expect_operator(")")?;
        self.loop_depth += 1;
        let body = self.parse_statement();
        self.loop_depth -= 1;
        Ok(node_with_children(kw, vec![init, condition, step, body?]))
    }

    fn empty_clause(&self) -> Node {
        let (line, column) = self.position();
        Node::marker(Marker::CompoundStatement, Vec::new(), line, column)
    }

    /// Grammar: `switch := "switch" "(" expr ")" compound`
    ///
    /// The controlling expression's kind is ambiguous from its first token;
    /// arithmetic is attempted before string, and the winning kind is
    /// pushed for the body so `case` labels can be checked against it.
    fn parse_switch(&mut self) -> ParseResult<Node> {
        let kw = self.expect_keyword("switch")?;
        self.expect_operator("(")?;

        let start = self.checkpoint();
        let mut attempts = Vec::new();
        let mut parsed = None;
        for kind in [ExprKind::Arithmetic, ExprKind::Text] {
            self.rollback(start);
            match self.parse_expression_of_kind(kind) {
                Ok(expr) => {
                    if self.check_operator(")") {
                        parsed = Some((expr, kind));
                        break;
                    }
                    attempts.push(self.err_expected("')'"));
                },
                Err(error) => attempts.push(error),
            }
        }
        let Some((expr, kind)) = parsed else {
            return Err(ParserError::Compound { attempts });
        };
        self.expect_operator(")")?;

        self.switch_kinds.push(kind);
        let body = self.parse_compound_statement();
        self.switch_kinds.pop();

        Ok(node_with_children(kw, vec![expr, body?]))
    }

    /// Grammar: `case := "case" literal ":"`
    ///
    /// A label node carries no statement children; the statements that
    /// belong to a case are simply its following siblings (C-style
    /// fallthrough).
    fn parse_case(&mut self) -> ParseResult<Node> {
        let kw = self.expect_keyword("case")?;
        let Some(kind) = self.switch_kinds.last().copied() else {
            return Err(ParserError::ForbiddenStatement { statement: "case".to_string(),
                                                         line:      kw.line,
                                                         column:    kw.column, });
        };
        let required = match kind {
            ExprKind::Arithmetic => ConstType::Int,
            ExprKind::Text => ConstType::Str,
        };
        let Some(token) = self.peek() else {
            return Err(self.err_expected("a case value"));
        };
        if !token.is_constant_of_type(self.tables, required) {
            return Err(self.err_expected("a case value of the switch's kind"));
        }
        self.advance();
        self.expect_operator(":")?;
        Ok(node_with_children(kw, vec![token.to_node()]))
    }

    /// Grammar: `default := "default" ":"`
    fn parse_default(&mut self) -> ParseResult<Node> {
        let kw = self.expect_keyword("default")?;
        if self.switch_kinds.is_empty() {
            return Err(ParserError::ForbiddenStatement { statement: "default".to_string(),
                                                         line:      kw.line,
                                                         column:    kw.column, });
        }
        self.expect_operator(":")?;
        Ok(kw.to_node())
    }

    /// Grammar: `break := "break" ";"`
    fn parse_break(&mut self) -> ParseResult<Node> {
        let kw = self.expect_keyword("break")?;
        if self.loop_depth == 0 && self.switch_kinds.is_empty() {
            return Err(ParserError::ForbiddenStatement { statement: "break".to_string(),
                                                         line:      kw.line,
                                                         column:    kw.column, });
        }
        self.expect_operator(";")?;
        Ok(kw.to_node())
    }

    /// Grammar: `print := "print" "(" string ")" ";"`
    fn parse_print(&mut self) -> ParseResult<Node> {
        let kw = self.expect_keyword("print")?;
        self.expect_operator("(")?;
        let argument = self.parse_string_expression()?;
        self.expect_operator(")")?;
        self.expect_operator(";")?;
        Ok(node_with_children(kw, vec![argument]))
    }
}
