use std::io::{BufRead, Write};

use crate::{
    ast::{Marker, Node, NodeKind},
    error::RuntimeError,
    interpreter::{
        lexer::decode_escapes,
        tables::{ConstType, Tables},
        value::Value,
    },
};

pub type ExecResult<T> = Result<T, RuntimeError>;

/// How a statement finished.
///
/// `break` does not unwind through an exception-like channel; every
/// statement reports whether it completed normally or requested that the
/// innermost loop or `switch` stop, and the enclosing construct consumes
/// the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// The statement ran to completion.
    Normal,
    /// A `break` is propagating to the innermost loop or `switch`.
    Break,
}

/// The tree-walking interpreter.
///
/// Execution walks the syntax tree directly; variable storage lives in the
/// shared identifier table, so reads and writes go through the same records
/// the parser bound. Input and output are injected so programs can run
/// against in-memory streams as easily as the console.
pub struct Interpreter<'t, R, W> {
    pub(crate) tables: &'t mut Tables,
    pub(crate) input:  R,
    pub(crate) output: W,
}

impl<'t, R: BufRead, W: Write> Interpreter<'t, R, W> {
    /// Creates an interpreter over the given tables and streams.
    pub fn new(tables: &'t mut Tables, input: R, output: W) -> Self {
        Self { tables, input, output }
    }

    /// Executes a whole program.
    ///
    /// # Errors
    /// Returns the first [`RuntimeError`] raised; execution stops at the
    /// failing statement.
    pub fn run(&mut self, program: &Node) -> ExecResult<()> {
        for statement in &program.children {
            self.exec_statement(statement)?;
        }
        Ok(())
    }

    /// Executes one statement and reports how it finished.
    pub(crate) fn exec_statement(&mut self, statement: &Node) -> ExecResult<Flow> {
        match statement.kind {
            NodeKind::Marker(Marker::CompoundStatement) => self.exec_block(statement),
            NodeKind::Marker(Marker::Declare) => {
                self.exec_declare(statement)?;
                Ok(Flow::Normal)
            },
            NodeKind::Operator(_) if statement.is_operator(self.tables, "=") => {
                self.exec_assignment(statement)?;
                Ok(Flow::Normal)
            },
            NodeKind::Keyword(_) => self.exec_keyword_statement(statement),
            _ => Err(RuntimeError::at(statement, "not an executable statement")),
        }
    }

    /// Executes the statements of a block in order.
    ///
    /// A `Break` from any statement stops the block and propagates.
    pub(crate) fn exec_block(&mut self, block: &Node) -> ExecResult<Flow> {
        for statement in &block.children {
            if self.exec_statement(statement)? == Flow::Break {
                return Ok(Flow::Break);
            }
        }
        Ok(Flow::Normal)
    }

    fn exec_keyword_statement(&mut self, statement: &Node) -> ExecResult<Flow> {
        let keyword = statement.keyword_text(self.tables).unwrap_or_default().to_string();
        match keyword.as_str() {
            "if" => self.exec_if(statement),
            "while" => self.exec_while(statement),
            "for" => self.exec_for(statement),
            "switch" => self.exec_switch(statement),
            "break" => Ok(Flow::Break),
            "print" => {
                self.exec_print(statement)?;
                Ok(Flow::Normal)
            },
            // Labels carry no behavior of their own; control reaches them
            // only by falling through from a matched label above.
            "case" | "default" => Ok(Flow::Normal),
            _ => Err(RuntimeError::at(statement, "not an executable statement")),
        }
    }

    /// Evaluates an expression node to a value.
    pub(crate) fn eval(&mut self, node: &Node) -> ExecResult<Value> {
        match node.kind {
            NodeKind::Constant(index) => self.eval_constant(node, index),
            NodeKind::Identifier(index) => self.eval_variable(node, index),
            NodeKind::Marker(Marker::Indexation) => self.eval_indexation(node),
            NodeKind::Keyword(_) => self.eval_keyword(node),
            NodeKind::Operator(_) => self.eval_operator(node),
            NodeKind::Marker(_) => Err(RuntimeError::at(node, "not an expression")),
        }
    }

    fn eval_constant(&self, node: &Node, index: usize) -> ExecResult<Value> {
        let constant = self.tables.constant(index);
        match constant.ty {
            ConstType::Int => {
                constant.value
                        .parse::<i64>()
                        .map(Value::Int)
                        .map_err(|_| RuntimeError::at(node, "integer literal out of range"))
            },
            ConstType::Double => {
                constant.value
                        .parse::<f64>()
                        .map(Value::Double)
                        .map_err(|_| RuntimeError::at(node, "double literal out of range"))
            },
            ConstType::Str => Ok(Value::Str(decode_escapes(&constant.value))),
        }
    }

    /// Reads a variable's current value.
    ///
    /// A variable whose declaration statement has not executed yet (which a
    /// `switch` can arrange by jumping over it) has no value to read.
    fn eval_variable(&self, node: &Node, index: usize) -> ExecResult<Value> {
        let variable = self.tables.variable(index);
        variable.value.clone().ok_or_else(|| {
            RuntimeError::at(node,
                             format!("variable '{}' used before its declaration ran",
                                     variable.name))
        })
    }
}
