use std::io::{BufRead, Write};

use crate::{
    ast::{Marker, Node},
    error::RuntimeError,
    interpreter::{
        evaluator::core::{ExecResult, Flow, Interpreter},
        lexer::decode_escapes,
        tables::{ConstType, Tables},
        value::Value,
    },
};

/// A `case` or `default` label found inside a `switch` body, remembered
/// together with where its following statements live.
struct Label<'n> {
    node:   &'n Node,
    parent: &'n Node,
    index:  usize,
}

impl<R: BufRead, W: Write> Interpreter<'_, R, W> {
    /// `if` node: `[condition, then]` or `[condition, then, else]`.
    pub(crate) fn exec_if(&mut self, statement: &Node) -> ExecResult<Flow> {
        let (condition, branches) = split_condition(statement)?;
        if self.eval(condition)?.as_bool(condition)? {
            self.exec_statement(&branches[0])
        } else if let Some(alternative) = branches.get(1) {
            self.exec_statement(alternative)
        } else {
            Ok(Flow::Normal)
        }
    }

    /// `while` node: `[condition, body]`. A `break` in the body stops the
    /// loop and is consumed here.
    pub(crate) fn exec_while(&mut self, statement: &Node) -> ExecResult<Flow> {
        let [condition, body] = statement.children.as_slice() else {
            return Err(RuntimeError::at(statement, "malformed while loop"));
        };
        while self.eval(condition)?.as_bool(condition)? {
            if self.exec_statement(body)? == Flow::Break {
                break;
            }
        }
        Ok(Flow::Normal)
    }

    /// `for` node: `[init, condition, step, body]`, where an absent clause
    /// is an empty compound node and an absent condition means "run
    /// forever".
    pub(crate) fn exec_for(&mut self, statement: &Node) -> ExecResult<Flow> {
        let [init, condition, step, body] = statement.children.as_slice() else {
            return Err(RuntimeError::at(statement, "malformed for loop"));
        };
        self.exec_statement(init)?;
        loop {
            if !self.eval_loop_condition(condition)? {
                break;
            }
            if self.exec_statement(body)? == Flow::Break {
                break;
            }
            self.exec_statement(step)?;
        }
        Ok(Flow::Normal)
    }

    fn eval_loop_condition(&mut self, condition: &Node) -> ExecResult<bool> {
        if condition.is_marker(Marker::CompoundStatement) && condition.children.is_empty() {
            return Ok(true);
        }
        self.eval(condition)?.as_bool(condition)
    }

    /// `switch` node: `[expression, body]`.
    ///
    /// Labels are collected up front, the first matching `case` (or, failing
    /// that, the `default`) is chosen, and execution falls through the
    /// statements after it until a `break` or the end of the label's block.
    pub(crate) fn exec_switch(&mut self, statement: &Node) -> ExecResult<Flow> {
        let [expression, body] = statement.children.as_slice() else {
            return Err(RuntimeError::at(statement, "malformed switch"));
        };
        let value = self.eval(expression)?;

        let mut labels = Vec::new();
        collect_labels(body, self.tables, &mut labels);

        let mut target = None;
        for label in &labels {
            if label.node.is_keyword(self.tables, "case")
               && self.case_matches(label.node, &value)?
            {
                target = Some(label);
                break;
            }
        }
        if target.is_none() {
            target = labels.iter().find(|label| label.node.is_keyword(self.tables, "default"));
        }

        if let Some(label) = target {
            for following in &label.parent.children[label.index + 1..] {
                if self.exec_statement(following)? == Flow::Break {
                    break;
                }
            }
        }
        Ok(Flow::Normal)
    }

    /// Whether a `case` label's literal equals the switch value.
    fn case_matches(&self, label: &Node, value: &Value) -> ExecResult<bool> {
        let Some(literal) = label.children.first() else {
            return Err(RuntimeError::at(label, "malformed case label"));
        };
        let Some(index) = literal.constant_index() else {
            return Err(RuntimeError::at(literal, "malformed case label"));
        };
        let constant = self.tables.constant(index);
        match (constant.ty, value) {
            (ConstType::Int, Value::Int(v)) => {
                let label_value =
                    constant.value
                            .parse::<i64>()
                            .map_err(|_| {
                                RuntimeError::at(literal, "integer literal out of range")
                            })?;
                Ok(label_value == *v)
            },
            (ConstType::Str, Value::Str(v)) => Ok(decode_escapes(&constant.value) == *v),
            _ => Ok(false),
        }
    }
}

/// Collects the labels of one `switch` body in source order.
///
/// Labels inside nested compound statements still belong to this `switch`;
/// labels inside a nested `switch` do not, so its subtree is skipped.
fn collect_labels<'n>(body: &'n Node, tables: &Tables, out: &mut Vec<Label<'n>>) {
    for (index, child) in body.children.iter().enumerate() {
        if child.is_keyword(tables, "switch") {
            continue;
        }
        if child.is_any_keyword(tables, &["case", "default"]) {
            out.push(Label { node: child, parent: body, index });
        }
        if child.is_marker(Marker::CompoundStatement) {
            collect_labels(child, tables, out);
        }
    }
}

fn split_condition(statement: &Node) -> ExecResult<(&Node, &[Node])> {
    match statement.children.split_first() {
        Some(split) if !split.1.is_empty() => Ok(split),
        _ => Err(RuntimeError::at(statement, "malformed conditional")),
    }
}
