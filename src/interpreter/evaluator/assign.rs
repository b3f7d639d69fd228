use std::io::{BufRead, Write};

use crate::{
    ast::{Marker, Node},
    error::RuntimeError,
    interpreter::{
        evaluator::core::{ExecResult, Interpreter},
        tables::{ScalarType, VarType},
        value::Value,
    },
};

impl<R: BufRead, W: Write> Interpreter<'_, R, W> {
    /// Executes a declaration statement.
    ///
    /// Every declarator gives its variable a value: either the zero value
    /// of the declared type or the coerced result of its initializer.
    /// Re-executing a declaration (inside a loop body, say) resets the
    /// variable the same way.
    pub(crate) fn exec_declare(&mut self, statement: &Node) -> ExecResult<()> {
        for declarator in &statement.children {
            if let Some(index) = declarator.identifier_index() {
                let ty = self.declared_type(declarator, index)?;
                self.tables.variable_mut(index).value = Some(Value::zero(&ty));
                continue;
            }
            // "=" node: [identifier, initializer]
            let [ident, initializer] = declarator.children.as_slice() else {
                return Err(RuntimeError::at(declarator, "malformed declarator"));
            };
            let Some(index) = ident.identifier_index() else {
                return Err(RuntimeError::at(ident, "malformed declarator"));
            };
            let ty = self.declared_type(ident, index)?;
            let value = self.eval(initializer)?;
            let value = coerce(value, ty.element, initializer)?;
            self.tables.variable_mut(index).value = Some(value);
        }
        Ok(())
    }

    /// Executes an assignment node: `[target, expression]` under `=`.
    pub(crate) fn exec_assignment(&mut self, statement: &Node) -> ExecResult<()> {
        let [target, expression] = statement.children.as_slice() else {
            return Err(RuntimeError::at(statement, "malformed assignment"));
        };
        let value = self.eval(expression)?;

        if let Some(index) = target.identifier_index() {
            let ty = self.declared_type(target, index)?;
            let value = coerce(value, ty.element, expression)?;
            self.tables.variable_mut(index).value = Some(value);
            return Ok(());
        }
        if target.is_marker(Marker::Indexation) {
            return self.assign_indexed(target, expression, value);
        }
        Err(RuntimeError::at(target, "not an assignable target"))
    }

    /// Stores into an indexed target.
    ///
    /// With one index per declared dimension the addressed element is
    /// replaced; with one extra index on a string target the write replaces
    /// a single character of the string.
    fn assign_indexed(&mut self, target: &Node, expression: &Node, value: Value)
                      -> ExecResult<()> {
        let Some((ident, index_nodes)) = target.children.split_first() else {
            return Err(RuntimeError::at(target, "malformed indexed access"));
        };
        let Some(var) = ident.identifier_index() else {
            return Err(RuntimeError::at(ident, "malformed indexed access"));
        };
        let ty = self.declared_type(ident, var)?;
        let indexes = self.eval_indexes(index_nodes)?;

        let dims = ty.dims.len();
        if indexes.len() == dims {
            let value = coerce(value, ty.element, expression)?;
            let slot = self.navigate_mut(ident, var, &indexes, index_nodes)?;
            *slot = value;
            return Ok(());
        }
        if indexes.len() != dims + 1 {
            return Err(RuntimeError::at(target, "malformed indexed access"));
        }

        // Character replacement: navigate to the string, splice the last
        // index.
        let replacement = value.as_str(expression)?.to_string();
        let char_index = indexes[dims];
        let char_node = &index_nodes[dims];
        let slot = self.navigate_mut(ident, var, &indexes[..dims], index_nodes)?;
        let Value::Str(text) = slot else {
            return Err(RuntimeError::at(char_node, "not a string element"));
        };
        let chars: Vec<char> = text.chars().collect();
        if char_index >= chars.len() {
            return Err(RuntimeError::at(char_node, "string index out of range"));
        }
        let mut spliced: String = chars[..char_index].iter().collect();
        spliced.push_str(&replacement);
        spliced.extend(&chars[char_index + 1..]);
        *text = spliced;
        Ok(())
    }

    /// Evaluates an indexed read: base identifier plus index expressions.
    ///
    /// One extra index on a string access reads a single character, itself
    /// a one-character string.
    pub(crate) fn eval_indexation(&mut self, node: &Node) -> ExecResult<Value> {
        let Some((ident, index_nodes)) = node.children.split_first() else {
            return Err(RuntimeError::at(node, "malformed indexed access"));
        };
        let Some(var) = ident.identifier_index() else {
            return Err(RuntimeError::at(ident, "malformed indexed access"));
        };
        let ty = self.declared_type(ident, var)?;
        let indexes = self.eval_indexes(index_nodes)?;

        let dims = ty.dims.len();
        if indexes.len() == dims {
            return Ok(self.navigate_mut(ident, var, &indexes, index_nodes)?.clone());
        }
        if indexes.len() != dims + 1 {
            return Err(RuntimeError::at(node, "malformed indexed access"));
        }

        let char_index = indexes[dims];
        let char_node = &index_nodes[dims];
        let element = self.navigate_mut(ident, var, &indexes[..dims], index_nodes)?;
        let text = element.as_str(char_node)?;
        text.chars()
            .nth(char_index)
            .map(|c| Value::Str(c.to_string()))
            .ok_or_else(|| RuntimeError::at(char_node, "string index out of range"))
    }

    /// Evaluates index expressions to non-negative element offsets.
    fn eval_indexes(&mut self, index_nodes: &[Node]) -> ExecResult<Vec<usize>> {
        let mut indexes = Vec::with_capacity(index_nodes.len());
        for node in index_nodes {
            let raw = self.eval(node)?.as_int(node)?;
            let index = usize::try_from(raw)
                .map_err(|_| RuntimeError::at(node, "array index out of range"))?;
            indexes.push(index);
        }
        Ok(indexes)
    }

    /// Walks from a variable's stored value down through `indexes`,
    /// returning the addressed slot.
    fn navigate_mut(&mut self,
                    ident: &Node,
                    var: usize,
                    indexes: &[usize],
                    index_nodes: &[Node])
                    -> ExecResult<&mut Value> {
        let variable = self.tables.variable_mut(var);
        let name = variable.name.clone();
        let Some(mut current) = variable.value.as_mut() else {
            return Err(RuntimeError::at(ident,
                                        format!("variable '{name}' used before its \
                                                 declaration ran")));
        };
        for (depth, &index) in indexes.iter().enumerate() {
            let node = &index_nodes[depth];
            let Value::Array(elements) = current else {
                return Err(RuntimeError::at(node, "not an array"));
            };
            current = elements.get_mut(index)
                              .ok_or_else(|| {
                                  RuntimeError::at(node, "array index out of range")
                              })?;
        }
        Ok(current)
    }

    /// The declared type of a variable record, which every bound record has.
    fn declared_type(&self, node: &Node, index: usize) -> ExecResult<VarType> {
        self.tables
            .variable(index)
            .ty
            .clone()
            .ok_or_else(|| RuntimeError::at(node, "unbound identifier"))
    }
}

/// Adapts a value to the scalar type of its destination.
///
/// Ints widen to doubles and doubles truncate toward zero to ints; any
/// other cross-type store is an error.
#[allow(clippy::cast_possible_truncation)]
#[allow(clippy::cast_precision_loss)]
pub(crate) fn coerce(value: Value, element: ScalarType, node: &Node) -> ExecResult<Value> {
    match (element, value) {
        (ScalarType::Int, Value::Int(v)) => Ok(Value::Int(v)),
        (ScalarType::Int, Value::Double(v)) => Ok(Value::Int(v as i64)),
        (ScalarType::Double, Value::Double(v)) => Ok(Value::Double(v)),
        (ScalarType::Double, Value::Int(v)) => Ok(Value::Double(v as f64)),
        (ScalarType::Bool, Value::Bool(v)) => Ok(Value::Bool(v)),
        (ScalarType::Str, Value::Str(v)) => Ok(Value::Str(v)),
        (expected, found) => {
            Err(RuntimeError::at(node,
                                 format!("cannot store a {} value into a {expected} variable",
                                         found.type_name())))
        },
    }
}
