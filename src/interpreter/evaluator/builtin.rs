use std::io::{BufRead, Write};

use crate::{
    ast::Node,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{ExecResult, Interpreter},
        value::Value,
    },
};

impl<R: BufRead, W: Write> Interpreter<'_, R, W> {
    /// Evaluates a keyword used in expression position: the boolean
    /// literals, the conversions, and `scan`.
    pub(crate) fn eval_keyword(&mut self, node: &Node) -> ExecResult<Value> {
        let keyword = node.keyword_text(self.tables).unwrap_or_default().to_string();
        match keyword.as_str() {
            "true" => Ok(Value::Bool(true)),
            "false" => Ok(Value::Bool(false)),
            "scan" => self.scan_line(node),
            "atoi" => {
                let text = self.single_string_argument(node)?;
                let trimmed = text.trim();
                trimmed.parse::<i64>()
                       .map(Value::Int)
                       .map_err(|_| {
                           RuntimeError::at(node, format!("cannot convert '{trimmed}' to int"))
                       })
            },
            "atof" => {
                let text = self.single_string_argument(node)?;
                let trimmed = text.trim();
                trimmed.parse::<f64>()
                       .map(Value::Double)
                       .map_err(|_| {
                           RuntimeError::at(node,
                                            format!("cannot convert '{trimmed}' to double"))
                       })
            },
            "atob" => {
                let text = self.single_string_argument(node)?;
                match text.trim() {
                    "true" => Ok(Value::Bool(true)),
                    "false" => Ok(Value::Bool(false)),
                    other => Err(RuntimeError::at(node,
                                                  format!("cannot convert '{other}' to bool"))),
                }
            },
            "to_string" => {
                let [argument] = node.children.as_slice() else {
                    return Err(RuntimeError::at(node, "malformed call"));
                };
                let value = self.eval(argument)?;
                value.to_text().map(Value::Str).ok_or_else(|| {
                                                   RuntimeError::at(argument,
                                                                    "value has no text form")
                                               })
            },
            other => Err(RuntimeError::at(node, format!("'{other}' is not an expression"))),
        }
    }

    /// Writes the argument of a `print` statement, without a trailing
    /// newline.
    pub(crate) fn exec_print(&mut self, statement: &Node) -> ExecResult<()> {
        let [argument] = statement.children.as_slice() else {
            return Err(RuntimeError::at(statement, "malformed call"));
        };
        let value = self.eval(argument)?;
        let text = value.as_str(argument)?;
        write!(self.output, "{text}")
            .and_then(|()| self.output.flush())
            .map_err(|error| {
                RuntimeError::at(statement, format!("cannot write output: {error}"))
            })
    }

    /// Reads one line from the input stream, without its line terminator.
    fn scan_line(&mut self, node: &Node) -> ExecResult<Value> {
        let mut line = String::new();
        let read = self.input
                       .read_line(&mut line)
                       .map_err(|error| {
                           RuntimeError::at(node, format!("cannot read input: {error}"))
                       })?;
        if read == 0 {
            return Err(RuntimeError::at(node, "unexpected end of input"));
        }
        while line.ends_with('\n') || line.ends_with('\r') {
            line.pop();
        }
        Ok(Value::Str(line))
    }

    fn single_string_argument(&mut self, node: &Node) -> ExecResult<String> {
        let [argument] = node.children.as_slice() else {
            return Err(RuntimeError::at(node, "malformed call"));
        };
        let value = self.eval(argument)?;
        Ok(value.as_str(argument)?.to_string())
    }
}
