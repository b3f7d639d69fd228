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
    /// Evaluates an operator node.
    ///
    /// `&&` and `||` short-circuit; every other operator evaluates both
    /// operands first.
    pub(crate) fn eval_operator(&mut self, node: &Node) -> ExecResult<Value> {
        let op = node.operator_text(self.tables).unwrap_or_default().to_string();
        match (op.as_str(), node.children.as_slice()) {
            ("-", [operand]) => self.eval_negation(node, operand),
            ("!", [operand]) => {
                let value = self.eval(operand)?.as_bool(operand)?;
                Ok(Value::Bool(!value))
            },
            ("&&", [left, right]) => {
                if self.eval(left)?.as_bool(left)? {
                    Ok(Value::Bool(self.eval(right)?.as_bool(right)?))
                } else {
                    Ok(Value::Bool(false))
                }
            },
            ("||", [left, right]) => {
                if self.eval(left)?.as_bool(left)? {
                    Ok(Value::Bool(true))
                } else {
                    Ok(Value::Bool(self.eval(right)?.as_bool(right)?))
                }
            },
            ("+" | "-" | "*" | "/" | "%", [left, right]) => {
                let lhs = self.eval(left)?;
                let rhs = self.eval(right)?;
                eval_arithmetic(node, &op, &lhs, left, &rhs, right)
            },
            ("==" | "!=" | "<" | ">" | "<=" | ">=", [left, right]) => {
                let lhs = self.eval(left)?;
                let rhs = self.eval(right)?;
                eval_comparison(node, &op, &lhs, left, &rhs, right)
            },
            _ => Err(RuntimeError::at(node, format!("unknown operator '{op}'"))),
        }
    }

    fn eval_negation(&mut self, node: &Node, operand: &Node) -> ExecResult<Value> {
        match self.eval(operand)? {
            Value::Int(v) => Ok(Value::Int(-v)),
            Value::Double(v) => Ok(Value::Double(-v)),
            other => Err(RuntimeError::at(node,
                                          format!("cannot negate a {} value",
                                                  other.type_name()))),
        }
    }
}

/// Applies a binary arithmetic operator.
///
/// `+` on two strings concatenates. Numeric operands compute in `f64` when
/// either side is a double and in `i64` otherwise; integer division
/// truncates toward zero. A divisor or modulus of zero is reported at the
/// operator's position.
#[allow(clippy::float_cmp)]
fn eval_arithmetic(node: &Node,
                   op: &str,
                   lhs: &Value,
                   left: &Node,
                   rhs: &Value,
                   right: &Node)
                   -> ExecResult<Value> {
    if let (Value::Str(a), Value::Str(b)) = (lhs, rhs) {
        if op == "+" {
            return Ok(Value::Str(format!("{a}{b}")));
        }
        return Err(RuntimeError::at(node, format!("cannot apply '{op}' to strings")));
    }

    if lhs.is_double() || rhs.is_double() {
        let a = lhs.as_double(left)?;
        let b = rhs.as_double(right)?;
        let result = match op {
            "+" => a + b,
            "-" => a - b,
            "*" => a * b,
            "/" => {
                if b == 0.0 {
                    return Err(RuntimeError::at(node, "division by zero"));
                }
                a / b
            },
            _ => return Err(RuntimeError::at(node, "modulo needs int operands")),
        };
        return Ok(Value::Double(result));
    }

    let a = lhs.as_int(left)?;
    let b = rhs.as_int(right)?;
    let result = match op {
        "+" => a.wrapping_add(b),
        "-" => a.wrapping_sub(b),
        "*" => a.wrapping_mul(b),
        "/" => {
            if b == 0 {
                return Err(RuntimeError::at(node, "division by zero"));
            }
            a.wrapping_div(b)
        },
        "%" => {
            if b == 0 {
                return Err(RuntimeError::at(node, "modulo by zero"));
            }
            a.wrapping_rem(b)
        },
        _ => return Err(RuntimeError::at(node, format!("unknown operator '{op}'"))),
    };
    Ok(Value::Int(result))
}

/// Applies a comparison operator.
///
/// Strings compare lexicographically; numbers compare in `f64` when either
/// side is a double and in `i64` otherwise.
fn eval_comparison(node: &Node,
                   op: &str,
                   lhs: &Value,
                   left: &Node,
                   rhs: &Value,
                   right: &Node)
                   -> ExecResult<Value> {
    let ordering = if let (Value::Str(a), Value::Str(b)) = (lhs, rhs) {
        a.cmp(b)
    } else if lhs.is_double() || rhs.is_double() {
        let a = lhs.as_double(left)?;
        let b = rhs.as_double(right)?;
        a.partial_cmp(&b)
         .ok_or_else(|| RuntimeError::at(node, "cannot order these values"))?
    } else {
        lhs.as_int(left)?.cmp(&rhs.as_int(right)?)
    };
    let result = match op {
        "==" => ordering.is_eq(),
        "!=" => ordering.is_ne(),
        "<" => ordering.is_lt(),
        ">" => ordering.is_gt(),
        "<=" => ordering.is_le(),
        ">=" => ordering.is_ge(),
        _ => return Err(RuntimeError::at(node, format!("unknown operator '{op}'"))),
    };
    Ok(Value::Bool(result))
}
