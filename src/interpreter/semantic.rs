//! Static checks that run between parsing and execution.
//!
//! The analyzer walks the finished syntax tree once and rejects programs
//! whose errors are visible without running them: division by a literal
//! zero, `%` applied to a double-valued operand, a double-valued `switch`
//! expression, and a `switch` body with more than one `default` label.

use crate::{
    ast::{Marker, Node, NodeKind},
    error::SemanticError,
    interpreter::tables::{ConstType, ScalarType, Tables},
};

/// Checks the whole tree.
///
/// # Errors
/// Returns the first [`SemanticError`] found, in depth-first source order.
pub fn check(root: &Node, tables: &Tables) -> Result<(), SemanticError> {
    if root.is_operator(tables, "/") && root.children.len() == 2 {
        check_divisor(&root.children[1], tables)?;
    }
    if root.is_operator(tables, "%") && root.children.len() == 2 {
        require_int_operand(&root.children[0], tables)?;
        require_int_operand(&root.children[1], tables)?;
    }
    if root.is_keyword(tables, "switch") && root.children.len() == 2 {
        require_switchable(&root.children[0], tables)?;
        check_single_default(&root.children[1], tables)?;
    }
    for child in &root.children {
        check(child, tables)?;
    }
    Ok(())
}

/// Rejects a divisor that is a zero literal, through any unary signs.
///
/// Only literal zeros are caught here; a divisor that merely *evaluates*
/// to zero is a runtime error.
#[allow(clippy::float_cmp)]
fn check_divisor(divisor: &Node, tables: &Tables) -> Result<(), SemanticError> {
    let mut node = divisor;
    while node.is_operator(tables, "-") && node.children.len() == 1 {
        node = &node.children[0];
    }
    let Some(index) = node.constant_index() else {
        return Ok(());
    };
    let constant = tables.constant(index);
    let is_zero = match constant.ty {
        ConstType::Int | ConstType::Double => {
            constant.value.parse::<f64>().is_ok_and(|v| v == 0.0)
        },
        ConstType::Str => false,
    };
    if is_zero {
        return Err(SemanticError::DivisionByZero { line:   divisor.line,
                                                   column: divisor.column, });
    }
    Ok(())
}

/// Rejects a `%` operand that provably produces a double.
///
/// Double literals, double-typed variables, and `atof` calls are rejected;
/// `atoi` is accepted without descending into its string argument; nested
/// arithmetic operators are checked recursively.
fn require_int_operand(operand: &Node, tables: &Tables) -> Result<(), SemanticError> {
    let invalid = SemanticError::InvalidModOperands { line:   operand.line,
                                                      column: operand.column, };
    match operand.kind {
        NodeKind::Constant(index) => match tables.constant(index).ty {
            ConstType::Double => Err(invalid),
            ConstType::Int | ConstType::Str => Ok(()),
        },
        NodeKind::Keyword(_) => {
            if operand.is_keyword(tables, "atof") {
                Err(invalid)
            } else {
                // atoi: int by definition, argument is a string.
                Ok(())
            }
        },
        NodeKind::Identifier(_) | NodeKind::Marker(Marker::Indexation) => {
            match access_element_type(operand, tables) {
                Some(ScalarType::Double) => Err(invalid),
                _ => Ok(()),
            }
        },
        NodeKind::Operator(_) => {
            for child in &operand.children {
                require_int_operand(child, tables)?;
            }
            Ok(())
        },
        NodeKind::Marker(_) => Ok(()),
    }
}

/// Rejects a `switch` expression with a double-valued part.
///
/// The conversion keywords `atoi`, `to_string`, and `scan` are accepted
/// without descending into their arguments; `atof` and anything
/// double-typed is rejected.
fn require_switchable(expr: &Node, tables: &Tables) -> Result<(), SemanticError> {
    let invalid = SemanticError::InvalidExpressionInSwitch { line:   expr.line,
                                                             column: expr.column, };
    match expr.kind {
        NodeKind::Constant(index) => match tables.constant(index).ty {
            ConstType::Double => Err(invalid),
            ConstType::Int | ConstType::Str => Ok(()),
        },
        NodeKind::Keyword(_) => {
            if expr.is_keyword(tables, "atof") {
                Err(invalid)
            } else {
                Ok(())
            }
        },
        NodeKind::Identifier(_) | NodeKind::Marker(Marker::Indexation) => {
            match access_element_type(expr, tables) {
                Some(ScalarType::Double) => Err(invalid),
                _ => Ok(()),
            }
        },
        NodeKind::Operator(_) => {
            for child in &expr.children {
                require_switchable(child, tables)?;
            }
            Ok(())
        },
        NodeKind::Marker(_) => Ok(()),
    }
}

/// Rejects a second `default` label in one `switch` body.
///
/// Labels inside nested compound statements belong to the enclosing
/// `switch`; labels inside a nested `switch` do not, and are counted when
/// that `switch` is checked.
fn check_single_default(body: &Node, tables: &Tables) -> Result<(), SemanticError> {
    fn count(node: &Node, tables: &Tables, seen: &mut bool) -> Result<(), SemanticError> {
        for child in &node.children {
            if child.is_keyword(tables, "switch") {
                continue;
            }
            if child.is_keyword(tables, "default") {
                if *seen {
                    return Err(SemanticError::DoubleDefaultInSwitch { line:   child.line,
                                                                      column: child.column, });
                }
                *seen = true;
            }
            if child.is_marker(Marker::CompoundStatement) {
                count(child, tables, seen)?;
            }
        }
        Ok(())
    }
    let mut seen = false;
    count(body, tables, &mut seen)
}

/// The element type behind a bare identifier or an `Indexation` access.
fn access_element_type(node: &Node, tables: &Tables) -> Option<ScalarType> {
    let ident = if node.is_marker(Marker::Indexation) {
        node.children.first()?
    } else {
        node
    };
    let index = ident.identifier_index()?;
    tables.variable(index).ty.as_ref().map(|ty| ty.element)
}
