use crate::ast::Node;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents a failure during execution.
///
/// Unlike the other phases, the runtime family is a single parameterized
/// message: conversion failures, out-of-range subscripts, division by a
/// computed zero, and internal dispatch failures all share this shape.
pub struct RuntimeError {
    /// Human-readable description of the failure.
    pub message: String,
    /// The source line of the node being evaluated.
    pub line:    usize,
    /// The source column of the node being evaluated.
    pub column:  usize,
}

impl RuntimeError {
    /// Creates an error positioned at the given node.
    pub fn at(node: &Node, message: impl Into<String>) -> Self {
        Self { message: message.into(),
               line:    node.line,
               column:  node.column, }
    }
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}:{})", self.message, self.line, self.column)
    }
}

impl std::error::Error for RuntimeError {}
