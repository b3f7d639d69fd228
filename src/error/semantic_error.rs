#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Represents the checks performed by the second, parse-order-independent
/// tree pass.
pub enum SemanticError {
    /// The right operand of `/` is a literal equal to zero.
    DivisionByZero {
        /// The source line of the offending literal.
        line:   usize,
        /// The source column of the offending literal.
        column: usize,
    },
    /// An operand of `%` does not resolve to an integer subtree.
    InvalidModOperands {
        /// The source line of the offending operand.
        line:   usize,
        /// The source column of the offending operand.
        column: usize,
    },
    /// A `switch` controlling expression or `case` value is double-typed or
    /// involves a conversion that can produce one.
    InvalidExpressionInSwitch {
        /// The source line of the offending expression.
        line:   usize,
        /// The source column of the offending expression.
        column: usize,
    },
    /// One `switch` body carries more than one `default` label.
    DoubleDefaultInSwitch {
        /// The source line of the second `default`.
        line:   usize,
        /// The source column of the second `default`.
        column: usize,
    },
}

impl std::fmt::Display for SemanticError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DivisionByZero { line, column } => {
                write!(f, "division by zero ({line}:{column})")
            },
            Self::InvalidModOperands { line, column } => {
                write!(f, "invalid mod operands ({line}:{column})")
            },
            Self::InvalidExpressionInSwitch { line, column } => {
                write!(f, "invalid expression in switch ({line}:{column})")
            },
            Self::DoubleDefaultInSwitch { line, column } => {
                write!(f, "double default in switch ({line}:{column})")
            },
        }
    }
}

impl std::error::Error for SemanticError {}
