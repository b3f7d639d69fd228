#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can occur during syntax analysis.
///
/// Scope and type violations are part of this family because the parser
/// performs identifier binding and type enforcement inline, as it descends.
pub enum ParserError {
    /// A specific token was expected but something else was found.
    Expected {
        /// What was expected.
        expected: String,
        /// The source line where the error occurred.
        line:     usize,
        /// The source column where the error occurred.
        column:   usize,
    },
    /// The token stream ended in the middle of a construct.
    Unexpected {
        /// The source line where the error occurred.
        line:   usize,
        /// The source column where the error occurred.
        column: usize,
    },
    /// The two operands of a comparison resolve to different expression
    /// kinds (arithmetic vs string).
    CannotCompare {
        /// The source line of the comparison operator.
        line:   usize,
        /// The source column of the comparison operator.
        column: usize,
    },
    /// A name was declared twice in the same block.
    DoubleDeclaration {
        /// The redeclared name.
        name:   String,
        /// The source line where the error occurred.
        line:   usize,
        /// The source column where the error occurred.
        column: usize,
    },
    /// A name was used without any declaration visible from the current
    /// scope.
    UsingOfNotDeclared {
        /// The undeclared name.
        name:   String,
        /// The source line where the error occurred.
        line:   usize,
        /// The source column where the error occurred.
        column: usize,
    },
    /// A variable's declared type does not fit the context it is used in
    /// (e.g. a `bool` variable as an arithmetic operand).
    InvalidVarType {
        /// The offending variable name.
        name:   String,
        /// The source line where the error occurred.
        line:   usize,
        /// The source column where the error occurred.
        column: usize,
    },
    /// A statement that is only legal inside a `switch` or a loop appeared
    /// outside one (`case`, `default`, `break`).
    ForbiddenStatement {
        /// The offending statement keyword.
        statement: String,
        /// The source line where the error occurred.
        line:      usize,
        /// The source column where the error occurred.
        column:    usize,
    },
    /// An array declaration carries an initializer expression.
    ArrayInitialization {
        /// The source line where the error occurred.
        line:   usize,
        /// The source column where the error occurred.
        column: usize,
    },
    /// A declared array dimension is smaller than one.
    ArrSizeLessThanOne {
        /// The source line where the error occurred.
        line:   usize,
        /// The source column where the error occurred.
        column: usize,
    },
    /// The number of index brackets does not match the declared
    /// dimensionality.
    IncorrectNumOfIndexes {
        /// The offending variable name.
        name:   String,
        /// How many indexes were supplied.
        found:  usize,
        /// The source line where the error occurred.
        line:   usize,
        /// The source column where the error occurred.
        column: usize,
    },
    /// Every alternative of a speculative parse failed; the sub-errors are
    /// kept so diagnostics do not collapse to the least specific failure.
    Compound {
        /// The failure of each attempted alternative, in attempt order.
        attempts: Vec<ParserError>,
    },
}

impl std::fmt::Display for ParserError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Expected { expected, line, column } => {
                write!(f, "expected {expected} ({line}:{column})")
            },
            Self::Unexpected { line, column } => {
                write!(f, "unexpected end of input ({line}:{column})")
            },
            Self::CannotCompare { line, column } => write!(f,
                                                           "cannot compare operands of different kinds ({line}:{column})"),
            Self::DoubleDeclaration { name, line, column } => {
                write!(f, "double declaration of '{name}' ({line}:{column})")
            },
            Self::UsingOfNotDeclared { name, line, column } => {
                write!(f, "using of not declared variable '{name}' ({line}:{column})")
            },
            Self::InvalidVarType { name, line, column } => write!(f,
                                                                  "variable '{name}' has an invalid type for this context ({line}:{column})"),
            Self::ForbiddenStatement { statement, line, column } => {
                write!(f, "'{statement}' is forbidden here ({line}:{column})")
            },
            Self::ArrayInitialization { line, column } => write!(f,
                                                                 "array declarations cannot have initializers ({line}:{column})"),
            Self::ArrSizeLessThanOne { line, column } => {
                write!(f, "array size is less than 1 ({line}:{column})")
            },
            Self::IncorrectNumOfIndexes { name, found, line, column } => write!(f,
                                                                                "incorrect number of indexes for '{name}': found {found} ({line}:{column})"),
            Self::Compound { attempts } => {
                writeln!(f, "no expression form matched:")?;
                for attempt in attempts {
                    writeln!(f, "  - {attempt}")?;
                }
                Ok(())
            },
        }
    }
}

impl std::error::Error for ParserError {}
