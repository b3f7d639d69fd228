use crate::{
    ast::Node,
    error::RuntimeError,
    interpreter::tables::{ScalarType, VarType},
};

/// Represents a runtime value held by a variable or produced by an
/// expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A 64-bit signed integer.
    Int(i64),
    /// A 64-bit floating-point number.
    Double(f64),
    /// A boolean.
    Bool(bool),
    /// A string (already unescaped).
    Str(String),
    /// An array; nested arrays model multi-dimensional storage. Elements
    /// are owned directly so sibling elements never alias one another.
    Array(Vec<Value>),
}

impl Value {
    /// The zero value a freshly declared variable of type `ty` receives.
    ///
    /// Arrays allocate a fresh, independently owned element for every slot
    /// of the declared shape.
    pub fn zero(ty: &VarType) -> Self {
        Self::zero_of_shape(ty.element, &ty.dims)
    }

    fn zero_of_shape(element: ScalarType, dims: &[usize]) -> Self {
        match dims.split_first() {
            Some((&size, rest)) => {
                Self::Array((0..size).map(|_| Self::zero_of_shape(element, rest)).collect())
            },
            None => match element {
                ScalarType::Int => Self::Int(0),
                ScalarType::Double => Self::Double(0.0),
                ScalarType::Bool => Self::Bool(false),
                ScalarType::Str => Self::Str(String::new()),
            },
        }
    }

    /// A short name for diagnostics.
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Int(_) => "int",
            Self::Double(_) => "double",
            Self::Bool(_) => "bool",
            Self::Str(_) => "string",
            Self::Array(_) => "array",
        }
    }

    /// The value as an `i64`, or an error positioned at `node`.
    pub fn as_int(&self, node: &Node) -> Result<i64, RuntimeError> {
        match self {
            Self::Int(v) => Ok(*v),
            _ => Err(RuntimeError::at(node,
                                      format!("expected an int value, got {}", self.type_name()))),
        }
    }

    /// The value as an `f64`, promoting ints, or an error positioned at
    /// `node`.
    #[allow(clippy::cast_precision_loss)]
    pub fn as_double(&self, node: &Node) -> Result<f64, RuntimeError> {
        match self {
            Self::Double(v) => Ok(*v),
            Self::Int(v) => Ok(*v as f64),
            _ => Err(RuntimeError::at(node,
                                      format!("expected a numeric value, got {}",
                                              self.type_name()))),
        }
    }

    /// The value as a `bool`, or an error positioned at `node`.
    pub fn as_bool(&self, node: &Node) -> Result<bool, RuntimeError> {
        match self {
            Self::Bool(v) => Ok(*v),
            _ => Err(RuntimeError::at(node,
                                      format!("expected a bool value, got {}", self.type_name()))),
        }
    }

    /// The value as a string slice, or an error positioned at `node`.
    pub fn as_str(&self, node: &Node) -> Result<&str, RuntimeError> {
        match self {
            Self::Str(v) => Ok(v),
            _ => Err(RuntimeError::at(node,
                                      format!("expected a string value, got {}",
                                              self.type_name()))),
        }
    }

    /// Whether this value is a double.
    pub const fn is_double(&self) -> bool {
        matches!(self, Self::Double(_))
    }

    /// Formats the value the way `to_string` spells it.
    ///
    /// Booleans print as lowercase `true`/`false`; whole-valued doubles keep
    /// one decimal place so they stay distinguishable from ints. Arrays have
    /// no text form and yield `None`.
    pub fn to_text(&self) -> Option<String> {
        match self {
            Self::Int(v) => Some(v.to_string()),
            Self::Double(v) => Some(format_double(*v)),
            Self::Bool(v) => Some(if *v { "true".to_string() } else { "false".to_string() }),
            Self::Str(v) => Some(v.clone()),
            Self::Array(_) => None,
        }
    }
}

fn format_double(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}
