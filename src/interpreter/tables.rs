use crate::interpreter::value::Value;

/// The type tag of an interned literal.
///
/// String constants keep their raw, still-escaped source spelling; escape
/// sequences are decoded at the point of use by the evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstType {
    /// An integer literal such as `42`.
    Int,
    /// A floating-point literal such as `3.14`.
    Double,
    /// A string literal, stored without the surrounding quotes.
    Str,
}

/// An interned literal value.
///
/// Constants are owned by the constants table and immutable once created.
/// Equality is structural (spelling plus type), which is what makes the
/// insert-if-absent interning deduplicate equal literals across the program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constant {
    /// The literal's source spelling (for strings: raw, still escaped).
    pub value: String,
    /// The literal's type tag.
    pub ty:    ConstType,
}

impl Constant {
    /// Creates a constant from its source spelling and type tag.
    pub fn new(value: impl Into<String>, ty: ConstType) -> Self {
        Self { value: value.into(), ty }
    }
}

/// The scalar element types of the language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarType {
    /// `int`
    Int,
    /// `double`
    Double,
    /// `bool`
    Bool,
    /// `string`
    Str,
}

impl std::fmt::Display for ScalarType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Int => "int",
            Self::Double => "double",
            Self::Bool => "bool",
            Self::Str => "string",
        };
        write!(f, "{name}")
    }
}

/// The declared type of a variable.
///
/// A scalar has no dimensions; an array records the size of every dimension
/// in declaration order. This mirrors the `[element, size_1, ..., size_k]`
/// shape of the original type lists, so the invariant "type list length is
/// dimensions + 1" becomes `dims.len()` by construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarType {
    /// The element (or scalar) type.
    pub element: ScalarType,
    /// Declared dimension sizes, outermost first. Empty for scalars.
    pub dims:    Vec<usize>,
}

impl VarType {
    /// A scalar of the given type.
    pub const fn scalar(element: ScalarType) -> Self {
        Self { element, dims: Vec::new() }
    }

    /// An array with the given element type and dimension sizes.
    pub const fn array(element: ScalarType, dims: Vec<usize>) -> Self {
        Self { element, dims }
    }

    /// Whether this type has no dimensions.
    pub fn is_scalar(&self) -> bool {
        self.dims.is_empty()
    }
}

impl std::fmt::Display for VarType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.element)?;
        for size in &self.dims {
            write!(f, "[{size}]")?;
        }
        Ok(())
    }
}

/// Identifies the lexical block a variable was declared in.
///
/// `nest_level` is the brace-nesting depth; `block_on_level` is an ordinal
/// that disambiguates sibling blocks at the same depth, so two `if` bodies
/// both at depth 1 are different blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block {
    /// Brace-nesting depth of the block.
    pub nest_level:     usize,
    /// Ordinal of the block among all blocks opened at this depth.
    pub block_on_level: usize,
}

impl Block {
    /// The top-level block every program starts in.
    pub const TOP_LEVEL: Self = Self { nest_level: 0, block_on_level: 1 };
}

/// A record in the identifier table.
///
/// The lexer creates one placeholder per distinct spelling (`ty == None`);
/// the parser binds type and block when a declaration is parsed, appending
/// fresh records for shadowing declarations of the same name. The
/// interpreter writes `value` during execution. Records are never removed:
/// all variables, across all scopes, persist in this one flat table.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    /// The identifier's spelling.
    pub name:  String,
    /// Declared type; `None` until a declaration binds this record.
    pub ty:    Option<VarType>,
    /// The block the variable was declared in.
    pub block: Block,
    /// Runtime value; `None` until the declaration statement executes.
    pub value: Option<Value>,
}

impl Variable {
    /// An unbound placeholder, as created by the lexer.
    pub fn placeholder(name: impl Into<String>) -> Self {
        Self { name:  name.into(),
               ty:    None,
               block: Block { nest_level: 0, block_on_level: 0 },
               value: None, }
    }
}

/// The four symbol tables shared by every phase of the pipeline.
///
/// Each table is an append-only deduplicated vector: a distinct operator,
/// keyword, constant, or identifier spelling is inserted once and referenced
/// thereafter by index. Tokens and syntax-tree nodes carry `(table, index)`
/// pairs instead of owned strings.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Tables {
    /// Operator spellings (`"+"`, `"=="`, `";"`, ...).
    pub operators:   Vec<String>,
    /// Keyword spellings (`"int"`, `"while"`, `"to_string"`, ...).
    pub keywords:    Vec<String>,
    /// Typed literals.
    pub constants:   Vec<Constant>,
    /// Variable records, one per declaration plus unbound placeholders.
    pub identifiers: Vec<Variable>,
}

impl Tables {
    /// Creates four empty tables.
    pub fn new() -> Self {
        Self::default()
    }

    /// Interns an operator spelling, returning its table index.
    pub fn intern_operator(&mut self, text: &str) -> usize {
        intern_str(&mut self.operators, text)
    }

    /// Interns a keyword spelling, returning its table index.
    pub fn intern_keyword(&mut self, text: &str) -> usize {
        intern_str(&mut self.keywords, text)
    }

    /// Interns a constant, returning its table index.
    ///
    /// Equal literals (same spelling and type) share one slot.
    pub fn intern_constant(&mut self, constant: Constant) -> usize {
        if let Some(index) = self.constants.iter().position(|c| *c == constant) {
            return index;
        }
        self.constants.push(constant);
        self.constants.len() - 1
    }

    /// Interns an identifier spelling, returning the index of its record.
    ///
    /// The lexer calls this on every identifier occurrence; the first
    /// occurrence of a spelling creates an unbound placeholder and later
    /// occurrences reuse it. Shadowing records are appended by the parser,
    /// not here.
    pub fn intern_identifier(&mut self, name: &str) -> usize {
        if let Some(index) = self.identifiers.iter().position(|v| v.name == name) {
            return index;
        }
        self.identifiers.push(Variable::placeholder(name));
        self.identifiers.len() - 1
    }

    /// The operator spelling at `index`.
    pub fn operator(&self, index: usize) -> &str {
        &self.operators[index]
    }

    /// The keyword spelling at `index`.
    pub fn keyword(&self, index: usize) -> &str {
        &self.keywords[index]
    }

    /// The constant at `index`.
    pub fn constant(&self, index: usize) -> &Constant {
        &self.constants[index]
    }

    /// The variable record at `index`.
    pub fn variable(&self, index: usize) -> &Variable {
        &self.identifiers[index]
    }

    /// Mutable access to the variable record at `index`.
    pub fn variable_mut(&mut self, index: usize) -> &mut Variable {
        &mut self.identifiers[index]
    }

    /// Finds the bound variable with the given name declared in `block`.
    ///
    /// Placeholders (`ty == None`) never match; a variable is identified by
    /// its name and the exact block it was declared in.
    pub fn find_in_block(&self, name: &str, block: Block) -> Option<usize> {
        self.identifiers
            .iter()
            .position(|v| v.ty.is_some() && v.block == block && v.name == name)
    }

    /// Finds an unbound placeholder with the given name.
    pub fn find_placeholder(&self, name: &str) -> Option<usize> {
        self.identifiers
            .iter()
            .position(|v| v.ty.is_none() && v.name == name)
    }

    /// Appends a variable record, returning its index.
    pub fn push_variable(&mut self, variable: Variable) -> usize {
        self.identifiers.push(variable);
        self.identifiers.len() - 1
    }
}

fn intern_str(table: &mut Vec<String>, text: &str) -> usize {
    if let Some(index) = table.iter().position(|entry| entry == text) {
        return index;
    }
    table.push(text.to_string());
    table.len() - 1
}
