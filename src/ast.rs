use crate::interpreter::tables::{ConstType, Tables};

/// Synthetic markers for constructs that have no lexical token of their own.
///
/// These replace the original implementation's synthetic marker table: a
/// node whose kind is a marker is classified by the marker itself rather
/// than by a table lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    /// The root of the syntax tree.
    Program,
    /// A declaration statement; its children are the declarators.
    Declare,
    /// A `{}`-delimited block; its children are the statements.
    CompoundStatement,
    /// An element access; children are the base identifier followed by one
    /// node per index expression.
    Indexation,
}

/// Classifies a syntax-tree node.
///
/// The original implementation distinguished node kinds by which shared
/// table the node referenced; here that closed union is an explicit enum,
/// with each variant carrying the index into the owning table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// An operator; the payload indexes the operators table.
    Operator(usize),
    /// A keyword; the payload indexes the keywords table.
    Keyword(usize),
    /// An identifier; the payload indexes the *specific* variable record
    /// resolved for the scope the identifier is used in.
    Identifier(usize),
    /// A literal; the payload indexes the constants table.
    Constant(usize),
    /// A synthetic construct.
    Marker(Marker),
}

/// A node of the syntax tree.
///
/// The tree is fully built by the parser before semantic analysis or
/// execution begins; both later phases only read it.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// What this node is.
    pub kind:     NodeKind,
    /// Ordered child nodes.
    pub children: Vec<Node>,
    /// 1-based source line.
    pub line:     usize,
    /// 1-based source column.
    pub column:   usize,
}

impl Node {
    /// Creates a node with no children.
    pub const fn leaf(kind: NodeKind, line: usize, column: usize) -> Self {
        Self { kind, children: Vec::new(), line, column }
    }

    /// Creates a node with the given children.
    pub const fn with_children(kind: NodeKind,
                               children: Vec<Self>,
                               line: usize,
                               column: usize)
                               -> Self {
        Self { kind, children, line, column }
    }

    /// Creates a marker node with the given children.
    pub const fn marker(marker: Marker, children: Vec<Self>, line: usize, column: usize) -> Self {
        Self::with_children(NodeKind::Marker(marker), children, line, column)
    }

    /// Whether this node is the given operator.
    pub fn is_operator(&self, tables: &Tables, text: &str) -> bool {
        matches!(self.kind, NodeKind::Operator(index) if tables.operator(index) == text)
    }

    /// Whether this node is any of the given operators.
    pub fn is_any_operator(&self, tables: &Tables, texts: &[&str]) -> bool {
        matches!(self.kind, NodeKind::Operator(index)
                 if texts.contains(&tables.operator(index)))
    }

    /// Whether this node is the given keyword.
    pub fn is_keyword(&self, tables: &Tables, text: &str) -> bool {
        matches!(self.kind, NodeKind::Keyword(index) if tables.keyword(index) == text)
    }

    /// Whether this node is any of the given keywords.
    pub fn is_any_keyword(&self, tables: &Tables, texts: &[&str]) -> bool {
        matches!(self.kind, NodeKind::Keyword(index)
                 if texts.contains(&tables.keyword(index)))
    }

    /// Whether this node is the given marker.
    pub fn is_marker(&self, marker: Marker) -> bool {
        self.kind == NodeKind::Marker(marker)
    }

    /// The operator spelling, if this node is an operator.
    pub fn operator_text<'t>(&self, tables: &'t Tables) -> Option<&'t str> {
        match self.kind {
            NodeKind::Operator(index) => Some(tables.operator(index)),
            _ => None,
        }
    }

    /// The keyword spelling, if this node is a keyword.
    pub fn keyword_text<'t>(&self, tables: &'t Tables) -> Option<&'t str> {
        match self.kind {
            NodeKind::Keyword(index) => Some(tables.keyword(index)),
            _ => None,
        }
    }

    /// The identifier-table index, if this node is an identifier.
    pub fn identifier_index(&self) -> Option<usize> {
        match self.kind {
            NodeKind::Identifier(index) => Some(index),
            _ => None,
        }
    }

    /// The constants-table index, if this node is a constant.
    pub fn constant_index(&self) -> Option<usize> {
        match self.kind {
            NodeKind::Constant(index) => Some(index),
            _ => None,
        }
    }

    /// Whether this node is a constant of the given type.
    pub fn is_constant_of_type(&self, tables: &Tables, ty: ConstType) -> bool {
        matches!(self.kind, NodeKind::Constant(index) if tables.constant(index).ty == ty)
    }
}

/// Prints a tree to stderr, one node per line, indented by depth.
///
/// Debugging aid; not used by the pipeline itself.
pub fn dump_tree(node: &Node, tables: &Tables, depth: usize) {
    let text = match node.kind {
        NodeKind::Operator(index) => tables.operator(index).to_string(),
        NodeKind::Keyword(index) => tables.keyword(index).to_string(),
        NodeKind::Identifier(index) => tables.variable(index).name.clone(),
        NodeKind::Constant(index) => tables.constant(index).value.clone(),
        NodeKind::Marker(marker) => format!("{marker:?}"),
    };
    eprintln!("{}{text}", "\t".repeat(depth));
    for child in &node.children {
        dump_tree(child, tables, depth + 1);
    }
}
