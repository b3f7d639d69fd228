use crate::{
    error::ParserError,
    interpreter::{
        parser::core::ParseResult,
        tables::{Block, Tables, Variable, VarType},
    },
};

/// The stack of lexical blocks the parser is currently inside.
///
/// Each frame identifies one block by `(nest_level, block_on_level)`.
/// Entering a `{`-delimited compound statement pushes a frame with the next
/// unused ordinal for that depth; exiting pops it. Only *visibility* is
/// unwound on block exit: the variable records themselves stay in the flat
/// identifier table for the lifetime of the run.
pub struct ScopeStack {
    frames:        Vec<Block>,
    /// How many blocks have been opened at each depth so far, across the
    /// whole program; index is the depth.
    blocks_opened: Vec<usize>,
}

impl ScopeStack {
    /// A stack holding only the top-level block.
    pub fn new() -> Self {
        Self { frames:        vec![Block::TOP_LEVEL],
               blocks_opened: vec![1], }
    }

    /// Enters a new compound statement.
    pub fn enter_block(&mut self) {
        let nest_level = self.current().nest_level + 1;
        if self.blocks_opened.len() <= nest_level {
            self.blocks_opened.push(0);
        }
        self.blocks_opened[nest_level] += 1;
        self.frames.push(Block { nest_level,
                                 block_on_level: self.blocks_opened[nest_level] });
    }

    /// Leaves the innermost block.
    pub fn exit_block(&mut self) {
        self.frames.pop();
    }

    /// The innermost block.
    pub fn current(&self) -> Block {
        self.frames.last().copied().unwrap_or(Block::TOP_LEVEL)
    }

    /// Binds a declaration in the current block.
    ///
    /// The first declaration of a spelling binds the lexer's placeholder
    /// record in place; shadowing declarations append a fresh record, so no
    /// two variables with equal `(name, block)` ever coexist.
    ///
    /// # Errors
    /// `DoubleDeclaration` if the name is already bound in the current
    /// block.
    pub fn declare(&self,
                   tables: &mut Tables,
                   name: &str,
                   ty: VarType,
                   line: usize,
                   column: usize)
                   -> ParseResult<usize> {
        let block = self.current();
        if tables.find_in_block(name, block).is_some() {
            return Err(ParserError::DoubleDeclaration { name: name.to_string(), line, column });
        }

        if let Some(index) = tables.find_placeholder(name) {
            let variable = tables.variable_mut(index);
            variable.ty = Some(ty);
            variable.block = block;
            return Ok(index);
        }

        Ok(tables.push_variable(Variable { name:  name.to_string(),
                                           ty:    Some(ty),
                                           block,
                                           value: None, }))
    }

    /// Resolves a *use* of a name to the variable record it binds to.
    ///
    /// Searches the stack from the innermost block outward; the first block
    /// containing a binding for the name wins, which is what makes inner
    /// declarations shadow outer ones.
    ///
    /// # Errors
    /// `UsingOfNotDeclared` if no enclosing block declares the name.
    pub fn resolve(&self,
                   tables: &Tables,
                   name: &str,
                   line: usize,
                   column: usize)
                   -> ParseResult<usize> {
        for frame in self.frames.iter().rev() {
            if let Some(index) = tables.find_in_block(name, *frame) {
                return Ok(index);
            }
        }
        Err(ParserError::UsingOfNotDeclared { name: name.to_string(), line, column })
    }
}

impl Default for ScopeStack {
    fn default() -> Self {
        Self::new()
    }
}
