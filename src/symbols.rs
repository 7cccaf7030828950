//! Symbol table: variable name -> declared type
//!
//! Two views are kept. The scope stack mirrors C block scoping and answers
//! "what type does this name have here" while parsing: a name keeps the type
//! of the declaration that introduced it, later redeclarations become plain
//! assignments in C and do not rebind it, and a loop body's bindings vanish
//! when the loop closes. The flat table records every declaration in source
//! order, last write wins, and is what gets dumped.

use indexmap::IndexMap;
use serde::Serialize;
use crate::ast::TypeTag;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SymbolTable {
    #[serde(skip)]
    scopes: Vec<IndexMap<String, TypeTag>>,
    declared: IndexMap<String, TypeTag>,
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolTable {
    pub fn new() -> Self {
        Self { scopes: vec![IndexMap::new()], declared: IndexMap::new() }
    }

    pub fn enter_scope(&mut self) {
        self.scopes.push(IndexMap::new());
    }

    pub fn exit_scope(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }

    /// Record a declaration. Only the first declaration of a visible name binds it.
    pub fn declare(&mut self, name: impl Into<String>, ty: TypeTag) {
        let name = name.into();
        if self.lookup(&name).is_none() {
            self.current_mut().insert(name.clone(), ty);
        }
        self.declared.insert(name, ty);
    }

    /// Bind a loop counter in the current scope. It is always `int` in C and
    /// shadows any outer variable of the same name; it is not a declaration.
    pub fn bind_loop_var(&mut self, name: impl Into<String>) {
        self.current_mut().insert(name.into(), TypeTag::Poorna);
    }

    /// Binding visible from the current scope, innermost first.
    pub fn lookup(&self, name: &str) -> Option<TypeTag> {
        self.scopes.iter().rev().find_map(|scope| scope.get(name).copied())
    }

    /// Type used to format `name` when printing; unknown names print as `poorna`.
    pub fn type_of(&self, name: &str) -> TypeTag {
        self.lookup(name).unwrap_or_default()
    }

    /// Last declared type of `name` anywhere in the program.
    pub fn get(&self, name: &str) -> Option<TypeTag> {
        self.declared.get(name).copied()
    }

    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    /// Every declared name, in first-declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, TypeTag)> {
        self.declared.iter().map(|(name, ty)| (name.as_str(), *ty))
    }

    pub fn len(&self) -> usize {
        self.declared.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declared.is_empty()
    }

    fn current_mut(&mut self) -> &mut IndexMap<String, TypeTag> {
        let last = self.scopes.len() - 1;
        &mut self.scopes[last]
    }
}
