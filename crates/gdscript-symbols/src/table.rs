use crate::scope::{Scope, ScopeId, ScopeKind};
use crate::symbol::Symbol;

/// The scope stack plus the flattened set of all scopes ever pushed.
///
/// Popping a scope removes it from the active stack but keeps it in
/// `scopes` under its id, so a later query (hover, go-to-definition)
/// can still resolve what was visible at a given point in the tree.
#[derive(Debug, Default)]
pub struct SymbolTable {
    scopes: Vec<Scope>,
    stack: Vec<ScopeId>,
}

impl SymbolTable {
    /// A fresh table with just the global scope, already pushed.
    pub fn new() -> Self {
        let mut table = SymbolTable { scopes: Vec::new(), stack: Vec::new() };
        table.push(ScopeKind::Global);
        table
    }

    /// Pushes a new scope whose parent is the current top of stack (or
    /// no parent, for the first call). Returns the new scope's id.
    pub fn push(&mut self, kind: ScopeKind) -> ScopeId {
        let id = self.scopes.len();
        let parent = self.stack.last().copied();
        self.scopes.push(Scope::new(id, parent, kind));
        self.stack.push(id);
        id
    }

    /// Pops the current scope off the active stack. The scope remains
    /// queryable by id via [`SymbolTable::scope`].
    pub fn pop(&mut self) {
        self.stack.pop();
    }

    /// The active scope. Falls back to the global scope (id `0`) if
    /// every pushed scope has been popped, which should not happen in
    /// correct usage (callers push before popping) but keeps this
    /// infallible rather than panicking on a caller's bookkeeping bug.
    pub fn current(&self) -> ScopeId {
        self.stack.last().copied().unwrap_or(0)
    }

    pub fn scope(&self, id: ScopeId) -> &Scope {
        &self.scopes[id]
    }

    pub fn scope_mut(&mut self, id: ScopeId) -> &mut Scope {
        &mut self.scopes[id]
    }

    /// Declares `symbol` in the current scope.
    pub fn declare(&mut self, symbol: Symbol) -> Option<Symbol> {
        let current = self.current();
        self.scopes[current].declare(symbol)
    }

    /// Walks parent pointers starting at `from`, returning the nearest
    /// declaration of `name`.
    pub fn lookup(&self, from: ScopeId, name: &str) -> Option<&Symbol> {
        let mut cursor = Some(from);
        while let Some(id) = cursor {
            let scope = &self.scopes[id];
            if let Some(symbol) = scope.get_local(name) {
                return Some(symbol);
            }
            cursor = scope.parent;
        }
        None
    }

    /// Looks up `name` only in `scope_id`, without walking parents.
    pub fn lookup_local(&self, scope_id: ScopeId, name: &str) -> Option<&Symbol> {
        self.scopes[scope_id].get_local(name)
    }

    /// Total number of scopes ever pushed, including popped ones —
    /// the valid range of ids for [`SymbolTable::scope`].
    pub fn scope_count(&self) -> usize {
        self.scopes.len()
    }

    /// Finds `name` in any scope this table has ever held, regardless
    /// of lexical nesting — the file-level `FindSymbol(name)` query,
    /// which doesn't know or care which scope a class-level method or
    /// variable declaration ended up in.
    pub fn find(&self, name: &str) -> Option<&Symbol> {
        self.scopes.iter().find_map(|scope| scope.get_local(name))
    }

    /// True when `from` or any enclosing scope is a loop.
    pub fn in_loop(&self, from: ScopeId) -> bool {
        self.walk_kinds(from, ScopeKind::is_loop)
    }

    /// True when `from` or any enclosing scope is a method or lambda.
    pub fn in_function(&self, from: ScopeId) -> bool {
        self.walk_kinds(from, ScopeKind::is_function)
    }

    /// True when `from` or any enclosing scope is a class body.
    pub fn in_class(&self, from: ScopeId) -> bool {
        self.walk_kinds(from, |kind| kind == ScopeKind::Class)
    }

    fn walk_kinds(&self, from: ScopeId, predicate: impl Fn(ScopeKind) -> bool) -> bool {
        let mut cursor = Some(from);
        while let Some(id) = cursor {
            let scope = &self.scopes[id];
            if predicate(scope.kind) {
                return true;
            }
            cursor = scope.parent;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbol::SymbolKind;
    use gdscript_ast::NodeId;

    #[test]
    fn find_locates_a_symbol_in_a_popped_nested_scope() {
        let mut table = SymbolTable::new();
        table.push(ScopeKind::Class);
        let method_scope = table.push(ScopeKind::Method);
        table.declare(Symbol::new("local_var", SymbolKind::Variable, NodeId::new(0)));
        assert_eq!(table.current(), method_scope);
        table.pop();
        table.pop();
        assert!(table.find("local_var").is_some());
        assert!(table.find("does_not_exist").is_none());
    }

    #[test]
    fn lookup_walks_parent_chain() {
        let mut table = SymbolTable::new();
        table.declare(Symbol::new("x", SymbolKind::Variable, NodeId::new(0)));
        let class_scope = table.push(ScopeKind::Class);
        let method_scope = table.push(ScopeKind::Method);
        assert!(table.lookup(method_scope, "x").is_some());
        assert!(table.lookup_local(method_scope, "x").is_none());
        table.pop();
        assert_eq!(table.current(), class_scope);
    }

    #[test]
    fn duplicate_declaration_returns_previous_symbol() {
        let mut table = SymbolTable::new();
        table.declare(Symbol::new("x", SymbolKind::Variable, NodeId::new(0)));
        let replaced = table.declare(Symbol::new("x", SymbolKind::Variable, NodeId::new(1)));
        assert!(replaced.is_some());
    }

    #[test]
    fn loop_and_function_membership_walk_the_stack_once() {
        let mut table = SymbolTable::new();
        table.push(ScopeKind::Method);
        let loop_scope = table.push(ScopeKind::ForLoop);
        let body_scope = table.push(ScopeKind::Block);
        assert!(table.in_loop(body_scope));
        assert!(table.in_function(body_scope));
        assert!(!table.in_class(body_scope));
        assert_eq!(table.current(), body_scope);
        let _ = loop_scope;
    }
}
