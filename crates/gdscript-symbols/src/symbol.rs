use gdscript_ast::NodeId;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// What kind of thing a [`Symbol`] names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SymbolKind {
    Variable,
    Constant,
    Method,
    Parameter,
    Signal,
    Enum,
    EnumValue,
    Class,
    InnerClass,
    Property,
}

impl SymbolKind {
    /// Assignment to a symbol of this kind is always illegal, regardless
    /// of where the assignment occurs (`ConstantReassignment`).
    pub const fn is_immutable(self) -> bool {
        matches!(self, SymbolKind::Constant | SymbolKind::EnumValue)
    }

    pub const fn is_callable(self) -> bool {
        matches!(self, SymbolKind::Method | SymbolKind::Signal)
    }

    pub const fn is_type(self) -> bool {
        matches!(self, SymbolKind::Class | SymbolKind::InnerClass | SymbolKind::Enum)
    }
}

/// A declared name: its kind, declared/inferred type, and the node that
/// introduced it. Lives inside exactly one [`crate::Scope`].
#[derive(Debug, Clone, PartialEq)]
pub struct Symbol {
    pub name: String,
    pub kind: SymbolKind,
    /// The node that introduced this symbol (`VariableDecl`,
    /// `MethodDecl`, `ParameterDecl`, ...).
    pub declaration: NodeId,
    /// Explicit type annotation, when the declaration wrote one out.
    pub declared_type: Option<String>,
    /// Element/value type parameter for `Array[T]` / `Dictionary[K, V]`
    /// declared types, when present.
    pub type_arguments: Vec<String>,
    pub is_static: bool,
}

impl Symbol {
    pub fn new(name: impl Into<String>, kind: SymbolKind, declaration: NodeId) -> Self {
        Symbol {
            name: name.into(),
            kind,
            declaration,
            declared_type: None,
            type_arguments: Vec::new(),
            is_static: false,
        }
    }

    pub fn with_declared_type(mut self, type_name: impl Into<String>) -> Self {
        self.declared_type = Some(type_name.into());
        self
    }

    pub fn with_static(mut self, is_static: bool) -> Self {
        self.is_static = is_static;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(n: u32) -> NodeId {
        NodeId::new(n)
    }

    #[test]
    fn constant_and_enum_value_are_immutable() {
        assert!(SymbolKind::Constant.is_immutable());
        assert!(SymbolKind::EnumValue.is_immutable());
        assert!(!SymbolKind::Variable.is_immutable());
    }

    #[test]
    fn builder_methods_set_fields() {
        let symbol = Symbol::new("speed", SymbolKind::Variable, node(0))
            .with_declared_type("float")
            .with_static(true);
        assert_eq!(symbol.declared_type.as_deref(), Some("float"));
        assert!(symbol.is_static);
    }
}
