//! One observed call site, as stored in the [`crate::CallSiteRegistry`].

use gdscript_ast::NodeId;
use gdscript_semantic::GDType;

/// Wildcard target class bucket duck-typed calls are grouped under.
pub const WILDCARD_CLASS: &str = "*";

/// Tri-level reference confidence (§3 Data model, GLOSSARY). Call-site
/// classification (§4.H) only ever produces `Strict` or `Potential`;
/// `NameMatch` is carried here because it is part of the same external
/// enum and is produced by `gdscript-project`'s project-wide reference
/// lookups (symbol references resolved by name across files without a
/// type-checked receiver).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Confidence {
    Strict,
    NameMatch,
    Potential,
}

/// One call expression, registered under `(target_class, target_method)`.
#[derive(Debug, Clone, PartialEq)]
pub struct CallSiteEntry {
    /// Identifies the file the call was made from. Opaque to this
    /// crate — `gdscript-project` assigns these, typically a `res://`
    /// path string.
    pub source_file: String,
    /// Name of the method the call sits inside, if any (calls made at
    /// class-level initializer expressions have no enclosing method).
    pub source_method: Option<String>,
    pub line: u32,
    pub column: u32,
    pub target_class: String,
    pub target_method: String,
    /// The `CallExpr` node, for span lookups back into the source file.
    pub call_node: NodeId,
    pub confidence: Confidence,
    pub duck_typed: bool,
    /// Inferred type of each argument expression, in call order.
    pub arg_types: Vec<GDType>,
}

impl CallSiteEntry {
    /// The `(target_class, target_method)` registry key for this entry.
    pub fn key(&self) -> (String, String) {
        (self.target_class.clone(), self.target_method.clone())
    }
}
