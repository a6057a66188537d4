//! Class-level symbol inventory built by the `declaration` pass and
//! consulted by every pass that runs after it — forward references to a
//! method or constant declared later in the file resolve because this
//! table is populated before the `scope` pass ever walks a body.

use gdscript_ast::NodeId;
use rustc_hash::FxHashMap;

/// A method's shape as far as the `calls` pass needs to know it: how
/// many parameters it declares, and how many of those have no default
/// value and so must be supplied at every call site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodSignature {
    pub node: NodeId,
    pub param_count: usize,
    pub min_required: usize,
}

/// One class's worth of top-level declarations. Inner classes get their
/// own `Declarations` nested under `inner_classes`; they do not share
/// their enclosing class's namespace.
#[derive(Debug, Clone, Default)]
pub struct Declarations {
    pub class_name: Option<String>,
    pub extends_name: Option<String>,
    pub methods: FxHashMap<String, MethodSignature>,
    pub class_vars: FxHashMap<String, NodeId>,
    pub constants: FxHashMap<String, NodeId>,
    pub signals: FxHashMap<String, NodeId>,
    pub enums: FxHashMap<String, NodeId>,
    pub enum_values: FxHashMap<String, NodeId>,
    pub inner_classes: FxHashMap<String, Declarations>,
}

impl Declarations {
    /// Every name this class declares at class scope, used by the
    /// `declaration` pass to detect duplicates across the different
    /// maps above (a method and a variable can't share a name either).
    pub fn is_declared(&self, name: &str) -> bool {
        self.methods.contains_key(name)
            || self.class_vars.contains_key(name)
            || self.constants.contains_key(name)
            || self.signals.contains_key(name)
            || self.enums.contains_key(name)
            || self.enum_values.contains_key(name)
            || self.inner_classes.contains_key(name)
    }
}
