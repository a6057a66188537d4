//! The read-only global symbol index §5 requires to exist, fully
//! populated, before the parallel analysis phase starts and to never
//! be mutated while that phase runs.

use gdscript_semantic::Declarations;
use rustc_hash::FxHashMap;

/// Maps every file's class identity ([`crate::ScriptFile::class_identity`])
/// to the declarations it collected. Built once, sequentially, by
/// [`crate::Project::analyze_all`]'s first phase; read (never written)
/// by the second, optionally parallel, phase.
#[derive(Debug, Clone, Default)]
pub struct GlobalIndex {
    by_class: FxHashMap<String, Declarations>,
}

impl GlobalIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, class_identity: String, declarations: Declarations) {
        self.by_class.insert(class_identity, declarations);
    }

    pub fn get(&self, class_identity: &str) -> Option<&Declarations> {
        self.by_class.get(class_identity)
    }

    pub fn contains(&self, class_identity: &str) -> bool {
        self.by_class.contains_key(class_identity)
    }

    pub fn len(&self) -> usize {
        self.by_class.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_class.is_empty()
    }
}
