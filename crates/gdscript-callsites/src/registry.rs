//! The concurrent call-site index (§4.H, §5 "Call-site registry").
//!
//! Registration takes a fine-grained lock on the bucket for the call's
//! target class only; lookups take a read lock on that same bucket and
//! clone out an immutable snapshot of the matching entries, so readers
//! never block each other and never block a writer registering calls
//! against a *different* target class.

use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::entry::{CallSiteEntry, WILDCARD_CLASS};

type MethodMap = FxHashMap<String, Vec<CallSiteEntry>>;

/// `(target class, method name) -> [CallSiteEntry]`, bucketed by target
/// class so concurrent registration against different classes never
/// contends on the same lock.
#[derive(Default)]
pub struct CallSiteRegistry {
    buckets: RwLock<FxHashMap<String, Arc<RwLock<MethodMap>>>>,
}

impl CallSiteRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn bucket(&self, target_class: &str) -> Arc<RwLock<MethodMap>> {
        if let Some(bucket) = self.buckets.read().get(target_class) {
            return Arc::clone(bucket);
        }
        let mut buckets = self.buckets.write();
        Arc::clone(buckets.entry(target_class.to_string()).or_insert_with(|| Arc::new(RwLock::new(FxHashMap::default()))))
    }

    /// Adds one call-site entry to its `(target_class, target_method)` bucket.
    pub fn register(&self, entry: CallSiteEntry) {
        let bucket = self.bucket(&entry.target_class);
        let method = entry.target_method.clone();
        bucket.write().entry(method).or_default().push(entry);
    }

    /// Adds every entry a single file's analysis produced.
    pub fn register_all(&self, entries: impl IntoIterator<Item = CallSiteEntry>) {
        for entry in entries {
            self.register(entry);
        }
    }

    /// Entries registered under `(target_class, method)` exactly.
    pub fn lookup(&self, target_class: &str, method: &str) -> Vec<CallSiteEntry> {
        let Some(bucket) = self.buckets.read().get(target_class).cloned() else {
            return Vec::new();
        };
        bucket.read().get(method).cloned().unwrap_or_default()
    }

    /// Entries under `(target_class, method)` plus every duck-typed
    /// entry under `("*", method)` — the query form most callers of
    /// the cross-method flow analyzer actually want.
    pub fn lookup_with_wildcard(&self, target_class: &str, method: &str) -> Vec<CallSiteEntry> {
        let mut out = self.lookup(target_class, method);
        if target_class != WILDCARD_CLASS {
            out.extend(self.lookup(WILDCARD_CLASS, method));
        }
        out
    }

    /// Removes every entry recorded for `(source_file, source_method)`,
    /// across every target-class bucket. Used when a method is removed
    /// or its body changes in the incremental pipeline (§4.K "Call-site
    /// delta updater").
    pub fn unregister_method(&self, source_file: &str, source_method: &str) {
        let snapshot: Vec<Arc<RwLock<MethodMap>>> = self.buckets.read().values().cloned().collect();
        for bucket in snapshot {
            let mut bucket = bucket.write();
            for entries in bucket.values_mut() {
                entries.retain(|e| !(e.source_file == source_file && e.source_method.as_deref() == Some(source_method)));
            }
        }
    }

    /// Removes every entry recorded for `source_file`, regardless of
    /// which method they came from — used when a whole file is
    /// removed from the project or about to be fully reparsed.
    pub fn unregister_file(&self, source_file: &str) {
        let snapshot: Vec<Arc<RwLock<MethodMap>>> = self.buckets.read().values().cloned().collect();
        for bucket in snapshot {
            let mut bucket = bucket.write();
            for entries in bucket.values_mut() {
                entries.retain(|e| e.source_file != source_file);
            }
        }
    }

    /// Total number of registered entries, across every bucket. Mostly
    /// useful for tests and diagnostics.
    pub fn len(&self) -> usize {
        self.buckets.read().values().map(|bucket| bucket.read().values().map(Vec::len).sum::<usize>()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::Confidence;
    use gdscript_ast::NodeId;
    use gdscript_semantic::GDType;

    fn entry(file: &str, method_src: &str, target_class: &str, target_method: &str) -> CallSiteEntry {
        CallSiteEntry {
            source_file: file.to_string(),
            source_method: Some(method_src.to_string()),
            line: 1,
            column: 0,
            target_class: target_class.to_string(),
            target_method: target_method.to_string(),
            call_node: NodeId::new(0),
            confidence: Confidence::Strict,
            duck_typed: false,
            arg_types: vec![GDType::Int],
        }
    }

    #[test]
    fn lookup_returns_only_matching_bucket() {
        let registry = CallSiteRegistry::new();
        registry.register(entry("a.gd", "f", "Player", "take_damage"));
        registry.register(entry("b.gd", "g", "Enemy", "take_damage"));
        assert_eq!(registry.lookup("Player", "take_damage").len(), 1);
        assert_eq!(registry.lookup("Enemy", "take_damage").len(), 1);
        assert!(registry.lookup("Player", "heal").is_empty());
    }

    #[test]
    fn wildcard_lookup_merges_specific_and_duck_typed() {
        let registry = CallSiteRegistry::new();
        registry.register(entry("a.gd", "f", "Player", "take_damage"));
        let mut duck = entry("b.gd", "g", WILDCARD_CLASS, "take_damage");
        duck.duck_typed = true;
        duck.confidence = Confidence::Potential;
        registry.register(duck);
        assert_eq!(registry.lookup_with_wildcard("Player", "take_damage").len(), 2);
    }

    #[test]
    fn unregister_method_removes_only_that_methods_entries() {
        let registry = CallSiteRegistry::new();
        registry.register(entry("a.gd", "f", "Player", "take_damage"));
        registry.register(entry("a.gd", "h", "Player", "take_damage"));
        registry.unregister_method("a.gd", "f");
        let remaining = registry.lookup("Player", "take_damage");
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].source_method.as_deref(), Some("h"));
    }

    #[test]
    fn unregister_file_clears_every_bucket_for_that_file() {
        let registry = CallSiteRegistry::new();
        registry.register(entry("a.gd", "f", "Player", "take_damage"));
        registry.register(entry("a.gd", "f", WILDCARD_CLASS, "other"));
        registry.unregister_file("a.gd");
        assert!(registry.is_empty());
    }
}
