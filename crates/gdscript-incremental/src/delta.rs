//! Call-site delta updater (§4.K): on reparse of a file, diffs its
//! methods by name and exact body text, un-registers the call sites of
//! whatever changed, and re-registers the new ones — instead of
//! re-registering every call site in the file on every edit.

use gdscript_ast::{NodeKind, Tree};
use gdscript_callsites::{classify_call_sites, CallSiteRegistry};
use gdscript_semantic::CallObservation;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::graph::DependencyGraph;

/// One method's name mapped to the exact printed text of its body, the
/// unit the delta updater compares old vs. new trees by.
fn method_bodies(tree: &Tree) -> FxHashMap<String, String> {
    let mut out = FxHashMap::default();
    for node_id in tree.all_nodes(tree.root()) {
        let NodeKind::MethodDecl { name: Some(name), body, .. } = &tree.get(node_id).kind else {
            continue;
        };
        out.insert(name.text.to_string(), gdscript_reader::print_subtree(tree, *body));
    }
    out
}

/// Names of methods present in `old` whose body text differs (or is
/// absent) in `new`, plus methods present in `new` but absent from
/// `old` — the set whose call sites must be re-registered.
fn changed_method_names(old: &Tree, new: &Tree) -> FxHashSet<String> {
    let old_bodies = method_bodies(old);
    let new_bodies = method_bodies(new);
    let mut changed = FxHashSet::default();
    for (name, old_body) in &old_bodies {
        match new_bodies.get(name) {
            Some(new_body) if new_body == old_body => {}
            _ => {
                changed.insert(name.clone());
            }
        }
    }
    for name in new_bodies.keys() {
        if !old_bodies.contains_key(name) {
            changed.insert(name.clone());
        }
    }
    changed
}

/// Re-registers `file_path`'s call sites after a reparse: un-registers
/// every call site the changed methods previously contributed, then
/// registers whatever `classify_call_sites` reports for the new tree,
/// filtered to those same changed methods (unchanged methods keep
/// their existing registry entries untouched).
#[allow(clippy::too_many_arguments)]
pub fn apply_call_site_delta(
    registry: &CallSiteRegistry,
    file_path: &str,
    old_tree: &Tree,
    new_tree: &Tree,
    new_source: &str,
    new_call_observations: &[CallObservation],
    class_name: &str,
    extends_name: Option<&str>,
) {
    let changed = changed_method_names(old_tree, new_tree);
    for method in &changed {
        registry.unregister_method(file_path, method);
    }
    if changed.is_empty() {
        return;
    }
    let observations_for_changed: Vec<CallObservation> =
        new_call_observations.iter().filter(|obs| obs.caller_method.as_deref().is_some_and(|m| changed.contains(m))).cloned().collect();
    let entries = classify_call_sites(file_path, new_source, new_tree, &observations_for_changed, class_name, extends_name);
    registry.register_all(entries);
}

/// Files that reference `file_path`'s declared class name — exposed
/// alongside the delta updater so a caller invalidating `file_path`
/// knows which other files' cached analyses are now stale too (§4.K
/// "Also exposes *affected files*").
pub fn affected_files(graph: &DependencyGraph, file_path: &str) -> Vec<String> {
    graph.predecessors(file_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gdscript_reader::parse_file;
    use gdscript_runtime::NullRuntimeTypeProvider;
    use gdscript_semantic::{analyze_tree, GDValidationOptions};

    #[test]
    fn unchanged_method_body_is_not_in_the_changed_set() {
        let old = parse_file("func f():\n\tpass\n").tree;
        let new = parse_file("func f():\n\tpass\n").tree;
        assert!(changed_method_names(&old, &new).is_empty());
    }

    #[test]
    fn edited_method_body_is_in_the_changed_set() {
        let old = parse_file("func f():\n\tpass\n").tree;
        let new = parse_file("func f():\n\tprint(1)\n").tree;
        assert_eq!(changed_method_names(&old, &new), FxHashSet::from_iter(["f".to_string()]));
    }

    #[test]
    fn added_method_is_in_the_changed_set() {
        let old = parse_file("func f():\n\tpass\n").tree;
        let new = parse_file("func f():\n\tpass\n\nfunc g():\n\tpass\n").tree;
        assert_eq!(changed_method_names(&old, &new), FxHashSet::from_iter(["g".to_string()]));
    }

    #[test]
    fn apply_call_site_delta_only_touches_the_changed_method() {
        let registry = CallSiteRegistry::new();
        let runtime = NullRuntimeTypeProvider;
        let old_source = "func f():\n\tself.a()\n\nfunc g():\n\tself.b()\n\nfunc a():\n\tpass\n\nfunc b():\n\tpass\n";
        let old_tree = parse_file(old_source).tree;
        let old_analysis = analyze_tree(old_source, &old_tree, &GDValidationOptions::default(), &runtime);
        let entries = classify_call_sites("a.gd", old_source, &old_tree, &old_analysis.call_observations, "Foo", None);
        registry.register_all(entries);
        assert_eq!(registry.lookup("Foo", "a").len(), 1);
        assert_eq!(registry.lookup("Foo", "b").len(), 1);

        let new_source = "func f():\n\tself.a()\n\tself.a()\n\nfunc g():\n\tself.b()\n\nfunc a():\n\tpass\n\nfunc b():\n\tpass\n";
        let new_tree = parse_file(new_source).tree;
        let new_analysis = analyze_tree(new_source, &new_tree, &GDValidationOptions::default(), &runtime);
        apply_call_site_delta(&registry, "a.gd", &old_tree, &new_tree, new_source, &new_analysis.call_observations, "Foo", None);

        assert_eq!(registry.lookup("Foo", "a").len(), 2);
        assert_eq!(registry.lookup("Foo", "b").len(), 1);
    }
}
