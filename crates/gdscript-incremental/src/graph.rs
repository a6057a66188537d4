//! Dependency graph (§4.K "Dependency graph"): directed edges added on
//! parse from file `F` to file `G` whenever `F` extends a class `G`
//! declares, references `G`'s `class_name` symbol, or preloads `G`'s
//! resource path.

use gdscript_ast::NodeKind;
use gdscript_project::{Project, ScriptFile};
use rustc_hash::{FxHashMap, FxHashSet};

/// `path -> set of paths it depends on`. A single coarse lock guards
/// callers that share one graph across threads — this type itself is
/// plain data, wrapped in `parking_lot::RwLock` by whoever owns it
/// alongside the rest of the incremental pipeline's state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyGraph {
    edges: FxHashMap<String, FxHashSet<String>>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_edge(&mut self, from: impl Into<String>, to: impl Into<String>) {
        self.edges.entry(from.into()).or_default().insert(to.into());
    }

    /// Drops every edge originating from `file`, used before that
    /// file's dependencies are recomputed on reparse.
    pub fn clear_edges_from(&mut self, file: &str) {
        self.edges.remove(file);
    }

    /// Drops `file` entirely, including as a successor of other files —
    /// used when a file is removed from the project.
    pub fn remove_file(&mut self, file: &str) {
        self.edges.remove(file);
        for successors in self.edges.values_mut() {
            successors.remove(file);
        }
    }

    pub fn successors(&self, file: &str) -> impl Iterator<Item = &str> {
        self.edges.get(file).into_iter().flat_map(|set| set.iter().map(String::as_str))
    }

    /// Files that reference `file`'s declared class name — the inverse
    /// of [`DependencyGraph::successors`], used by the call-site delta
    /// updater's "affected files" query.
    pub fn predecessors(&self, file: &str) -> Vec<String> {
        self.edges.iter().filter(|(_, successors)| successors.contains(file)).map(|(path, _)| path.clone()).collect()
    }

    /// Transitive successors of every file in `changed` — the files
    /// whose semantic model must be recomputed (§4.K `AffectedClosure`).
    pub fn affected_closure(&self, changed: &[String]) -> FxHashSet<String> {
        let mut visited: FxHashSet<String> = FxHashSet::default();
        let mut stack: Vec<String> = changed.to_vec();
        while let Some(file) = stack.pop() {
            for successor in self.successors(&file) {
                if visited.insert(successor.to_string()) {
                    stack.push(successor.to_string());
                }
            }
        }
        visited
    }

    pub fn to_serializable(&self) -> FxHashMap<String, Vec<String>> {
        self.edges.iter().map(|(path, successors)| (path.clone(), successors.iter().cloned().collect())).collect()
    }

    pub fn from_serializable(map: FxHashMap<String, Vec<String>>) -> Self {
        DependencyGraph { edges: map.into_iter().map(|(path, successors)| (path, successors.into_iter().collect())).collect() }
    }
}

/// Recomputes every edge originating from `file` against the rest of
/// `project`'s known files, replacing whatever was there before.
pub fn rebuild_edges_for_file(graph: &mut DependencyGraph, file: &ScriptFile, project: &Project) {
    graph.clear_edges_from(&file.path);
    for target in edges_for_file(file, project) {
        graph.add_edge(file.path.clone(), target);
    }
}

/// Rebuilds the whole graph from scratch by scanning every file in
/// `project` — the path `Project::analyze_all` takes right after its
/// full-analysis phase.
pub fn rebuild_graph(project: &Project) -> DependencyGraph {
    let mut graph = DependencyGraph::new();
    for file in project.files() {
        for target in edges_for_file(file, project) {
            graph.add_edge(file.path.clone(), target);
        }
    }
    graph
}

fn edges_for_file(file: &ScriptFile, project: &Project) -> FxHashSet<String> {
    let mut targets = FxHashSet::default();

    if let Some(extends_name) = &file.declarations.extends_name {
        if let Some(target) = find_path_by_class(project, extends_name) {
            targets.insert(target);
        }
    }

    for node_id in file.tree.all_nodes(file.tree.root()) {
        match &file.tree.get(node_id).kind {
            NodeKind::IdentifierExpr(token) => {
                if let Some(target) = find_path_by_class(project, token.text.as_ref()) {
                    if target != file.path {
                        targets.insert(target);
                    }
                }
            }
            NodeKind::CallExpr { callee, args, .. } => {
                let NodeKind::IdentifierExpr(name) = &file.tree.get(*callee).kind else {
                    continue;
                };
                if name.text.as_ref() != "preload" && name.text.as_ref() != "load" {
                    continue;
                }
                let NodeKind::List { items, .. } = &file.tree.get(*args).kind else {
                    continue;
                };
                let Some(first) = items.first() else {
                    continue;
                };
                if let NodeKind::StringLiteral(token) = &file.tree.get(*first).kind {
                    let path = token.text.as_ref().trim_matches(|c| c == '"' || c == '\'');
                    if project.file(path).is_some() {
                        targets.insert(path.to_string());
                    }
                }
            }
            _ => {}
        }
    }

    targets
}

fn find_path_by_class(project: &Project, class_name: &str) -> Option<String> {
    project.files().find(|f| f.class_identity() == class_name).map(|f| f.path.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn affected_closure_follows_transitive_successors() {
        let mut graph = DependencyGraph::new();
        graph.add_edge("a.gd", "b.gd");
        graph.add_edge("b.gd", "c.gd");
        let closure = graph.affected_closure(&["a.gd".to_string()]);
        assert!(closure.contains("b.gd"));
        assert!(closure.contains("c.gd"));
    }

    #[test]
    fn affected_closure_does_not_include_the_changed_file_itself() {
        let mut graph = DependencyGraph::new();
        graph.add_edge("a.gd", "b.gd");
        let closure = graph.affected_closure(&["a.gd".to_string()]);
        assert!(!closure.contains("a.gd"));
    }

    #[test]
    fn predecessors_finds_files_referencing_the_given_file() {
        let mut graph = DependencyGraph::new();
        graph.add_edge("a.gd", "b.gd");
        graph.add_edge("c.gd", "b.gd");
        let mut preds = graph.predecessors("b.gd");
        preds.sort();
        assert_eq!(preds, vec!["a.gd".to_string(), "c.gd".to_string()]);
    }

    #[test]
    fn remove_file_drops_it_as_both_source_and_target() {
        let mut graph = DependencyGraph::new();
        graph.add_edge("a.gd", "b.gd");
        graph.remove_file("b.gd");
        assert!(graph.successors("a.gd").next().is_none());
    }

    #[test]
    fn graph_round_trips_through_serializable_form() {
        let mut graph = DependencyGraph::new();
        graph.add_edge("a.gd", "b.gd");
        let restored = DependencyGraph::from_serializable(graph.to_serializable());
        assert_eq!(restored, graph);
    }
}
