//! Top-level incremental pipeline (§6 "Incremental API"), wiring the
//! file change tracker, dependency graph, and call-site registry around
//! a [`gdscript_project::Project`].

use rustc_hash::FxHashSet;

use gdscript_project::{CancellationToken, Parallelism, Project};
use gdscript_runtime::RuntimeTypeProvider;
use gdscript_semantic::GDValidationOptions;

use crate::error::ToolError;
use crate::graph::{rebuild_graph, DependencyGraph};
use crate::state::PersistedState;
use crate::tracker::{ChangeSet, FileChangeTracker};

/// Owns a project plus the bookkeeping that lets repeated `analyze_all`
/// runs skip work for files that haven't changed: a content-hash
/// tracker and the dependency graph `AffectedClosure` walks.
pub struct IncrementalPipeline {
    project: Project,
    tracker: FileChangeTracker,
    graph: DependencyGraph,
}

impl IncrementalPipeline {
    pub fn new(project: Project) -> Self {
        IncrementalPipeline { project, tracker: FileChangeTracker::new(), graph: DependencyGraph::new() }
    }

    pub fn project(&self) -> &Project {
        &self.project
    }

    pub fn project_mut(&mut self) -> &mut Project {
        &mut self.project
    }

    pub fn dependency_graph(&self) -> &DependencyGraph {
        &self.graph
    }

    /// §6 "DetectChanges()": diffs the project's current file sources
    /// against the tracker's last-recorded hashes, without mutating
    /// either.
    pub fn detect_changes(&self) -> ChangeSet {
        let current: Vec<(&str, &str)> = self.project.files().map(|file| (file.path.as_str(), file.source.as_str())).collect();
        self.tracker.detect_changes(current)
    }

    /// §6 "InvalidateFile(path)": drops `path` from the project, the
    /// tracker, and the dependency graph, including as a dependency
    /// target of other files.
    pub fn invalidate_file(&mut self, path: &str) {
        self.project.remove_file(path);
        self.tracker.forget(path);
        self.graph.remove_file(path);
    }

    /// The files whose semantic model must be recomputed as a result of
    /// `changed` (§4.K `AffectedClosure`).
    pub fn affected_closure(&self, changed: &[String]) -> FxHashSet<String> {
        self.graph.affected_closure(changed)
    }

    /// §6 "BuildCallSiteRegistry()": runs the project's full two-pass
    /// analysis (which rebuilds its call-site registry as its last
    /// step), then rebuilds the dependency graph and records every
    /// file's new content hash so the next `detect_changes` call only
    /// reports what changes after this point.
    pub fn build_call_site_registry(
        &mut self,
        options: &GDValidationOptions,
        runtime: &dyn RuntimeTypeProvider,
        parallelism: Parallelism,
        cancel: &CancellationToken,
    ) -> Result<(), ToolError> {
        self.project.analyze_all(options, runtime, parallelism, cancel)?;
        self.graph = rebuild_graph(&self.project);
        for file in self.project.files() {
            self.tracker.record(&file.path, &file.source);
        }
        Ok(())
    }

    /// Snapshots the tracker and graph into a [`PersistedState`] ready
    /// to write to the project's state file.
    pub fn to_persisted_state(&self, tool_version: &str, saved_at: &str) -> PersistedState {
        let project_path = self.project.context().root().to_string_lossy().into_owned();
        self.tracker.to_persisted_state(&project_path, tool_version, saved_at, self.graph.to_serializable())
    }

    /// Restores the tracker and graph from a previously saved state,
    /// so a fresh process can skip rehashing files it already analyzed
    /// last run.
    pub fn restore_state(&mut self, state: &PersistedState) {
        self.tracker = FileChangeTracker::from_hashes(state.file_hashes.clone());
        self.graph = DependencyGraph::from_serializable(state.dependencies.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gdscript_runtime::{NullRuntimeTypeProvider, ProjectContext};

    fn pipeline() -> IncrementalPipeline {
        IncrementalPipeline::new(Project::new(ProjectContext::new("/project")))
    }

    #[test]
    fn detect_changes_reports_every_file_as_added_the_first_time() {
        let mut pipeline = pipeline();
        pipeline.project_mut().add_file("res://a.gd", "func f():\n\tpass\n");
        let changes = pipeline.detect_changes();
        assert_eq!(changes.added, vec!["res://a.gd".to_string()]);
    }

    #[test]
    fn build_call_site_registry_makes_subsequent_detect_changes_empty() {
        let mut pipeline = pipeline();
        pipeline.project_mut().add_file("res://a.gd", "func f():\n\tpass\n");
        let runtime = NullRuntimeTypeProvider;
        pipeline
            .build_call_site_registry(&GDValidationOptions::default(), &runtime, Parallelism::Sequential, &CancellationToken::new())
            .expect("build succeeds");
        assert!(pipeline.detect_changes().is_empty());
    }

    #[test]
    fn invalidate_file_removes_it_from_project_and_tracker() {
        let mut pipeline = pipeline();
        pipeline.project_mut().add_file("res://a.gd", "func f():\n\tpass\n");
        let runtime = NullRuntimeTypeProvider;
        pipeline
            .build_call_site_registry(&GDValidationOptions::default(), &runtime, Parallelism::Sequential, &CancellationToken::new())
            .expect("build succeeds");
        pipeline.invalidate_file("res://a.gd");
        assert!(pipeline.project().file("res://a.gd").is_none());
        let changes = pipeline.detect_changes();
        assert!(changes.added.is_empty());
    }

    #[test]
    fn state_round_trips_tracker_and_graph() {
        let mut pipeline = pipeline();
        pipeline.project_mut().add_file("res://a.gd", "class_name A\n\nfunc f():\n\tpass\n");
        pipeline.project_mut().add_file("res://b.gd", "extends A\n\nfunc g():\n\tpass\n");
        let runtime = NullRuntimeTypeProvider;
        pipeline
            .build_call_site_registry(&GDValidationOptions::default(), &runtime, Parallelism::Sequential, &CancellationToken::new())
            .expect("build succeeds");
        let state = pipeline.to_persisted_state("0.1.0", "2026-07-28T00:00:00Z");

        let mut restored = pipeline();
        restored.restore_state(&state);
        assert!(!restored.dependency_graph().successors("res://b.gd").collect::<Vec<_>>().is_empty());
    }
}
