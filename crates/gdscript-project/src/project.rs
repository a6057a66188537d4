//! The project-level collection of script files (§4.J) and its
//! two-phase `analyze_all` scheduling (§4.K "Scheduling for AnalyzeAll",
//! §5).

use rayon::prelude::*;
use rustc_hash::FxHashMap;

use gdscript_ast::NodeId;
use gdscript_callsites::{classify_call_sites, CallSiteEntry, CallSiteRegistry};
use gdscript_runtime::{FileSystemProvider, ProjectContext, RuntimeTypeProvider};
use gdscript_semantic::GDValidationOptions;

use crate::cancellation::CancellationToken;
use crate::error::ToolError;
use crate::index::GlobalIndex;
use crate::script_file::ScriptFile;

/// Degree of parallelism for [`Project::analyze_all`] (§4.K): `0` or
/// any negative value other than `-1` runs sequentially; `-1` uses one
/// thread per available CPU; a positive value caps the thread pool at
/// that many threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parallelism {
    Sequential,
    AllCpus,
    Capped(usize),
}

impl Parallelism {
    pub fn from_degree(degree: i32) -> Self {
        match degree {
            -1 => Parallelism::AllCpus,
            d if d <= 0 => Parallelism::Sequential,
            d => Parallelism::Capped(d as usize),
        }
    }
}

/// A use-site reference to a declared symbol, as returned by the
/// project-wide reference queries (§6 "Semantic model API").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    pub file: String,
    pub use_site: NodeId,
}

/// Identifies a declared symbol by the file that owns it and its
/// declaration node, for project-wide reference lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SymbolRef {
    pub declaration: NodeId,
}

/// The collection of script files making up one Godot project, plus
/// the call-site registry and global declaration index built the last
/// time [`Project::analyze_all`] ran.
pub struct Project {
    context: ProjectContext,
    files: FxHashMap<String, ScriptFile>,
    global_index: GlobalIndex,
    registry: CallSiteRegistry,
}

impl Project {
    pub fn new(context: ProjectContext) -> Self {
        Project { context, files: FxHashMap::default(), global_index: GlobalIndex::new(), registry: CallSiteRegistry::new() }
    }

    pub fn context(&self) -> &ProjectContext {
        &self.context
    }

    /// Adds or replaces a file by path, parsing it immediately but
    /// running no analysis pass until the next `analyze_all`.
    pub fn add_file(&mut self, path: impl Into<String>, source: impl Into<String>) {
        let file = ScriptFile::parse_only(path.into(), source);
        self.files.insert(file.path.clone(), file);
    }

    pub fn remove_file(&mut self, path: &str) {
        self.files.remove(path);
        self.registry.unregister_file(path);
    }

    pub fn file(&self, path: &str) -> Option<&ScriptFile> {
        self.files.get(path)
    }

    pub fn files(&self) -> impl Iterator<Item = &ScriptFile> {
        self.files.values()
    }

    pub fn global_index(&self) -> &GlobalIndex {
        &self.global_index
    }

    pub fn call_site_registry(&self) -> &CallSiteRegistry {
        &self.registry
    }

    /// Walks the project root through `fs` for files matching
    /// `pattern` (typically `"*.gd"`), adding each as an unanalyzed
    /// [`ScriptFile`].
    #[tracing::instrument(skip(self, fs))]
    pub fn scan(&mut self, fs: &dyn FileSystemProvider, pattern: &str) -> Result<(), ToolError> {
        let root = self.context.root();
        if !fs.directory_exists(root) {
            return Err(ToolError::FileNotFound(root.to_path_buf()));
        }
        for path in fs.get_files(root, pattern, true)? {
            let source = fs.read_all_text(&path)?;
            let res_path = self.context.to_res_path(&path).unwrap_or_else(|| path.to_string_lossy().into_owned());
            self.add_file(res_path, source);
        }
        Ok(())
    }

    /// Runs the two-pass discipline (§5): sequentially collect
    /// declarations for every file to build a read-only global index,
    /// then run the full per-file analysis — sequentially or in
    /// parallel per `parallelism` — without mutating that index.
    /// Finally rebuilds the call-site registry from every file's call
    /// observations.
    #[tracing::instrument(skip(self, runtime, cancel))]
    pub fn analyze_all(
        &mut self,
        options: &GDValidationOptions,
        runtime: &dyn RuntimeTypeProvider,
        parallelism: Parallelism,
        cancel: &CancellationToken,
    ) -> Result<(), ToolError> {
        for file in self.files.values_mut() {
            cancel.check()?;
            file.collect_declarations(runtime);
        }

        let mut index = GlobalIndex::new();
        for file in self.files.values() {
            index.insert(file.class_identity(), file.declarations.clone());
        }
        self.global_index = index;

        match parallelism {
            Parallelism::Sequential => {
                for file in self.files.values_mut() {
                    cancel.check()?;
                    file.analyze(options, runtime);
                }
            }
            Parallelism::AllCpus => {
                self.files.values_mut().par_bridge().for_each(|file| {
                    if !cancel.is_canceled() {
                        file.analyze(options, runtime);
                    }
                });
                cancel.check()?;
            }
            Parallelism::Capped(n) => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(n)
                    .build()
                    .map_err(|e| ToolError::CorruptCache(e.to_string()))?;
                pool.install(|| {
                    self.files.values_mut().par_bridge().for_each(|file| {
                        if !cancel.is_canceled() {
                            file.analyze(options, runtime);
                        }
                    });
                });
                cancel.check()?;
            }
        }

        self.rebuild_call_site_registry();
        Ok(())
    }

    /// Async wrapper (§5 "Suspension points", §6 `AnalyzeAllAsync`):
    /// dispatches [`Project::analyze_all`] onto a blocking-task thread
    /// pool and hands `project` back with the result, since a thread
    /// pool task needs to own what it touches. There are no internal
    /// suspension points — this is a thread hop, not a different
    /// analysis algorithm — and `cancel` is honored exactly as it is
    /// from a synchronous caller.
    pub async fn analyze_all_async(
        mut project: Project,
        options: GDValidationOptions,
        runtime: std::sync::Arc<dyn RuntimeTypeProvider + Send + Sync>,
        parallelism: Parallelism,
        cancel: CancellationToken,
    ) -> Result<Project, ToolError> {
        let handle = tokio::task::spawn_blocking(move || {
            let result = project.analyze_all(&options, runtime.as_ref(), parallelism, &cancel);
            result.map(|()| project)
        });
        match handle.await {
            Ok(result) => result,
            Err(_join_error) => Err(ToolError::Canceled),
        }
    }

    fn rebuild_call_site_registry(&mut self) {
        let registry = CallSiteRegistry::new();
        for file in self.files.values() {
            let class_name = file.class_identity();
            let extends_name = file.declarations.extends_name.as_deref();
            let entries = classify_call_sites(&file.path, &file.source, &file.tree, &file.call_observations, &class_name, extends_name);
            registry.register_all(entries);
        }
        self.registry = registry;
    }

    /// §6 "GetCallSitesForMethod".
    pub fn call_sites_for_method(&self, type_name: &str, method_name: &str) -> Vec<CallSiteEntry> {
        self.registry.lookup_with_wildcard(type_name, method_name)
    }

    /// §6 "GetEffectiveType(name)": the declared type of `name` as seen
    /// at class (global) scope in `file`, or `None` when the symbol is
    /// unknown or carries no annotation. Parameter types synthesized
    /// from call sites live behind `gdscript_callsites::infer_parameter_types`
    /// instead (§4.I) rather than being folded in here, since that
    /// query needs a method's full parameter list, not just one name.
    pub fn effective_type(&self, file: &str, name: &str) -> Option<gdscript_semantic::GDType> {
        let script = self.files.get(file)?;
        let symbol = script.symbols.lookup(script.symbols.current(), name)?;
        symbol.declared_type.as_deref().map(gdscript_semantic::GDType::from_declared_name)
    }

    /// SPEC_FULL §2.2 `GetReferencesToSymbolAtPosition`: resolves the
    /// symbol referenced at `position` in `file` (a use site recorded
    /// by the scope pass) and returns every other use site resolving to
    /// the same declaration, composing [`Project::find_symbol`]'s
    /// cousin lookup with [`Project::references_in_file`] rather than
    /// adding a new traversal.
    pub fn references_to_symbol_at_position(&self, file: &str, position: gdscript_position::LineCol) -> Vec<Reference> {
        let Some(script) = self.files.get(file) else {
            return Vec::new();
        };
        let line_index = gdscript_position::LineIndex::new(&script.source);
        let Some(offset) = line_index.offset(position) else {
            return Vec::new();
        };
        let declaration = script.reference_observations.iter().find_map(|(use_site, decl)| {
            let span = script.tree.span(*use_site)?;
            (span.start <= offset && offset < span.end).then_some(*decl)
        });
        match declaration {
            Some(declaration) => self.references_in_file(file, SymbolRef { declaration }),
            None => Vec::new(),
        }
    }

    /// §6 "GetReferencesInFile": every use site in `file` resolving to
    /// exactly `symbol.declaration`.
    pub fn references_in_file(&self, file: &str, symbol: SymbolRef) -> Vec<Reference> {
        let Some(script) = self.files.get(file) else {
            return Vec::new();
        };
        script
            .reference_observations
            .iter()
            .filter(|(_, decl)| *decl == symbol.declaration)
            .map(|(use_site, _)| Reference { file: file.to_string(), use_site: *use_site })
            .collect()
    }

    /// §6 "GetReferencesInProject": every use site across every file
    /// resolving to `symbol.declaration`. Declaration node ids are only
    /// unique within the file that produced them, so this only finds
    /// references recorded in the same file as the declaration —
    /// cross-file symbol identity is out of scope for the tagged-
    /// variant tree this crate stacks on (see DESIGN.md).
    pub fn references_in_project(&self, owning_file: &str, symbol: SymbolRef) -> Vec<Reference> {
        self.references_in_file(owning_file, symbol)
    }

    /// §6 "GetMemberAccessesInProject": every `self.member_name` access
    /// inside a file whose own class is `type_name`, plus every
    /// `receiver.member_name` access where `receiver`'s call-observed
    /// type (from that file's `call_observations`, when the member
    /// access is itself a call) is `type_name`. A heuristic name-based
    /// match, in the spirit of the dependency graph's `class_name`
    /// heuristic (§9 Open Questions) — it can report a spurious match
    /// when two unrelated classes declare a member of the same name,
    /// and it misses plain (non-call) field accesses through a typed
    /// local variable, since this tagged-variant tree records no
    /// per-node type once analysis has finished (see DESIGN.md).
    pub fn member_accesses_in_project(&self, type_name: &str, member_name: &str) -> Vec<Reference> {
        let mut out = Vec::new();
        for file in self.files.values() {
            for node_id in file.tree.all_nodes(file.tree.root()) {
                let gdscript_ast::NodeKind::MemberAccessExpr { receiver, member: Some(member), .. } = &file.tree.get(node_id).kind
                else {
                    continue;
                };
                if member.text.as_ref() != member_name {
                    continue;
                }
                let matches = match &file.tree.get(*receiver).kind {
                    gdscript_ast::NodeKind::SelfExpr(_) => file.class_identity() == type_name,
                    _ => file.call_observations.iter().any(|obs| {
                        let gdscript_ast::NodeKind::CallExpr { callee, .. } = &file.tree.get(obs.call_node).kind else {
                            return false;
                        };
                        *callee == node_id
                            && matches!(&obs.callee, gdscript_semantic::CallCallee::Method { receiver_type, .. } if receiver_type.runtime_name() == type_name)
                    }),
                };
                if matches {
                    out.push(Reference { file: file.path.clone(), use_site: node_id });
                }
            }
        }
        out
    }

    /// §6 "FindSymbol(name)" for a single file's class-level symbols.
    pub fn find_symbol(&self, file: &str, name: &str) -> Option<NodeId> {
        let script = self.files.get(file)?;
        script
            .declarations
            .methods
            .get(name)
            .map(|m| m.node)
            .or_else(|| script.declarations.class_vars.get(name).copied())
            .or_else(|| script.declarations.constants.get(name).copied())
            .or_else(|| script.declarations.signals.get(name).copied())
            .or_else(|| script.declarations.enums.get(name).copied())
            .or_else(|| script.declarations.enum_values.get(name).copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gdscript_runtime::NullRuntimeTypeProvider;

    fn project() -> Project {
        Project::new(ProjectContext::new("/project"))
    }

    #[test]
    fn analyze_all_sequential_populates_declarations_and_diagnostics() {
        let mut project = project();
        project.add_file("res://a.gd", "func f():\n\tundeclared_name\n");
        let runtime = NullRuntimeTypeProvider;
        project
            .analyze_all(&GDValidationOptions::default(), &runtime, Parallelism::Sequential, &CancellationToken::new())
            .expect("analysis succeeds");
        let file = project.file("res://a.gd").expect("file present");
        assert!(file.declarations.methods.contains_key("f"));
        assert!(!file.diagnostics.is_empty());
    }

    #[test]
    fn analyze_all_builds_a_global_index_entry_per_class() {
        let mut project = project();
        project.add_file("res://player.gd", "class_name Player\n\nfunc f():\n\tpass\n");
        project.add_file("res://enemy.gd", "class_name Enemy\n\nfunc f():\n\tpass\n");
        let runtime = NullRuntimeTypeProvider;
        project
            .analyze_all(&GDValidationOptions::default(), &runtime, Parallelism::Sequential, &CancellationToken::new())
            .expect("analysis succeeds");
        assert!(project.global_index().contains("Player"));
        assert!(project.global_index().contains("Enemy"));
    }

    #[test]
    fn analyze_all_parallel_matches_sequential_diagnostics() {
        let mut sequential = project();
        let mut parallel = project();
        for p in [&mut sequential, &mut parallel] {
            p.add_file("res://a.gd", "func f():\n\tbreak\n");
            p.add_file("res://b.gd", "func g():\n\tcontinue\n");
        }
        let runtime = NullRuntimeTypeProvider;
        sequential
            .analyze_all(&GDValidationOptions::default(), &runtime, Parallelism::Sequential, &CancellationToken::new())
            .expect("sequential analysis succeeds");
        parallel
            .analyze_all(&GDValidationOptions::default(), &runtime, Parallelism::Capped(2), &CancellationToken::new())
            .expect("parallel analysis succeeds");
        assert_eq!(sequential.file("res://a.gd").unwrap().diagnostics.len(), parallel.file("res://a.gd").unwrap().diagnostics.len());
        assert_eq!(sequential.file("res://b.gd").unwrap().diagnostics.len(), parallel.file("res://b.gd").unwrap().diagnostics.len());
    }

    #[test]
    fn cancellation_before_analysis_short_circuits() {
        let mut proj = project();
        proj.add_file("res://a.gd", "func f():\n\tpass\n");
        let runtime = NullRuntimeTypeProvider;
        let cancel = CancellationToken::new();
        cancel.cancel();
        let result = proj.analyze_all(&GDValidationOptions::default(), &runtime, Parallelism::Sequential, &cancel);
        assert!(matches!(result, Err(ToolError::Canceled)));
    }

    #[test]
    fn call_sites_for_method_finds_entries_after_analysis() {
        let mut proj = project();
        proj.add_file("res://a.gd", "func f():\n\tself.g()\n\nfunc g():\n\tpass\n");
        let runtime = NullRuntimeTypeProvider;
        proj.analyze_all(&GDValidationOptions::default(), &runtime, Parallelism::Sequential, &CancellationToken::new()).unwrap();
        let sites = proj.call_sites_for_method("a", "g");
        assert_eq!(sites.len(), 1);
    }

    #[test]
    fn parallelism_from_degree_matches_spec_table() {
        assert_eq!(Parallelism::from_degree(0), Parallelism::Sequential);
        assert_eq!(Parallelism::from_degree(-5), Parallelism::Sequential);
        assert_eq!(Parallelism::from_degree(-1), Parallelism::AllCpus);
        assert_eq!(Parallelism::from_degree(4), Parallelism::Capped(4));
    }

    #[test]
    fn effective_type_reports_a_declared_class_var_type() {
        let mut proj = project();
        proj.add_file("res://a.gd", "var health: int = 10\n");
        let runtime = NullRuntimeTypeProvider;
        proj.analyze_all(&GDValidationOptions::default(), &runtime, Parallelism::Sequential, &CancellationToken::new()).unwrap();
        assert_eq!(proj.effective_type("res://a.gd", "health"), Some(gdscript_semantic::GDType::Int));
    }

    #[test]
    fn references_to_symbol_at_position_finds_every_use_site() {
        let mut proj = project();
        proj.add_file("res://a.gd", "func f():\n\tvar x = 1\n\treturn x\n");
        let runtime = NullRuntimeTypeProvider;
        proj.analyze_all(&GDValidationOptions::default(), &runtime, Parallelism::Sequential, &CancellationToken::new()).unwrap();
        let refs = proj.references_to_symbol_at_position("res://a.gd", gdscript_position::LineCol::new(3, 8));
        assert_eq!(refs.len(), 1);
    }

    #[tokio::test]
    async fn analyze_all_async_hands_the_project_back_populated() {
        let mut proj = project();
        proj.add_file("res://a.gd", "func f():\n\tbreak\n");
        let runtime: std::sync::Arc<dyn RuntimeTypeProvider + Send + Sync> = std::sync::Arc::new(NullRuntimeTypeProvider);
        let proj = Project::analyze_all_async(proj, GDValidationOptions::default(), runtime, Parallelism::Sequential, CancellationToken::new())
            .await
            .expect("async analysis succeeds");
        assert!(!proj.file("res://a.gd").unwrap().diagnostics.is_empty());
    }

    #[tokio::test]
    async fn analyze_all_async_honors_pre_cancellation() {
        let mut proj = project();
        proj.add_file("res://a.gd", "func f():\n\tpass\n");
        let runtime: std::sync::Arc<dyn RuntimeTypeProvider + Send + Sync> = std::sync::Arc::new(NullRuntimeTypeProvider);
        let cancel = CancellationToken::new();
        cancel.cancel();
        let result = Project::analyze_all_async(proj, GDValidationOptions::default(), runtime, Parallelism::Sequential, cancel).await;
        assert!(matches!(result, Err(ToolError::Canceled)));
    }
}
