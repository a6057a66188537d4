//! One analyzed file inside a [`crate::Project`].

use gdscript_ast::{NodeId, Tree};
use gdscript_diagnostics::DiagnosticList;
use gdscript_reader::parse_file;
use gdscript_runtime::RuntimeTypeProvider;
use gdscript_semantic::{analyze_tree, CallObservation, Declarations, GDValidationOptions};
use gdscript_symbols::SymbolTable;

/// A single script's source, tree, and the last analysis run over it.
/// Trees and analyses are owned here, not by the cache or tracker
/// (§5 "Resource lifetime") — dropping the `Project` frees them.
pub struct ScriptFile {
    /// `res://`-relative or otherwise opaque path this file is known
    /// by across the project, the registry, and the cache.
    pub path: String,
    pub source: String,
    pub tree: Tree,
    pub diagnostics: DiagnosticList,
    pub symbols: SymbolTable,
    pub declarations: Declarations,
    pub call_observations: Vec<CallObservation>,
    pub reference_observations: Vec<(NodeId, NodeId)>,
}

impl ScriptFile {
    /// Parses `source` but does not run any validation pass — used by
    /// the declaration-collection pre-pass, which only needs
    /// `declaration_pass` and should not pay for the rest.
    pub fn parse_only(path: impl Into<String>, source: impl Into<String>) -> Self {
        let source = source.into();
        let output = parse_file(&source);
        ScriptFile {
            path: path.into(),
            source,
            tree: output.tree,
            diagnostics: DiagnosticList::new(),
            symbols: SymbolTable::new(),
            declarations: Declarations::default(),
            call_observations: Vec::new(),
            reference_observations: Vec::new(),
        }
    }

    /// Runs only the declaration collector (§4.E pass 2), the cheap
    /// pre-pass `Project::analyze_all`'s first phase uses to build the
    /// read-only global symbol index before any parallel work starts.
    /// `declaration_pass` always runs inside [`analyze_tree`] regardless
    /// of `options`, so disabling every other pass gets exactly this
    /// for free rather than needing a second code path.
    pub fn collect_declarations(&mut self, runtime: &dyn RuntimeTypeProvider) {
        let analysis = analyze_tree(&self.source, &self.tree, &GDValidationOptions::none(), runtime);
        self.declarations = analysis.declarations;
    }

    /// Runs the full selected validation/analysis pipeline, replacing
    /// whatever this file's previous analysis produced.
    pub fn analyze(&mut self, options: &GDValidationOptions, runtime: &dyn RuntimeTypeProvider) {
        let analysis = analyze_tree(&self.source, &self.tree, options, runtime);
        self.diagnostics = analysis.diagnostics;
        self.symbols = analysis.symbols;
        self.declarations = analysis.declarations;
        self.call_observations = analysis.call_observations;
        self.reference_observations = analysis.reference_observations;
    }

    /// This file's own `class_name`, falling back to its path's file
    /// stem when it declares none — the identifier other files'
    /// `extends`/`preload` edges and the call-site registry address it
    /// by.
    pub fn class_identity(&self) -> String {
        self.declarations.class_name.clone().unwrap_or_else(|| {
            std::path::Path::new(&self.path)
                .file_stem()
                .and_then(|s| s.to_str())
                .map(str::to_string)
                .unwrap_or_else(|| self.path.clone())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_only_does_not_populate_declarations() {
        let file = ScriptFile::parse_only("res://a.gd", "func f():\n\tpass\n");
        assert!(file.declarations.methods.is_empty());
    }

    #[test]
    fn class_identity_falls_back_to_path_stem() {
        let file = ScriptFile::parse_only("res://scripts/player.gd", "func f():\n\tpass\n");
        assert_eq!(file.class_identity(), "player");
    }

    #[test]
    fn class_identity_prefers_declared_class_name() {
        let file = ScriptFile::parse_only("res://scripts/player.gd", "class_name Player\n\nfunc f():\n\tpass\n");
        let runtime = gdscript_runtime::NullRuntimeTypeProvider;
        let mut file = file;
        file.analyze(&GDValidationOptions::default(), &runtime);
        assert_eq!(file.class_identity(), "Player");
    }
}
