//! File change tracker (§4.K "File change tracker"): a thread-safe
//! `path -> content hash` map, diffed against a freshly scanned project
//! to produce `Added`/`Modified`/`Deleted` sets.

use parking_lot::RwLock;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::hash::content_hash;
use crate::state::PersistedState;

/// The result of diffing a tracker's remembered hashes against a fresh
/// scan (§4.K "Given a project, computes `Added`, `Modified`, `Deleted`
/// sets").
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    pub added: Vec<String>,
    pub modified: Vec<String>,
    pub deleted: Vec<String>,
}

impl ChangeSet {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.modified.is_empty() && self.deleted.is_empty()
    }

    /// Every path this change touched, added or modified — the set
    /// `AffectedClosure` starts its traversal from.
    pub fn changed_paths(&self) -> Vec<String> {
        self.added.iter().chain(self.modified.iter()).cloned().collect()
    }
}

/// Holds the hash recorded for each known file. A single coarse lock
/// guards the map, per §5 "Change tracker, dependency graph, caches
/// each take a single coarse lock".
#[derive(Default)]
pub struct FileChangeTracker {
    hashes: RwLock<FxHashMap<String, String>>,
}

impl FileChangeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_hashes(hashes: FxHashMap<String, String>) -> Self {
        FileChangeTracker { hashes: RwLock::new(hashes) }
    }

    /// Diffs `current` (path, source) pairs against the remembered
    /// hashes, without mutating the tracker. Callers apply the result
    /// via [`FileChangeTracker::record`] once they've acted on it.
    pub fn detect_changes<'a>(&self, current: impl IntoIterator<Item = (&'a str, &'a str)>) -> ChangeSet {
        let hashes = self.hashes.read();
        let mut seen: FxHashSet<String> = FxHashSet::default();
        let mut changes = ChangeSet::default();
        for (path, source) in current {
            seen.insert(path.to_string());
            let new_hash = content_hash(source);
            match hashes.get(path) {
                None => changes.added.push(path.to_string()),
                Some(old_hash) if *old_hash != new_hash => changes.modified.push(path.to_string()),
                Some(_) => {}
            }
        }
        for path in hashes.keys() {
            if !seen.contains(path) {
                changes.deleted.push(path.clone());
            }
        }
        changes.added.sort();
        changes.modified.sort();
        changes.deleted.sort();
        changes
    }

    /// Records `path`'s current hash, overwriting whatever was there.
    pub fn record(&self, path: &str, source: &str) {
        self.hashes.write().insert(path.to_string(), content_hash(source));
    }

    pub fn forget(&self, path: &str) {
        self.hashes.write().remove(path);
    }

    pub fn hash_of(&self, path: &str) -> Option<String> {
        self.hashes.read().get(path).cloned()
    }

    pub fn snapshot(&self) -> FxHashMap<String, String> {
        self.hashes.read().clone()
    }

    pub fn len(&self) -> usize {
        self.hashes.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Builds a [`PersistedState`] combining this tracker's hashes with
    /// `dependencies`, ready to write to the project's state file.
    pub fn to_persisted_state(&self, project_path: &str, tool_version: &str, saved_at: &str, dependencies: FxHashMap<String, Vec<String>>) -> PersistedState {
        PersistedState {
            version: crate::state::STATE_VERSION,
            saved_at: saved_at.to_string(),
            tool_version: tool_version.to_string(),
            project_path: project_path.to_string(),
            file_hashes: self.snapshot(),
            dependencies,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unseen_path_is_added() {
        let tracker = FileChangeTracker::new();
        let changes = tracker.detect_changes([("res://a.gd", "extends Node\n")]);
        assert_eq!(changes.added, vec!["res://a.gd".to_string()]);
        assert!(changes.modified.is_empty());
        assert!(changes.deleted.is_empty());
    }

    #[test]
    fn changed_content_is_modified() {
        let tracker = FileChangeTracker::new();
        tracker.record("res://a.gd", "extends Node\n");
        let changes = tracker.detect_changes([("res://a.gd", "extends Sprite2D\n")]);
        assert_eq!(changes.modified, vec!["res://a.gd".to_string()]);
    }

    #[test]
    fn unchanged_content_reports_no_change() {
        let tracker = FileChangeTracker::new();
        tracker.record("res://a.gd", "extends Node\n");
        let changes = tracker.detect_changes([("res://a.gd", "extends Node\n")]);
        assert!(changes.is_empty());
    }

    #[test]
    fn missing_path_is_deleted() {
        let tracker = FileChangeTracker::new();
        tracker.record("res://a.gd", "extends Node\n");
        let changes = tracker.detect_changes(std::iter::empty());
        assert_eq!(changes.deleted, vec!["res://a.gd".to_string()]);
    }
}
