//! The active Godot project: its root directory and the `res://`
//! virtual-path scheme Godot uses to address project files.

use std::path::{Path, PathBuf};

/// Project root and the `res://` ↔ absolute path mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectContext {
    root: PathBuf,
}

impl ProjectContext {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        ProjectContext { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Converts a `res://`-relative path to an absolute path under the
    /// project root. Paths without the `res://` prefix are treated as
    /// already-absolute and returned unchanged.
    pub fn to_absolute(&self, res_path: &str) -> PathBuf {
        match res_path.strip_prefix("res://") {
            Some(relative) => self.root.join(relative),
            None => PathBuf::from(res_path),
        }
    }

    /// Converts an absolute path under the project root to its
    /// `res://`-relative form. Returns `None` if `path` is not under
    /// the project root.
    pub fn to_res_path(&self, path: &Path) -> Option<String> {
        let relative = path.strip_prefix(&self.root).ok()?;
        let as_str = relative.to_str()?.replace('\\', "/");
        Some(format!("res://{as_str}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn res_path_resolves_under_root() {
        let ctx = ProjectContext::new("/home/user/project");
        assert_eq!(ctx.to_absolute("res://scripts/player.gd"), PathBuf::from("/home/user/project/scripts/player.gd"));
    }

    #[test]
    fn absolute_path_round_trips_to_res_path() {
        let ctx = ProjectContext::new("/home/user/project");
        let abs = PathBuf::from("/home/user/project/scripts/player.gd");
        assert_eq!(ctx.to_res_path(&abs), Some("res://scripts/player.gd".to_string()));
    }

    #[test]
    fn path_outside_root_has_no_res_path() {
        let ctx = ProjectContext::new("/home/user/project");
        assert_eq!(ctx.to_res_path(Path::new("/etc/passwd")), None);
    }

    #[test]
    fn non_res_path_is_returned_unchanged() {
        let ctx = ProjectContext::new("/home/user/project");
        assert_eq!(ctx.to_absolute("/absolute/elsewhere.gd"), PathBuf::from("/absolute/elsewhere.gd"));
    }
}
