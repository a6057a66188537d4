//! File system access, abstracted so tests can substitute an in-memory
//! implementation instead of touching disk.

use std::path::{Path, PathBuf};

/// File system operations the project scanner and incremental pipeline
/// need. Pluggable: [`StdFileSystem`] delegates to `std::fs`; tests
/// typically implement this over a `HashMap<PathBuf, String>` instead.
pub trait FileSystemProvider: Send + Sync {
    fn file_exists(&self, path: &Path) -> bool;

    fn directory_exists(&self, path: &Path) -> bool;

    /// Reads the full text contents of `path`. `Err` only for genuine
    /// I/O failure, not for "file doesn't exist" (callers check
    /// `file_exists` first where that distinction matters).
    fn read_all_text(&self, path: &Path) -> std::io::Result<String>;

    /// Lists files under `dir` whose name matches `pattern` (a simple
    /// glob, e.g. `"*.gd"`), optionally descending into subdirectories.
    fn get_files(&self, dir: &Path, pattern: &str, recursive: bool) -> std::io::Result<Vec<PathBuf>>;
}

/// Default [`FileSystemProvider`] backed directly by `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdFileSystem;

impl FileSystemProvider for StdFileSystem {
    fn file_exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn directory_exists(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn read_all_text(&self, path: &Path) -> std::io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn get_files(&self, dir: &Path, pattern: &str, recursive: bool) -> std::io::Result<Vec<PathBuf>> {
        let mut out = Vec::new();
        collect(dir, pattern, recursive, &mut out)?;
        out.sort();
        Ok(out)
    }
}

fn collect(dir: &Path, pattern: &str, recursive: bool, out: &mut Vec<PathBuf>) -> std::io::Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_dir() {
            if recursive {
                collect(&path, pattern, recursive, out)?;
            }
            continue;
        }
        if matches_glob(pattern, &entry.file_name().to_string_lossy()) {
            out.push(path);
        }
    }
    Ok(())
}

/// Minimal glob matcher supporting a single leading `*` (`"*.gd"`),
/// a single trailing `*` (`"test_*"`), or a literal pattern.
fn matches_glob(pattern: &str, name: &str) -> bool {
    if pattern == "*" {
        return true;
    }
    if let Some(suffix) = pattern.strip_prefix('*') {
        return name.ends_with(suffix);
    }
    if let Some(prefix) = pattern.strip_suffix('*') {
        return name.starts_with(prefix);
    }
    pattern == name
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glob_matches_suffix_pattern() {
        assert!(matches_glob("*.gd", "player.gd"));
        assert!(!matches_glob("*.gd", "player.tscn"));
    }

    #[test]
    fn glob_matches_prefix_pattern() {
        assert!(matches_glob("test_*", "test_player.gd"));
        assert!(!matches_glob("test_*", "player_test.gd"));
    }

    #[test]
    fn glob_wildcard_matches_everything() {
        assert!(matches_glob("*", "anything.gd"));
    }

    #[test]
    fn std_file_system_reports_missing_file() {
        let fs = StdFileSystem;
        assert!(!fs.file_exists(Path::new("/nonexistent/path/does-not-exist.gd")));
    }
}
