//! Two-implementation analysis cache (§4.K "Cache") behind one
//! interface, keyed by `path:hash` so a stale entry from before a file
//! changed is simply a cache miss rather than something that needs
//! active invalidation.

use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::SystemTime;

use parking_lot::RwLock;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{de::DeserializeOwned, Serialize};
use sha2::{Digest, Sha256};

use crate::error::ToolError;

/// Hit/miss/eviction counters (§2 supplemented feature 3), mirroring
/// the teacher's workspace cache stats.
#[derive(Debug, Default)]
pub struct CacheStats {
    hits: AtomicU64,
    misses: AtomicU64,
    evictions: AtomicU64,
}

impl CacheStats {
    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    pub fn evictions(&self) -> u64 {
        self.evictions.load(Ordering::Relaxed)
    }

    fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    fn record_eviction(&self) {
        self.evictions.fetch_add(1, Ordering::Relaxed);
    }
}

/// Builds the `path:hash` cache key the spec's §4.K cache addresses
/// entries by.
pub fn cache_key(path: &str, hash: &str) -> String {
    format!("{path}:{hash}")
}

/// An in-memory cache keyed by `path:hash`, with a secondary index from
/// path to every key currently cached for it (so invalidating a whole
/// file doesn't require scanning every entry).
pub struct InMemoryCache<V> {
    entries: RwLock<FxHashMap<String, V>>,
    by_path: RwLock<FxHashMap<String, FxHashSet<String>>>,
    stats: CacheStats,
}

impl<V: Clone> Default for InMemoryCache<V> {
    fn default() -> Self {
        InMemoryCache { entries: RwLock::new(FxHashMap::default()), by_path: RwLock::new(FxHashMap::default()), stats: CacheStats::default() }
    }
}

impl<V: Clone> InMemoryCache<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, path: &str, hash: &str) -> Option<V> {
        let key = cache_key(path, hash);
        let found = self.entries.read().get(&key).cloned();
        if found.is_some() {
            self.stats.record_hit();
        } else {
            self.stats.record_miss();
        }
        found
    }

    pub fn put(&self, path: &str, hash: &str, value: V) {
        let key = cache_key(path, hash);
        self.entries.write().insert(key.clone(), value);
        self.by_path.write().entry(path.to_string()).or_default().insert(key);
    }

    /// Drops every entry cached for `path`, under any hash.
    pub fn invalidate(&self, path: &str) {
        let Some(keys) = self.by_path.write().remove(path) else {
            return;
        };
        let mut entries = self.entries.write();
        for key in keys {
            entries.remove(&key);
        }
    }

    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// An on-disk cache storing each entry as JSON at
/// `<dir>/entries/<sha256(key)[0..16]>.json`. A corrupt entry is
/// deleted the moment it's read rather than surfaced as an error — a
/// cache is never a source of truth, only an optimization.
pub struct DiskCache {
    dir: PathBuf,
    size_limit_bytes: u64,
    stats: CacheStats,
}

#[derive(serde::Deserialize)]
struct DiskEntry<V> {
    #[allow(dead_code)]
    path: String,
    #[allow(dead_code)]
    hash: String,
    value: V,
}

#[derive(serde::Serialize)]
struct DiskEntryRef<'a, V> {
    path: &'a str,
    hash: &'a str,
    value: &'a V,
}

impl DiskCache {
    pub fn new(dir: impl Into<PathBuf>, size_limit_bytes: u64) -> Self {
        DiskCache { dir: dir.into(), size_limit_bytes, stats: CacheStats::default() }
    }

    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    fn entries_dir(&self) -> PathBuf {
        self.dir.join("entries")
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        let digest = Sha256::digest(key.as_bytes());
        let hex: String = digest.iter().take(8).map(|b| format!("{b:02x}")).collect();
        self.entries_dir().join(format!("{hex}.json"))
    }

    pub fn get<V: DeserializeOwned>(&self, path: &str, hash: &str) -> Result<Option<V>, ToolError> {
        let key = cache_key(path, hash);
        let entry_path = self.entry_path(&key);
        let text = match std::fs::read_to_string(&entry_path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                self.stats.record_miss();
                return Ok(None);
            }
            Err(e) => return Err(ToolError::Io(e)),
        };
        match serde_json::from_str::<DiskEntry<V>>(&text) {
            Ok(entry) => {
                self.stats.record_hit();
                Ok(Some(entry.value))
            }
            Err(e) => {
                let _ = std::fs::remove_file(&entry_path);
                self.stats.record_miss();
                tracing::warn!(
                    path = %entry_path.display(),
                    error = %e,
                    "corrupt cache entry, deleted; treating as a miss"
                );
                Ok(None)
            }
        }
    }

    pub fn put<V: Serialize>(&self, path: &str, hash: &str, value: &V) -> Result<(), ToolError> {
        std::fs::create_dir_all(self.entries_dir())?;
        let key = cache_key(path, hash);
        let entry_path = self.entry_path(&key);
        let entry = DiskEntryRef { path, hash, value };
        let json = serde_json::to_string(&entry).map_err(|e| ToolError::CorruptCache(e.to_string()))?;
        std::fs::write(&entry_path, json)?;
        self.evict_if_over_limit()?;
        Ok(())
    }

    /// When the directory's total bytes exceed `size_limit_bytes`,
    /// evicts the oldest-by-mtime entries until usage is at or below
    /// 80% of the limit (§4.K "LRU on file mtime").
    fn evict_if_over_limit(&self) -> Result<(), ToolError> {
        let dir = self.entries_dir();
        let mut entries: Vec<(PathBuf, u64, SystemTime)> = Vec::new();
        let mut total: u64 = 0;
        for entry in std::fs::read_dir(&dir)? {
            let entry = entry?;
            let metadata = entry.metadata()?;
            if !metadata.is_file() {
                continue;
            }
            let modified = metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH);
            total += metadata.len();
            entries.push((entry.path(), metadata.len(), modified));
        }
        if total <= self.size_limit_bytes {
            return Ok(());
        }
        entries.sort_by_key(|(_, _, modified)| *modified);
        let target = (self.size_limit_bytes as f64 * 0.8) as u64;
        for (path, size, _) in entries {
            if total <= target {
                break;
            }
            std::fs::remove_file(&path)?;
            self.stats.record_eviction();
            total = total.saturating_sub(size);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_memory_cache_miss_then_hit() {
        let cache: InMemoryCache<i32> = InMemoryCache::new();
        assert!(cache.get("a.gd", "hash1").is_none());
        cache.put("a.gd", "hash1", 42);
        assert_eq!(cache.get("a.gd", "hash1"), Some(42));
        assert_eq!(cache.stats().hits(), 1);
        assert_eq!(cache.stats().misses(), 1);
    }

    #[test]
    fn invalidate_drops_every_hash_for_a_path() {
        let cache: InMemoryCache<i32> = InMemoryCache::new();
        cache.put("a.gd", "hash1", 1);
        cache.put("a.gd", "hash2", 2);
        cache.invalidate("a.gd");
        assert!(cache.is_empty());
    }

    #[test]
    fn disk_cache_round_trips_an_entry() {
        let dir = std::env::temp_dir().join(format!("gdscript-incremental-test-{:?}", std::thread::current().id()));
        let cache = DiskCache::new(&dir, 1_000_000);
        cache.put("a.gd", "hash1", &"value".to_string()).expect("put succeeds");
        let value: Option<String> = cache.get("a.gd", "hash1").expect("get succeeds");
        assert_eq!(value, Some("value".to_string()));
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn disk_cache_missing_entry_is_none_not_error() {
        let dir = std::env::temp_dir().join(format!("gdscript-incremental-test-missing-{:?}", std::thread::current().id()));
        let cache = DiskCache::new(&dir, 1_000_000);
        let value: Option<String> = cache.get("a.gd", "hash1").expect("missing is not an error");
        assert!(value.is_none());
    }
}
