//! The persistable JSON state file (§6 "Persistent state file"): the
//! file change tracker's content hashes plus the dependency graph's
//! edges, serialized so a second run of the tool can skip rehashing
//! and reparsing files that haven't changed since the last save.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// On-disk shape of the tracker + graph state. `version` lets a future
/// incompatible layout refuse to load an old file rather than
/// misinterpret it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedState {
    pub version: u32,
    pub saved_at: String,
    pub tool_version: String,
    pub project_path: String,
    pub file_hashes: FxHashMap<String, String>,
    pub dependencies: FxHashMap<String, Vec<String>>,
}

/// The state file layout version this build writes and reads. Bumped
/// whenever a field is added, removed, or reinterpreted.
pub const STATE_VERSION: u32 = 1;

impl PersistedState {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_round_trips_through_json() {
        let mut file_hashes = FxHashMap::default();
        file_hashes.insert("res://a.gd".to_string(), "0123456789abcdef".to_string());
        let mut dependencies = FxHashMap::default();
        dependencies.insert("res://a.gd".to_string(), vec!["res://b.gd".to_string()]);
        let state = PersistedState {
            version: STATE_VERSION,
            saved_at: "2026-07-28T00:00:00Z".to_string(),
            tool_version: "0.1.0".to_string(),
            project_path: "/project".to_string(),
            file_hashes,
            dependencies,
        };
        let json = state.to_json().expect("serializes");
        assert!(json.contains("\"fileHashes\""));
        assert!(json.contains("\"savedAt\""));
        let parsed = PersistedState::from_json(&json).expect("parses");
        assert_eq!(parsed, state);
    }

    #[test]
    fn corrupt_json_fails_to_parse() {
        assert!(PersistedState::from_json("{ not json").is_err());
    }
}
