//! Shared test utilities: artifact builders, fixture trees and env lookups.

use crate::types::{ArtifactRecord, BuildArtifact};
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

// =========================================================================
// Artifacts
// =========================================================================

/// An in-memory artifact with no `platform` field.
pub fn artifact(dir: Option<&str>, arch: &str) -> BuildArtifact {
    BuildArtifact {
        source: PathBuf::from(format!("{}/{arch}.json", dir.unwrap_or("none"))),
        record: ArtifactRecord {
            dockerfiledirname: dir.map(Value::from),
            arch: Some(Value::from(arch)),
            ..ArtifactRecord::default()
        },
    }
}

/// An in-memory artifact with an explicit `platform`.
pub fn artifact_on(dir: Option<&str>, arch: &str, platform: &str) -> BuildArtifact {
    let mut a = artifact(dir, arch);
    a.record.platform = Some(Value::from(platform));
    a
}

// =========================================================================
// Filesystem fixtures
// =========================================================================

/// Write `content` to `root/rel`, creating parent directories. Returns the path.
pub fn write_file(root: &Path, rel: &str, content: &str) -> PathBuf {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, content).unwrap();
    path
}

// =========================================================================
// Environment
// =========================================================================

/// A variable lookup backed by a fixed list, for `Config::from_lookup`.
pub fn env_lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> + use<> {
    let map: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}
