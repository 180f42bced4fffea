//! Artifact discovery and parsing.
//!
//! Stage 1 of the generator. Walks the artifact root recursively and decodes
//! every `*.json` file into a [`BuildArtifact`]. The kaniko build jobs drop one
//! record per image and architecture, at any depth:
//!
//! ```text
//! artifacts/kaniko-build/
//! ├── app/
//! │   ├── amd64.json        {"dockerfiledirname": "app", "arch": "amd64", ...}
//! │   └── arm64.json        {"dockerfiledirname": "app", "arch": "arm64", ...}
//! └── tools/
//!     └── worker/
//!         └── amd64.json
//! ```
//!
//! ## Failure handling
//!
//! A file that can't be read, isn't valid JSON, or doesn't hold a JSON object
//! is reported as [`FileOutcome::Invalid`] and skipped. Directory entries the
//! walker can't read, including a missing root, are reported as
//! [`FileOutcome::Unreadable`]. Nothing in this stage aborts the run.
//!
//! Any JSON object is a valid record. Named fields holding unexpected types
//! are kept and interpreted later (see [`BuildArtifact`]).
//!
//! ## Ordering
//!
//! Siblings are visited files first, then directories, each sorted by name.
//! Group and artifact order downstream follow from this, which keeps output
//! stable across filesystems.

use crate::types::{ArtifactRecord, BuildArtifact};
use std::cmp::Ordering;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::{DirEntry, WalkDir};

#[derive(Error, Debug)]
pub enum ArtifactError {
    #[error("{0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Json(#[from] serde_json::Error),
    #[error("expected a JSON object, found {0}")]
    NotAnObject(&'static str),
}

/// One entry of the walked tree, kept for the directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEntry {
    /// 0 for the root, 1 for its children, and so on.
    pub depth: usize,
    pub name: String,
    pub is_dir: bool,
}

/// What happened to a single candidate file or walked entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    Valid(PathBuf),
    /// A `.json` file that couldn't be read or decoded.
    Invalid { path: PathBuf, reason: String },
    /// An entry the directory walk itself failed on.
    Unreadable { path: PathBuf, reason: String },
}

/// Everything the collector saw during one walk.
#[derive(Debug, Default)]
pub struct Collection {
    pub tree: Vec<TreeEntry>,
    pub outcomes: Vec<FileOutcome>,
    pub artifacts: Vec<BuildArtifact>,
}

impl Collection {
    /// Outcomes that did not produce an artifact.
    pub fn skipped_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| !matches!(o, FileOutcome::Valid(_)))
            .count()
    }
}

/// Walk `root` and parse every JSON artifact beneath it.
pub fn collect(root: &Path) -> Collection {
    let mut collection = Collection::default();

    for entry in WalkDir::new(root).sort_by(files_then_dirs) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                let path = err
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| root.to_path_buf());
                collection.outcomes.push(FileOutcome::Unreadable {
                    path,
                    reason: err.to_string(),
                });
                continue;
            }
        };

        let is_dir = entry.file_type().is_dir();
        collection.tree.push(TreeEntry {
            depth: entry.depth(),
            name: entry_name(&entry, root),
            is_dir,
        });

        if is_dir || !is_json(&entry) {
            continue;
        }

        match read_artifact(entry.path()) {
            Ok(artifact) => {
                collection
                    .outcomes
                    .push(FileOutcome::Valid(entry.path().to_path_buf()));
                collection.artifacts.push(artifact);
            }
            Err(err) => collection.outcomes.push(FileOutcome::Invalid {
                path: entry.path().to_path_buf(),
                reason: err.to_string(),
            }),
        }
    }

    collection
}

/// Read and decode one artifact file.
pub fn read_artifact(path: &Path) -> Result<BuildArtifact, ArtifactError> {
    let content = fs::read_to_string(path)?;
    let value: serde_json::Value = serde_json::from_str(&content)?;
    if !value.is_object() {
        return Err(ArtifactError::NotAnObject(json_kind(&value)));
    }
    let record: ArtifactRecord = serde_json::from_value(value)?;
    Ok(BuildArtifact {
        source: path.to_path_buf(),
        record,
    })
}

fn files_then_dirs(a: &DirEntry, b: &DirEntry) -> Ordering {
    a.file_type()
        .is_dir()
        .cmp(&b.file_type().is_dir())
        .then_with(|| a.file_name().cmp(b.file_name()))
}

// Symlinks count as files, like any other non-directory entry.
fn is_json(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .is_some_and(|name| name.ends_with(".json"))
}

fn entry_name(entry: &DirEntry, root: &Path) -> String {
    if entry.depth() == 0 {
        return root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| root.display().to_string());
    }
    entry.file_name().to_string_lossy().into_owned()
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
