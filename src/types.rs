//! Shared types passed between pipeline stages.
//!
//! Artifacts are produced by [`collect`](crate::collect), bucketed by
//! [`group`](crate::group) and consumed by [`manifest`](crate::manifest).

use serde::Deserialize;
use serde_json::Value;
use std::borrow::Cow;
use std::path::PathBuf;

/// Group key used when an artifact has no (or an empty) `dockerfiledirname`.
pub const UNKNOWN_DIRECTORY: &str = "unknown_directory";

/// OS reported for an architecture entry whose artifact has no `platform`.
pub const DEFAULT_PLATFORM: &str = "linux";

/// Fields decoded from one artifact JSON file.
///
/// The three fields the generator reads are named; everything else the build
/// step wrote lands in `extra` untouched. Named fields accept any JSON type so
/// that a record with an odd value is still kept. A `null` reads as absent.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ArtifactRecord {
    /// Directory of the Dockerfile that produced the image. Grouping key.
    #[serde(default)]
    pub dockerfiledirname: Option<Value>,
    /// Target architecture, e.g. `amd64` or `arm64`.
    #[serde(default)]
    pub arch: Option<Value>,
    /// Target OS, e.g. `linux`.
    #[serde(default)]
    pub platform: Option<Value>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// One parsed artifact file.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildArtifact {
    /// Path of the JSON file the record was read from.
    pub source: PathBuf,
    pub record: ArtifactRecord,
}

impl BuildArtifact {
    /// The grouping key, falling back to [`UNKNOWN_DIRECTORY`].
    ///
    /// Non-string values group under their JSON text, so `{"dockerfiledirname": 7}`
    /// lands in group `7`.
    pub fn group_key(&self) -> Cow<'_, str> {
        match &self.record.dockerfiledirname {
            Some(Value::String(dir)) if !dir.is_empty() => Cow::Borrowed(dir),
            Some(Value::String(_)) | None => Cow::Borrowed(UNKNOWN_DIRECTORY),
            Some(other) => Cow::Owned(other.to_string()),
        }
    }

    /// The architecture, if the record holds it as a string.
    pub fn arch(&self) -> Option<&str> {
        match &self.record.arch {
            Some(Value::String(arch)) => Some(arch),
            _ => None,
        }
    }

    /// The OS for this artifact's platform entry.
    pub fn os(&self) -> Cow<'_, str> {
        match &self.record.platform {
            Some(Value::String(os)) => Cow::Borrowed(os),
            Some(other) => Cow::Owned(other.to_string()),
            None => Cow::Borrowed(DEFAULT_PLATFORM),
        }
    }
}

/// Artifacts sharing one group key, in the order they were collected.
#[derive(Debug, Clone, PartialEq)]
pub struct ArtifactGroup {
    pub key: String,
    pub artifacts: Vec<BuildArtifact>,
}

impl ArtifactGroup {
    /// First artifact built for `arch`, if any.
    pub fn find_arch(&self, arch: &str) -> Option<&BuildArtifact> {
        self.artifacts.iter().find(|a| a.arch() == Some(arch))
    }
}
