//! Manifest descriptor generation.
//!
//! Final stage. Each [`ArtifactGroup`] becomes one `manifest_<name>.yaml`
//! describing a multi-arch image list assembled from the per-arch builds:
//!
//! ```yaml
//! image: test.location.com/release/builds/42/app/merged:abc1234
//! tags:
//!   - "abc1234"
//!   - "main"
//! manifests:
//!   - image: test.location.com/release/builds/42/app/merged:abc1234
//!     platform:
//!       architecture: amd64
//!       os: linux
//!   - image: test.location.com/release/builds/42/app/merged:abc1234
//!     platform:
//!       architecture: arm64
//!       os: linux
//! ```
//!
//! Every entry points at the same merged reference as the top-level image;
//! only the platform block differs between them.
//!
//! Rendering is split from writing so output can be checked without touching
//! disk. Two groups whose keys sanitize to the same file name write to the same
//! path, and the later group wins.

use crate::ci::CiContext;
use crate::types::ArtifactGroup;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Registry host the merged images live under.
pub const REGISTRY: &str = "test.location.com";

/// Architectures emitted, in output order.
pub const ARCHITECTURES: &[&str] = &["amd64", "arm64"];

#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// One `manifests:` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformEntry {
    pub image: String,
    pub architecture: String,
    pub os: String,
}

/// The document written for one group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestDocument {
    pub group_key: String,
    pub image: String,
    pub tags: Vec<String>,
    pub manifests: Vec<PlatformEntry>,
}

/// A manifest file that made it to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenManifest {
    pub group_key: String,
    pub file_name: String,
    pub path: PathBuf,
}

/// `tests/kaniko/images/app` → `tests_kaniko_images_app`
pub fn safe_name(key: &str) -> String {
    key.replace(['/', '\\'], "_")
}

/// File name of the manifest for a group key.
pub fn manifest_file_name(key: &str) -> String {
    format!("manifest_{}.yaml", safe_name(key))
}

/// Merged image reference for a group.
pub fn image_reference(ctx: &CiContext, key: &str) -> String {
    format!(
        "{REGISTRY}/{}/builds/{}/{key}/merged:{}",
        ctx.channel, ctx.project_id, ctx.short_sha
    )
}

impl ManifestDocument {
    pub fn build(group: &ArtifactGroup, ctx: &CiContext) -> Self {
        let image = image_reference(ctx, &group.key);
        let manifests = ARCHITECTURES
            .iter()
            .filter_map(|&arch| {
                group.find_arch(arch).map(|artifact| PlatformEntry {
                    image: image.clone(),
                    architecture: arch.to_string(),
                    os: artifact.os().to_string(),
                })
            })
            .collect();

        Self {
            group_key: group.key.clone(),
            image,
            tags: ctx.tags.clone(),
            manifests,
        }
    }

    pub fn file_name(&self) -> String {
        manifest_file_name(&self.group_key)
    }

    /// Render as YAML text.
    pub fn render(&self) -> String {
        let mut out = format!("image: {}\ntags:\n", self.image);
        for tag in &self.tags {
            out.push_str(&format!("  - \"{}\"\n", escape_quoted(tag)));
        }
        out.push_str("manifests:\n");
        for entry in &self.manifests {
            out.push_str(&format!(
                "  - image: {}\n    platform:\n      architecture: {}\n      os: {}\n",
                entry.image, entry.architecture, entry.os
            ));
        }
        out
    }

    /// Write the rendered document into `dir`, replacing any existing file.
    pub fn write_to(&self, dir: &Path) -> Result<WrittenManifest, ManifestError> {
        let file_name = self.file_name();
        let path = dir.join(&file_name);
        fs::write(&path, self.render()).map_err(|source| ManifestError::Write {
            path: path.clone(),
            source,
        })?;
        Ok(WrittenManifest {
            group_key: self.group_key.clone(),
            file_name,
            path,
        })
    }
}

// Keeps a tag a valid YAML double-quoted scalar.
fn escape_quoted(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ci::Channel;
    use crate::test_helpers::{artifact, artifact_on};
    use tempfile::TempDir;

    fn ctx() -> CiContext {
        CiContext {
            channel: Channel::Prerelease,
            project_id: "UNKNOWN_PROJECT_ID".into(),
            short_sha: "abc123".into(),
            raw_tags: "abc123".into(),
            tags: vec!["abc123".into()],
        }
    }

    fn group(key: &str, artifacts: Vec<crate::types::BuildArtifact>) -> ArtifactGroup {
        ArtifactGroup {
            key: key.into(),
            artifacts,
        }
    }

    #[test]
    fn safe_name_replaces_both_separators() {
        assert_eq!(safe_name("tests/kaniko/images/c1"), "tests_kaniko_images_c1");
        assert_eq!(safe_name(r"win\path/mixed"), "win_path_mixed");
        assert_eq!(safe_name("plain"), "plain");
    }

    #[test]
    fn file_name_wraps_safe_name() {
        assert_eq!(manifest_file_name("a/b"), "manifest_a_b.yaml");
    }

    #[test]
    fn image_reference_keeps_raw_key() {
        let reference = image_reference(&ctx(), "tests/images/app");
        assert_eq!(
            reference,
            "test.location.com/prerelease/builds/UNKNOWN_PROJECT_ID/tests/images/app/merged:abc123"
        );
    }

    #[test]
    fn single_amd64_artifact_renders_exactly() {
        let doc = ManifestDocument::build(
            &group("app", vec![artifact_on(Some("app"), "amd64", "linux")]),
            &ctx(),
        );

        let expected = "\
image: test.location.com/prerelease/builds/UNKNOWN_PROJECT_ID/app/merged:abc123
tags:
  - \"abc123\"
manifests:
  - image: test.location.com/prerelease/builds/UNKNOWN_PROJECT_ID/app/merged:abc123
    platform:
      architecture: amd64
      os: linux
";
        assert_eq!(doc.render(), expected);
        assert_eq!(doc.file_name(), "manifest_app.yaml");
    }

    #[test]
    fn amd64_precedes_arm64_regardless_of_input_order() {
        let doc = ManifestDocument::build(
            &group(
                "app",
                vec![artifact(Some("app"), "arm64"), artifact(Some("app"), "amd64")],
            ),
            &ctx(),
        );
        let arches: Vec<&str> = doc.manifests.iter().map(|m| m.architecture.as_str()).collect();
        assert_eq!(arches, vec!["amd64", "arm64"]);
    }

    #[test]
    fn every_entry_shares_the_merged_reference() {
        let doc = ManifestDocument::build(
            &group(
                "app",
                vec![artifact(Some("app"), "amd64"), artifact(Some("app"), "arm64")],
            ),
            &ctx(),
        );
        assert!(doc.manifests.iter().all(|m| m.image == doc.image));
    }

    #[test]
    fn first_matching_artifact_supplies_os() {
        let doc = ManifestDocument::build(
            &group(
                "app",
                vec![
                    artifact_on(Some("app"), "arm64", "linux"),
                    artifact_on(Some("app"), "arm64", "windows"),
                ],
            ),
            &ctx(),
        );
        assert_eq!(doc.manifests.len(), 1);
        assert_eq!(doc.manifests[0].os, "linux");
    }

    #[test]
    fn other_architectures_are_not_emitted() {
        let doc = ManifestDocument::build(
            &group("app", vec![artifact(Some("app"), "s390x")]),
            &ctx(),
        );
        assert!(doc.manifests.is_empty());
        assert!(doc.render().ends_with("manifests:\n"));
    }

    #[test]
    fn non_string_platform_is_written_as_json_text() {
        let mut a = artifact(Some("web"), "amd64");
        a.record.platform = Some(serde_json::json!(3));
        let doc = ManifestDocument::build(&group("web", vec![a]), &ctx());
        assert!(doc.render().ends_with("      architecture: amd64\n      os: 3\n"));
    }

    #[test]
    fn duplicate_tags_are_kept_and_quotes_escaped() {
        let mut context = ctx();
        context.tags = vec!["main".into(), "main".into(), "we\"ird".into()];
        let doc = ManifestDocument::build(&group("app", vec![]), &context);
        let rendered = doc.render();
        assert!(rendered.contains("tags:\n  - \"main\"\n  - \"main\"\n  - \"we\\\"ird\"\n"));
    }

    #[test]
    fn write_to_creates_file_with_rendered_text() {
        let tmp = TempDir::new().unwrap();
        let doc = ManifestDocument::build(
            &group("tests/app", vec![artifact(Some("tests/app"), "amd64")]),
            &ctx(),
        );

        let written = doc.write_to(tmp.path()).unwrap();

        assert_eq!(written.file_name, "manifest_tests_app.yaml");
        assert_eq!(written.path, tmp.path().join("manifest_tests_app.yaml"));
        assert_eq!(fs::read_to_string(&written.path).unwrap(), doc.render());
    }

    #[test]
    fn colliding_names_overwrite() {
        let tmp = TempDir::new().unwrap();
        let first = ManifestDocument::build(&group("a/b", vec![artifact(Some("a/b"), "amd64")]), &ctx());
        let second = ManifestDocument::build(&group("a_b", vec![artifact(Some("a_b"), "arm64")]), &ctx());

        first.write_to(tmp.path()).unwrap();
        let written = second.write_to(tmp.path()).unwrap();

        let content = fs::read_to_string(written.path).unwrap();
        assert_eq!(content, second.render());
        assert!(content.contains("architecture: arm64"));
        assert!(!content.contains("architecture: amd64"));
    }

    #[test]
    fn unwritable_directory_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("no/such/dir");
        let doc = ManifestDocument::build(&group("app", vec![]), &ctx());

        let err = doc.write_to(&missing).unwrap_err();

        let ManifestError::Write { path, .. } = &err;
        assert_eq!(path, &missing.join("manifest_app.yaml"));
        assert!(err.to_string().starts_with("failed to write "));
    }
}
