//! # multiarch-manifest
//!
//! Turns per-architecture container build records into multi-arch manifest
//! descriptors.
//!
//! Kaniko build jobs in CI each build one image for one architecture and drop a
//! small JSON record describing it. This crate gathers those records, groups
//! them by the Dockerfile directory they were built from, and writes one
//! `manifest_<name>.yaml` per image. A later job feeds those files to a
//! manifest tool that pushes the merged multi-arch image list.
//!
//! # Pipeline
//!
//! ```text
//! 1. Configure  environment   →  Config          (read once, passed down)
//! 2. Collect    artifacts/    →  BuildArtifact*  (bad files skipped)
//! 3. Resolve    Config.ci     →  CiContext       (channel + tags)
//! 4. Group      artifacts     →  ArtifactGroup*  (first-seen order)
//! 5. Emit       groups        →  manifest_*.yaml
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | Environment variables and CLI overrides gathered into [`config::Config`] |
//! | [`collect`] | Walks the artifact tree and parses JSON records |
//! | [`ci`] | Derives the publishing channel and tag list |
//! | [`group`] | Buckets artifacts by `dockerfiledirname` |
//! | [`manifest`] | Builds, renders and writes manifest documents |
//! | [`generate`] | Runs the stages in order |
//! | [`types`] | Artifact and group types shared between stages |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## One Reference Per Image
//!
//! Every architecture entry in a manifest carries the same image reference as
//! the merged image. The manifest tool resolves each entry to the digest for
//! its platform, so there is no per-arch tag to track.
//!
//! ## Skip, Don't Fail
//!
//! A broken artifact record only loses that one record. CI jobs that produce
//! artifacts can fail halfway and leave partial files behind; the remaining
//! images should still get their manifests. Failing to write output, on the
//! other hand, ends the run.

pub mod ci;
pub mod collect;
pub mod config;
pub mod generate;
pub mod group;
pub mod manifest;
pub mod output;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
