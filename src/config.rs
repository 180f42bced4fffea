//! Run configuration gathered from the environment.
//!
//! Every input the generator needs is read exactly once, at startup, into a
//! [`Config`]. Later stages receive it by reference and never touch the
//! process environment themselves.
//!
//! ## Variables
//!
//! | Variable | Field | Default |
//! |----------|-------|---------|
//! | `KANIKO_ARTIFACTS_DIR` | `artifacts_dir` | `artifacts/kaniko-build` |
//! | `CI_COMMIT_REF_PROTECTED` | `ci.ref_protected` | empty |
//! | `CI_COMMIT_TAG` | `ci.commit_tag` | empty |
//! | `CI_PROJECT_ID` | `ci.project_id` | `UNKNOWN_PROJECT_ID` |
//! | `CI_COMMIT_SHORT_SHA` | `ci.short_sha` | `0000000` |
//! | `CI_COMMIT_REF_SLUG` | `ci.ref_slug` | empty |
//! | `TAGS` | `ci.tags` | the short SHA |
//!
//! A variable that is set wins even when its value is empty; only an unset
//! variable falls back to its default.

use std::path::PathBuf;

pub const ARTIFACTS_DIR_VAR: &str = "KANIKO_ARTIFACTS_DIR";
pub const DEFAULT_ARTIFACTS_DIR: &str = "artifacts/kaniko-build";
pub const DEFAULT_PROJECT_ID: &str = "UNKNOWN_PROJECT_ID";
pub const DEFAULT_SHORT_SHA: &str = "0000000";

/// Raw CI variables, exactly as the pipeline exported them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CiEnv {
    pub ref_protected: String,
    pub commit_tag: String,
    pub project_id: String,
    pub short_sha: String,
    pub ref_slug: String,
    /// Comma-separated tag override. `None` when `TAGS` is unset.
    pub tags: Option<String>,
}

impl Default for CiEnv {
    fn default() -> Self {
        Self {
            ref_protected: String::new(),
            commit_tag: String::new(),
            project_id: DEFAULT_PROJECT_ID.to_string(),
            short_sha: DEFAULT_SHORT_SHA.to_string(),
            ref_slug: String::new(),
            tags: None,
        }
    }
}

/// Everything a run needs to know, resolved up front.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Root of the artifact tree to scan.
    pub artifacts_dir: PathBuf,
    /// Directory the manifest files are written into.
    pub output_dir: PathBuf,
    pub ci: CiEnv,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            artifacts_dir: PathBuf::from(DEFAULT_ARTIFACTS_DIR),
            output_dir: PathBuf::from("."),
            ci: CiEnv::default(),
        }
    }
}

impl Config {
    /// Read the process environment.
    ///
    /// Values that are not valid UTF-8 are treated as unset.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = CiEnv::default();
        let var = |key: &str, default: String| lookup(key).unwrap_or(default);

        let ci = CiEnv {
            ref_protected: var("CI_COMMIT_REF_PROTECTED", defaults.ref_protected),
            commit_tag: var("CI_COMMIT_TAG", defaults.commit_tag),
            project_id: var("CI_PROJECT_ID", defaults.project_id),
            short_sha: var("CI_COMMIT_SHORT_SHA", defaults.short_sha),
            ref_slug: var("CI_COMMIT_REF_SLUG", defaults.ref_slug),
            tags: lookup("TAGS"),
        };

        Self {
            artifacts_dir: lookup(ARTIFACTS_DIR_VAR)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_ARTIFACTS_DIR)),
            output_dir: PathBuf::from("."),
            ci,
        }
    }

    /// Apply command-line overrides on top of the environment.
    pub fn with_overrides(
        mut self,
        artifacts_dir: Option<PathBuf>,
        output_dir: Option<PathBuf>,
    ) -> Self {
        if let Some(dir) = artifacts_dir {
            self.artifacts_dir = dir;
        }
        if let Some(dir) = output_dir {
            self.output_dir = dir;
        }
        self
    }
}
