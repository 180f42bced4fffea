//! CI context resolution: publishing channel and image tags.
//!
//! A pure function of [`CiEnv`]. Protected refs and tagged commits publish to
//! the `release` channel, everything else to `prerelease`. The tag list starts
//! from `TAGS` (or the short SHA) and gains the ref slug and the commit tag
//! when those are present:
//!
//! ```text
//! TAGS unset, short SHA abc1234, slug main, tag v1.0  →  abc1234,main,v1.0
//! ```

use crate::config::CiEnv;
use std::fmt;

/// Registry project images are pushed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Release,
    Prerelease,
}

impl Channel {
    pub fn as_str(self) -> &'static str {
        match self {
            Channel::Release => "release",
            Channel::Prerelease => "prerelease",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolved publishing coordinates for this pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CiContext {
    pub channel: Channel,
    pub project_id: String,
    pub short_sha: String,
    /// The comma-joined tag string before splitting, as logged.
    pub raw_tags: String,
    /// Tags in order, trimmed, empties dropped. Duplicates are kept.
    pub tags: Vec<String>,
}

impl CiContext {
    pub fn resolve(env: &CiEnv) -> Self {
        let channel = if env.ref_protected == "true" || !env.commit_tag.is_empty() {
            Channel::Release
        } else {
            Channel::Prerelease
        };

        let mut raw_tags = env.tags.clone().unwrap_or_else(|| env.short_sha.clone());
        for extra in [&env.ref_slug, &env.commit_tag] {
            if !extra.is_empty() {
                raw_tags.push(',');
                raw_tags.push_str(extra);
            }
        }

        Self {
            channel,
            project_id: env.project_id.clone(),
            short_sha: env.short_sha.clone(),
            tags: split_tags(&raw_tags),
            raw_tags,
        }
    }
}

/// Split a comma-separated tag string, trimming each entry and dropping blanks.
pub fn split_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}
