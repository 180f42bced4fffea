//! CLI output formatting for every stage.
//!
//! The generator runs inside CI jobs, so its stdout is the only record an
//! operator has of what was found and written. Each stage has a `format_*`
//! function returning lines, which keeps formatting testable, and a `print_*`
//! wrapper that writes them to stdout.
//!
//! # Output Format
//!
//! ```text
//! Traversing directory: artifacts/kaniko-build
//! kaniko-build/
//!     app/
//!         amd64.json
//!         arm64.json
//! Valid JSON found: artifacts/kaniko-build/app/amd64.json
//! Invalid JSON: artifacts/kaniko-build/app/arm64.json - EOF while parsing a value at line 1 column 0
//! Channel: prerelease
//! TAGS: abc1234,main
//! Generated manifest_app.yaml for app
//! Wrote 1 manifest for 1 artifact (1 file skipped)
//! ```

use crate::ci::CiContext;
use crate::collect::{FileOutcome, TreeEntry};
use crate::manifest::WrittenManifest;
use std::path::Path;

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}

// ============================================================================
// Collect
// ============================================================================

/// Format the directory listing shown before parsing.
pub fn format_tree(root: &Path, tree: &[TreeEntry]) -> Vec<String> {
    let mut lines = vec![format!("Traversing directory: {}", root.display())];
    for entry in tree {
        let suffix = if entry.is_dir { "/" } else { "" };
        lines.push(format!("{}{}{}", indent(entry.depth), entry.name, suffix));
    }
    lines
}

/// One line per candidate file, in walk order.
pub fn format_outcomes(outcomes: &[FileOutcome]) -> Vec<String> {
    outcomes
        .iter()
        .map(|outcome| match outcome {
            FileOutcome::Valid(path) => format!("Valid JSON found: {}", path.display()),
            FileOutcome::Invalid { path, reason } => {
                format!("Invalid JSON: {} - {}", path.display(), reason)
            }
            FileOutcome::Unreadable { path, reason } => {
                format!("Cannot read: {} - {}", path.display(), reason)
            }
        })
        .collect()
}

pub fn print_collect_output(root: &Path, tree: &[TreeEntry], outcomes: &[FileOutcome]) {
    for line in format_tree(root, tree)
        .into_iter()
        .chain(format_outcomes(outcomes))
    {
        println!("{}", line);
    }
}

pub fn print_no_artifacts() {
    println!("No valid JSON artifacts found. Exiting.");
}

// ============================================================================
// Resolve
// ============================================================================

pub fn format_ci_context(ctx: &CiContext) -> Vec<String> {
    vec![
        format!("Channel: {}", ctx.channel),
        format!("TAGS: {}", ctx.raw_tags),
    ]
}

pub fn print_ci_context(ctx: &CiContext) {
    for line in format_ci_context(ctx) {
        println!("{}", line);
    }
}

// ============================================================================
// Emit
// ============================================================================

pub fn format_written(written: &WrittenManifest) -> String {
    format!("Generated {} for {}", written.file_name, written.group_key)
}

pub fn print_written(written: &WrittenManifest) {
    println!("{}", format_written(written));
}

/// Closing summary line.
pub fn format_summary(manifests: usize, artifacts: usize, skipped: usize) -> String {
    let mut line = format!(
        "Wrote {} for {}",
        plural(manifests, "manifest"),
        plural(artifacts, "artifact")
    );
    if skipped > 0 {
        line.push_str(&format!(" ({} skipped)", plural(skipped, "file")));
    }
    line
}

pub fn print_summary(manifests: usize, artifacts: usize, skipped: usize) {
    println!("{}", format_summary(manifests, artifacts, skipped));
}
