//! The full pipeline: collect → resolve → group → write.

use crate::ci::CiContext;
use crate::collect;
use crate::config::Config;
use crate::group::group_artifacts;
use crate::manifest::{ManifestDocument, ManifestError, WrittenManifest};
use crate::output;

/// What a run produced.
#[derive(Debug, Default)]
pub struct RunReport {
    pub artifacts: usize,
    pub skipped: usize,
    pub written: Vec<WrittenManifest>,
}

/// Run the generator against `config`, reporting progress on stdout.
///
/// Finding no valid artifacts is not an error: the report simply lists no
/// manifests. The only failure is an output file that can't be written.
pub fn run(config: &Config) -> Result<RunReport, ManifestError> {
    let collection = collect::collect(&config.artifacts_dir);
    output::print_collect_output(
        &config.artifacts_dir,
        &collection.tree,
        &collection.outcomes,
    );

    let mut report = RunReport {
        artifacts: collection.artifacts.len(),
        skipped: collection.skipped_count(),
        written: Vec::new(),
    };

    if collection.artifacts.is_empty() {
        output::print_no_artifacts();
        return Ok(report);
    }

    let ctx = CiContext::resolve(&config.ci);
    output::print_ci_context(&ctx);

    for group in group_artifacts(collection.artifacts) {
        let written = ManifestDocument::build(&group, &ctx).write_to(&config.output_dir)?;
        output::print_written(&written);
        report.written.push(written);
    }

    output::print_summary(report.written.len(), report.artifacts, report.skipped);
    Ok(report)
}
