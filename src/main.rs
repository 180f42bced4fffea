use clap::Parser;
use multiarch_manifest::{config::Config, generate};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "multiarch-manifest")]
#[command(about = "Generate multi-arch manifest descriptors from kaniko build artifacts")]
#[command(long_about = "\
Generate multi-arch manifest descriptors from kaniko build artifacts

Scans the artifact directory for JSON build records, groups them by
dockerfiledirname, and writes one manifest_<name>.yaml per group.

Artifact record:

  {
    \"dockerfiledirname\": \"images/app\",   # group key (default: unknown_directory)
    \"arch\": \"amd64\",                      # amd64 or arm64
    \"platform\": \"linux\"                   # os (default: linux)
  }

Environment:
  KANIKO_ARTIFACTS_DIR      artifact root (default: artifacts/kaniko-build)
  CI_COMMIT_REF_PROTECTED   \"true\" publishes to the release channel
  CI_COMMIT_TAG             publishes to release and is appended as a tag
  CI_PROJECT_ID             project path segment (default: UNKNOWN_PROJECT_ID)
  CI_COMMIT_SHORT_SHA       image tag (default: 0000000)
  CI_COMMIT_REF_SLUG        appended as a tag
  TAGS                      comma-separated tags (default: the short SHA)")]
#[command(version)]
struct Cli {
    /// Artifact directory (overrides KANIKO_ARTIFACTS_DIR)
    #[arg(long)]
    artifacts_dir: Option<PathBuf>,

    /// Directory to write manifests into (default: current directory)
    #[arg(long)]
    output_dir: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = Config::from_env().with_overrides(cli.artifacts_dir, cli.output_dir);
    generate::run(&config)?;
    Ok(())
}
