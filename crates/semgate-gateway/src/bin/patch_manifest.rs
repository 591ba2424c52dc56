//! Add `metric_aggregation_params` to every simple metric of a semantic manifest, in place.

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use semgate_core::manifest;
use semgate_gateway::config::schema::DEFAULT_MANIFEST_PATH;

#[derive(Debug, Parser)]
#[command(name = "semgate-patch-manifest", about = "Patch semantic_manifest.json for metric aggregation params")]
struct Args {
    /// Manifest to rewrite.
    #[arg(default_value = DEFAULT_MANIFEST_PATH)]
    path: PathBuf,

    /// Report what would change without writing.
    #[arg(long)]
    dry_run: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args = Args::parse();
    let mut m = manifest::read_json(&args.path)?;
    let report = manifest::patch_manifest(&mut m)?;

    if args.dry_run {
        tracing::info!(path = %args.path.display(), patched = ?report.patched, skipped = ?report.skipped, "dry run, manifest not written");
        return Ok(());
    }

    manifest::write_json(&args.path, &m)?;
    tracing::info!(
        path = %args.path.display(),
        patched = report.patched.len(),
        skipped = report.skipped.len(),
        "patched manifest"
    );
    Ok(())
}
