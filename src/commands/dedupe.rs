//! Dedupe command handler: filter one file against reference files.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use bibmerge_core::dedupe_file;

pub fn run_dedupe_command(source: &Path, against: &[PathBuf], output: &Path) -> Result<()> {
    let outcome = dedupe_file(source, against, output)
        .with_context(|| format!("dedupe failed for `{}`", source.display()))?;

    info!(
        kept = outcome.collection.len(),
        removed = outcome.removed,
        output = %output.display(),
        "deduplication complete"
    );
    Ok(())
}
