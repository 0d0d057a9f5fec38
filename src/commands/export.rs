//! Export command handler: flatten one reference file to CSV.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use bibmerge_core::export_file;

pub fn run_export_command(source: &Path, output: &Path) -> Result<()> {
    let rows = export_file(source, output)
        .with_context(|| format!("export failed for `{}`", source.display()))?;

    info!(rows, output = %output.display(), "export complete");
    Ok(())
}
