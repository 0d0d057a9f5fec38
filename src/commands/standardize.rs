//! Standardize command handler: normalize one reference file.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use bibmerge_core::standardize_file;

pub fn run_standardize_command(source: &Path, output: &Path) -> Result<()> {
    let standardized = standardize_file(source, output)
        .with_context(|| format!("standardize failed for `{}`", source.display()))?;

    info!(
        entries = standardized.len(),
        output = %output.display(),
        "standardization complete"
    );
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_run_standardize_command_writes_output() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("raw.bib");
        let output = temp.path().join("standardized/raw.bib");
        fs::write(&source, "@article{k, TITLE={T}, DOI={https://doi.org/10.1234/X}}\n").unwrap();

        run_standardize_command(&source, &output).unwrap();

        let written = fs::read_to_string(&output).unwrap();
        assert!(written.contains("doi = {10.1234/x}"));
    }

    #[test]
    fn test_run_standardize_command_missing_source_fails_with_path_context() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("absent.bib");
        let output = temp.path().join("out.bib");

        let err = run_standardize_command(&source, &output).unwrap_err();
        assert!(format!("{err:#}").contains("absent.bib"));
    }
}
