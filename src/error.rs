//! Error types shared by the pipeline operations.

use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors that can occur while running a pipeline operation.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Input file is missing, unreadable, or not parseable BibTeX.
    #[error("cannot read source `{path}`: {reason}")]
    SourceUnreadable {
        /// The file that failed to load
        path: PathBuf,
        /// I/O or parse failure detail
        reason: String,
    },

    /// Output file could not be written; no partial file is left behind.
    #[error("cannot write destination `{path}`: {source}")]
    DestinationWrite {
        /// The intended destination
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },
}

impl PipelineError {
    /// Creates a `SourceUnreadable` error for `path`.
    #[must_use]
    pub fn unreadable(path: &Path, reason: impl fmt::Display) -> Self {
        Self::SourceUnreadable {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }

    /// Creates a `DestinationWrite` error for `path`.
    #[must_use]
    pub fn write_failed(path: &Path, source: std::io::Error) -> Self {
        Self::DestinationWrite {
            path: path.to_path_buf(),
            source,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_source_unreadable_message_names_path_and_reason() {
        let err = PipelineError::unreadable(Path::new("refs/ieee.bib"), "No such file or directory");
        let msg = err.to_string();
        assert!(msg.contains("refs/ieee.bib"), "should contain the path");
        assert!(msg.contains("No such file"), "should contain the reason");
    }

    #[test]
    fn test_destination_write_message_names_path() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = PipelineError::write_failed(Path::new("out/merged.bib"), io);
        let msg = err.to_string();
        assert!(msg.contains("out/merged.bib"));
        assert!(msg.contains("denied"));
    }

    #[test]
    fn test_destination_write_exposes_io_source() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = PipelineError::write_failed(Path::new("x"), io);
        assert!(std::error::Error::source(&err).is_some());
    }
}
