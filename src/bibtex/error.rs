//! Error types for BibTeX parsing.

use thiserror::Error;

/// Errors that can occur while parsing a BibTeX file.
#[derive(Debug, Clone, Error)]
pub enum ParseError {
    /// Entry cannot be parsed into `@type{key, ...}` form.
    #[error("malformed entry `{preview}`: {reason}\n  Suggestion: {suggestion}")]
    MalformedEntry {
        /// Truncated entry text for display
        preview: String,
        /// Why the entry is invalid
        reason: String,
        /// How to fix the issue
        suggestion: String,
    },

    /// A field assignment inside an otherwise well-formed entry is invalid.
    #[error(
        "malformed field in entry `{preview}`: {reason}\n  Suggestion: use `field = {{value}}` or `field = \"value\"` with commas between fields"
    )]
    MalformedField {
        /// Truncated entry text for display
        preview: String,
        /// Why the field list is invalid
        reason: String,
    },
}

impl ParseError {
    /// Creates a `MalformedEntry` error for an entry without a type tag.
    #[must_use]
    pub fn missing_type(entry: &str) -> Self {
        Self::MalformedEntry {
            preview: preview(entry),
            reason: "missing entry type after '@'".to_string(),
            suggestion: "start entries with `@article{key, ...}`".to_string(),
        }
    }

    /// Creates a `MalformedEntry` error for an entry without `{` after the type.
    #[must_use]
    pub fn missing_brace(entry: &str) -> Self {
        Self::MalformedEntry {
            preview: preview(entry),
            reason: "missing opening '{' after entry type".to_string(),
            suggestion: "use `@type{key, field = value}`".to_string(),
        }
    }

    /// Creates a `MalformedEntry` error for unbalanced braces.
    #[must_use]
    pub fn unbalanced(entry: &str) -> Self {
        Self::MalformedEntry {
            preview: preview(entry),
            reason: "unbalanced braces (entry never closed)".to_string(),
            suggestion: "ensure each '{' has a matching '}'".to_string(),
        }
    }

    /// Creates a `MalformedEntry` error for a missing citation key.
    #[must_use]
    pub fn empty_key(entry: &str) -> Self {
        Self::MalformedEntry {
            preview: preview(entry),
            reason: "empty citation key".to_string(),
            suggestion: "provide a non-empty key before the first comma".to_string(),
        }
    }

    /// Creates a `MalformedField` error with a parse-level reason.
    #[must_use]
    pub fn bad_field(entry: &str, reason: impl Into<String>) -> Self {
        Self::MalformedField {
            preview: preview(entry),
            reason: reason.into(),
        }
    }
}

fn preview(input: &str) -> String {
    const MAX: usize = 80;
    if input.chars().count() <= MAX {
        return input.to_string();
    }
    let shortened: String = input.chars().take(MAX).collect();
    format!("{shortened}...")
}
