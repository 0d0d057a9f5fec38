//! Standardizer: normalize field names, DOIs, and required fields.
//!
//! Database exports disagree about field-name casing (`AUTHOR` vs `author`),
//! DOI shape, and which fields are present at all. Standardization rewrites
//! each collection into one shape so the later stages can rely on it:
//! lowercase field names, normalized `doi`, a guaranteed set of fields, and
//! conference entries carrying their venue in `journal`.

use std::collections::HashSet;
use std::path::Path;

use tracing::{info, instrument, warn};

use crate::bibtex::{Collection, Entry};
use crate::doi::normalize_doi;
use crate::error::PipelineError;
use crate::files::{load_collection, write_collection_file};

/// Fields guaranteed present (possibly empty) on every standardized entry.
pub const ESSENTIAL_FIELDS: [&str; 12] = [
    "doi", "title", "abstract", "keywords", "author", "year", "publisher", "journal", "booktitle",
    "pages", "volume", "number",
];

/// Keys exempt from the lowercase rule. `ID` and `ENTRYTYPE` are structural
/// (citation key and entry type), not data fields, and keep their casing.
pub const RESERVED_KEYS: [&str; 2] = ["ID", "ENTRYTYPE"];

/// Applies the lowercase rule to one field name: reserved keys pass through
/// unchanged, everything else is lowercased.
#[must_use]
pub fn standardized_field_name(name: &str) -> String {
    if RESERVED_KEYS.contains(&name) {
        name.to_string()
    } else {
        name.to_ascii_lowercase()
    }
}

/// Builds a standardized copy of `collection`.
///
/// Per entry: field names are lowercased (reserved keys excepted), the `doi`
/// value is normalized, every essential field missing from the entry is
/// appended empty, and an empty `journal` is filled from a non-empty
/// `booktitle` (which is left in place). Existing values are never
/// overwritten. Entries repeating an earlier citation key are dropped with a
/// warning; the input collection is not modified.
#[instrument(skip(collection), fields(entries = collection.len()))]
#[must_use]
pub fn standardize(collection: &Collection) -> Collection {
    let mut seen_keys: HashSet<&str> = HashSet::new();
    let mut entries = Vec::with_capacity(collection.len());

    for entry in collection.iter() {
        if !seen_keys.insert(entry.key.as_str()) {
            warn!(key = %entry.key, "duplicate citation key, keeping first occurrence only");
            continue;
        }
        entries.push(standardize_entry(entry));
    }

    Collection::from_entries(entries)
}

fn standardize_entry(entry: &Entry) -> Entry {
    let mut out = Entry::new(entry.key.clone(), entry.entry_type.clone());

    for field in entry.fields() {
        let name = standardized_field_name(&field.name);
        if out.has_field(&name) {
            // Distinct casings of one name collapse; first value wins.
            warn!(key = %entry.key, field = %name, "field name collision after lowercasing, keeping first value");
            continue;
        }
        let value = if name == "doi" {
            normalize_doi(&field.value)
        } else {
            field.value.clone()
        };
        out.set_field(name, value);
    }

    for name in ESSENTIAL_FIELDS {
        if !out.has_field(name) {
            out.set_field(name, "");
        }
    }

    if out.field_or_empty("journal").is_empty() {
        let booktitle = out.field_or_empty("booktitle").to_string();
        if !booktitle.is_empty() {
            out.set_field("journal", booktitle);
        }
    }

    out
}

/// Loads `source`, standardizes it, and persists the result to `dest`.
///
/// # Errors
///
/// [`PipelineError::SourceUnreadable`] when `source` is missing or
/// malformed; [`PipelineError::DestinationWrite`] when `dest` cannot be
/// written.
#[instrument]
pub fn standardize_file(source: &Path, dest: &Path) -> Result<Collection, PipelineError> {
    let raw = load_collection(source)?;
    let standardized = standardize(&raw);
    write_collection_file(dest, &standardized)?;

    info!(
        source = %source.display(),
        dest = %dest.display(),
        entries = standardized.len(),
        dropped = raw.len() - standardized.len(),
        "standardized collection written"
    );
    Ok(standardized)
}
