//! Deduplicator: remove entries whose DOI appears in reference collections.
//!
//! Comparison is exact match on normalized DOIs. Entries without a DOI can
//! never be proven duplicates and always survive; a duplicate must be
//! positively identified, never assumed from two missing identifiers.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument, warn};

use crate::bibtex::Collection;
use crate::doi::normalize_doi;
use crate::error::PipelineError;
use crate::files::{load_collection, write_collection_file};

/// Result of one deduplication pass.
#[derive(Debug)]
pub struct DedupeOutcome {
    /// Surviving entries, in their original order.
    pub collection: Collection,
    /// Number of entries removed as DOI duplicates.
    pub removed: usize,
}

/// Collects the normalized DOIs of every DOI-bearing entry.
///
/// Empty and absent `doi` fields contribute nothing, so an empty string can
/// never act as a match-all duplicate key.
#[must_use]
pub fn collect_dois(collection: &Collection) -> HashSet<String> {
    collection
        .iter()
        .map(|entry| normalize_doi(entry.field_or_empty("doi")))
        .filter(|doi| !doi.is_empty())
        .collect()
}

/// Filters `source`, keeping every entry whose normalized DOI is empty or
/// not present in `reference_dois`. Order is preserved. Entries repeating an
/// earlier citation key are dropped with a warning, as in standardization.
#[instrument(skip(source, reference_dois), fields(entries = source.len(), reference_dois = reference_dois.len()))]
#[must_use]
pub fn remove_duplicates(source: &Collection, reference_dois: &HashSet<String>) -> DedupeOutcome {
    let mut seen_keys: HashSet<&str> = HashSet::new();
    let mut kept = Vec::with_capacity(source.len());
    let mut removed = 0usize;

    for entry in source.iter() {
        if !seen_keys.insert(entry.key.as_str()) {
            warn!(key = %entry.key, "duplicate citation key, keeping first occurrence only");
            continue;
        }

        let doi = normalize_doi(entry.field_or_empty("doi"));
        if !doi.is_empty() && reference_dois.contains(&doi) {
            info!(key = %entry.key, doi = %doi, "removing entry, DOI present in reference set");
            removed += 1;
            continue;
        }

        kept.push(entry.clone());
    }

    DedupeOutcome {
        collection: Collection::from_entries(kept),
        removed,
    }
}

/// Loads `source` and the `references`, removes from `source` every entry
/// whose DOI appears in any reference collection, and persists the filtered
/// collection to `dest`.
///
/// Multiple reference files union their DOI sets, so one call can
/// deduplicate against the cumulative set of several databases.
///
/// # Errors
///
/// [`PipelineError::SourceUnreadable`] when `source` or any reference file
/// is missing or malformed; [`PipelineError::DestinationWrite`] when `dest`
/// cannot be written.
#[instrument(skip(references), fields(references = references.len()))]
pub fn dedupe_file(
    source: &Path,
    references: &[PathBuf],
    dest: &Path,
) -> Result<DedupeOutcome, PipelineError> {
    let source_collection = load_collection(source)?;

    let mut reference_dois: HashSet<String> = HashSet::new();
    for path in references {
        let reference = load_collection(path)?;
        let before = reference_dois.len();
        reference_dois.extend(collect_dois(&reference));
        debug!(
            reference = %path.display(),
            entries = reference.len(),
            new_dois = reference_dois.len() - before,
            "reference collection loaded"
        );
    }

    let outcome = remove_duplicates(&source_collection, &reference_dois);
    write_collection_file(dest, &outcome.collection)?;

    info!(
        source = %source.display(),
        dest = %dest.display(),
        kept = outcome.collection.len(),
        removed = outcome.removed,
        "deduplicated collection written"
    );
    Ok(outcome)
}
