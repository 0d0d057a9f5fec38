//! Exporter: flatten a collection into the review screening table.
//!
//! The CSV schema is a fixed contract with downstream screening
//! spreadsheets; header names (including the capitalized `Publisher` and
//! the `Review`/`classification` annotation columns) must not drift.

use std::io;
use std::path::Path;

use serde::Serialize;
use tracing::{info, instrument};

use crate::bibtex::{Collection, Entry};
use crate::error::PipelineError;
use crate::files::{atomic_write, load_collection};

/// The fixed export schema, in column order.
pub const CSV_HEADER: [&str; 12] = [
    "ID",
    "doi",
    "classification",
    "title",
    "abstract",
    "keywords",
    "Review",
    "author",
    "year",
    "Publisher",
    "journal",
    "type title",
];

/// One export row. Field order mirrors [`CSV_HEADER`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CsvRow {
    /// Citation key.
    #[serde(rename = "ID")]
    pub id: String,
    /// Normalized DOI, or empty.
    pub doi: String,
    /// Always empty; filled in manually during screening.
    pub classification: String,
    pub title: String,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    pub keywords: String,
    /// Always empty; filled in manually during screening.
    #[serde(rename = "Review")]
    pub review: String,
    pub author: String,
    pub year: String,
    #[serde(rename = "Publisher")]
    pub publisher: String,
    pub journal: String,
    /// Entry type tag, lowercased.
    #[serde(rename = "type title")]
    pub type_title: String,
}

/// Builds one row per entry, in collection order.
///
/// Fields missing from an entry export as empty strings rather than failing
/// the row; standardized input always has them, but the exporter does not
/// insist on standardized input.
#[must_use]
pub fn export_rows(collection: &Collection) -> Vec<CsvRow> {
    collection.iter().map(row_for_entry).collect()
}

fn row_for_entry(entry: &Entry) -> CsvRow {
    CsvRow {
        id: flatten(&entry.key),
        doi: flatten(entry.field_or_empty("doi")),
        classification: String::new(),
        title: flatten(entry.field_or_empty("title")),
        abstract_text: flatten(entry.field_or_empty("abstract")),
        keywords: flatten(entry.field_or_empty("keywords")),
        review: String::new(),
        author: flatten(entry.field_or_empty("author")),
        year: flatten(entry.field_or_empty("year")),
        publisher: flatten(entry.field_or_empty("publisher")),
        journal: flatten(entry.field_or_empty("journal")),
        type_title: entry.entry_type.to_ascii_lowercase(),
    }
}

/// Collapses multi-line field values to one line for the table cell.
fn flatten(value: &str) -> String {
    value
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Renders a collection as CSV bytes: header row plus one row per entry,
/// every value quoted.
///
/// # Errors
///
/// Returns [`PipelineError::DestinationWrite`] if CSV serialization fails
/// (attributed to `dest`, the path the bytes are meant for).
pub fn render_csv(collection: &Collection, dest: &Path) -> Result<Vec<u8>, PipelineError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .quote_style(csv::QuoteStyle::Always)
        .from_writer(Vec::new());

    // Header written explicitly so empty collections still export a schema.
    writer
        .write_record(CSV_HEADER)
        .map_err(|e| PipelineError::write_failed(dest, io::Error::other(e)))?;
    for row in export_rows(collection) {
        writer
            .serialize(&row)
            .map_err(|e| PipelineError::write_failed(dest, io::Error::other(e)))?;
    }

    writer
        .into_inner()
        .map_err(|e| PipelineError::write_failed(dest, e.into_error()))
}

/// Loads `source` and persists its flattened CSV table to `dest`.
/// Returns the number of data rows written.
///
/// # Errors
///
/// [`PipelineError::SourceUnreadable`] when `source` is missing or
/// malformed; [`PipelineError::DestinationWrite`] when `dest` cannot be
/// written.
#[instrument]
pub fn export_file(source: &Path, dest: &Path) -> Result<usize, PipelineError> {
    let collection = load_collection(source)?;
    let bytes = render_csv(&collection, dest)?;
    atomic_write(dest, &bytes)?;

    info!(
        source = %source.display(),
        dest = %dest.display(),
        rows = collection.len(),
        "csv export written"
    );
    Ok(collection.len())
}
