//! BibTeX reference-file model, reader, and writer.
//!
//! This module covers the text format shared by the pipeline stages: parsing
//! export files into [`Collection`]s of [`Entry`] records and rendering
//! collections back out in a round-trippable form.
//!
//! # Example
//!
//! ```
//! use bibmerge_core::bibtex::{parse_collection, render_collection};
//!
//! let collection = parse_collection("@article{k, title={A Paper}}").unwrap();
//! assert_eq!(collection.len(), 1);
//! let rendered = render_collection(&collection);
//! assert_eq!(parse_collection(&rendered).unwrap(), collection);
//! ```

mod entry;
mod error;
mod reader;
mod writer;

pub use entry::{Collection, Entry, Field};
pub use error::ParseError;
pub use reader::parse_collection;
pub use writer::render_collection;
