//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Merge bibliographic reference exports with DOI-based deduplication.
///
/// Bibmerge normalizes BibTeX exports from academic databases, removes
/// entries already present in reference files, and flattens collections
/// into a fixed-schema screening CSV.
#[derive(Parser, Debug)]
#[command(name = "bibmerge")]
#[command(author, version, about)]
pub struct Cli {
    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Pipeline operations, one per subcommand.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Normalize field names, DOIs, and required fields in a reference file
    Standardize {
        /// Source BibTeX file
        source: PathBuf,

        /// Destination path for the standardized file
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Remove entries whose DOI appears in one or more reference files
    Dedupe {
        /// Standardized BibTeX file to filter
        source: PathBuf,

        /// Reference file(s) whose DOIs mark duplicates; repeat to union
        /// several databases into one cumulative reference set
        #[arg(short = 'a', long = "against", required = true)]
        against: Vec<PathBuf>,

        /// Destination path for the filtered file
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Flatten a reference file into the review screening CSV
    Export {
        /// BibTeX file to export
        source: PathBuf,

        /// Destination path for the CSV file
        #[arg(short, long)]
        output: PathBuf,
    },
}
