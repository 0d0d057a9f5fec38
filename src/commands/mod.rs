//! CLI command handlers.

mod dedupe;
mod export;
mod standardize;

pub use dedupe::run_dedupe_command;
pub use export::run_export_command;
pub use standardize::run_standardize_command;
