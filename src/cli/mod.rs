//! CLI support for filterdoc
//!
//! Provides programmatic access to the CLI so other tools can embed the
//! same convert command.

mod convert;
mod docs;

pub use convert::{ConvertOptions, execute_convert, load_strategy};
pub use docs::{DocCategory, get_doc_category, get_docs_overview};

use std::io;

use thiserror::Error;

/// Errors that can occur during CLI operations
#[derive(Debug, Error)]
pub enum CliError {
    /// Conversion error
    #[error("Conversion error: {0}")]
    Convert(#[from] crate::ConvertError),

    /// Strategy configuration error
    #[error("Invalid strategy: {0}")]
    Strategy(#[from] crate::StrategyError),

    /// JSON parsing error
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// No input provided
    #[error("No filter provided. Pass it as an argument or pipe JSON to stdin.")]
    NoInput,

    /// Unknown documentation category
    #[error("Unknown category: '{0}'\nRun 'filterdoc docs' to see available categories.")]
    UnknownCategory(String),
}
