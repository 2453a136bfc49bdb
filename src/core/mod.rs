//! Extraction pipeline.
//!
//! - `parser`: Go syntax trees and byte offset → line/column resolution
//! - `unquote`: literal token unescaping
//! - `exclusion`: exact, regex and import-derived suppression
//! - `extract`: literal collection over a parsed file
//! - `locate`: output directory strategies
//! - `constraint`: Go build constraints deciding a package's files
//! - `artifacts`: extraction, resource-seed and catalog writers
//! - `walker`: file and directory traversal with per-file failure isolation

pub mod artifacts;
pub mod constraint;
pub mod context;
pub mod error;
pub mod exclusion;
pub mod extract;
pub mod locate;
pub mod log;
pub mod parser;
pub mod unquote;
pub mod walker;

pub use context::ExtractOptions;
pub use error::ExtractError;
pub use extract::{ExtractionResult, LiteralRecord};
pub use locate::OutputStrategy;
pub use walker::{Extractor, FileOutcome, Tally};
