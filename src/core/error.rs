//! Per-file error taxonomy.
//!
//! Every variant is scoped to the single source file being processed. The
//! walker logs it and moves on to the next file; nothing here aborts a run.
//! A missing exclusion config and an uncompilable exclude regex are not
//! errors at all: the first yields an empty config, the second is logged
//! and the pattern dropped.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Failed to load exclusion config {path}: {message}")]
    ConfigMalformed { path: PathBuf, message: String },

    #[error("Failed to parse file {path}: {message}")]
    ParseFailure { path: PathBuf, message: String },

    #[error("Failed to resolve output path for {path}: {message}")]
    PathResolutionFailure { path: PathBuf, message: String },

    #[error("Failed to write {path}: {source}")]
    WriteFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ExtractError {
    /// Short label used in log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ConfigMalformed { .. } => "config-malformed",
            Self::ParseFailure { .. } => "parse-failure",
            Self::PathResolutionFailure { .. } => "path-resolution-failure",
            Self::WriteFailure { .. } => "write-failure",
        }
    }
}

pub type Result<T> = std::result::Result<T, ExtractError>;
