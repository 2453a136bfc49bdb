use std::path::PathBuf;

use anyhow::{Context as _, Result};
use regex::Regex;

use crate::{config::EXCLUSION_FILE_NAME, core::locate::OutputStrategy};

/// Immutable settings for one extraction run.
///
/// Built once from the command line and shared by reference with every
/// directory and file call.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Print progress for every directory and file.
    pub verbose: bool,
    /// Run the whole pipeline without writing anything.
    pub dry_run: bool,
    /// Where artifacts go.
    pub output: OutputStrategy,
    /// Exclusion config, reloaded for every file.
    pub exclude_file: PathBuf,
    /// Source files whose name matches are skipped.
    pub ignore_regexp: Option<Regex>,
    /// Also write a gettext catalog next to the resource seed.
    pub emit_catalog: bool,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            verbose: false,
            dry_run: false,
            output: OutputStrategy::SourceDir,
            exclude_file: PathBuf::from(EXCLUSION_FILE_NAME),
            ignore_regexp: None,
            emit_catalog: false,
        }
    }
}

/// Compile the `--ignore-regexp` pattern.
pub fn compile_ignore_regexp(pattern: Option<&str>) -> Result<Option<Regex>> {
    pattern
        .filter(|p| !p.is_empty())
        .map(|p| Regex::new(p).with_context(|| format!("Invalid ignore regexp: \"{}\"", p)))
        .transpose()
}
