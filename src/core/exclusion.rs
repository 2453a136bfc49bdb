//! Exclusion engine.
//!
//! `ExclusionRules` holds the config-derived exact strings and compiled
//! regexes and is never mutated once built. `FileExclusions` borrows the
//! rules and adds the import paths of the file currently being extracted.

use std::collections::HashSet;

use regex::Regex;

use crate::config::ExclusionConfig;
use crate::core::log::Logger;

/// Blank forms that are never translatable.
pub const BLANKS: &[&str] = &["", " ", "\t", "\n", "\r"];

#[derive(Debug, Default)]
pub struct ExclusionRules {
    exact: HashSet<String>,
    regexps: Vec<Regex>,
}

impl ExclusionRules {
    /// Build rules from a config. Patterns that fail to compile are logged
    /// and dropped; the remaining ones still apply, in load order.
    pub fn from_config(config: &ExclusionConfig, log: &Logger) -> Self {
        let exact = config.excluded_strings.iter().cloned().collect();
        let regexps = config
            .excluded_regexps
            .iter()
            .filter_map(|pattern| match Regex::new(pattern) {
                Ok(re) => Some(re),
                Err(e) => {
                    log.warn(format!("Invalid exclude regexp '{}': {}", pattern, e));
                    None
                }
            })
            .collect();
        Self { exact, regexps }
    }

    pub fn exact_count(&self) -> usize {
        self.exact.len()
    }

    pub fn regexp_count(&self) -> usize {
        self.regexps.len()
    }

    /// Start a per-file view with the file's import paths excluded.
    pub fn for_file<I>(&self, imports: I) -> FileExclusions<'_>
    where
        I: IntoIterator<Item = String>,
    {
        FileExclusions {
            rules: self,
            imports: imports.into_iter().collect(),
        }
    }
}

pub struct FileExclusions<'a> {
    rules: &'a ExclusionRules,
    imports: HashSet<String>,
}

impl FileExclusions<'_> {
    pub fn import_count(&self) -> usize {
        self.imports.len()
    }

    pub fn excluded(&self, literal: &str) -> bool {
        BLANKS.contains(&literal)
            || self.rules.exact.contains(literal)
            || self.imports.contains(literal)
            || self.rules.regexps.iter().any(|re| re.is_match(literal))
    }
}
