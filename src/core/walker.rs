//! Source tree traversal.
//!
//! Depth-first and single-threaded. Each file runs the full pipeline
//! (parse, exclusions, extraction, output location, artifacts) in isolation;
//! a failure is logged at the file boundary and the walk continues.
//! Directory calls return a [`Tally`] covering their whole subtree.

use std::{
    ops::AddAssign,
    path::{Path, PathBuf},
};

use anyhow::{Result, bail};
use walkdir::WalkDir;

use crate::{
    config::ExclusionConfig,
    core::{
        artifacts::ArtifactSink,
        context::ExtractOptions,
        error::ExtractError,
        exclusion::ExclusionRules,
        extract::{extract_literals, import_paths},
        log::Logger,
        parser::{is_hidden, parse_file},
    },
};

const SOURCE_SUFFIX: &str = ".go";

/// Counts accumulated over files and directories.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    /// Files extracted successfully.
    pub files: usize,
    /// Literals extracted from those files.
    pub literals: usize,
    /// Hidden files and files matching the ignore pattern.
    pub skipped: usize,
    /// Files whose processing failed.
    pub failed: usize,
}

impl AddAssign for Tally {
    fn add_assign(&mut self, other: Self) {
        self.files += other.files;
        self.literals += other.literals;
        self.skipped += other.skipped;
        self.failed += other.failed;
    }
}

/// Result of processing one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    Extracted {
        literals: usize,
        written: Vec<PathBuf>,
    },
    Skipped,
}

pub struct Extractor<'a> {
    options: &'a ExtractOptions,
    log: Logger,
    sink: ArtifactSink,
}

impl<'a> Extractor<'a> {
    pub fn new(options: &'a ExtractOptions) -> Self {
        Self {
            options,
            log: Logger::new(options.verbose),
            sink: ArtifactSink::new(options.dry_run, options.emit_catalog),
        }
    }

    /// Extract one file and write its artifacts.
    pub fn inspect_file(&self, path: &Path) -> Result<FileOutcome, ExtractError> {
        let path = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
        self.log.info(format!("Extracting strings from file: {}", path.display()));
        if self.options.dry_run {
            self.log.note("running in dry-run mode, no files will be written");
        }

        if is_hidden(&path) {
            self.log.warn(format!("Ignoring hidden file: {}", path.display()));
            return Ok(FileOutcome::Skipped);
        }

        let parsed = parse_file(&path)?;

        let loaded = ExclusionConfig::load(&self.options.exclude_file)?;
        if !loaded.from_file {
            self.log.note(format!(
                "Could not find {}, no strings excluded",
                self.options.exclude_file.display()
            ));
        }
        let rules = ExclusionRules::from_config(&loaded.config, &self.log);
        self.log
            .info(format!("Loaded {} excluded strings", rules.exact_count()));
        self.log
            .info(format!("Loaded {} excluded regexps", rules.regexp_count()));

        let exclusions = rules.for_file(import_paths(&parsed));
        self.log.info(format!(
            "Excluding {} import paths",
            exclusions.import_count()
        ));
        let result = extract_literals(&parsed, &exclusions);
        self.log.info(format!(
            "Extracted {} strings from file: {}",
            result.len(),
            path.display()
        ));

        let dest = self.options.output.locate(&path)?;
        let written = self.sink.write(&result, &path, &dest)?;
        for file in &written {
            self.log.info(format!("Saved {}", file.display()));
        }

        Ok(FileOutcome::Extracted {
            literals: result.len(),
            written,
        })
    }

    /// Extract a single file, converting the outcome into a tally.
    pub fn process_file(&self, path: &Path) -> Tally {
        match self.inspect_file(path) {
            Ok(FileOutcome::Extracted { literals, .. }) => Tally {
                files: 1,
                literals,
                ..Default::default()
            },
            Ok(FileOutcome::Skipped) => Tally {
                skipped: 1,
                ..Default::default()
            },
            Err(err) => {
                self.log.error(format!("{} [{}]", err, err.kind()));
                Tally {
                    failed: 1,
                    ..Default::default()
                }
            }
        }
    }

    /// Extract every Go file in `dir`, and in its subdirectories if
    /// `recursive`. Only a failure to list `dir` itself is an error.
    pub fn inspect_directory(&self, dir: &Path, recursive: bool) -> Result<Tally> {
        self.log.info(format!(
            "Inspecting dir {}, recursive: {}",
            dir.display(),
            recursive
        ));

        let listing = self.list_dir(dir)?;
        let mut level = Tally::default();

        for file in &listing.files {
            if self.is_ignored(file) {
                self.log.info(format!("Skipping ignored file: {}", file.display()));
                level.skipped += 1;
                continue;
            }
            level += self.process_file(file);
        }
        self.log.info(format!(
            "Extracted {} strings in {}",
            level.literals,
            dir.display()
        ));

        let mut total = level;
        if recursive {
            for sub in &listing.dirs {
                match self.inspect_directory(sub, recursive) {
                    Ok(tally) => total += tally,
                    Err(err) => self.log.error(err),
                }
            }
            self.log.info(format!(
                "Extracted total of {} strings under {}",
                total.literals,
                dir.display()
            ));
        }

        Ok(total)
    }

    fn is_ignored(&self, file: &Path) -> bool {
        let Some(re) = &self.options.ignore_regexp else {
            return false;
        };
        re.is_match(&file.to_string_lossy())
    }

    fn list_dir(&self, dir: &Path) -> Result<Listing> {
        if !dir.is_dir() {
            bail!("Not a directory: {}", dir.display());
        }

        let mut listing = Listing::default();
        let entries = WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name();
        for entry in entries {
            let entry = match entry {
                Ok(e) => e,
                Err(e) if e.depth() == 0 => {
                    bail!("Cannot read directory {}: {}", dir.display(), e)
                }
                Err(e) => {
                    self.log.warn(format!("Cannot access path: {}", e));
                    continue;
                }
            };
            let path = entry.path();
            let name = entry.file_name().to_string_lossy();

            if entry.file_type().is_dir() {
                if !name.starts_with('.') {
                    listing.dirs.push(path.to_path_buf());
                }
            } else if name.ends_with(SOURCE_SUFFIX) && path.is_file() {
                listing.files.push(path.to_path_buf());
            }
        }
        Ok(listing)
    }
}

#[derive(Debug, Default)]
struct Listing {
    files: Vec<PathBuf>,
    dirs: Vec<PathBuf>,
}
