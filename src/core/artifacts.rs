//! Artifact serialization.
//!
//! Each artifact kind implements [`ArtifactWriter`]: it names its file after
//! the source file and renders the ordered record list. [`ArtifactSink`]
//! decides which artifacts are written and where.

use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use enum_dispatch::enum_dispatch;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::core::{
    error::{ExtractError, Result},
    extract::{ExtractionResult, LiteralRecord},
};

pub const EXTRACTED_SUFFIX: &str = ".extracted.json";
pub const SOURCE_LOCALE: &str = "en";
const JSON_INDENT: &[u8] = b"   ";

#[enum_dispatch]
pub trait ArtifactWriter {
    /// File name of this artifact for a source file's base name.
    fn file_name(&self, base_name: &str) -> String;

    /// Serialized artifact content.
    fn render(&self, records: &[LiteralRecord]) -> io::Result<Vec<u8>>;
}

/// Extraction metadata: every record with its provenance.
#[derive(Debug, Clone, Copy)]
pub struct ExtractedStrings;

/// Locale resource seed: `{id, translation}` pairs in the source locale.
#[derive(Debug, Clone, Copy)]
pub struct ResourceSeed;

/// Gettext catalog in the source locale.
#[derive(Debug, Clone, Copy)]
pub struct PoCatalog;

#[enum_dispatch(ArtifactWriter)]
#[derive(Debug, Clone, Copy)]
pub enum Artifact {
    ExtractedStrings(ExtractedStrings),
    ResourceSeed(ResourceSeed),
    PoCatalog(PoCatalog),
}

impl ArtifactWriter for ExtractedStrings {
    fn file_name(&self, base_name: &str) -> String {
        format!("{}{}", base_name, EXTRACTED_SUFFIX)
    }

    fn render(&self, records: &[LiteralRecord]) -> io::Result<Vec<u8>> {
        to_indented_json(&records)
    }
}

#[derive(Serialize)]
struct SeedEntry<'a> {
    id: &'a str,
    translation: &'a str,
}

impl ArtifactWriter for ResourceSeed {
    fn file_name(&self, base_name: &str) -> String {
        format!("{}.{}.json", base_name, SOURCE_LOCALE)
    }

    fn render(&self, records: &[LiteralRecord]) -> io::Result<Vec<u8>> {
        let entries: Vec<SeedEntry<'_>> = records
            .iter()
            .map(|r| SeedEntry {
                id: &r.value,
                translation: &r.value,
            })
            .collect();
        to_indented_json(&entries)
    }
}

impl ArtifactWriter for PoCatalog {
    fn file_name(&self, base_name: &str) -> String {
        format!("{}.{}.po", base_name, SOURCE_LOCALE)
    }

    fn render(&self, records: &[LiteralRecord]) -> io::Result<Vec<u8>> {
        let mut w = Vec::new();
        writeln!(w, "msgid \"\"")?;
        writeln!(w, "msgstr \"\"")?;
        writeln!(w, "\"Language: {}\\n\"", SOURCE_LOCALE)?;
        writeln!(w, "\"MIME-Version: 1.0\\n\"")?;
        writeln!(w, "\"Content-Type: text/plain; charset=UTF-8\\n\"")?;
        writeln!(w, "\"Content-Transfer-Encoding: 8bit\\n\"")?;

        for record in records {
            writeln!(w)?;
            writeln!(w, "#: {}:{}", record.filename, record.line)?;
            writeln!(w, "msgid \"{}\"", escape_po(&record.value))?;
            writeln!(w, "msgstr \"{}\"", escape_po(&record.value))?;
        }
        Ok(w)
    }
}

fn escape_po(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 8);
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(ch),
        }
    }
    out
}

fn to_indented_json<T: Serialize + ?Sized>(value: &T) -> io::Result<Vec<u8>> {
    let mut buf = Vec::new();
    let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(JSON_INDENT));
    value.serialize(&mut ser).map_err(io::Error::other)?;
    Ok(buf)
}

/// Source base name with any extraction suffix removed.
pub fn normalized_file_name(source: &Path) -> String {
    let name = source
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    match name.strip_suffix(EXTRACTED_SUFFIX) {
        Some(stripped) => stripped.to_string(),
        None => name,
    }
}

/// Records in source order with file names normalized to the base name.
pub fn ordered_records(result: &ExtractionResult, source: &Path) -> Vec<LiteralRecord> {
    let filename = normalized_file_name(source);
    let mut records: Vec<LiteralRecord> = result
        .values()
        .map(|r| LiteralRecord {
            filename: filename.clone(),
            ..r.clone()
        })
        .collect();
    records.sort_by(|a, b| a.offset.cmp(&b.offset).then_with(|| a.value.cmp(&b.value)));
    records
}

/// Writes the artifacts of one source file.
pub struct ArtifactSink {
    dry_run: bool,
    emit_catalog: bool,
}

impl ArtifactSink {
    pub fn new(dry_run: bool, emit_catalog: bool) -> Self {
        Self {
            dry_run,
            emit_catalog,
        }
    }

    fn artifacts(&self) -> Vec<Artifact> {
        let mut artifacts: Vec<Artifact> = vec![ExtractedStrings.into(), ResourceSeed.into()];
        if self.emit_catalog {
            artifacts.push(PoCatalog.into());
        }
        artifacts
    }

    /// Write every artifact for `source` into `dest`.
    ///
    /// Returns the written paths. Nothing is written for an empty result or
    /// in dry-run mode; the destination directory is still created unless
    /// running dry.
    pub fn write(
        &self,
        result: &ExtractionResult,
        source: &Path,
        dest: &Path,
    ) -> Result<Vec<PathBuf>> {
        if !self.dry_run {
            fs::create_dir_all(dest).map_err(|source| ExtractError::WriteFailure {
                path: dest.to_path_buf(),
                source,
            })?;
        }

        let records = ordered_records(result, source);
        let base_name = normalized_file_name(source);
        let mut written = Vec::new();

        for artifact in self.artifacts() {
            let path = dest.join(artifact.file_name(&base_name));
            let content = artifact
                .render(&records)
                .map_err(|source| ExtractError::WriteFailure {
                    path: path.clone(),
                    source,
                })?;
            if self.dry_run || records.is_empty() {
                continue;
            }
            fs::write(&path, content).map_err(|source| ExtractError::WriteFailure {
                path: path.clone(),
                source,
            })?;
            written.push(path);
        }

        Ok(written)
    }
}
