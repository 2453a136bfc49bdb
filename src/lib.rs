//! gostrings - translatable string extraction for Go sources
//!
//! Walks a Go source tree, collects every string literal that is not an
//! import path or an excluded string, and writes per-file extraction,
//! resource-seed and (optionally) gettext catalog artifacts.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer
//! - `config`: Exclusion config loading
//! - `core`: Parsing, filtering, extraction and artifact writing

pub mod cli;
pub mod config;
pub mod core;
