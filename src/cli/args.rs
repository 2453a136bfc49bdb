//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `extract`: Extract translatable strings from a Go file or source tree
//! - `init`: Write a default exclusion config file

use std::path::PathBuf;

use clap::{ArgGroup, Args, CommandFactory, Parser, Subcommand};

use crate::config::EXCLUSION_FILE_NAME;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }
}

/// Common arguments shared by all commands.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Parser)]
#[command(group(
    ArgGroup::new("input")
        .required(true)
        .args(["file", "dir"]),
))]
pub struct ExtractArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Go source file to extract strings from
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Directory of Go source files to extract strings from
    #[arg(short, long)]
    pub dir: Option<PathBuf>,

    /// Also extract from subdirectories (hidden ones are skipped)
    #[arg(short, long, requires = "dir")]
    pub recursive: bool,

    /// Run the extraction without writing any files
    #[arg(long)]
    pub dry_run: bool,

    /// Root directory for generated files (default: next to each source file)
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Place generated files under the output dir by package import path
    #[arg(long, requires = "output_dir")]
    pub output_match_import: bool,

    /// Place generated files under the output dir by package name
    #[arg(long, requires = "output_dir")]
    pub output_match_package: bool,

    /// JSON file listing excluded strings and regexps
    #[arg(short, long, default_value = EXCLUSION_FILE_NAME)]
    pub exclude_file: PathBuf,

    /// Skip source files whose path (as traversed from --dir) matches this regexp
    #[arg(long)]
    pub ignore_regexp: Option<String>,

    /// Also write a gettext catalog for the source locale
    #[arg(long)]
    pub po: bool,
}

#[derive(Debug, Args)]
pub struct ExtractCommand {
    #[command(flatten)]
    pub args: ExtractArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract translatable string literals from Go sources
    Extract(ExtractCommand),
    /// Initialize a new excluded.json file
    Init,
}
