//! Stderr logging helpers.
//!
//! Info lines are only printed in verbose mode; warnings and errors always go
//! out. Colors follow `colored`'s global override, so `NO_COLOR` is honored.

use std::fmt::Display;

use colored::Colorize;

#[derive(Debug, Clone, Copy, Default)]
pub struct Logger {
    verbose: bool,
}

impl Logger {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    pub fn info(&self, msg: impl Display) {
        if self.verbose {
            eprintln!("{}", msg);
        }
    }

    pub fn note(&self, msg: impl Display) {
        if self.verbose {
            eprintln!("{} {}", "note:".dimmed(), msg);
        }
    }

    pub fn warn(&self, msg: impl Display) {
        eprintln!("{} {}", "warning:".bold().yellow(), msg);
    }

    pub fn error(&self, msg: impl Display) {
        eprintln!("{} {}", "error:".bold().red(), msg);
    }
}
