//! Summary printing.
//!
//! Kept apart from the walker so gostrings can be used as a library.

use std::io::{self, Write};

use colored::Colorize;

use crate::core::Tally;

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Print the extraction summary to stdout.
pub fn print_summary(tally: &Tally, dry_run: bool) {
    print_summary_to(tally, dry_run, &mut io::stdout().lock());
}

/// Print the extraction summary to a custom writer.
pub fn print_summary_to<W: Write>(tally: &Tally, dry_run: bool, writer: &mut W) {
    let extracted = format!(
        "Extracted {} {} from {} {}",
        tally.literals,
        plural(tally.literals, "string", "strings"),
        tally.files,
        plural(tally.files, "file", "files"),
    );
    let mut details = Vec::new();
    if tally.skipped > 0 {
        details.push(format!("{} skipped", tally.skipped));
    }
    if dry_run {
        details.push("dry run".to_string());
    }
    let extracted = if details.is_empty() {
        extracted
    } else {
        format!("{} ({})", extracted, details.join(", "))
    };

    let msg = if tally.failed == 0 {
        format!("{} {}", SUCCESS_MARK.green(), extracted.green())
    } else {
        format!(
            "{} {}, {}",
            FAILURE_MARK.red(),
            extracted,
            format!("{} file(s) failed", tally.failed).red()
        )
    };
    let _ = writeln!(writer, "{}", msg);
}

fn plural<'a>(n: usize, one: &'a str, many: &'a str) -> &'a str {
    if n == 1 { one } else { many }
}
