//! Literal extraction from a parsed Go file.
//!
//! The walk is uniform over the whole tree: every string literal token is a
//! candidate regardless of the syntax it sits in. Results are keyed by the
//! unescaped value, so a repeated literal keeps the position of its last
//! occurrence in traversal order.

use std::collections::HashMap;

use serde::Serialize;
use tree_sitter::Node;

use crate::core::{
    exclusion::FileExclusions,
    parser::ParsedSource,
    unquote::{raw_body, unquote},
};

const INTERPRETED_STRING: &str = "interpreted_string_literal";
const RAW_STRING: &str = "raw_string_literal";
const IMPORT_SPEC: &str = "import_spec";

/// Raw token bodies rejected before unescaping.
const RAW_WHITESPACE: &[&str] = &[" ", "\t", "\n"];

/// A translatable literal and where it was last seen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct LiteralRecord {
    pub value: String,
    pub filename: String,
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

/// Literal value → record, for one file.
pub type ExtractionResult = HashMap<String, LiteralRecord>;

fn is_string_literal(kind: &str) -> bool {
    kind == INTERPRETED_STRING || kind == RAW_STRING
}

/// Unquoted import paths declared in the file.
pub fn import_paths(parsed: &ParsedSource) -> Vec<String> {
    let mut paths = Vec::new();
    visit_nodes(parsed.root(), &mut |node| {
        if node.kind() != IMPORT_SPEC {
            return true;
        }
        if let Some(path) = node.child_by_field_name("path")
            && let Some(value) = unquote(parsed.text(&path))
        {
            paths.push(value);
        }
        false
    });
    paths
}

/// Collect every accepted string literal in the file.
pub fn extract_literals(
    parsed: &ParsedSource,
    exclusions: &FileExclusions<'_>,
) -> ExtractionResult {
    let mut result = ExtractionResult::new();
    visit_nodes(parsed.root(), &mut |node| {
        if !is_string_literal(node.kind()) {
            return true;
        }
        let token = parsed.text(&node);
        if let Some(value) = accept(token, exclusions) {
            let pos = parsed.position(node.start_byte());
            result.insert(
                value.clone(),
                LiteralRecord {
                    value,
                    filename: pos.filename,
                    offset: pos.offset,
                    line: pos.line,
                    column: pos.column,
                },
            );
        }
        false
    });
    result
}

/// Unescaped value of a literal token, or `None` if it is not translatable.
fn accept(token: &str, exclusions: &FileExclusions<'_>) -> Option<String> {
    let value = unquote(token)?;
    if value.is_empty() {
        return None;
    }
    if raw_body(token).is_some_and(|body| RAW_WHITESPACE.contains(&body)) {
        return None;
    }
    if exclusions.excluded(&value) {
        return None;
    }
    Some(value)
}

/// Pre-order walk. The callback returns whether to descend into the node.
pub(crate) fn visit_nodes<'t>(root: Node<'t>, f: &mut impl FnMut(Node<'t>) -> bool) {
    let mut cursor = root.walk();
    loop {
        let descend = f(cursor.node());
        if descend && cursor.goto_first_child() {
            continue;
        }
        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                return;
            }
        }
    }
}
