//! Go source parser (tree-sitter).
//!
//! Wraps the tree-sitter Go grammar and exposes position resolution as an
//! explicit capability of the parsed file, independent of the grammar's own
//! row/column bookkeeping.

use std::{
    fs,
    path::{Path, PathBuf},
};

use tree_sitter::{Node, Parser, Tree};

use crate::core::error::{ExtractError, Result};

/// Resolved location of a byte offset in a source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    pub filename: String,
    /// 0-based byte offset.
    pub offset: usize,
    /// 1-based line.
    pub line: usize,
    /// 1-based column, counted in bytes.
    pub column: usize,
}

pub struct ParsedSource {
    pub path: PathBuf,
    pub source: String,
    pub tree: Tree,
    line_index: Vec<usize>,
}

impl ParsedSource {
    pub fn root(&self) -> Node<'_> {
        self.tree.root_node()
    }

    /// Source text covered by a node.
    pub fn text(&self, node: &Node<'_>) -> &str {
        &self.source[node.byte_range()]
    }

    /// Resolve a byte offset to file/line/column.
    pub fn position(&self, offset: usize) -> Position {
        let line = offset_to_line(&self.line_index, offset);
        let line_start = self.line_index[line - 1];
        Position {
            filename: self.path.to_string_lossy().to_string(),
            offset,
            line,
            column: offset - line_start + 1,
        }
    }
}

/// Whether a path's base name marks it as hidden.
pub fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with('.'))
}

/// Read and parse a Go source file.
pub fn parse_file(path: &Path) -> Result<ParsedSource> {
    let source = fs::read_to_string(path).map_err(|e| ExtractError::ParseFailure {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    parse_source(path, source)
}

/// Parse Go source text. Any syntax error in the tree fails the parse.
pub fn parse_source(path: &Path, source: String) -> Result<ParsedSource> {
    let parsed = parse_lenient(path, source)?;
    if parsed.tree.root_node().has_error() {
        let (line, column) = first_error_location(parsed.tree.root_node())
            .map(|p| (p.row + 1, p.column + 1))
            .unwrap_or((1, 1));
        return Err(ExtractError::ParseFailure {
            path: path.to_path_buf(),
            message: format!("syntax error at {}:{}", line, column),
        });
    }
    Ok(parsed)
}

/// Parse Go source text, keeping trees that contain syntax errors.
///
/// Useful when only the file header matters: error recovery leaves a
/// well-formed `package_clause` intact even when a later declaration is
/// broken.
pub fn parse_lenient(path: &Path, source: String) -> Result<ParsedSource> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_go::LANGUAGE.into())
        .map_err(|e| ExtractError::ParseFailure {
            path: path.to_path_buf(),
            message: format!("Failed to load Go grammar: {:?}", e),
        })?;

    let tree = parser
        .parse(&source, None)
        .ok_or_else(|| ExtractError::ParseFailure {
            path: path.to_path_buf(),
            message: "parser returned no tree".to_string(),
        })?;

    let line_index = build_line_index(&source);
    Ok(ParsedSource {
        path: path.to_path_buf(),
        source,
        tree,
        line_index,
    })
}

fn first_error_location(root: Node<'_>) -> Option<tree_sitter::Point> {
    let mut cursor = root.walk();
    loop {
        let node = cursor.node();
        if node.is_error() || node.is_missing() {
            return Some(node.start_position());
        }
        // Descend only into subtrees that contain the error.
        if node.has_error() && cursor.goto_first_child() {
            continue;
        }
        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                return None;
            }
        }
    }
}

/// Byte offsets at which each line starts. Line 1 starts at offset 0.
fn build_line_index(content: &str) -> Vec<usize> {
    let mut offsets = vec![0];
    for (i, b) in content.bytes().enumerate() {
        if b == b'\n' {
            offsets.push(i + 1);
        }
    }
    offsets
}

/// 1-based line number for a byte offset.
fn offset_to_line(line_index: &[usize], offset: usize) -> usize {
    match line_index.binary_search(&offset) {
        Ok(line) => line + 1,
        Err(line) => line,
    }
}
