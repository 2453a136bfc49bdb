//! Output directory resolution.
//!
//! A Go build unit is the package in the source file's directory. The
//! import-match strategy mirrors the package's import path under the output
//! root; the package-match strategy uses the package name as one segment.

use std::{
    collections::BTreeSet,
    fs,
    path::{Component, Path, PathBuf},
};

use crate::core::{
    constraint::is_buildable,
    error::{ExtractError, Result},
    extract::visit_nodes,
    parser::{ParsedSource, is_hidden, parse_lenient},
};

const GO_MOD: &str = "go.mod";
const SOURCE_ROOT: &str = "src";
const PACKAGE_CLAUSE: &str = "package_clause";
const PACKAGE_IDENTIFIER: &str = "package_identifier";

/// How artifact directories are chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputStrategy {
    /// Output root joined with the package import path.
    MatchImport(PathBuf),
    /// Output root joined with the package name.
    MatchPackage(PathBuf),
    /// The output root itself.
    OutputDir(PathBuf),
    /// The directory containing the source file.
    SourceDir,
}

impl OutputStrategy {
    pub fn new(output_dir: Option<PathBuf>, match_import: bool, match_package: bool) -> Self {
        match output_dir {
            Some(dir) if match_import => Self::MatchImport(dir),
            Some(dir) if match_package => Self::MatchPackage(dir),
            Some(dir) => Self::OutputDir(dir),
            None => Self::SourceDir,
        }
    }

    /// Destination directory for the artifacts of `source` (absolute path).
    pub fn locate(&self, source: &Path) -> Result<PathBuf> {
        let dir = source_dir(source)?;
        match self {
            Self::MatchImport(root) => {
                let import_path = import_path(dir)?;
                Ok(import_path.map_or_else(|| root.clone(), |p| root.join(p)))
            }
            Self::MatchPackage(root) => Ok(root.join(package_name(dir)?)),
            Self::OutputDir(root) => Ok(root.clone()),
            Self::SourceDir => Ok(dir.to_path_buf()),
        }
    }
}

fn source_dir(source: &Path) -> Result<&Path> {
    source
        .parent()
        .ok_or_else(|| ExtractError::PathResolutionFailure {
            path: source.to_path_buf(),
            message: "file has no parent directory".to_string(),
        })
}

/// Import path of the package in `dir`, relative to its module or GOPATH
/// source root. `None` if neither can be found.
pub fn import_path(dir: &Path) -> Result<Option<PathBuf>> {
    if let Some((module_root, module_path)) = find_module(dir)? {
        let mut path = PathBuf::from(module_path);
        if let Ok(rel) = dir.strip_prefix(&module_root)
            && !rel.as_os_str().is_empty()
        {
            path.push(rel);
        }
        return Ok(Some(path));
    }
    Ok(strip_source_root(dir))
}

/// Everything after the last `src` component of `dir`.
fn strip_source_root(dir: &Path) -> Option<PathBuf> {
    let components: Vec<Component<'_>> = dir.components().collect();
    let idx = components
        .iter()
        .rposition(|c| c.as_os_str() == SOURCE_ROOT)?;
    let rest: PathBuf = components[idx + 1..].iter().collect();
    if rest.as_os_str().is_empty() {
        None
    } else {
        Some(rest)
    }
}

/// Nearest enclosing `go.mod`: its directory and declared module path.
fn find_module(dir: &Path) -> Result<Option<(PathBuf, String)>> {
    for ancestor in dir.ancestors() {
        let go_mod = ancestor.join(GO_MOD);
        if !go_mod.is_file() {
            continue;
        }
        let content =
            fs::read_to_string(&go_mod).map_err(|e| ExtractError::PathResolutionFailure {
                path: go_mod.clone(),
                message: e.to_string(),
            })?;
        let module_path =
            parse_module_path(&content).ok_or_else(|| ExtractError::PathResolutionFailure {
                path: go_mod.clone(),
                message: "no module directive".to_string(),
            })?;
        return Ok(Some((ancestor.to_path_buf(), module_path)));
    }
    Ok(None)
}

fn parse_module_path(go_mod: &str) -> Option<String> {
    go_mod.lines().find_map(|line| {
        let rest = line.trim().strip_prefix("module")?;
        if !rest.starts_with(char::is_whitespace) {
            return None;
        }
        let path = rest.split("//").next()?.trim().trim_matches('"');
        (!path.is_empty()).then(|| path.to_string())
    })
}

/// Name of the Go package in `dir`.
///
/// Only each file's package clause and build constraints are read, so a
/// syntax error later in a sibling file does not matter. Hidden files,
/// unreadable files and files excluded by build constraints are ignored.
/// Test files only decide the name when the directory has no other Go
/// files; an external test package (`foo_test`) counts as `foo`. Fails if
/// no name is found or the files disagree.
pub fn package_name(dir: &Path) -> Result<String> {
    let fail = |message: String| ExtractError::PathResolutionFailure {
        path: dir.to_path_buf(),
        message,
    };

    let entries = fs::read_dir(dir).map_err(|e| fail(e.to_string()))?;
    let mut paths: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| is_go_source(path) && !is_hidden(path))
        .collect();
    paths.sort();

    let mut names = BTreeSet::new();
    let mut test_names = BTreeSet::new();
    for path in &paths {
        let Some(name) = buildable_package(path) else {
            continue;
        };
        if is_test_file(path) {
            let name = name.strip_suffix("_test").unwrap_or(&name).to_string();
            test_names.insert(name);
        } else {
            names.insert(name);
        }
    }
    if names.is_empty() {
        names = test_names;
    }

    let mut names = names.into_iter();
    match (names.next(), names.next()) {
        (Some(name), None) => Ok(name),
        (None, _) => Err(fail("no buildable Go source files".to_string())),
        (Some(a), Some(b)) => Err(fail(format!("found packages {} and {}", a, b))),
    }
}

fn is_go_source(path: &Path) -> bool {
    path.is_file() && path.extension().is_some_and(|e| e == "go")
}

fn is_test_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.ends_with("_test.go"))
}

/// Package name of a file that takes part in the build.
fn buildable_package(path: &Path) -> Option<String> {
    let source = fs::read_to_string(path).ok()?;
    let parsed = parse_lenient(path, source).ok()?;
    let (name, clause_start) = package_clause(&parsed)?;
    let file_name = path.file_name()?.to_str()?;
    is_buildable(file_name, &parsed.source[..clause_start]).then_some(name)
}

/// The package name and the byte offset where its clause starts.
fn package_clause(parsed: &ParsedSource) -> Option<(String, usize)> {
    let mut found = None;
    visit_nodes(parsed.root(), &mut |node| {
        if found.is_some() {
            return false;
        }
        if node.kind() != PACKAGE_CLAUSE {
            return true;
        }
        let mut cursor = node.walk();
        found = node
            .named_children(&mut cursor)
            .find(|n| n.kind() == PACKAGE_IDENTIFIER)
            .map(|ident| parsed.text(&ident).to_string())
            .filter(|name| !name.is_empty())
            .map(|name| (name, node.start_byte()));
        false
    });
    found
}
