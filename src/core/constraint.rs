//! Go build constraints.
//!
//! A file belongs to the build unit of its directory only if its
//! `//go:build` line and its `_GOOS`/`_GOARCH` file name suffixes hold for
//! the host target. Tags are the host OS and architecture (in Go's
//! spelling), `unix` on Unix hosts, `gc`, and every `go1.N` release tag.

const KNOWN_OS: &[&str] = &[
    "aix", "android", "darwin", "dragonfly", "freebsd", "hurd", "illumos", "ios", "js", "linux",
    "nacl", "netbsd", "openbsd", "plan9", "solaris", "wasip1", "windows", "zos",
];

const KNOWN_ARCH: &[&str] = &[
    "386", "amd64", "amd64p32", "arm", "armbe", "arm64", "arm64be", "loong64", "mips", "mipsle",
    "mips64", "mips64le", "mips64p32", "mips64p32le", "ppc", "ppc64", "ppc64le", "riscv",
    "riscv64", "s390", "s390x", "sparc", "sparc64", "wasm",
];

const BUILD_PREFIX: &str = "//go:build";

fn host_os() -> &'static str {
    match std::env::consts::OS {
        "macos" => "darwin",
        other => other,
    }
}

fn host_arch() -> &'static str {
    match std::env::consts::ARCH {
        "x86_64" => "amd64",
        "x86" => "386",
        "aarch64" => "arm64",
        "powerpc64" => "ppc64",
        "loongarch64" => "loong64",
        other => other,
    }
}

fn has_tag(tag: &str) -> bool {
    tag == host_os()
        || tag == host_arch()
        || tag == "gc"
        || (tag == "unix" && cfg!(unix))
        || (tag == "darwin" && host_os() == "ios")
        || tag
            .strip_prefix("go1.")
            .is_some_and(|minor| !minor.is_empty() && minor.bytes().all(|b| b.is_ascii_digit()))
}

/// Whether a file with this name and header (the text before its package
/// clause) is part of the build.
pub fn is_buildable(file_name: &str, header: &str) -> bool {
    name_matches(file_name) && header_constraint(header).is_none_or(expr_holds)
}

/// The `//go:build` expression in a file header, if any.
pub fn header_constraint(header: &str) -> Option<&str> {
    header.lines().find_map(|line| {
        let rest = line.trim().strip_prefix(BUILD_PREFIX)?;
        rest.starts_with(char::is_whitespace).then(|| rest.trim())
    })
}

/// `_GOOS`, `_GOARCH` and `_GOOS_GOARCH` file name suffixes.
fn name_matches(file_name: &str) -> bool {
    let stem = file_name.strip_suffix(".go").unwrap_or(file_name);
    let stem = stem.strip_suffix("_test").unwrap_or(stem);
    let parts: Vec<&str> = stem.split('_').collect();
    // The first element is the base name and never a constraint.
    let parts = &parts[1.min(parts.len())..];

    match parts {
        [.., os, arch] if KNOWN_OS.contains(os) && KNOWN_ARCH.contains(arch) => {
            has_tag(os) && has_tag(arch)
        }
        [.., last] if KNOWN_OS.contains(last) || KNOWN_ARCH.contains(last) => has_tag(last),
        _ => true,
    }
}

/// Evaluate a constraint expression. Malformed expressions never hold.
pub fn expr_holds(expr: &str) -> bool {
    let tokens = tokenize(expr);
    let mut parser = ExprParser { tokens, pos: 0 };
    match parser.or() {
        Some(value) if parser.pos == parser.tokens.len() => value,
        _ => false,
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Token<'a> {
    Not,
    And,
    Or,
    Open,
    Close,
    Tag(&'a str),
    Invalid,
}

fn tokenize(expr: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut rest = expr.trim_start();
    while let Some(c) = rest.chars().next() {
        let (token, len) = match c {
            '!' => (Token::Not, 1),
            '(' => (Token::Open, 1),
            ')' => (Token::Close, 1),
            '&' if rest.starts_with("&&") => (Token::And, 2),
            '|' if rest.starts_with("||") => (Token::Or, 2),
            c if c.is_alphanumeric() || c == '_' || c == '.' => {
                let len = rest
                    .find(|c: char| !(c.is_alphanumeric() || c == '_' || c == '.'))
                    .unwrap_or(rest.len());
                (Token::Tag(&rest[..len]), len)
            }
            _ => (Token::Invalid, c.len_utf8()),
        };
        tokens.push(token);
        rest = rest[len..].trim_start();
    }
    tokens
}

struct ExprParser<'a> {
    tokens: Vec<Token<'a>>,
    pos: usize,
}

impl ExprParser<'_> {
    fn eat(&mut self, token: &Token<'_>) -> bool {
        if self.tokens.get(self.pos) == Some(token) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn or(&mut self) -> Option<bool> {
        let mut value = self.and()?;
        while self.eat(&Token::Or) {
            let rhs = self.and()?;
            value = value || rhs;
        }
        Some(value)
    }

    fn and(&mut self) -> Option<bool> {
        let mut value = self.not()?;
        while self.eat(&Token::And) {
            let rhs = self.not()?;
            value = value && rhs;
        }
        Some(value)
    }

    fn not(&mut self) -> Option<bool> {
        if self.eat(&Token::Not) {
            return self.not().map(|v| !v);
        }
        if self.eat(&Token::Open) {
            let value = self.or()?;
            return self.eat(&Token::Close).then_some(value);
        }
        match self.tokens.get(self.pos) {
            Some(&Token::Tag(tag)) => {
                self.pos += 1;
                Some(has_tag(tag))
            }
            _ => None,
        }
    }
}
