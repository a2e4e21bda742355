//! Go package clause scanner.
//!
//! Reads only as much of a `.go` file as needed to learn two things: the
//! package name from the `package` clause, and the doc comment attached to
//! that clause. Everything after the package name is ignored.
//!
//! Comment grouping follows gofmt's notion of a comment group: comments on
//! consecutive lines belong together, a blank line starts a new group, and
//! the doc comment is the group ending on the line directly above `package`.

use crate::error::{Error, Result};
use crate::model::SourceFile;
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

// "//go:generate", "//nolint:all" and friends. Checked after the leading
// "//" has been removed and only when no space follows it.
static RE_DIRECTIVE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9]+:[a-z0-9]").unwrap());

const DIRECTIVE_PREFIXES: &[&str] = &["line ", "extern ", "export "];

const KEYWORDS: &[&str] = &[
    "break",
    "case",
    "chan",
    "const",
    "continue",
    "default",
    "defer",
    "else",
    "fallthrough",
    "for",
    "func",
    "go",
    "goto",
    "if",
    "import",
    "interface",
    "map",
    "package",
    "range",
    "return",
    "select",
    "struct",
    "switch",
    "type",
    "var",
];

/// A raw comment, markers included, with the lines it spans.
#[derive(Debug)]
struct Comment<'a> {
    text: &'a str,
    start_line: usize,
    end_line: usize,
}

/// Byte-oriented cursor tracking 1-based line and column.
struct Scanner<'a> {
    src: &'a str,
    pos: usize,
    line: usize,
    line_start: usize,
}

impl<'a> Scanner<'a> {
    fn new(src: &'a str) -> Self {
        let pos = if src.starts_with('\u{feff}') { '\u{feff}'.len_utf8() } else { 0 };
        Scanner {
            src,
            pos,
            line: 1,
            line_start: 0,
        }
    }

    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn column(&self) -> usize {
        self.pos - self.line_start + 1
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        if c == '\n' {
            self.line += 1;
            self.line_start = self.pos;
        }
        Some(c)
    }

    fn advance(&mut self, bytes: usize) {
        let end = self.pos + bytes;
        while self.pos < end {
            self.bump();
        }
    }

    /// Skip spaces, tabs and carriage returns; newlines too when `newlines`.
    fn skip_space(&mut self, newlines: bool) {
        while let Some(c) = self.peek() {
            match c {
                ' ' | '\t' | '\r' => {}
                '\n' if newlines => {}
                _ => break,
            }
            self.bump();
        }
    }

    /// Consume one comment at the cursor. `Ok(None)` if there is none.
    fn comment(&mut self, path: &Path) -> Result<Option<Comment<'a>>> {
        let rest = self.rest();
        let start_line = self.line;
        let len = if rest.starts_with("//") {
            rest.find('\n').unwrap_or(rest.len())
        } else if rest.starts_with("/*") {
            match rest[2..].find("*/") {
                Some(end) => end + 4,
                None => return Err(self.error(path, "comment not terminated")),
            }
        } else {
            return Ok(None);
        };
        self.advance(len);
        Ok(Some(Comment {
            text: &rest[..len],
            start_line,
            end_line: self.line,
        }))
    }

    /// Identifier or keyword at the cursor, without consuming it.
    fn peek_word(&self) -> Option<&'a str> {
        let rest = self.rest();
        let mut chars = rest.char_indices();
        match chars.next() {
            Some((_, c)) if c == '_' || c.is_alphabetic() => {}
            _ => return None,
        }
        let len = chars
            .find(|&(_, c)| !(c == '_' || c.is_alphanumeric()))
            .map(|(i, _)| i)
            .unwrap_or(rest.len());
        Some(&rest[..len])
    }

    /// Describe the token at the cursor for an error message.
    fn describe_token(&self) -> String {
        if let Some(word) = self.peek_word() {
            if KEYWORDS.contains(&word) {
                return format!("'{}'", word);
            }
            return format!("'IDENT' {}", word);
        }
        let Some(c) = self.peek() else {
            return "'EOF'".to_string();
        };
        if c == '\n' {
            return "newline".to_string();
        }
        format!("'{}'", c)
    }

    fn error(&self, path: &Path, message: impl Into<String>) -> Error {
        Error::Parse {
            path: path.to_path_buf(),
            line: self.line,
            column: self.column(),
            message: message.into(),
        }
    }
}

/// Parse the package clause of a Go source file.
pub fn parse(input: &str, path: &Path) -> Result<SourceFile> {
    let mut sc = Scanner::new(input);

    // Phase 1: comments ahead of the package keyword
    let mut comments = Vec::new();
    loop {
        sc.skip_space(true);
        match sc.comment(path)? {
            Some(c) => comments.push(c),
            None => break,
        }
    }

    let package_line = sc.line;
    if sc.peek_word() != Some("package") {
        let found = sc.describe_token();
        return Err(sc.error(path, format!("expected 'package', found {}", found)));
    }
    sc.advance("package".len());

    // Phase 2: package name, comments allowed in between
    loop {
        sc.skip_space(true);
        if sc.comment(path)?.is_none() {
            break;
        }
    }
    let package = match sc.peek_word() {
        Some(name) if !KEYWORDS.contains(&name) => {
            sc.advance(name.len());
            name.to_string()
        }
        _ => {
            let found = sc.describe_token();
            return Err(sc.error(path, format!("expected 'IDENT', found {}", found)));
        }
    };
    expect_statement_end(&mut sc, path)?;

    let doc = lead_comment_group(&comments, package_line).map(comment_text);
    Ok(SourceFile {
        path: path.to_path_buf(),
        package,
        doc,
    })
}

/// The package name must end its statement: newline, `;`, EOF, or a
/// comment that runs to the end of the line.
fn expect_statement_end(sc: &mut Scanner<'_>, path: &Path) -> Result<()> {
    loop {
        sc.skip_space(false);
        let line = sc.line;
        match sc.peek() {
            None | Some('\n' | ';' | ')' | '}') => return Ok(()),
            Some('/') if sc.rest().starts_with("//") => return Ok(()),
            Some('/') if sc.rest().starts_with("/*") => {
                sc.comment(path)?;
                if sc.line != line {
                    return Ok(());
                }
            }
            Some(_) => {
                let found = sc.describe_token();
                return Err(sc.error(path, format!("expected ';', found {}", found)));
            }
        }
    }
}

/// Return the last comment group if it ends on the line right above the
/// package keyword.
fn lead_comment_group<'c, 'a>(
    comments: &'c [Comment<'a>],
    package_line: usize,
) -> Option<&'c [Comment<'a>]> {
    let last = comments.last()?;
    if last.end_line + 1 != package_line {
        return None;
    }
    let mut start = comments.len() - 1;
    while start > 0 && comments[start].start_line <= comments[start - 1].end_line + 1 {
        start -= 1;
    }
    Some(&comments[start..])
}

fn is_directive(text: &str) -> bool {
    DIRECTIVE_PREFIXES.iter().any(|p| text.starts_with(p)) || RE_DIRECTIVE.is_match(text)
}

/// Text of a comment group with comment markers removed.
///
/// Directives are dropped, trailing whitespace is trimmed, leading blank
/// lines are removed and runs of blank lines collapse to one. Non-empty
/// results end with a single newline.
fn comment_text(group: &[Comment<'_>]) -> String {
    let mut lines: Vec<String> = Vec::new();
    for comment in group {
        let raw = comment.text.replace('\r', "");
        let body = if let Some(line) = raw.strip_prefix("//") {
            match line.strip_prefix(' ') {
                Some(spaced) => spaced,
                None if is_directive(line) => continue,
                None => line,
            }
        } else {
            &raw[2..raw.len() - 2]
        };
        for line in body.split('\n') {
            lines.push(line.trim_end_matches([' ', '\t', '\n', '\r']).to_string());
        }
    }

    let mut kept: Vec<String> = Vec::with_capacity(lines.len());
    for line in lines {
        let prev_blank = kept.last().map_or(true, |l| l.is_empty());
        if !line.is_empty() || !prev_blank {
            kept.push(line);
        }
    }
    if kept.last().is_some_and(|l| !l.is_empty()) {
        kept.push(String::new());
    }
    kept.join("\n")
}
