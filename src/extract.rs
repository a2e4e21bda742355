//! Pull the reflowed documentation of the `main` package out of a directory.

use crate::error::{Error, Result};
use crate::model::{DocumentText, SourceTree, ENTRY_PACKAGE};
use crate::parser;
use crate::reflow;
use std::path::Path;
use tracing::debug;

/// Scan `dir` and return the reflowed doc text of its `main` package.
pub fn extract(dir: &Path) -> Result<DocumentText> {
    let tree = parser::parse_dir(dir)?;
    package_doc(&tree)
}

/// Concatenate the reflowed doc comments of every `main` file in file-name
/// order. Files without a doc comment contribute nothing.
pub fn package_doc(tree: &SourceTree) -> Result<DocumentText> {
    let files = tree.package(ENTRY_PACKAGE).ok_or_else(|| {
        debug!(
            packages = ?tree.package_names().collect::<Vec<_>>(),
            "no main package"
        );
        Error::PackageNotFound
    })?;

    let mut text = String::new();
    for file in files {
        if let Some(doc) = &file.doc {
            text.push_str(&reflow::to_text(doc));
        }
    }
    DocumentText::new(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn dir_with(files: &[(&str, &str)]) -> TempDir {
        let dir = TempDir::new().unwrap();
        for (name, content) in files {
            fs::write(dir.path().join(name), content).unwrap();
        }
        dir
    }

    #[test]
    fn single_file_doc() {
        let dir = dir_with(&[(
            "main.go",
            "// Command tool does X.\n//\n// It also does Y.\npackage main\n\nfunc main() {}\n",
        )]);
        let doc = extract(dir.path()).unwrap();
        assert_eq!(doc.as_str(), "Command tool does X.\n\nIt also does Y.\n");
    }

    #[test]
    fn docs_concatenate_in_file_order() {
        let dir = dir_with(&[
            ("b.go", "// Second.\npackage main\n"),
            ("a.go", "// First.\npackage main\n"),
            ("c.go", "package main\n"),
        ]);
        assert_eq!(extract(dir.path()).unwrap().as_str(), "First.\nSecond.\n");
    }

    #[test]
    fn other_packages_are_ignored() {
        let dir = dir_with(&[
            ("lib.go", "// Package lib is not the command.\npackage lib\n"),
            ("main.go", "// Command tool.\npackage main\n"),
        ]);
        assert_eq!(extract(dir.path()).unwrap().as_str(), "Command tool.\n");
    }

    #[test]
    fn missing_main_package() {
        let dir = dir_with(&[("lib.go", "// Package lib.\npackage lib\n")]);
        assert!(matches!(extract(dir.path()), Err(Error::PackageNotFound)));

        let empty = TempDir::new().unwrap();
        assert!(matches!(extract(empty.path()), Err(Error::PackageNotFound)));
    }

    #[test]
    fn main_package_without_docs() {
        let dir = dir_with(&[(
            "main.go",
            "// Detached comment.\n\npackage main\n",
        )]);
        assert!(matches!(extract(dir.path()), Err(Error::NoDocs)));
    }

    #[test]
    fn directive_only_comment_has_no_docs() {
        let dir = dir_with(&[("main.go", "//go:generate usagegen\npackage main\n")]);
        assert!(matches!(extract(dir.path()), Err(Error::NoDocs)));
    }

    #[test]
    fn parse_error_in_any_file_is_fatal() {
        let dir = dir_with(&[
            ("main.go", "// Command tool.\npackage main\n"),
            ("broken.go", "packge util\n"),
        ]);
        assert!(matches!(extract(dir.path()), Err(Error::Parse { .. })));
    }
}
