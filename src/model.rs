//! Data model shared by the extractor and the renderer.

use crate::error::{Error, Result};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// Package name recognized as the program entry point.
pub const ENTRY_PACKAGE: &str = "main";

/// Suffix every Go source file carries.
pub const SOURCE_SUFFIX: &str = ".go";

/// Output file written when `-f` is not given.
pub const DEFAULT_OUTPUT: &str = "usage_generated.go";

/// A single scanned Go file: its package clause and package doc comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: PathBuf,
    pub package: String,
    /// Comment text with markers and directives stripped; `None` when the
    /// package clause has no doc comment attached.
    pub doc: Option<String>,
}

/// Scanned files grouped by the package they declare, in file-name order.
#[derive(Debug, Default)]
pub struct SourceTree {
    packages: BTreeMap<String, Vec<SourceFile>>,
}

impl SourceTree {
    pub fn insert(&mut self, file: SourceFile) {
        self.packages
            .entry(file.package.clone())
            .or_default()
            .push(file);
    }

    /// Files of the named package, if any file declares it.
    pub fn package(&self, name: &str) -> Option<&[SourceFile]> {
        self.packages.get(name).map(Vec::as_slice)
    }

    pub fn package_names(&self) -> impl Iterator<Item = &str> {
        self.packages.keys().map(String::as_str)
    }
}

/// Reflowed documentation of the entry-point package. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentText(String);

impl DocumentText {
    pub fn new(text: String) -> Result<Self> {
        if text.is_empty() {
            return Err(Error::NoDocs);
        }
        Ok(Self(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Which template the generated file is rendered through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// A package-level `usage` constant only.
    Plain,
    /// An `init` function that installs `flag.Usage`.
    AutoHelp,
}

impl From<bool> for RenderMode {
    fn from(auto_help: bool) -> Self {
        if auto_help {
            RenderMode::AutoHelp
        } else {
            RenderMode::Plain
        }
    }
}

/// Validated destination of the generated file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPath(PathBuf);

impl OutputPath {
    pub fn parse(raw: &str) -> Result<Self> {
        if raw.is_empty() {
            return Err(Error::MissingFileName);
        }
        if !raw.ends_with(SOURCE_SUFFIX) {
            return Err(Error::WrongSuffix);
        }
        Ok(Self(PathBuf::from(raw)))
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_output_path_is_rejected() {
        assert!(matches!(OutputPath::parse(""), Err(Error::MissingFileName)));
    }

    #[test]
    fn output_path_needs_go_suffix() {
        assert!(matches!(OutputPath::parse("foo.txt"), Err(Error::WrongSuffix)));
        assert!(matches!(OutputPath::parse("usage.go.bak"), Err(Error::WrongSuffix)));
    }

    #[test]
    fn default_output_path_is_accepted() {
        let path = OutputPath::parse(DEFAULT_OUTPUT).unwrap();
        assert_eq!(path.as_path(), Path::new("usage_generated.go"));
        assert!(OutputPath::parse("cmd/tool/help.go").is_ok());
    }

    #[test]
    fn empty_document_is_rejected() {
        assert!(matches!(DocumentText::new(String::new()), Err(Error::NoDocs)));
        assert_eq!(DocumentText::new("x\n".into()).unwrap().as_str(), "x\n");
    }

    #[test]
    fn render_mode_from_flag() {
        assert_eq!(RenderMode::from(false), RenderMode::Plain);
        assert_eq!(RenderMode::from(true), RenderMode::AutoHelp);
    }

    #[test]
    fn tree_groups_by_package_in_insertion_order() {
        let mut tree = SourceTree::default();
        for (name, pkg) in [("a.go", "main"), ("b.go", "other"), ("c.go", "main")] {
            tree.insert(SourceFile {
                path: PathBuf::from(name),
                package: pkg.to_string(),
                doc: None,
            });
        }
        let main: Vec<_> = tree
            .package("main")
            .unwrap()
            .iter()
            .map(|f| f.path.to_string_lossy().to_string())
            .collect();
        assert_eq!(main, ["a.go", "c.go"]);
        assert_eq!(tree.package_names().collect::<Vec<_>>(), ["main", "other"]);
        assert!(tree.package("lib").is_none());
    }
}
