//! Parser module: scan a directory of Go sources.

pub mod go;

use crate::error::{Error, Result};
use crate::model::{SourceTree, SOURCE_SUFFIX};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Every regular `*.go` file directly inside `dir`, sorted by name.
/// Subdirectories are not visited.
pub fn source_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let pattern = format!(
        "{}/*{}",
        glob::Pattern::escape(&dir.to_string_lossy()),
        SOURCE_SUFFIX
    );
    let entries = glob::glob(&pattern).map_err(|e| Error::Read {
        path: dir.to_path_buf(),
        source: std::io::Error::new(std::io::ErrorKind::InvalidInput, e.msg),
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| Error::Read {
            path: e.path().to_path_buf(),
            source: e.into_error(),
        })?;
        if !path.is_file() {
            continue;
        }
        // "./main.go" reads better as "main.go" in messages
        let path = match path.strip_prefix(".") {
            Ok(rest) => rest.to_path_buf(),
            Err(_) => path,
        };
        files.push(path);
    }
    files.sort();
    Ok(files)
}

/// Parse the package clause and doc comment of every Go file in `dir`.
/// The first malformed file aborts the scan.
pub fn parse_dir(dir: &Path) -> Result<SourceTree> {
    let mut tree = SourceTree::default();
    for path in source_files(dir)? {
        let content = fs::read_to_string(&path).map_err(|source| Error::Read {
            path: path.clone(),
            source,
        })?;
        let file = go::parse(&content, &path)?;
        debug!(
            path = %file.path.display(),
            package = %file.package,
            has_doc = file.doc.is_some(),
            "parsed source file"
        );
        tree.insert(file);
    }
    Ok(tree)
}
