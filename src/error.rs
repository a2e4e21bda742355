//! Error types for usagegen.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Every way a usagegen run can fail.
#[derive(Debug, Error)]
pub enum Error {
    /// Output path flag is empty
    #[error("file name is not set")]
    MissingFileName,

    /// Output path does not name a Go source file
    #[error("file name must end with .go")]
    WrongSuffix,

    /// No file in the directory declares `package main`
    #[error("cannot find main package")]
    PackageNotFound,

    /// The main package has no doc comment text
    #[error("could not extract any docs")]
    NoDocs,

    /// Malformed package clause
    #[error("{}:{line}:{column}: {message}", path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        column: usize,
        message: String,
    },

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
