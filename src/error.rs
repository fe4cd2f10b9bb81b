//! Error types for a scan.
//!
//! A scan either produces a complete result or fails with one of these.
//! Nothing here is retried: every failure is local and deterministic.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a scan.
#[derive(Error, Debug)]
pub enum ScanError {
    /// The path could not be mapped to a Go import path.
    #[error("cannot resolve package path for {}: {reason}", path.display())]
    Resolution { path: PathBuf, reason: String },

    /// A compilation unit is not syntactically valid Go.
    #[error("{}:{line}:{column}: {message}", path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        column: usize,
        message: String,
    },

    #[error("reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ScanError {
    pub fn resolution(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        ScanError::Resolution {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ScanError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, ScanError>;
