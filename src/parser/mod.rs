//! Go source parsing for struct discovery.
//!
//! This module provides:
//! - `SourceParser` trait: abstract producer of syntax trees
//! - `TreeSitterParser`: the tree-sitter implementation
//! - An owned syntax model (`tree`, `comments`) and a traversal
//!   interface over it (`visit`)

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Result, ScanError};

pub mod comments;
pub mod tree;
pub mod treesitter;
pub mod visit;

pub use comments::{Comment, CommentGroup};
pub use tree::{Decl, Package, SourceFile, Span, StructBody, TypeDecl, TypeShape, TypeSpec};
pub use treesitter::TreeSitterParser;
pub use visit::{walk, Node, Step, Visitor};

/// Turns Go source text into a [`SourceFile`].
pub trait SourceParser {
    /// Parse one compilation unit.
    ///
    /// Fails with [`ScanError::Parse`] if the source is not valid Go.
    fn parse_file(&self, path: &Path, source: &[u8]) -> Result<SourceFile>;
}

/// Read and parse a single file.
pub fn parse_path<P: SourceParser + ?Sized>(parser: &P, path: &Path) -> Result<SourceFile> {
    let source = fs::read(path).map_err(|e| ScanError::io(path, e))?;
    debug!(file = %path.display(), bytes = source.len(), "parsing");
    parser.parse_file(path, &source)
}

/// Parse a batch of files and group them into packages by declared name.
///
/// Packages come back in name order, files in the order given. The first
/// file that fails to parse aborts the whole batch.
pub fn parse_packages<P: SourceParser + ?Sized>(
    parser: &P,
    paths: &[PathBuf],
) -> Result<Vec<Package>> {
    let mut packages: BTreeMap<String, Package> = BTreeMap::new();

    for path in paths {
        let file = parse_path(parser, path)?;
        packages
            .entry(file.package_name.clone())
            .or_insert_with(|| Package {
                name: file.package_name.clone(),
                files: Vec::new(),
            })
            .files
            .push(file);
    }

    Ok(packages.into_values().collect())
}
