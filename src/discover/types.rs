//! Core types for discovery results.

use serde::{Deserialize, Serialize};

/// Everything code generation needs to know about one scanned target.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanResult {
    /// Import path of the package (e.g. "github.com/acme/app/model").
    pub pkg_path: String,
    /// Name from the `package` clause.
    pub pkg_name: String,
    /// Build constraint expression, empty when the files carry none.
    pub build_tags: String,
    /// Selected type names in discovery order. Duplicates across files are
    /// kept as found.
    pub struct_names: Vec<String>,
}

impl ScanResult {
    pub fn new(pkg_path: impl Into<String>) -> Self {
        Self {
            pkg_path: pkg_path.into(),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.struct_names.is_empty()
    }
}

/// Knobs for a scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanOptions {
    /// Select every top-level struct that is not explicitly skipped.
    pub all_structs: bool,
}

impl ScanOptions {
    pub fn all_structs(mut self, all: bool) -> Self {
        self.all_structs = all;
        self
    }
}
