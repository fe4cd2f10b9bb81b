//! Selection of the Go files that make up a package directory.

use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};
use tracing::trace;
use walkdir::WalkDir;

use crate::error::{Result, ScanError};

/// Extension of Go source files.
pub const SOURCE_SUFFIX: &str = ".go";

/// Suffix of Go test files.
pub const TEST_SUFFIX: &str = "_test.go";

/// Suffix of files this tool's generator writes.
pub const GENERATED_SUFFIX: &str = "_easyjson.go";

/// Whether a file name belongs to the scanned source set: a Go file that is
/// neither a test nor previously generated output.
pub fn is_source_file(name: &str) -> bool {
    name.ends_with(SOURCE_SUFFIX) && !name.ends_with(TEST_SUFFIX) && !name.ends_with(GENERATED_SUFFIX)
}

/// Compile user exclusion globs.
pub fn build_exclude_set(patterns: &[String]) -> anyhow::Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(Glob::new(pattern)?);
    }
    Ok(builder.build()?)
}

/// List the source files directly inside `dir`, sorted by file name.
///
/// Subdirectories are not entered; each directory is its own package.
pub fn collect_source_files(dir: &Path, exclude: &GlobSet) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(dir).to_path_buf();
            ScanError::io(path, e.into())
        })?;
        if !entry.file_type().is_file() {
            continue;
        }

        let name = entry.file_name().to_string_lossy();
        if !is_source_file(&name) {
            continue;
        }
        if exclude.is_match(entry.path()) || exclude.is_match(entry.file_name()) {
            trace!(file = %entry.path().display(), "excluded by pattern");
            continue;
        }
        files.push(entry.into_path());
    }

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_is_source_file() {
        assert!(is_source_file("user.go"));
        assert!(!is_source_file("user_test.go"));
        assert!(!is_source_file("user_easyjson.go"));
        assert!(!is_source_file("user.go.txt"));
        assert!(!is_source_file("README.md"));
    }

    #[test]
    fn test_collect_source_files() {
        let temp = TempDir::new().unwrap();
        for name in ["b.go", "a.go", "a_test.go", "a_easyjson.go", "notes.txt"] {
            std::fs::write(temp.path().join(name), "package x\n").unwrap();
        }
        std::fs::create_dir(temp.path().join("sub")).unwrap();
        std::fs::write(temp.path().join("sub").join("c.go"), "package sub\n").unwrap();

        let files = collect_source_files(temp.path(), &GlobSet::empty()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.go", "b.go"]);
    }

    #[test]
    fn test_exclude_patterns() {
        let temp = TempDir::new().unwrap();
        for name in ["model.go", "mock_model.go"] {
            std::fs::write(temp.path().join(name), "package x\n").unwrap();
        }

        let exclude = build_exclude_set(&["mock_*.go".to_string()]).unwrap();
        let files = collect_source_files(temp.path(), &exclude).unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("model.go"));
    }

    #[test]
    fn test_invalid_pattern() {
        assert!(build_exclude_set(&["a[".to_string()]).is_err());
    }

    #[test]
    fn test_missing_directory() {
        let temp = TempDir::new().unwrap();
        let err = collect_source_files(&temp.path().join("nope"), &GlobSet::empty()).unwrap_err();
        assert!(matches!(err, ScanError::Io { .. }));
    }
}
