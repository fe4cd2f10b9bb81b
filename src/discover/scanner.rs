//! Scanner that runs a complete discovery for one target.

use std::path::Path;

use globset::GlobSet;
use tracing::{debug, info};

use super::files::collect_source_files;
use super::pkgpath::{ModuleResolver, PathResolver};
use super::types::{ScanOptions, ScanResult};
use super::walker::ScanContext;
use crate::error::Result;
use crate::parser::{self, SourceParser, TreeSitterParser};

/// Resolves, parses and walks a file or package directory.
pub struct Scanner {
    options: ScanOptions,
    exclude: GlobSet,
    resolver: Box<dyn PathResolver>,
    parser: Box<dyn SourceParser>,
}

impl Scanner {
    /// Create a scanner with the default resolver and parser.
    pub fn new(options: ScanOptions) -> Self {
        Self {
            options,
            exclude: GlobSet::empty(),
            resolver: Box::new(ModuleResolver::new()),
            parser: Box::new(TreeSitterParser::new()),
        }
    }

    /// Replace the import path resolver.
    pub fn with_resolver(mut self, resolver: impl PathResolver + 'static) -> Self {
        self.resolver = Box::new(resolver);
        self
    }

    /// Skip directory entries matching these globs.
    pub fn exclude(mut self, exclude: GlobSet) -> Self {
        self.exclude = exclude;
        self
    }

    /// Scan a single file or every source file of a directory.
    ///
    /// The import path is resolved before anything is parsed. In directory
    /// mode the first file that fails to parse fails the whole scan.
    pub fn scan(&self, path: &Path, is_dir: bool) -> Result<ScanResult> {
        info!(path = %path.display(), is_dir, "scanning");

        let pkg_path = self.resolver.resolve(path, is_dir)?;
        let mut ctx = ScanContext::new(pkg_path, self.options);

        if is_dir {
            let files = collect_source_files(path, &self.exclude)?;
            debug!(count = files.len(), "collected source files");
            for package in parser::parse_packages(self.parser.as_ref(), &files)? {
                ctx.visit_package(&package);
            }
        } else {
            let file = parser::parse_path(self.parser.as_ref(), path)?;
            ctx.visit_file(&file);
        }

        let result = ctx.into_result();
        info!(
            pkg_path = %result.pkg_path,
            selected = result.struct_names.len(),
            "scan complete"
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScanError;
    use tempfile::TempDir;

    struct FixedResolver(&'static str);

    impl PathResolver for FixedResolver {
        fn resolve(&self, _path: &Path, _is_dir: bool) -> Result<String> {
            Ok(self.0.to_string())
        }
    }

    struct FailingResolver;

    impl PathResolver for FailingResolver {
        fn resolve(&self, path: &Path, _is_dir: bool) -> Result<String> {
            Err(ScanError::resolution(path, "outside any module"))
        }
    }

    #[test]
    fn test_scan_directory() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join("a.go"),
            "package shop\n\n// easyjson:json\ntype Order struct{}\n",
        )
        .unwrap();
        std::fs::write(
            temp.path().join("a_test.go"),
            "package shop\n\n// easyjson:json\ntype Fixture struct{}\n",
        )
        .unwrap();
        std::fs::write(temp.path().join("b.go"), "package shop\n\ntype Cart struct{}\n").unwrap();

        let scanner = Scanner::new(ScanOptions::default().all_structs(true))
            .with_resolver(FixedResolver("example.com/shop"));
        let result = scanner.scan(temp.path(), true).unwrap();

        assert_eq!(result.pkg_path, "example.com/shop");
        assert_eq!(result.pkg_name, "shop");
        assert_eq!(result.struct_names, vec!["Order", "Cart"]);
    }

    #[test]
    fn test_resolution_failure_aborts_before_parsing() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("broken.go"), "this is not go").unwrap();

        let scanner = Scanner::new(ScanOptions::default()).with_resolver(FailingResolver);
        let err = scanner.scan(temp.path(), true).unwrap_err();
        assert!(matches!(err, ScanError::Resolution { .. }));
    }

    #[test]
    fn test_parse_failure_aborts_directory() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("a.go"), "package x\n\ntype A struct{}\n").unwrap();
        std::fs::write(temp.path().join("b.go"), "package x\n\ntype B struct {\n").unwrap();

        let scanner = Scanner::new(ScanOptions::default().all_structs(true))
            .with_resolver(FixedResolver("example.com/x"));
        let err = scanner.scan(temp.path(), true).unwrap_err();
        assert!(matches!(err, ScanError::Parse { .. }));
    }

    #[test]
    fn test_empty_directory() {
        let temp = TempDir::new().unwrap();
        let scanner = Scanner::new(ScanOptions::default())
            .with_resolver(FixedResolver("example.com/empty"));
        let result = scanner.scan(temp.path(), true).unwrap();
        assert_eq!(result.pkg_name, "");
        assert!(result.is_empty());
    }
}
