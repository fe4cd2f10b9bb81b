//! The discovery pass over parsed packages.
//!
//! [`ScanContext`] is the traversal state for one scan. It is threaded
//! through every visit step and owns the result record being built, so two
//! scans never share anything.

use tracing::{debug, trace};

use super::annotation::classify;
use super::build_tag::build_tag;
use super::types::{ScanOptions, ScanResult};
use crate::parser::{walk, Node, Package, SourceFile, Step, Visitor};

/// Traversal state for one scan.
#[derive(Debug)]
pub struct ScanContext {
    options: ScanOptions,
    /// Name of the struct whose body is about to be visited.
    candidate: Option<String>,
    result: ScanResult,
}

impl ScanContext {
    pub fn new(pkg_path: impl Into<String>, options: ScanOptions) -> Self {
        Self {
            options,
            candidate: None,
            result: ScanResult::new(pkg_path),
        }
    }

    /// Walk a whole package.
    pub fn visit_package(&mut self, package: &Package) {
        walk(self, Node::Package(package));
    }

    /// Walk a single file.
    pub fn visit_file(&mut self, file: &SourceFile) {
        walk(self, Node::File(file));
    }

    pub fn result(&self) -> &ScanResult {
        &self.result
    }

    pub fn into_result(self) -> ScanResult {
        self.result
    }

    fn select(&mut self, name: String) {
        debug!(name = %name, "selected type");
        self.result.struct_names.push(name);
    }
}

impl<'a> Visitor<'a> for ScanContext {
    fn visit(&mut self, node: Node<'a>) -> Step<'a> {
        match node {
            Node::Package(_) => Step::Descend,

            Node::File(file) => {
                self.result.pkg_name = file.package_name.clone();
                if let Some(tag) = build_tag(file) {
                    self.result.build_tags = tag.to_string();
                }
                Step::Descend
            }

            Node::DeclGroup(group) => match group.doc.as_ref() {
                Some(doc) if classify(Some(doc)).propagates() => Step::DescendWithDoc(doc),
                _ => Step::Descend,
            },

            Node::TypeSpec { spec, doc } => {
                let annotation = classify(doc);
                if annotation.is_skip() {
                    trace!(name = %spec.name, "skipped by marker");
                    return Step::Prune;
                }
                if annotation.is_explicit() {
                    // Selected whatever its shape.
                    self.select(spec.name.clone());
                    return Step::Prune;
                }
                if !self.options.all_structs {
                    return Step::Prune;
                }
                self.candidate = Some(spec.name.clone());
                Step::Descend
            }

            Node::StructBody(_) => {
                if let Some(name) = self.candidate.take() {
                    self.select(name);
                }
                Step::Prune
            }

            Node::OtherDecl(_) | Node::OtherType(_) => Step::Prune,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{SourceParser, TreeSitterParser};
    use std::path::Path;

    const MODEL: &str = r#"package model

// easyjson:json
type User struct {
    Name string
}

// easyjson:skip
type internal struct {
    secret string
}

type Alias = string

type Plain struct {
    X int
}
"#;

    fn scan(source: &str, all_structs: bool) -> ScanResult {
        let file = TreeSitterParser::new()
            .parse_file(Path::new("model.go"), source.as_bytes())
            .expect("fixture should parse");
        let mut ctx = ScanContext::new("example.com/app/model", ScanOptions { all_structs });
        ctx.visit_file(&file);
        ctx.into_result()
    }

    #[test]
    fn test_explicit_only() {
        let result = scan(MODEL, false);
        assert_eq!(result.pkg_path, "example.com/app/model");
        assert_eq!(result.pkg_name, "model");
        assert_eq!(result.build_tags, "");
        assert_eq!(result.struct_names, vec!["User"]);
    }

    #[test]
    fn test_all_structs() {
        let result = scan(MODEL, true);
        assert_eq!(result.struct_names, vec!["User", "Plain"]);
    }

    #[test]
    fn test_explicit_non_struct_is_selected() {
        let source = r#"package model

// easyjson:json
type Names []string

// easyjson:json
type ID = int64
"#;
        assert_eq!(scan(source, false).struct_names, vec!["Names", "ID"]);
    }

    #[test]
    fn test_group_skip_applies_to_every_spec() {
        let source = r#"package model

// easyjson:skip
type (
    A struct{}
    B struct{}
)
"#;
        assert!(scan(source, true).struct_names.is_empty());
    }

    #[test]
    fn test_group_include_applies_to_every_spec() {
        let source = r#"package model

// easyjson:json
type (
    A struct{}
    B string
)
"#;
        assert_eq!(scan(source, false).struct_names, vec!["A", "B"]);
    }

    #[test]
    fn test_group_marker_overrides_spec_doc() {
        let source = r#"package model

// easyjson:skip
type (
    // easyjson:json
    A struct{}
)
"#;
        assert!(scan(source, false).struct_names.is_empty());
    }

    #[test]
    fn test_spec_docs_inside_plain_group() {
        let source = r#"package model

// Models.
type (
    // easyjson:json
    A struct{}

    // easyjson:skip
    B struct{}

    C struct{}
)
"#;
        assert_eq!(scan(source, false).struct_names, vec!["A"]);
        assert_eq!(scan(source, true).struct_names, vec!["A", "C"]);
    }

    #[test]
    fn test_nested_and_wrapped_structs_not_selected() {
        let source = r#"package model

type Outer struct {
    Inner struct {
        X int
    }
}

type Wrapped []struct{ X int }

func f() {
    type Local struct{}
}
"#;
        assert_eq!(scan(source, true).struct_names, vec!["Outer"]);
    }

    #[test]
    fn test_alias_to_struct_in_all_mode() {
        let source = r#"package model

type Point = struct{ X, Y int }
"#;
        assert_eq!(scan(source, true).struct_names, vec!["Point"]);
    }

    #[test]
    fn test_build_tag_recorded() {
        let source = r#"//go:build linux

package model

type S struct{}
"#;
        assert_eq!(scan(source, true).build_tags, "linux");
    }

    #[test]
    fn test_duplicates_across_files_kept() {
        let parser = TreeSitterParser::new();
        let a = parser
            .parse_file(Path::new("a.go"), b"package m\n\n// easyjson:json\ntype T struct{}\n")
            .unwrap();
        let b = parser
            .parse_file(Path::new("b.go"), b"package m\n\n// easyjson:json\ntype T struct{}\n")
            .unwrap();
        let package = Package {
            name: "m".to_string(),
            files: vec![a, b],
        };

        let mut ctx = ScanContext::new("example.com/m", ScanOptions::default());
        ctx.visit_package(&package);
        assert_eq!(ctx.result().struct_names, vec!["T", "T"]);
    }

    #[test]
    fn test_untagged_file_keeps_previous_tag() {
        let parser = TreeSitterParser::new();
        let tagged = parser
            .parse_file(Path::new("a.go"), b"// +build darwin\n\npackage m\n")
            .unwrap();
        let plain = parser.parse_file(Path::new("b.go"), b"package m\n").unwrap();

        let mut ctx = ScanContext::new("example.com/m", ScanOptions::default());
        ctx.visit_file(&tagged);
        ctx.visit_file(&plain);
        assert_eq!(ctx.result().build_tags, "darwin");
    }
}
