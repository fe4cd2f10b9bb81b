//! Tree-sitter backed Go parser.
//!
//! Parses a file with the `tree-sitter-go` grammar and lowers the concrete
//! tree into the owned model in [`super::tree`]. Any ERROR or MISSING node is
//! reported as a parse failure, so callers only ever see well-formed files.

use std::path::Path;

use streaming_iterator::StreamingIterator;
use tree_sitter::{Language, Parser as TsParser, Query, QueryCursor};

use super::comments::{Comment, CommentGroup, CommentGrouper};
use super::tree::{Decl, OtherDecl, SourceFile, Span, StructBody, TypeDecl, TypeShape, TypeSpec};
use super::SourceParser;
use crate::error::{Result, ScanError};

/// Tree-sitter query for the package clause.
const PACKAGE_QUERY: &str = r#"
(package_clause
  (package_identifier) @package_name
) @package
"#;

/// Go parser built on tree-sitter.
pub struct TreeSitterParser {
    language: Language,
}

impl Default for TreeSitterParser {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeSitterParser {
    /// Create a new Go parser.
    pub fn new() -> Self {
        Self {
            language: tree_sitter_go::LANGUAGE.into(),
        }
    }

    /// Create a tree-sitter parser for one file; `tree_sitter::Parser` is not `Sync`.
    fn create_parser(&self, path: &Path) -> Result<TsParser> {
        let mut parser = TsParser::new();
        parser
            .set_language(&self.language)
            .map_err(|e| parse_error(path, 0, 0, format!("loading Go grammar: {}", e)))?;
        Ok(parser)
    }

    /// Locate the package clause, returning the package name and the byte
    /// offset of the `package` keyword.
    fn find_package(
        &self,
        path: &Path,
        root: tree_sitter::Node,
        source: &[u8],
    ) -> Result<(String, usize)> {
        let query = Query::new(&self.language, PACKAGE_QUERY)
            .map_err(|e| parse_error(path, 0, 0, format!("invalid package query: {}", e)))?;
        let mut cursor = QueryCursor::new();
        let mut matches = cursor.matches(&query, root, source);

        while let Some(m) = matches.next() {
            let mut name = None;
            let mut offset = None;
            for capture in m.captures {
                match query.capture_names()[capture.index as usize] {
                    "package_name" => name = Some(node_text(capture.node, source).to_string()),
                    "package" => offset = Some(capture.node.start_byte()),
                    _ => {}
                }
            }
            if let (Some(name), Some(offset)) = (name, offset) {
                return Ok((name, offset));
            }
        }

        Err(parse_error(path, 1, 1, "expected 'package' clause"))
    }
}

impl SourceParser for TreeSitterParser {
    fn parse_file(&self, path: &Path, source: &[u8]) -> Result<SourceFile> {
        let mut parser = self.create_parser(path)?;
        let tree = parser
            .parse(source, None)
            .ok_or_else(|| parse_error(path, 0, 0, "parser produced no tree"))?;
        let root = tree.root_node();

        if root.has_error() {
            return Err(first_syntax_error(path, root));
        }

        let (package_name, package_offset) = self.find_package(path, root, source)?;

        let mut grouper = CommentGrouper::new();
        let mut decls = Vec::new();
        let mut cursor = root.walk();

        for child in root.children(&mut cursor) {
            if !child.is_named() {
                continue; // statement terminators
            }
            match child.kind() {
                "comment" => grouper.push_comment(comment_from(child, source)),
                "package_clause" => {
                    grouper.push_code(start_line(child), end_line(child));
                }
                "type_declaration" => {
                    let doc = grouper.push_code(start_line(child), end_line(child));
                    decls.push(Decl::Type(lower_type_decl(child, doc, source)));
                }
                kind => {
                    grouper.push_code(start_line(child), end_line(child));
                    decls.push(Decl::Other(OtherDecl {
                        kind: kind.to_string(),
                        span: Span::from_node(child),
                    }));
                }
            }
        }

        Ok(SourceFile {
            path: path.to_path_buf(),
            package_name,
            package_offset,
            comments: grouper.finish(),
            decls,
        })
    }
}

/// Lower a `type_declaration` node, attaching doc comments the way the Go
/// toolchain does: an ungrouped spec has no doc of its own.
fn lower_type_decl(node: tree_sitter::Node, doc: Option<CommentGroup>, source: &[u8]) -> TypeDecl {
    let mut grouper = CommentGrouper::new();
    let mut grouped = false;
    let mut specs = Vec::new();
    let mut cursor = node.walk();

    for child in node.children(&mut cursor) {
        match child.kind() {
            "(" => {
                grouped = true;
                grouper.push_code(start_line(child), start_line(child));
            }
            "comment" => grouper.push_comment(comment_from(child, source)),
            "type_spec" | "type_alias" => {
                let spec_doc = grouper.push_code(start_line(child), end_line(child));
                if let Some(mut spec) = lower_type_spec(child, source) {
                    spec.doc = if grouped { spec_doc } else { None };
                    specs.push(spec);
                }
            }
            _ => {}
        }
    }

    TypeDecl {
        doc,
        specs,
        span: Span::from_node(node),
    }
}

fn lower_type_spec(node: tree_sitter::Node, source: &[u8]) -> Option<TypeSpec> {
    let name = node_text(node.child_by_field_name("name")?, source).to_string();
    let type_node = node.child_by_field_name("type")?;

    let shape = if type_node.kind() == "struct_type" {
        TypeShape::Struct(StructBody {
            span: Span::from_node(type_node),
        })
    } else {
        TypeShape::Other(type_node.kind().to_string())
    };

    Some(TypeSpec {
        name,
        doc: None,
        shape,
        span: Span::from_node(node),
    })
}

/// Build a parse error pointing at the first ERROR or MISSING node.
fn first_syntax_error(path: &Path, root: tree_sitter::Node) -> ScanError {
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if node.is_error() || node.is_missing() {
            let pos = node.start_position();
            let message = if node.is_missing() {
                format!("syntax error: missing {}", node.kind())
            } else {
                "syntax error".to_string()
            };
            return parse_error(path, pos.row + 1, pos.column + 1, message);
        }
        if !node.has_error() {
            continue;
        }
        // Push in reverse so the leftmost child is examined first.
        let mut cursor = node.walk();
        let children: Vec<_> = node.children(&mut cursor).collect();
        stack.extend(children.into_iter().rev());
    }
    parse_error(path, 1, 1, "syntax error")
}

fn comment_from(node: tree_sitter::Node, source: &[u8]) -> Comment {
    Comment::new(node_text(node, source), Span::from_node(node))
}

fn node_text<'s>(node: tree_sitter::Node, source: &'s [u8]) -> &'s str {
    node.utf8_text(source).unwrap_or("")
}

fn start_line(node: tree_sitter::Node) -> usize {
    node.start_position().row + 1
}

fn end_line(node: tree_sitter::Node) -> usize {
    node.end_position().row + 1
}

fn parse_error(path: &Path, line: usize, column: usize, message: impl Into<String>) -> ScanError {
    ScanError::Parse {
        path: path.to_path_buf(),
        line,
        column,
        message: message.into(),
    }
}
