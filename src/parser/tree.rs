//! Owned syntax model lowered from the tree-sitter parse tree.
//!
//! Only the parts of a Go file that struct discovery looks at are kept:
//! the package clause, top-level comments, and the type declarations. Everything
//! else collapses into [`Decl::Other`].

use std::fmt;
use std::path::PathBuf;

use super::comments::CommentGroup;

/// Location of a node in its source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    /// Start byte offset (0-indexed).
    pub start_byte: usize,
    /// End byte offset (0-indexed, exclusive).
    pub end_byte: usize,
    /// Start line (1-indexed).
    pub start_line: usize,
    /// Start column (1-indexed).
    pub start_col: usize,
    /// End line (1-indexed).
    pub end_line: usize,
    /// End column (1-indexed).
    pub end_col: usize,
}

impl Span {
    /// Create a span from a tree-sitter node.
    pub fn from_node(node: tree_sitter::Node) -> Self {
        let start = node.start_position();
        let end = node.end_position();
        Self {
            start_byte: node.start_byte(),
            end_byte: node.end_byte(),
            start_line: start.row + 1, // tree-sitter is 0-indexed
            start_col: start.column + 1,
            end_line: end.row + 1,
            end_col: end.column + 1,
        }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.start_line, self.start_col)
    }
}

/// All files of one directory that declare the same package name.
#[derive(Debug, Clone, Default)]
pub struct Package {
    pub name: String,
    /// Files in file-name order.
    pub files: Vec<SourceFile>,
}

/// One parsed compilation unit.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub path: PathBuf,
    /// Name from the `package` clause.
    pub package_name: String,
    /// Byte offset of the `package` keyword.
    pub package_offset: usize,
    /// Top-level comment groups in source order.
    pub comments: Vec<CommentGroup>,
    /// Top-level declarations in source order.
    pub decls: Vec<Decl>,
}

impl SourceFile {
    /// Comment groups that start before the `package` keyword.
    pub fn leading_comments(&self) -> impl Iterator<Item = &CommentGroup> {
        let package_offset = self.package_offset;
        self.comments
            .iter()
            .take_while(move |g| g.span().start_byte <= package_offset)
    }
}

/// A top-level declaration.
#[derive(Debug, Clone)]
pub enum Decl {
    /// `type X ...` or `type ( ... )`.
    Type(TypeDecl),
    /// Imports, functions, methods, consts, vars.
    Other(OtherDecl),
}

/// A declaration the discovery pass never descends into.
#[derive(Debug, Clone)]
pub struct OtherDecl {
    /// Grammar node kind (e.g. "function_declaration").
    pub kind: String,
    pub span: Span,
}

/// A `type` declaration statement, possibly grouped with parentheses.
#[derive(Debug, Clone)]
pub struct TypeDecl {
    /// Comment group ending on the line right above the `type` keyword.
    pub doc: Option<CommentGroup>,
    pub specs: Vec<TypeSpec>,
    pub span: Span,
}

/// A single `Name [params] Type` or `Name = Type` entry.
#[derive(Debug, Clone)]
pub struct TypeSpec {
    pub name: String,
    /// Own doc comment. Always `None` for an ungrouped declaration, where
    /// the comment belongs to the enclosing [`TypeDecl`].
    pub doc: Option<CommentGroup>,
    pub shape: TypeShape,
    pub span: Span,
}

/// The declared underlying type of a spec.
#[derive(Debug, Clone)]
pub enum TypeShape {
    /// A `struct { ... }` literal.
    Struct(StructBody),
    /// Anything else, with its grammar node kind.
    Other(String),
}

impl TypeShape {
    pub fn is_struct(&self) -> bool {
        matches!(self, TypeShape::Struct(_))
    }
}

/// Body of a struct type.
#[derive(Debug, Clone)]
pub struct StructBody {
    pub span: Span,
}
