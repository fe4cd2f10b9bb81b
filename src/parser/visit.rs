//! Depth-first traversal over the syntax model.
//!
//! A [`Visitor`] sees one [`Node`] at a time and answers with a [`Step`]
//! telling [`walk`] whether to go into that node's children.

use super::comments::CommentGroup;
use super::tree::{Decl, OtherDecl, Package, SourceFile, StructBody, TypeDecl, TypeShape, TypeSpec};

/// The node kinds a visitor can see.
#[derive(Debug, Clone, Copy)]
pub enum Node<'a> {
    Package(&'a Package),
    File(&'a SourceFile),
    /// A `type` declaration statement and its specs.
    DeclGroup(&'a TypeDecl),
    /// A type spec together with the doc comment in effect for it, which is
    /// either its own or one handed down by the enclosing group.
    TypeSpec {
        spec: &'a TypeSpec,
        doc: Option<&'a CommentGroup>,
    },
    StructBody(&'a StructBody),
    OtherDecl(&'a OtherDecl),
    /// Non-struct underlying type of a spec (grammar node kind).
    OtherType(&'a str),
}

/// What the walker does after visiting a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step<'a> {
    /// Skip the node's children.
    Prune,
    /// Visit the node's children.
    Descend,
    /// Visit the children of a declaration group, giving every type spec
    /// this doc comment instead of its own.
    DescendWithDoc(&'a CommentGroup),
}

pub trait Visitor<'a> {
    fn visit(&mut self, node: Node<'a>) -> Step<'a>;
}

/// Walk `node` and its descendants depth-first in source order.
pub fn walk<'a, V: Visitor<'a> + ?Sized>(visitor: &mut V, node: Node<'a>) {
    let step = visitor.visit(node);
    if step == Step::Prune {
        return;
    }

    match node {
        Node::Package(pkg) => {
            for file in &pkg.files {
                walk(visitor, Node::File(file));
            }
        }
        Node::File(file) => {
            for decl in &file.decls {
                let child = match decl {
                    Decl::Type(group) => Node::DeclGroup(group),
                    Decl::Other(other) => Node::OtherDecl(other),
                };
                walk(visitor, child);
            }
        }
        Node::DeclGroup(group) => {
            let inherited = match step {
                Step::DescendWithDoc(doc) => Some(doc),
                _ => None,
            };
            for spec in &group.specs {
                let doc = inherited.or(spec.doc.as_ref());
                walk(visitor, Node::TypeSpec { spec, doc });
            }
        }
        Node::TypeSpec { spec, .. } => {
            let child = match &spec.shape {
                TypeShape::Struct(body) => Node::StructBody(body),
                TypeShape::Other(kind) => Node::OtherType(kind),
            };
            walk(visitor, child);
        }
        // Field types are never inspected.
        Node::StructBody(_) | Node::OtherDecl(_) | Node::OtherType(_) => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::comments::Comment;
    use crate::parser::tree::Span;
    use std::path::PathBuf;

    /// Records the kind of every node it sees and always descends.
    struct Recorder(Vec<String>);

    impl<'a> Visitor<'a> for Recorder {
        fn visit(&mut self, node: Node<'a>) -> Step<'a> {
            let label = match node {
                Node::Package(p) => format!("package {}", p.name),
                Node::File(f) => format!("file {}", f.package_name),
                Node::DeclGroup(_) => "group".to_string(),
                Node::TypeSpec { spec, doc } => {
                    format!("spec {} doc={}", spec.name, doc.is_some())
                }
                Node::StructBody(_) => "struct".to_string(),
                Node::OtherDecl(o) => format!("other {}", o.kind),
                Node::OtherType(kind) => format!("type {}", kind),
            };
            self.0.push(label);
            Step::Descend
        }
    }

    fn spec(name: &str, shape: TypeShape) -> TypeSpec {
        TypeSpec {
            name: name.to_string(),
            doc: None,
            shape,
            span: Span::default(),
        }
    }

    fn sample_package(group_doc: Option<CommentGroup>) -> Package {
        let body = StructBody {
            span: Span::default(),
        };
        Package {
            name: "model".to_string(),
            files: vec![SourceFile {
                path: PathBuf::from("model.go"),
                package_name: "model".to_string(),
                package_offset: 0,
                comments: vec![],
                decls: vec![
                    Decl::Other(OtherDecl {
                        kind: "import_declaration".to_string(),
                        span: Span::default(),
                    }),
                    Decl::Type(TypeDecl {
                        doc: group_doc,
                        specs: vec![
                            spec("A", TypeShape::Struct(body)),
                            spec("B", TypeShape::Other("type_identifier".to_string())),
                        ],
                        span: Span::default(),
                    }),
                ],
            }],
        }
    }

    #[test]
    fn test_walk_order() {
        let pkg = sample_package(None);
        let mut recorder = Recorder(Vec::new());
        walk(&mut recorder, Node::Package(&pkg));

        assert_eq!(
            recorder.0,
            vec![
                "package model",
                "file model",
                "other import_declaration",
                "group",
                "spec A doc=false",
                "struct",
                "spec B doc=false",
                "type type_identifier",
            ]
        );
    }

    #[test]
    fn test_descend_with_doc_reaches_every_spec() {
        struct Propagator {
            seen: Vec<(String, bool)>,
        }

        impl<'a> Visitor<'a> for Propagator {
            fn visit(&mut self, node: Node<'a>) -> Step<'a> {
                match node {
                    Node::Package(_) | Node::File(_) => Step::Descend,
                    Node::DeclGroup(group) => match &group.doc {
                        Some(doc) => Step::DescendWithDoc(doc),
                        None => Step::Descend,
                    },
                    Node::TypeSpec { spec, doc } => {
                        self.seen.push((spec.name.clone(), doc.is_some()));
                        Step::Prune
                    }
                    _ => Step::Prune,
                }
            }
        }

        let doc = CommentGroup::new(vec![Comment::new("// easyjson:skip", Span::default())]);
        let pkg = sample_package(Some(doc));
        let mut visitor = Propagator { seen: Vec::new() };
        walk(&mut visitor, Node::Package(&pkg));

        assert_eq!(
            visitor.seen,
            vec![("A".to_string(), true), ("B".to_string(), true)]
        );
    }

    #[test]
    fn test_prune_stops_descent() {
        struct PruneFiles(usize);

        impl<'a> Visitor<'a> for PruneFiles {
            fn visit(&mut self, node: Node<'a>) -> Step<'a> {
                self.0 += 1;
                match node {
                    Node::Package(_) => Step::Descend,
                    _ => Step::Prune,
                }
            }
        }

        let pkg = sample_package(None);
        let mut visitor = PruneFiles(0);
        walk(&mut visitor, Node::Package(&pkg));
        assert_eq!(visitor.0, 2);
    }
}
