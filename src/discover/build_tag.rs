//! Extraction of build constraints from a file's leading comments.

use crate::parser::SourceFile;

/// Accepted directive prefixes, checked in this order.
pub const BUILD_TAG_PREFIXES: &[&str] = &["//go:build ", "// +build "];

/// Return the expression of the first build constraint before the package
/// clause, verbatim. The expression is never evaluated.
pub fn build_tag(file: &SourceFile) -> Option<&str> {
    file.leading_comments()
        .flat_map(|group| group.comments.iter())
        .find_map(|comment| strip_directive(&comment.text))
}

fn strip_directive(text: &str) -> Option<&str> {
    BUILD_TAG_PREFIXES
        .iter()
        .find_map(|prefix| text.strip_prefix(*prefix))
}
