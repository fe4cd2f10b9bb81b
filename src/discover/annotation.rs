//! Classification of doc comments by their discovery markers.

use crate::parser::CommentGroup;

/// Marks a type for code generation regardless of its shape.
pub const INCLUDE_MARKER: &str = "easyjson:json";

/// Excludes a type even when every struct is selected.
pub const SKIP_MARKER: &str = "easyjson:skip";

/// What a doc comment says about its type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Annotation {
    /// No marker line.
    #[default]
    None,
    /// A line starting with [`SKIP_MARKER`].
    Skip,
    /// A line starting with [`INCLUDE_MARKER`].
    Include,
}

impl Annotation {
    pub fn is_skip(self) -> bool {
        self == Annotation::Skip
    }

    pub fn is_explicit(self) -> bool {
        self == Annotation::Include
    }

    /// Whether a declaration group hands this annotation down to its specs.
    pub fn propagates(self) -> bool {
        self != Annotation::None
    }
}

/// Classify a comment group.
///
/// Lines are examined in order across every comment of the group; the
/// first line starting with either marker decides.
pub fn classify(doc: Option<&CommentGroup>) -> Annotation {
    let Some(doc) = doc else {
        return Annotation::None;
    };

    for line in doc.lines() {
        if line.starts_with(SKIP_MARKER) {
            return Annotation::Skip;
        }
        if line.starts_with(INCLUDE_MARKER) {
            return Annotation::Include;
        }
    }

    Annotation::None
}
