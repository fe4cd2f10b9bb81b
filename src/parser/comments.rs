//! Comments, comment groups, and their normalization into logical lines.
//!
//! Grouping follows the Go toolchain: comments on consecutive lines form one
//! group, a blank line starts a new one, and a comment that shares its line
//! with preceding code is a trailing comment that never joins a doc group.

use super::tree::Span;

/// A single `// ...` or `/* ... */` comment, delimiters included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub text: String,
    pub span: Span,
}

impl Comment {
    pub fn new(text: impl Into<String>, span: Span) -> Self {
        let text: String = text.into();
        Self {
            text: text.replace('\r', ""),
            span,
        }
    }

    /// The comment text with its syntax delimiters removed.
    pub fn body(&self) -> &str {
        let text = self.text.as_str();
        if text.len() <= 2 {
            return text;
        }
        if let Some(rest) = text.strip_prefix("//") {
            return rest;
        }
        if text.len() >= 4 && text.starts_with("/*") && text.ends_with("*/") {
            return &text[2..text.len() - 2];
        }
        text
    }

    /// Logical lines of the body, each trimmed of surrounding whitespace.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.body().split('\n').map(str::trim)
    }
}

/// A run of adjacent comments treated as one unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentGroup {
    pub comments: Vec<Comment>,
    /// Set when the group started on the same line as preceding code.
    pub trailing: bool,
}

impl CommentGroup {
    pub fn new(comments: Vec<Comment>) -> Self {
        Self {
            comments,
            trailing: false,
        }
    }

    /// Span from the first comment to the last.
    pub fn span(&self) -> Span {
        match (self.comments.first(), self.comments.last()) {
            (Some(first), Some(last)) => Span {
                start_byte: first.span.start_byte,
                end_byte: last.span.end_byte,
                start_line: first.span.start_line,
                start_col: first.span.start_col,
                end_line: last.span.end_line,
                end_col: last.span.end_col,
            },
            _ => Span::default(),
        }
    }

    /// Logical lines across every comment of the group, in order.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.comments.iter().flat_map(Comment::lines)
    }

    /// Whether this group is the doc comment of something starting on `line`.
    pub fn is_doc_for(&self, line: usize) -> bool {
        !self.trailing && !self.comments.is_empty() && self.span().end_line + 1 == line
    }
}

/// Accumulates comments into groups while walking sibling nodes in order.
#[derive(Debug, Default)]
pub struct CommentGrouper {
    groups: Vec<CommentGroup>,
    current: Option<CommentGroup>,
    /// Last line occupied by non-comment code seen so far.
    code_end_line: Option<usize>,
}

impl CommentGrouper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the next comment in source order.
    pub fn push_comment(&mut self, comment: Comment) {
        let start = comment.span.start_line;

        if let Some(current) = self.current.as_mut() {
            let end = current.span().end_line;
            // A trailing group only absorbs comments on its own line.
            let reach = if current.trailing { end } else { end + 1 };
            if start <= reach {
                current.comments.push(comment);
                return;
            }
        }

        self.flush();
        let mut group = CommentGroup::new(vec![comment]);
        group.trailing = self.code_end_line == Some(start);
        self.current = Some(group);
    }

    /// Feed a non-comment node starting on `start_line`.
    ///
    /// Returns the doc comment for that node, if the group just before it
    /// ends on the preceding line.
    pub fn push_code(&mut self, start_line: usize, end_line: usize) -> Option<CommentGroup> {
        let doc = self
            .current
            .as_ref()
            .filter(|g| g.is_doc_for(start_line))
            .cloned();
        self.flush();
        self.code_end_line = Some(end_line);
        doc
    }

    /// Close any open group and return all groups in source order.
    pub fn finish(mut self) -> Vec<CommentGroup> {
        self.flush();
        self.groups
    }

    fn flush(&mut self) {
        if let Some(group) = self.current.take() {
            self.groups.push(group);
        }
    }
}
