//! A parsed Go source file.
//!
//! [`GoFile`] owns the text and its tree-sitter tree. Every successful
//! mutation reparses the text and hands out a fresh [`SnapshotId`], so fixes
//! built against an older parse can be told apart from current ones.
use std::sync::atomic::{AtomicU64, Ordering};

use tree_sitter::{Node, Parser, Tree};

use crate::range::TextRange;

static NEXT_SNAPSHOT: AtomicU64 = AtomicU64::new(1);

/// Identity of one parse of one text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SnapshotId(u64);

impl SnapshotId {
    fn next() -> Self {
        Self(NEXT_SNAPSHOT.fetch_add(1, Ordering::Relaxed))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("failed to load the Go grammar: {0}")]
    Language(#[from] tree_sitter::LanguageError),
    #[error("tree-sitter returned no tree")]
    Parse,
}

#[derive(Debug, thiserror::Error)]
pub enum EditError {
    #[error("edit {0:?} overlaps a previous edit")]
    Overlap(TextRange),
    #[error("edit {0:?} is out of bounds or splits a character")]
    OutOfBounds(TextRange),
    #[error(transparent)]
    Source(#[from] SourceError),
}

/// Replace `range` with `replacement`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEdit {
    pub range: TextRange,
    pub replacement: String,
}

impl TextEdit {
    pub fn replace(range: TextRange, replacement: impl Into<String>) -> Self {
        Self {
            range,
            replacement: replacement.into(),
        }
    }

    pub fn delete(range: TextRange) -> Self {
        Self::replace(range, String::new())
    }
}

/// Splice non-overlapping `edits` into `text`.
pub fn splice(text: &str, edits: &[TextEdit]) -> Result<String, EditError> {
    let mut sorted: Vec<&TextEdit> = edits.iter().collect();
    sorted.sort_by_key(|edit| (edit.range.start(), edit.range.end()));

    let mut spliced = String::with_capacity(text.len());
    let mut last = 0;
    for edit in sorted {
        let range = edit.range;
        if range.start() < last {
            return Err(EditError::Overlap(range));
        }
        let kept = text
            .get(last..range.start())
            .ok_or(EditError::OutOfBounds(range))?;
        if text.get(range.start()..range.end()).is_none() {
            return Err(EditError::OutOfBounds(range));
        }
        spliced.push_str(kept);
        spliced.push_str(&edit.replacement);
        last = range.end();
    }
    spliced.push_str(text.get(last..).unwrap_or_default());

    Ok(spliced)
}

/// Start offsets of every line.
#[derive(Debug, Clone)]
pub struct LineIndex {
    starts: Vec<usize>,
    len: usize,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let starts = std::iter::once(0)
            .chain(text.match_indices('\n').map(|(idx, _)| idx + 1))
            .collect();
        Self {
            starts,
            len: text.len(),
        }
    }

    /// Span of the 1-based `line`, without its terminating newline.
    pub fn line_span(&self, line: usize) -> Option<TextRange> {
        let start = *self.starts.get(line.checked_sub(1)?)?;
        let end = self.starts.get(line).map_or(self.len, |next| next - 1);
        Some(TextRange::new(start, end))
    }

    /// 1-based line containing `offset`.
    pub fn line_of(&self, offset: usize) -> usize {
        self.starts.partition_point(|&start| start <= offset)
    }

    /// Offset of a 1-based `line` and 1-based byte `column`.
    pub fn offset_of(&self, line: usize, column: usize) -> Option<usize> {
        let span = self.line_span(line)?;
        let offset = span.start() + column.saturating_sub(1);
        (offset <= span.end()).then_some(offset)
    }
}

/// A run of whitespace between tokens. Newlines are always a run of their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Whitespace {
    pub range: TextRange,
}

/// What a synthesized piece of source must parse as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FragmentKind {
    Assignment,
    IncDec,
    Expression,
    Type,
}

impl FragmentKind {
    const fn wrapper(self) -> (&'static str, &'static str) {
        match self {
            Self::Assignment | Self::IncDec => ("package p\nfunc _() {\n", "\n}\n"),
            Self::Expression => ("package p\nvar _ = ", "\n"),
            Self::Type => ("package p\nvar _ ", "\n"),
        }
    }

    fn accepts(self, node: Node<'_>) -> bool {
        let parent = node.parent().map(|parent| parent.kind());
        match self {
            Self::Assignment => node.kind() == "assignment_statement",
            Self::IncDec => matches!(node.kind(), "inc_statement" | "dec_statement"),
            Self::Expression => parent == Some("expression_list"),
            Self::Type => parent == Some("var_spec"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FragmentError {
    #[error("`{0}` does not parse as {1:?}")]
    Invalid(String, FragmentKind),
    #[error(transparent)]
    Source(#[from] SourceError),
}

fn parse_tree(text: &str) -> Result<Tree, SourceError> {
    let mut parser = Parser::new();
    parser.set_language(&tree_sitter_go::LANGUAGE.into())?;
    parser.parse(text, None).ok_or(SourceError::Parse)
}

/// Check that `text` parses, on its own, as a `kind` construct.
pub fn parse_fragment(text: &str, kind: FragmentKind) -> Result<(), FragmentError> {
    let text = text.trim();
    let invalid = || FragmentError::Invalid(text.to_string(), kind);
    if text.is_empty() {
        return Err(invalid());
    }

    let (prefix, suffix) = kind.wrapper();
    let wrapped = format!("{prefix}{text}{suffix}");
    let tree = parse_tree(&wrapped)?;
    let root = tree.root_node();
    if root.has_error() {
        return Err(invalid());
    }

    let span = TextRange::new(prefix.len(), prefix.len() + text.len());
    let mut node = root
        .descendant_for_byte_range(span.start(), span.end())
        .ok_or_else(invalid)?;
    while let Some(parent) = node.parent() {
        if TextRange::of(parent) != span {
            break;
        }
        node = parent;
    }

    if TextRange::of(node) == span && kind.accepts(node) {
        Ok(())
    } else {
        Err(invalid())
    }
}

pub struct GoFile {
    text: String,
    tree: Tree,
    lines: LineIndex,
    snapshot: SnapshotId,
}

impl std::fmt::Debug for GoFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoFile")
            .field("len", &self.text.len())
            .field("snapshot", &self.snapshot)
            .finish_non_exhaustive()
    }
}

impl GoFile {
    pub fn parse(text: impl Into<String>) -> Result<Self, SourceError> {
        let text = text.into();
        let tree = parse_tree(&text)?;
        let lines = LineIndex::new(&text);
        Ok(Self {
            text,
            tree,
            lines,
            snapshot: SnapshotId::next(),
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn root(&self) -> Node<'_> {
        self.tree.root_node()
    }

    pub const fn lines(&self) -> &LineIndex {
        &self.lines
    }

    pub const fn snapshot(&self) -> SnapshotId {
        self.snapshot
    }

    /// Source text of `node`, or `""` if it does not belong to this text.
    pub fn node_text(&self, node: Node<'_>) -> &str {
        self.text.get(node.byte_range()).unwrap_or_default()
    }

    pub fn slice(&self, range: TextRange) -> Option<&str> {
        self.text.get(range.start()..range.end())
    }

    /// Innermost node whose range contains `offset`.
    ///
    /// Usually a token. When `offset` falls between tokens this is the
    /// smallest node around the gap.
    pub fn leaf_at(&self, offset: usize) -> Option<Node<'_>> {
        let mut node = self.tree.root_node();
        if !TextRange::of(node).contains(offset) {
            return None;
        }
        loop {
            let next = {
                let mut cursor = node.walk();
                node.children(&mut cursor)
                    .find(|child| TextRange::of(*child).contains(offset))
            };
            match next {
                Some(child) => node = child,
                None => return Some(node),
            }
        }
    }

    /// The package name declared by the package clause.
    pub fn package_name(&self) -> Option<&str> {
        let root = self.tree.root_node();
        let clause = {
            let mut cursor = root.walk();
            root.named_children(&mut cursor)
                .find(|node| node.kind() == "package_clause")?
        };
        let mut cursor = clause.walk();
        let name = clause
            .named_children(&mut cursor)
            .find(|node| node.kind() == "package_identifier")?;
        Some(self.node_text(name))
    }

    /// The whitespace token covering `offset`, if `offset` is not inside a
    /// real token (string literals and comments included).
    pub fn whitespace_at(&self, offset: usize) -> Option<Whitespace> {
        let bytes = self.text.as_bytes();
        let byte = *bytes.get(offset)?;
        if !byte.is_ascii_whitespace() {
            return None;
        }
        if let Some(leaf) = self.leaf_at(offset) {
            if leaf.child_count() == 0 && leaf.kind() != "\n" {
                return None;
            }
        }
        if byte == b'\n' {
            return Some(Whitespace {
                range: TextRange::new(offset, offset + 1),
            });
        }

        let blank = |b: &u8| b.is_ascii_whitespace() && *b != b'\n';
        let start = bytes[..offset]
            .iter()
            .rposition(|b| !blank(b))
            .map_or(0, |idx| idx + 1);
        let end = bytes[offset..]
            .iter()
            .position(|b| !blank(b))
            .map_or(bytes.len(), |idx| offset + idx);
        Some(Whitespace {
            range: TextRange::new(start, end),
        })
    }

    /// Splice `edits` in one step and reparse.
    pub(crate) fn apply_edits(&mut self, edits: &[TextEdit]) -> Result<(), EditError> {
        let text = splice(&self.text, edits)?;
        let tree = parse_tree(&text)?;
        self.lines = LineIndex::new(&text);
        self.text = text;
        self.tree = tree;
        self.snapshot = SnapshotId::next();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOURCE: &str = "package demo\n\nfunc f() {\n\tx := `a\n\nb`\n\n\t_ = x\n}\n";

    #[test]
    fn package_name() {
        let file = GoFile::parse(SOURCE).unwrap();
        assert_eq!(file.package_name(), Some("demo"));
    }

    #[test]
    fn line_spans() {
        let lines = LineIndex::new("ab\n\ncd");
        assert_eq!(lines.line_span(1), Some(TextRange::new(0, 2)));
        assert_eq!(lines.line_span(2), Some(TextRange::new(3, 3)));
        assert_eq!(lines.line_span(3), Some(TextRange::new(4, 6)));
        assert_eq!(lines.line_span(0), None);
        assert_eq!(lines.line_span(4), None);
        assert_eq!(lines.line_of(3), 2);
        assert_eq!(lines.offset_of(3, 2), Some(5));
    }

    #[test]
    fn leaf_at_identifier() {
        let file = GoFile::parse(SOURCE).unwrap();
        let offset = SOURCE.find("x :=").unwrap();
        let leaf = file.leaf_at(offset).unwrap();
        assert_eq!(leaf.kind(), "identifier");
        assert_eq!(file.node_text(leaf), "x");
    }

    #[test]
    fn blank_line_is_whitespace() {
        let file = GoFile::parse(SOURCE).unwrap();
        let offset = SOURCE.find("\n\n\t_").unwrap() + 1;
        let ws = file.whitespace_at(offset).unwrap();
        assert_eq!(file.slice(ws.range), Some("\n"));
    }

    #[test]
    fn blank_line_inside_raw_string_is_not_whitespace() {
        let file = GoFile::parse(SOURCE).unwrap();
        let offset = SOURCE.find("\n\nb`").unwrap() + 1;
        assert_eq!(file.whitespace_at(offset), None);
    }

    #[test]
    fn fragments() {
        assert!(parse_fragment("x++", FragmentKind::IncDec).is_ok());
        assert!(parse_fragment("x += 2", FragmentKind::Assignment).is_ok());
        assert!(parse_fragment("x += 2", FragmentKind::IncDec).is_err());
        assert!(parse_fragment("len(s) == 0", FragmentKind::Expression).is_ok());
        assert!(parse_fragment("io.Writer", FragmentKind::Type).is_ok());
        assert!(parse_fragment("a, b", FragmentKind::Expression).is_err());
        assert!(parse_fragment("func (", FragmentKind::Type).is_err());
        assert!(parse_fragment("", FragmentKind::Expression).is_err());
    }

    #[test]
    fn apply_edits_bumps_snapshot() {
        let mut file = GoFile::parse("package a\n\nvar x = 1\n").unwrap();
        let before = file.snapshot();
        let offset = file.text().find('x').unwrap();
        file.apply_edits(&[TextEdit::replace(TextRange::new(offset, offset + 1), "y")])
            .unwrap();
        assert_eq!(file.text(), "package a\n\nvar y = 1\n");
        assert_ne!(file.snapshot(), before);
    }

    #[test]
    fn splice_rejects_overlap() {
        let edits = [
            TextEdit::delete(TextRange::new(0, 3)),
            TextEdit::delete(TextRange::new(2, 4)),
        ];
        assert!(matches!(
            splice("abcdef", &edits),
            Err(EditError::Overlap(_))
        ));
    }
}
