//! Range arithmetic for deletions that should not leave debris behind.
use tree_sitter::Node;

use crate::range::TextRange;
use crate::source::GoFile;

fn is_blank(text: &str) -> bool {
    text.bytes().all(|b| b == b' ' || b == b'\t' || b == b'\r')
}

/// Start of the line holding `offset`.
pub fn line_start(text: &str, offset: usize) -> usize {
    text.get(..offset)
        .and_then(|head| head.rfind('\n'))
        .map_or(0, |idx| idx + 1)
}

/// Offset of the first newline at or after `offset`.
pub fn next_newline(text: &str, offset: usize) -> Option<usize> {
    Some(offset + text.get(offset..)?.find('\n')?)
}

/// Grow `range` to whole lines (trailing newline included) when nothing
/// but indentation shares those lines with it.
pub fn line_extended(file: &GoFile, range: TextRange) -> TextRange {
    let text = file.text();
    let start = line_start(text, range.start());
    let end = next_newline(text, range.end()).map_or(text.len(), |idx| idx + 1);

    let before = text.get(start..range.start()).unwrap_or("x");
    let after = text
        .get(range.end()..end)
        .map(|tail| tail.trim_end_matches('\n'))
        .unwrap_or("x");
    if is_blank(before) && is_blank(after) {
        TextRange::new(start, end)
    } else {
        range
    }
}

/// Where `node` starts once the comment lines directly above it are
/// counted as its documentation.
pub fn with_doc_comment(file: &GoFile, node: Node<'_>) -> usize {
    let text = file.text();
    let mut start = node.start_byte();
    let mut previous = node.prev_named_sibling();
    while let Some(comment) = previous.filter(|sibling| sibling.kind() == "comment") {
        let between = text.get(comment.end_byte()..start).unwrap_or("x");
        if between.matches('\n').count() != 1 || !between.trim().is_empty() {
            break;
        }
        // A trailing comment belongs to the line it ends.
        let indent = text
            .get(line_start(text, comment.start_byte())..comment.start_byte())
            .unwrap_or("x");
        if !is_blank(indent) {
            break;
        }
        start = comment.start_byte();
        previous = comment.prev_named_sibling();
    }
    start
}

/// The range removing `items[index]` from a comma separated list,
/// separator included.
pub fn list_element(items: &[Node<'_>], index: usize) -> Option<TextRange> {
    let item = items.get(index)?;
    if let Some(next) = items.get(index + 1) {
        Some(TextRange::new(item.start_byte(), next.start_byte()))
    } else {
        let previous = items.get(index.checked_sub(1)?)?;
        Some(TextRange::new(previous.end_byte(), item.end_byte()))
    }
}
