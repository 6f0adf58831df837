use super::{Context, HandlerResult, NoFix};
use crate::diagnostic::Diagnostic;
use crate::fix::{Fix, FixResult};
use crate::range::TextRange;

/// Delete the blank lines the tool reports at the start or end of a block.
///
/// Lines inside string literals or comments are not whitespace and stay.
pub fn whitespace(ctx: &Context<'_>, diagnostic: &Diagnostic) -> HandlerResult {
    let lines = diagnostic
        .line_range
        .ok_or(NoFix::Precondition("whitespace diagnostics need a line range"))?;

    let mut highlight: Option<TextRange> = None;
    let mut newlines = Vec::new();
    for line in lines.from..=lines.to {
        let span = ctx.file.lines().line_span(line).ok_or(NoFix::AnchorNotFound)?;
        highlight = Some(highlight.map_or(span, |range| range.cover(span)));
        if !span.is_empty() {
            continue;
        }
        let blank = ctx
            .file
            .whitespace_at(span.start())
            .filter(|ws| ctx.file.slice(ws.range) == Some("\n"));
        newlines.extend(blank.map(|ws| ws.range));
    }

    if newlines.is_empty() {
        return Err(NoFix::Precondition("no blank line in the reported range"));
    }
    let fix = Fix::delete(ctx.file, "Remove blank lines", newlines);
    Ok(FixResult::new(vec![fix], highlight))
}
