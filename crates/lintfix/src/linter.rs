//! Driver: routes diagnostics to handlers, and applies their fixes.
use colored::Colorize;
use std::collections::HashMap;

use crate::diagnostic::{Diagnostic, LineRange};
use crate::fix::FixResult;
use crate::handlers::Context;
use crate::oracle::{LocalUsageOracle, UsageOracle};
use crate::range::TextRange;
use crate::registry::{Tool, name_to_tool};
use crate::source::{GoFile, LineIndex, SourceError, TextEdit};

type Config<'a> = &'a [Tool];

pub type Counter = HashMap<Tool, usize>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("no handler for tool `{0}`")]
pub struct UnsupportedTool(pub String);

/// Fixes for one diagnostic, judged by the default [`LocalUsageOracle`].
pub fn suggest_fix(file: &GoFile, diagnostic: &Diagnostic) -> Result<FixResult, UnsupportedTool> {
    suggest_fix_with(file, diagnostic, &LocalUsageOracle)
}

/// Fixes for one diagnostic.
///
/// Whatever goes wrong inside a handler ends here as an empty result; only
/// a tool without a handler is reported as an error.
pub fn suggest_fix_with(
    file: &GoFile,
    diagnostic: &Diagnostic,
    oracle: &dyn UsageOracle,
) -> Result<FixResult, UnsupportedTool> {
    let tool = name_to_tool(&diagnostic.tool)
        .ok_or_else(|| UnsupportedTool(diagnostic.tool.clone()))?;
    let ctx = Context { file, oracle };

    match tool.handler()(&ctx, diagnostic) {
        Ok(result) => Ok(result),
        Err(reason) => {
            tracing::debug!(
                %tool,
                offset = diagnostic.offset,
                message = %diagnostic.message,
                %reason,
                "no fix"
            );
            Ok(FixResult::default())
        }
    }
}

/// Like [`suggest_fix`], with unsupported tools yielding nothing.
pub fn suggest(file: &GoFile, diagnostic: &Diagnostic) -> FixResult {
    suggest_fix(file, diagnostic).unwrap_or_default()
}

fn selected<'d>(
    diagnostics: &'d [Diagnostic],
    config: Config<'_>,
) -> impl Iterator<Item = (Tool, &'d Diagnostic)> {
    diagnostics.iter().filter_map(move |diagnostic| {
        name_to_tool(&diagnostic.tool)
            .filter(|tool| config.contains(tool))
            .map(|tool| (tool, diagnostic))
    })
}

/// Where `offset` ends up once `edits` are applied. Offsets inside an
/// edited range move to its start.
fn map_offset(offset: usize, edits: &[TextEdit]) -> usize {
    let target = edits
        .iter()
        .find(|edit| edit.range.start() < offset && offset < edit.range.end())
        .map_or(offset, |edit| edit.range.start());
    let (inserted, removed) = edits
        .iter()
        .filter(|edit| edit.range.end() <= target && !edit.range.is_empty())
        .fold((0, 0), |(inserted, removed), edit| {
            (inserted + edit.replacement.len(), removed + edit.range.len())
        });
    target + inserted - removed
}

/// Move a pending diagnostic through the edits of an applied fix.
fn remap(diagnostic: &mut Diagnostic, edits: &[TextEdit], before: &LineIndex, after: &LineIndex) {
    diagnostic.offset = map_offset(diagnostic.offset, edits);
    diagnostic.line_range = diagnostic.line_range.and_then(|lines| {
        let start = before.line_span(lines.from)?.start();
        let end = before.line_span(lines.to)?.end();
        let start = map_offset(start, edits);
        let end = map_offset(end, edits).max(start);
        Some(LineRange::new(after.line_of(start), after.line_of(end)))
    });
}

/// Apply the primary fix of every selected diagnostic, one at a time.
///
/// Diagnostics are handled from the end of the file backwards, and each is
/// resolved against the text as it is after the previous fixes.
pub fn fix(
    text: &str,
    diagnostics: &[Diagnostic],
    config: Config,
) -> Result<(String, Counter), SourceError> {
    let mut file = GoFile::parse(text)?;
    let mut fixed = Counter::new();

    let mut pending: Vec<(Tool, Diagnostic)> = selected(diagnostics, config)
        .filter(|(tool, _)| tool.has_fix())
        .map(|(tool, diagnostic)| (tool, diagnostic.clone()))
        .collect();
    // Popped from the back: largest offset first.
    pending.sort_by_key(|(_, diagnostic)| diagnostic.offset);

    while let Some((tool, diagnostic)) = pending.pop() {
        let Some(fix) = suggest(&file, &diagnostic).into_primary() else {
            continue;
        };
        let edits = fix.edits().to_vec();
        let before = file.lines().clone();
        if let Err(err) = fix.apply(&mut file) {
            tracing::warn!(%tool, offset = diagnostic.offset, %err, "fix not applied");
            continue;
        }
        *fixed.entry(tool).or_insert(0) += 1;

        for (_, later) in &mut pending {
            remap(later, &edits, &before, file.lines());
        }
    }

    Ok((file.text().to_string(), fixed))
}

/// The line holding `range`, with the range coloured.
fn get_context_message(file: &GoFile, range: TextRange) -> String {
    let lines = file.lines();
    let line = lines.line_of(range.start());
    let Some(span) = lines.line_span(line) else {
        return String::new();
    };
    let end = range.end().min(span.end()).max(range.start());

    let text = file.text();
    let prefix = text.get(span.start()..range.start()).unwrap_or_default();
    let highlighted = text.get(range.start()..end).unwrap_or_default();
    let suffix = text.get(end..span.end()).unwrap_or_default();

    format!("{:>5} | {}{}{}", line, prefix, highlighted.red(), suffix)
        .trim_end()
        .to_string()
}

fn get_rich_context_message(file: &GoFile, diagnostic: &Diagnostic, tool: Tool) -> String {
    let result = suggest(file, diagnostic);
    let offset = diagnostic.offset.min(file.text().len());
    let range = result
        .highlight
        .unwrap_or_else(|| TextRange::new(offset, offset));

    let lines = file.lines();
    let line = lines.line_of(range.start());
    let column = lines
        .line_span(line)
        .map_or(1, |span| range.start() - span.start() + 1);

    let fixable = if result.primary().is_some() {
        format!("[{}]", "*".to_string().cyan())
    } else {
        "   ".to_string()
    };
    format!(
        "{}:{}: {:<11} {} {}\n{}",
        line,
        column,
        format!("{tool}").cyan(),
        fixable,
        diagnostic.message,
        get_context_message(file, range)
    )
}

/// Render every selected diagnostic with its context, without fixing.
pub fn lint_only(
    text: &str,
    diagnostics: &[Diagnostic],
    config: Config,
) -> Result<(Vec<String>, Counter), SourceError> {
    let file = GoFile::parse(text)?;
    let mut statistics = Counter::new();
    let messages = selected(diagnostics, config)
        .map(|(tool, diagnostic)| {
            *statistics.entry(tool).or_insert(0) += 1;
            get_rich_context_message(&file, diagnostic, tool)
        })
        .collect();

    Ok((messages, statistics))
}
