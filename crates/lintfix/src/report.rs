//! The JSON report written by `golangci-lint run --out-format json`.
use itertools::Itertools;
use serde::Deserialize;

use crate::diagnostic::Diagnostic;
use crate::source::LineIndex;

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("malformed golangci-lint report: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Report {
    // `null` when there are no issues.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub issues: Vec<Issue>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<Issue>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<Issue>>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Issue {
    pub from_linter: String,
    pub text: String,
    pub pos: Position,
    #[serde(default)]
    pub line_range: Option<IssueLines>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Position {
    pub filename: String,
    #[serde(default)]
    pub offset: usize,
    #[serde(default)]
    pub line: usize,
    #[serde(default)]
    pub column: usize,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct IssueLines {
    pub from: usize,
    pub to: usize,
}

impl Report {
    pub fn parse(json: &str) -> Result<Self, ReportError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Issues grouped by file, files sorted by name.
    pub fn by_file(&self) -> Vec<(&str, Vec<&Issue>)> {
        self.issues
            .iter()
            .into_group_map_by(|issue| issue.pos.filename.as_str())
            .into_iter()
            .sorted_by_key(|(filename, _)| *filename)
            .collect()
    }
}

impl Issue {
    /// The issue as a diagnostic against a file with the given lines.
    ///
    /// Some linters report no byte offset; their position is recomputed
    /// from line and column.
    pub fn diagnostic(&self, lines: &LineIndex) -> Diagnostic {
        let offset = if self.pos.offset == 0 && self.pos.line > 1 {
            lines
                .offset_of(self.pos.line, self.pos.column)
                .unwrap_or_default()
        } else {
            self.pos.offset
        };
        let diagnostic = Diagnostic::new(&self.from_linter, &self.text, offset);
        match self.line_range {
            Some(lines) => diagnostic.with_line_range(lines.from, lines.to),
            None => diagnostic,
        }
    }
}
