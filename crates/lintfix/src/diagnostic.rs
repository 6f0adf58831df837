#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Inclusive, 1-based line range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LineRange {
    pub from: usize,
    pub to: usize,
}

impl LineRange {
    pub const fn new(from: usize, to: usize) -> Self {
        Self { from, to }
    }
}

/// One issue as reported by an external tool. Only `offset` is trusted to
/// point into the file; `message` is free text whose wording may change.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Diagnostic {
    /// Name of the reporting tool, as `golangci-lint` spells it.
    pub tool: String,
    pub message: String,
    /// Byte offset into the file.
    pub offset: usize,
    pub line_range: Option<LineRange>,
}

impl Diagnostic {
    pub fn new(tool: impl Into<String>, message: impl Into<String>, offset: usize) -> Self {
        Self {
            tool: tool.into(),
            message: message.into(),
            offset,
            line_range: None,
        }
    }

    #[must_use]
    pub fn with_line_range(mut self, from: usize, to: usize) -> Self {
        self.line_range = Some(LineRange::new(from, to));
        self
    }
}
