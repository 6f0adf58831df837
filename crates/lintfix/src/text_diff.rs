use colored::Colorize;
use similar::{ChangeTag, TextDiff};

/// A coloured unified diff of one file, as printed by `check --diff`.
pub struct CodeDiff<'a> {
    diff: TextDiff<'a, 'a, 'a, str>,
    header: Option<&'a str>,
    context: usize,
}

impl<'a> CodeDiff<'a> {
    pub fn new(original: &'a str, modified: &'a str) -> Self {
        Self {
            diff: TextDiff::from_lines(original, modified),
            header: None,
            context: 2,
        }
    }

    /// Print `path` above the hunks.
    #[must_use]
    pub fn with_header(mut self, path: &'a str) -> Self {
        self.header = Some(path);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.diff
            .iter_all_changes()
            .all(|change| change.tag() == ChangeTag::Equal)
    }
}

impl std::fmt::Display for CodeDiff<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            return Ok(());
        }
        if let Some(path) = self.header {
            writeln!(f, "--- {}", path.red())?;
            writeln!(f, "+++ {}", path.green())?;
        }

        let mut unified = self.diff.unified_diff();
        unified.context_radius(self.context);

        for hunk in unified.iter_hunks() {
            writeln!(f, "{}", hunk.header().to_string().cyan())?;
            for change in hunk.iter_changes() {
                let line = change.value().trim_end_matches('\n');
                match change.tag() {
                    ChangeTag::Equal => writeln!(f, " {line}")?,
                    ChangeTag::Delete => writeln!(f, "{}", format!("-{line}").red())?,
                    ChangeTag::Insert => writeln!(f, "{}", format!("+{line}").green())?,
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn changed_lines() {
        colored::control::set_override(false);
        let original = "package a\n\nvar userId = 1\n";
        let modified = "package a\n\nvar userID = 1\n";
        let diff = CodeDiff::new(original, modified).with_header("a.go").to_string();
        assert!(diff.starts_with("--- a.go\n+++ a.go\n@@"));
        assert!(diff.contains("\n-var userId = 1\n+var userID = 1\n"));
        assert!(CodeDiff::new(original, original).to_string().is_empty());
    }
}
