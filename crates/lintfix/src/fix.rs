//! Candidate edits produced by the handlers.
//!
//! A [`Fix`] is plain data: it can be inspected, previewed, and applied at
//! most once, and only to the snapshot it was computed from.
use crate::range::TextRange;
use crate::source::{EditError, GoFile, SnapshotId, TextEdit, splice};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FixKind {
    Replace,
    Delete,
    Rename,
    /// Stands in for a fix that is not implemented. Applying it does nothing.
    Noop,
}

#[derive(Debug, thiserror::Error)]
pub enum ApplyError {
    #[error("fix was computed for another snapshot of the file")]
    Stale,
    #[error(transparent)]
    Edit(#[from] EditError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fix {
    label: String,
    kind: FixKind,
    edits: Vec<TextEdit>,
    snapshot: SnapshotId,
}

impl Fix {
    fn new(file: &GoFile, label: String, kind: FixKind, edits: Vec<TextEdit>) -> Self {
        Self {
            label,
            kind,
            edits,
            snapshot: file.snapshot(),
        }
    }

    pub(crate) fn replace(
        file: &GoFile,
        label: impl Into<String>,
        range: TextRange,
        replacement: impl Into<String>,
    ) -> Self {
        Self::new(
            file,
            label.into(),
            FixKind::Replace,
            vec![TextEdit::replace(range, replacement)],
        )
    }

    pub(crate) fn delete(
        file: &GoFile,
        label: impl Into<String>,
        ranges: impl IntoIterator<Item = TextRange>,
    ) -> Self {
        let edits = ranges.into_iter().map(TextEdit::delete).collect();
        Self::new(file, label.into(), FixKind::Delete, edits)
    }

    pub(crate) fn rename(file: &GoFile, label: impl Into<String>, edits: Vec<TextEdit>) -> Self {
        Self::new(file, label.into(), FixKind::Rename, edits)
    }

    pub(crate) fn noop(file: &GoFile, label: impl Into<String>) -> Self {
        Self::new(file, label.into(), FixKind::Noop, Vec::new())
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub const fn kind(&self) -> FixKind {
        self.kind
    }

    pub fn edits(&self) -> &[TextEdit] {
        &self.edits
    }

    pub const fn snapshot(&self) -> SnapshotId {
        self.snapshot
    }

    pub fn is_applicable(&self, file: &GoFile) -> bool {
        self.snapshot == file.snapshot()
    }

    /// The text `file` would have after applying this fix.
    pub fn preview(&self, file: &GoFile) -> Result<String, ApplyError> {
        if !self.is_applicable(file) {
            return Err(ApplyError::Stale);
        }
        Ok(splice(file.text(), &self.edits)?)
    }

    /// Apply every edit in one step. The file is reparsed and gets a new
    /// snapshot, which makes every other fix computed for it stale.
    pub fn apply(self, file: &mut GoFile) -> Result<(), ApplyError> {
        if !self.is_applicable(file) {
            return Err(ApplyError::Stale);
        }
        if self.kind == FixKind::Noop {
            return Ok(());
        }
        tracing::trace!(label = %self.label, edits = self.edits.len(), "applying fix");
        file.apply_edits(&self.edits)?;
        Ok(())
    }
}

/// The fixes offered for one diagnostic, primary first, and the range to
/// highlight.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FixResult {
    pub fixes: Vec<Fix>,
    pub highlight: Option<TextRange>,
}

impl FixResult {
    pub const fn new(fixes: Vec<Fix>, highlight: Option<TextRange>) -> Self {
        Self { fixes, highlight }
    }

    pub fn is_empty(&self) -> bool {
        self.fixes.is_empty()
    }

    /// The first fix that actually edits something.
    pub fn primary(&self) -> Option<&Fix> {
        self.fixes.iter().find(|fix| fix.kind != FixKind::Noop)
    }

    pub fn into_primary(self) -> Option<Fix> {
        self.fixes.into_iter().find(|fix| fix.kind != FixKind::Noop)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOURCE: &str = "package a\n\nvar x = 1\n";

    #[test]
    fn apply_once() {
        let mut file = GoFile::parse(SOURCE).unwrap();
        let start = SOURCE.find('x').unwrap();
        let rename = Fix::replace(&file, "Rename to 'y'", TextRange::new(start, start + 1), "y");
        let delete = Fix::delete(&file, "Delete variable 'x'", [TextRange::new(11, 21)]);

        assert_eq!(rename.preview(&file).unwrap(), "package a\n\nvar y = 1\n");
        rename.apply(&mut file).unwrap();
        assert_eq!(file.text(), "package a\n\nvar y = 1\n");

        assert!(matches!(delete.apply(&mut file), Err(ApplyError::Stale)));
        assert_eq!(file.text(), "package a\n\nvar y = 1\n");
    }

    #[test]
    fn noop_changes_nothing() {
        let mut file = GoFile::parse(SOURCE).unwrap();
        let snapshot = file.snapshot();
        let result = FixResult::new(vec![Fix::noop(&file, "Not implemented")], None);
        assert!(result.primary().is_none());

        let fix = result.fixes.into_iter().next().unwrap();
        fix.apply(&mut file).unwrap();
        assert_eq!(file.snapshot(), snapshot);
    }

    #[test]
    fn overlapping_edits_are_rejected() {
        let mut file = GoFile::parse(SOURCE).unwrap();
        let fix = Fix::delete(
            &file,
            "Delete",
            [TextRange::new(11, 15), TextRange::new(13, 18)],
        );
        assert!(matches!(
            fix.apply(&mut file),
            Err(ApplyError::Edit(EditError::Overlap(_)))
        ));
        assert_eq!(file.text(), SOURCE);
    }
}
