use crate::source::GoFile;
use crate::syntax::{Element, SyntaxKind};

/// Walk up from the leaf at `offset` and return the first node whose kind
/// satisfies `predicate`.
///
/// Only the ancestor chain of that leaf is searched: siblings never match.
pub fn resolve<'t>(
    file: &'t GoFile,
    offset: usize,
    predicate: impl Fn(SyntaxKind) -> bool,
) -> Option<Element<'t>> {
    let mut node = file.leaf_at(offset);
    while let Some(current) = node {
        let element = Element::new(current);
        if predicate(element.kind()) {
            tracing::trace!(offset, kind = ?element.kind(), range = ?element.range(), "anchor");
            return Some(element);
        }
        node = current.parent();
    }
    None
}

/// [`resolve`] for a single kind.
pub fn resolve_kind(file: &GoFile, offset: usize, kind: SyntaxKind) -> Option<Element<'_>> {
    resolve(file, offset, |candidate| candidate == kind)
}

/// The nearest declaration-like ancestor.
pub fn resolve_named(file: &GoFile, offset: usize) -> Option<Element<'_>> {
    resolve(file, offset, SyntaxKind::is_named_element)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOURCE: &str = "package a\n\nfunc f(w *os.File) {\n\tx := 1\n\tx = x + 1\n}\n";

    #[test]
    fn nearest_named_element() {
        let file = GoFile::parse(SOURCE).unwrap();
        let offset = SOURCE.find("x :=").unwrap();
        let element = resolve_named(&file, offset).unwrap();
        assert_eq!(element.kind(), SyntaxKind::VarDefinition);

        // A reference is not a declaration: the walk reaches the function.
        let offset = SOURCE.find("x = x").unwrap();
        let element = resolve_named(&file, offset).unwrap();
        assert_eq!(element.kind(), SyntaxKind::FunctionDeclaration);
    }

    #[test]
    fn parameter_declaration() {
        let file = GoFile::parse(SOURCE).unwrap();
        let offset = SOURCE.find("os.File").unwrap();
        let element = resolve_kind(&file, offset, SyntaxKind::ParameterDeclaration).unwrap();
        assert_eq!(file.node_text(element.node()), "w *os.File");
    }

    #[test]
    fn no_match_before_root() {
        let file = GoFile::parse(SOURCE).unwrap();
        assert!(resolve_kind(&file, 0, SyntaxKind::AssignmentStatement).is_none());
        assert!(resolve_named(&file, SOURCE.len() + 10).is_none());
    }
}
