use super::{Context, HandlerResult, NoFix};
use crate::diagnostic::Diagnostic;
use crate::fix::{Fix, FixResult};
use crate::message;
use crate::range::TextRange;
use crate::source::TextEdit;
use crate::syntax::{SyntaxKind, in_field};

/// Blank out the target of an assignment whose value is never read.
///
/// Definitions (`x := 1`) are left alone: renaming them would break the
/// uses further down. Only a plain `=` target can become `_`.
pub fn ineffassign(ctx: &Context<'_>, diagnostic: &Diagnostic) -> HandlerResult {
    let variable =
        message::ineffectual_assignment(&diagnostic.message).ok_or(NoFix::PatternMismatch)?;

    let reference = ctx
        .file
        .leaf_at(diagnostic.offset)
        .ok_or(NoFix::AnchorNotFound)?;
    if SyntaxKind::of(reference) != SyntaxKind::ReferenceExpression
        || ctx.file.node_text(reference) != variable
    {
        return Err(NoFix::AnchorMismatch);
    }

    let assignment = reference
        .parent()
        .filter(|list| list.kind() == "expression_list")
        .and_then(|list| list.parent().filter(|statement| in_field(*statement, "left", list)))
        .filter(|statement| statement.kind() == "assignment_statement")
        .filter(|statement| {
            statement
                .child_by_field_name("operator")
                .is_some_and(|operator| operator.kind() == "=")
        });
    if assignment.is_none() {
        return Err(NoFix::Precondition("only plain assignment targets can be blanked"));
    }

    let range = TextRange::of(reference);
    let fix = Fix::rename(ctx.file, "Rename to _", vec![TextEdit::replace(range, "_")]);
    Ok(FixResult::new(vec![fix], Some(range)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linter::suggest;
    use crate::source::GoFile;
    use crate::{test_fix, test_no_fix};

    macro_rules! test_ineffassign {
        ($name:ident, $message:expr, $source:expr, $expected:expr) => {
            test_fix!($name, "ineffassign", $message, $source, $expected);
        };
    }

    #[test]
    fn one_rename_highlighting_the_reference() {
        let source = "package a\n\nfunc f() {\n\tx := 1\n\tx = 2\n\tx = 3\n\t_ = x\n}\n";
        let offset = source.find("x = 2").unwrap();
        let file = GoFile::parse(source).unwrap();
        let diagnostic = Diagnostic::new("ineffassign", "ineffectual assignment to `x`", offset);
        let result = suggest(&file, &diagnostic);
        assert_eq!(result.fixes.len(), 1);
        assert_eq!(result.fixes[0].label(), "Rename to _");
        assert_eq!(result.highlight, Some(TextRange::new(offset, offset + 1)));
    }

    test_ineffassign!(
        blank_reference,
        "ineffectual assignment to `err`",
        "package a\n\nfunc f() {\n\tv, err := g()\n\tv, $0err = g()\n\t_ = v\n}\n",
        "package a\n\nfunc f() {\n\tv, err := g()\n\tv, _ = g()\n\t_ = v\n}\n"
    );
    test_ineffassign!(
        unquoted_name,
        "ineffectual assignment to n",
        "package a\n\nfunc f() {\n\tn := 0\n\t$0n = 1\n}\n",
        "package a\n\nfunc f() {\n\tn := 0\n\t_ = 1\n}\n"
    );

    test_no_fix!(
        definition_is_kept,
        "ineffassign",
        "ineffectual assignment to `x`",
        "package a\n\nfunc f() {\n\t$0x := 1\n}\n"
    );
    test_no_fix!(
        other_name,
        "ineffassign",
        "ineffectual assignment to `y`",
        "package a\n\nfunc f() {\n\tx := 0\n\t$0x = 1\n}\n"
    );
    test_no_fix!(
        compound_assignment,
        "ineffassign",
        "ineffectual assignment to `x`",
        "package a\n\nfunc f() {\n\tx := 0\n\t$0x += 1\n}\n"
    );
    test_no_fix!(
        increment,
        "ineffassign",
        "ineffectual assignment to `x`",
        "package a\n\nfunc f() {\n\tx := 0\n\t$0x++\n}\n"
    );
    test_no_fix!(
        unknown_message,
        "ineffassign",
        "x is never used",
        "package a\n\nfunc f() {\n\tx := 0\n\t$0x = 1\n}\n"
    );
}
