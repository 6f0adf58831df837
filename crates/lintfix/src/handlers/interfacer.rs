use super::{Context, HandlerResult, NoFix};
use crate::anchor;
use crate::diagnostic::Diagnostic;
use crate::fix::{Fix, FixResult};
use crate::message;
use crate::range::TextRange;
use crate::source::{FragmentKind, parse_fragment};
use crate::syntax::SyntaxKind;

/// Narrow a parameter's type to the interface the tool suggests.
pub fn interfacer(ctx: &Context<'_>, diagnostic: &Diagnostic) -> HandlerResult {
    let suggested = message::parameter_type(&diagnostic.message).ok_or(NoFix::PatternMismatch)?;
    let parameter =
        anchor::resolve_kind(ctx.file, diagnostic.offset, SyntaxKind::ParameterDeclaration)
            .ok_or(NoFix::AnchorNotFound)?;
    let ty = parameter.parameter_type().ok_or(NoFix::AnchorMismatch)?;
    if ctx.file.node_text(ty) == suggested {
        return Err(NoFix::Precondition("parameter already has the suggested type"));
    }
    parse_fragment(suggested, FragmentKind::Type)?;

    let range = TextRange::of(ty);
    let fix = Fix::replace(
        ctx.file,
        format!("Replace with '{suggested}'"),
        range,
        suggested,
    );
    Ok(FixResult::new(vec![fix], Some(range)))
}

#[cfg(test)]
mod tests {
    use crate::{test_fix, test_no_fix};

    test_fix!(
        narrow_parameter,
        "interfacer",
        "`w` can be `io.Writer`",
        "package a\n\nfunc f($0w *os.File) {\n\tw.Write(nil)\n}\n",
        "package a\n\nfunc f(w io.Writer) {\n\tw.Write(nil)\n}\n"
    );
    test_fix!(
        second_parameter,
        "interfacer",
        "`r` can be `fmt.Stringer`",
        "package a\n\nfunc f(n int, $0r *T) string {\n\treturn r.String()\n}\n",
        "package a\n\nfunc f(n int, r fmt.Stringer) string {\n\treturn r.String()\n}\n"
    );

    test_no_fix!(
        not_a_type,
        "interfacer",
        "`w` can be `io.(Writer`",
        "package a\n\nfunc f($0w *os.File) {}\n"
    );
    test_no_fix!(
        already_narrowed,
        "interfacer",
        "`w` can be `io.Writer`",
        "package a\n\nfunc f($0w io.Writer) {}\n"
    );
    test_no_fix!(
        outside_parameters,
        "interfacer",
        "`w` can be `io.Writer`",
        "package a\n\nvar $0w *os.File\n"
    );
}
