//! gocritic reports many checks under one tool name; the check is the
//! message prefix.
use super::{Context, HandlerResult, NoFix};
use crate::anchor;
use crate::diagnostic::Diagnostic;
use crate::fix::{Fix, FixResult};
use crate::message;
use crate::range::TextRange;
use crate::source::{FragmentKind, parse_fragment};
use crate::syntax::SyntaxKind;

fn replacement(ctx: &Context<'_>, range: TextRange, text: &str) -> FixResult {
    let fix = Fix::replace(ctx.file, format!("Replace with '{text}'"), range, text);
    FixResult::new(vec![fix], Some(range))
}

fn assign_op(ctx: &Context<'_>, diagnostic: &Diagnostic) -> HandlerResult {
    let suggestion = message::assign_op(&diagnostic.message).ok_or(NoFix::PatternMismatch)?;
    let statement =
        anchor::resolve_kind(ctx.file, diagnostic.offset, SyntaxKind::AssignmentStatement)
            .ok_or(NoFix::AnchorNotFound)?;
    if ctx.file.node_text(statement.node()) != suggestion.current {
        return Err(NoFix::AnchorMismatch);
    }

    let kind = if suggestion.suggested.ends_with("++") || suggestion.suggested.ends_with("--") {
        FragmentKind::IncDec
    } else {
        FragmentKind::Assignment
    };
    parse_fragment(suggestion.suggested, kind)?;
    Ok(replacement(ctx, statement.range(), suggestion.suggested))
}

fn sloppy_len(ctx: &Context<'_>, diagnostic: &Diagnostic) -> HandlerResult {
    let suggested = message::sloppy_len(&diagnostic.message).ok_or(NoFix::PatternMismatch)?;
    let condition =
        anchor::resolve_kind(ctx.file, diagnostic.offset, SyntaxKind::ConditionalExpression)
            .ok_or(NoFix::AnchorNotFound)?;
    let current = ctx.file.node_text(condition.node());
    if !diagnostic.message.contains(current) {
        return Err(NoFix::AnchorMismatch);
    }
    if current == suggested {
        return Err(NoFix::Precondition("condition is already simplified"));
    }

    parse_fragment(suggested, FragmentKind::Expression)?;
    Ok(replacement(ctx, condition.range(), suggested))
}

fn unslice(ctx: &Context<'_>, diagnostic: &Diagnostic) -> HandlerResult {
    message::unslice(&diagnostic.message).ok_or(NoFix::PatternMismatch)?;
    let expression =
        anchor::resolve_kind(ctx.file, diagnostic.offset, SyntaxKind::IndexOrSliceExpression)
            .ok_or(NoFix::AnchorNotFound)?;
    if !diagnostic.message.contains(ctx.file.node_text(expression.node())) {
        return Err(NoFix::AnchorMismatch);
    }

    let operand = expression.operand().ok_or(NoFix::AnchorMismatch)?;
    Ok(replacement(ctx, expression.range(), ctx.file.node_text(operand)))
}

pub fn gocritic(ctx: &Context<'_>, diagnostic: &Diagnostic) -> HandlerResult {
    let check = diagnostic
        .message
        .split_once(':')
        .map(|(check, _)| check)
        .ok_or(NoFix::PatternMismatch)?;
    match check {
        "assignOp" => assign_op(ctx, diagnostic),
        "sloppyLen" => sloppy_len(ctx, diagnostic),
        "unslice" => unslice(ctx, diagnostic),
        _ => Err(NoFix::PatternMismatch),
    }
}

#[cfg(test)]
mod tests {
    use crate::{test_fix, test_no_fix};

    macro_rules! test_gocritic {
        ($name:ident, $message:expr, $source:expr, $expected:expr) => {
            test_fix!($name, "gocritic", $message, $source, $expected);
        };
    }

    macro_rules! test_gocritic_no_fix {
        ($name:ident, $message:expr, $source:expr) => {
            test_no_fix!($name, "gocritic", $message, $source);
        };
    }

    test_gocritic!(
        assign_op_increment,
        "assignOp: replace `x = x + 1` with `x++`",
        "package a\n\nfunc f(x int) {\n\t$0x = x + 1\n}\n",
        "package a\n\nfunc f(x int) {\n\tx++\n}\n"
    );
    test_gocritic!(
        assign_op_compound,
        "assignOp: replace `n = n * 2` with `n *= 2`",
        "package a\n\nfunc f(n int) {\n\tn = $0n * 2\n}\n",
        "package a\n\nfunc f(n int) {\n\tn *= 2\n}\n"
    );
    test_gocritic!(
        sloppy_len_comparison,
        "sloppyLen: len(arr) <= 0 can be len(arr) == 0",
        "package a\n\nfunc f(arr []int) bool {\n\treturn $0len(arr) <= 0\n}\n",
        "package a\n\nfunc f(arr []int) bool {\n\treturn len(arr) == 0\n}\n"
    );
    test_gocritic!(
        unslice_operand,
        "unslice: could simplify s[:] to s",
        "package a\n\nfunc f(s []byte) []byte {\n\treturn $0s[:]\n}\n",
        "package a\n\nfunc f(s []byte) []byte {\n\treturn s\n}\n"
    );

    test_gocritic_no_fix!(
        assign_op_other_statement,
        "assignOp: replace `x = x + 1` with `x++`",
        "package a\n\nfunc f(x, y int) {\n\t$0y = y + 1\n}\n"
    );
    test_gocritic_no_fix!(
        assign_op_invalid_replacement,
        "assignOp: replace `x = x + 1` with `x +`",
        "package a\n\nfunc f(x int) {\n\t$0x = x + 1\n}\n"
    );
    test_gocritic_no_fix!(
        sloppy_len_without_marker,
        "sloppyLen: len(arr) <= 0 is suspicious",
        "package a\n\nfunc f(arr []int) bool {\n\treturn $0len(arr) <= 0\n}\n"
    );
    test_gocritic_no_fix!(
        sloppy_len_already_simplified,
        "sloppyLen: len(arr) <= 0 can be len(arr) == 0",
        "package a\n\nfunc f(arr []int) bool {\n\treturn $0len(arr) == 0\n}\n"
    );
    test_gocritic_no_fix!(
        unslice_not_in_message,
        "unslice: could simplify t[:] to t",
        "package a\n\nfunc f(s []byte) []byte {\n\treturn $0s[:]\n}\n"
    );
    test_gocritic_no_fix!(
        unknown_check,
        "captLocal: `X' should not be capitalized",
        "package a\n\nfunc f($0X int) {}\n"
    );
}
