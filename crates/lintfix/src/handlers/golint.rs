use super::{Context, HandlerResult, NoFix, rename};
use crate::anchor;
use crate::diagnostic::Diagnostic;
use crate::fix::FixResult;
use crate::message;
use crate::range::TextRange;
use crate::syntax::{Element, SyntaxKind};

fn declaration_name(ctx: &Context<'_>, diagnostic: &Diagnostic) -> HandlerResult {
    let names = message::declaration_name(&diagnostic.message).ok_or(NoFix::PatternMismatch)?;
    let element =
        anchor::resolve_named(ctx.file, diagnostic.offset).ok_or(NoFix::AnchorNotFound)?;
    let identifier = element.identifier().ok_or(NoFix::AnchorMismatch)?;
    if ctx.file.node_text(identifier) != names.current {
        return Err(NoFix::AnchorMismatch);
    }

    let fix = rename(ctx.file, element, names.suggested)?;
    Ok(FixResult::new(vec![fix], Some(TextRange::of(identifier))))
}

fn receiver_name(ctx: &Context<'_>, diagnostic: &Diagnostic) -> HandlerResult {
    let names = message::receiver_name(&diagnostic.message).ok_or(NoFix::PatternMismatch)?;
    let method =
        anchor::resolve_kind(ctx.file, diagnostic.offset, SyntaxKind::MethodDeclaration)
            .ok_or(NoFix::AnchorNotFound)?;
    let receiver = method.receiver_identifier().ok_or(NoFix::AnchorMismatch)?;
    if ctx.file.node_text(receiver) != names.current {
        return Err(NoFix::AnchorMismatch);
    }

    let fix = rename(ctx.file, Element::new(receiver), names.suggested)?;
    Ok(FixResult::new(vec![fix], Some(TextRange::of(receiver))))
}

/// `http.HTTPServer` stutters; only types whose name repeats the package
/// name are renamed.
fn type_stutter(ctx: &Context<'_>, diagnostic: &Diagnostic) -> HandlerResult {
    let suggested = message::type_stutter(&diagnostic.message).ok_or(NoFix::PatternMismatch)?;
    let spec = anchor::resolve_kind(ctx.file, diagnostic.offset, SyntaxKind::TypeSpec)
        .ok_or(NoFix::AnchorNotFound)?;
    let identifier = spec.identifier().ok_or(NoFix::AnchorMismatch)?;

    let package = ctx.file.package_name().unwrap_or_default().to_lowercase();
    if !ctx
        .file
        .node_text(identifier)
        .to_lowercase()
        .starts_with(&package)
    {
        return Err(NoFix::AnchorMismatch);
    }

    let fix = rename(ctx.file, spec, suggested)?;
    Ok(FixResult::new(vec![fix], Some(TextRange::of(identifier))))
}

pub fn golint(ctx: &Context<'_>, diagnostic: &Diagnostic) -> HandlerResult {
    let text = diagnostic.message.as_str();
    if text.starts_with("var ") || text.starts_with("const ") {
        declaration_name(ctx, diagnostic)
    } else if text.starts_with("receiver name ") {
        receiver_name(ctx, diagnostic)
    } else if text.starts_with("type name will be used as ") {
        type_stutter(ctx, diagnostic)
    } else {
        Err(NoFix::PatternMismatch)
    }
}
