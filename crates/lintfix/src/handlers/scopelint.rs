use super::{Context, HandlerResult};
use crate::diagnostic::Diagnostic;
use crate::fix::{Fix, FixResult};

/// Loop variables captured by a closure. The fix is left to the user, so
/// the only offer is a stub that changes nothing.
pub fn scopelint(ctx: &Context<'_>, _diagnostic: &Diagnostic) -> HandlerResult {
    let stub = Fix::noop(ctx.file, "Copy the loop variable before capturing it");
    Ok(FixResult::new(vec![stub], None))
}
