use super::{Context, HandlerResult, NoFix};
use crate::diagnostic::Diagnostic;

// Extracting a repeated literal into a constant needs a name and a place
// to declare it, neither of which the message provides.
pub fn goconst(_ctx: &Context<'_>, _diagnostic: &Diagnostic) -> HandlerResult {
    Err(NoFix::Unimplemented)
}
