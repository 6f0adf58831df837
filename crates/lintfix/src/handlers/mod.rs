//! One handler per tool. A handler turns a diagnostic into fixes, or says
//! why it cannot.
use crate::diagnostic::Diagnostic;
use crate::fix::{Fix, FixResult};
use crate::oracle::UsageOracle;
use crate::range::TextRange;
use crate::scope;
use crate::source::{FragmentError, GoFile, TextEdit};
use crate::syntax::Element;

mod goconst;
mod gocritic;
mod golint;
mod ineffassign;
mod interfacer;
mod scopelint;
mod unused;
mod whitespace;

pub use goconst::goconst;
pub use gocritic::gocritic;
pub use golint::golint;
pub use ineffassign::ineffassign;
pub use interfacer::interfacer;
pub use scopelint::scopelint;
pub use unused::unused;
pub use whitespace::whitespace;

/// What a handler works on.
pub struct Context<'a> {
    pub file: &'a GoFile,
    pub oracle: &'a dyn UsageOracle,
}

/// Why a diagnostic gets no fix.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NoFix {
    #[error("message does not have the expected shape")]
    PatternMismatch,
    #[error("no suitable syntax node at the reported offset")]
    AnchorNotFound,
    #[error("syntax node at the reported offset does not match the message")]
    AnchorMismatch,
    #[error("{0}")]
    Precondition(&'static str),
    #[error("`{0}` is not valid Go in that position")]
    InvalidFragment(String),
    #[error("no fix is implemented for this tool")]
    Unimplemented,
}

impl From<FragmentError> for NoFix {
    fn from(err: FragmentError) -> Self {
        match err {
            FragmentError::Invalid(text, _) => Self::InvalidFragment(text),
            FragmentError::Source(_) => Self::Precondition("the Go grammar failed to load"),
        }
    }
}

pub type HandlerResult = Result<FixResult, NoFix>;

pub type Handler = fn(&Context<'_>, &Diagnostic) -> HandlerResult;

/// Whether `name` is a valid Go identifier.
fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|first| first == '_' || first.is_alphabetic())
        && chars.all(|ch| ch == '_' || ch.is_alphanumeric())
}

/// Rename `definition` and its references to `new_name`.
///
/// A name already used inside the definition's scope could capture or be
/// captured by the renamed references, so it gets no fix.
fn rename(file: &GoFile, definition: Element<'_>, new_name: &str) -> Result<Fix, NoFix> {
    if !is_identifier(new_name) {
        return Err(NoFix::InvalidFragment(new_name.to_string()));
    }
    if scope::is_taken(file, scope::binding_scope(definition), new_name) {
        return Err(NoFix::Precondition("the new name is already in use"));
    }
    let edits = scope::references(file, definition)
        .into_iter()
        .map(|node| TextEdit::replace(TextRange::of(node), new_name))
        .collect();
    Ok(Fix::rename(file, format!("Rename to '{new_name}'"), edits))
}
