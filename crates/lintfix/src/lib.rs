pub mod cli;
pub mod diagnostic;
pub mod range;
pub mod registry;
pub mod text_diff;
pub mod tracing_config;

pub mod anchor;
pub mod binding;
pub mod edit;
pub mod fix;
pub mod handlers;
pub mod linter;
pub mod linters;
pub mod message;
pub mod oracle;
pub mod scope;
pub mod source;
pub mod syntax;

#[cfg(feature = "serde")]
pub mod report;

#[doc(hidden)]
pub mod macros;
