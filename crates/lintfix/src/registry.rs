use strum::IntoEnumIterator;
use strum_macros::{EnumIter, IntoStaticStr};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::handlers::{self, Handler};

/// The tools whose diagnostics can be routed to a handler.
#[derive(EnumIter, IntoStaticStr, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[strum(serialize_all = "lowercase")]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Tool {
    Ineffassign,
    Structcheck,
    Varcheck,
    Deadcode,
    Unused,
    Scopelint,
    Gocritic,
    Interfacer,
    Whitespace,
    Golint,
    Goconst,
}

impl Tool {
    /// Whether the handler may produce a fix that changes the file.
    pub const fn has_fix(&self) -> bool {
        !matches!(self, Self::Scopelint | Self::Goconst)
    }

    pub fn handler(&self) -> Handler {
        match self {
            Self::Ineffassign => handlers::ineffassign,
            Self::Structcheck | Self::Varcheck | Self::Deadcode | Self::Unused => {
                handlers::unused
            }
            Self::Scopelint => handlers::scopelint,
            Self::Gocritic => handlers::gocritic,
            Self::Interfacer => handlers::interfacer,
            Self::Whitespace => handlers::whitespace,
            Self::Golint => handlers::golint,
            Self::Goconst => handlers::goconst,
        }
    }
}

/// Get the tool from its name:
/// "ineffassign" => `Tool::Ineffassign`
pub fn name_to_tool(name: &str) -> Option<Tool> {
    Tool::iter().find(|tool| tool_to_name(*tool).eq_ignore_ascii_case(name))
}

/// Get the name from the tool:
/// `Tool::Ineffassign` => "ineffassign"
pub fn tool_to_name(tool: Tool) -> &'static str {
    tool.into()
}

/// The handler for a tool name, if the tool is supported.
pub fn handler_for(name: &str) -> Option<Handler> {
    name_to_tool(name).map(|tool| tool.handler())
}

impl std::str::FromStr for Tool {
    type Err = String;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        name_to_tool(name).ok_or_else(|| format!("Unknown tool: {name}"))
    }
}

impl std::fmt::Display for Tool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", tool_to_name(*self))
    }
}

impl std::fmt::Debug for Tool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", tool_to_name(*self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converters() {
        let name = "ineffassign";
        let tool = Tool::Ineffassign;

        assert_eq!(name_to_tool(name), Some(tool));
        assert_eq!(name_to_tool("IneffAssign"), Some(tool));
        assert_eq!(tool_to_name(tool), name);
        assert_eq!("golint".parse::<Tool>(), Ok(Tool::Golint));
        assert!("staticcheck".parse::<Tool>().is_err());
    }

    #[test]
    fn unused_family_shares_a_handler() {
        let unused = Tool::Unused.handler() as usize;
        for tool in [Tool::Structcheck, Tool::Varcheck, Tool::Deadcode] {
            assert_eq!(tool.handler() as usize, unused);
        }
        assert!(handler_for("errcheck").is_none());
    }
}
