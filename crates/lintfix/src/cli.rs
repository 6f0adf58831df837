use crate::registry::Tool;
use clap::builder::{PossibleValue, TypedValueParser};
use clap::{Parser, Subcommand, command};
use clap_complete::Shell;
use std::path::PathBuf;
use strum::IntoEnumIterator;

#[derive(Debug, Parser)]
#[command(
    name = "lintfix",
    about = "Lintfix: syntax-anchored quick fixes for golangci-lint diagnostics.",
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show, fix or diff the issues of a golangci-lint JSON report
    Check(CheckCommand),

    /// List the linters known to golangci-lint and which ones lintfix fixes
    Linters {
        /// Output of `golangci-lint linters`. Reads stdin when missing or `-`.
        #[arg(value_parser)]
        file: Option<PathBuf>,
    },

    /// Generate shell completions
    GenerateCompletions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
pub struct CheckCommand {
    /// Report written by `golangci-lint run --out-format json`. `-` reads stdin.
    #[arg(long, value_parser, default_value = "-")]
    pub report: PathBuf,

    /// Apply the primary fix of every issue in place.
    #[arg(long)]
    pub fix: bool,

    /// Show the changes `--fix` would make.
    #[arg(long)]
    pub diff: bool,

    /// Specify which tools' issues to handle.
    #[arg(
        long,
        value_delimiter = ',',
        value_name = "TOOL",
        value_parser = ToolSelectorParser,
        hide_possible_values = true,
    )]
    pub select: Option<Vec<ToolSelector>>,

    /// Specify which tools' issues to skip.
    #[arg(
        long,
        value_delimiter = ',',
        value_name = "TOOL",
        value_parser = ToolSelectorParser,
        hide_possible_values = true,
    )]
    pub ignore: Option<Vec<ToolSelector>>,

    /// Show statistics after processing.
    #[arg(long)]
    pub statistics: bool,
}

impl CheckCommand {
    /// The tools left after `--select` and `--ignore`. Everything is
    /// selected by default.
    pub fn config(&self) -> Vec<Tool> {
        let mut config: Vec<Tool> = match &self.select {
            Some(selection) => {
                let mut tools: Vec<Tool> =
                    selection.iter().flat_map(ToolSelector::tools).collect();
                tools.sort();
                tools.dedup();
                tools
            }
            None => Tool::iter().collect(),
        };
        if let Some(selection) = &self.ignore {
            config.retain(|tool| !selection.iter().any(|selector| selector.tools().contains(tool)));
        }
        config
    }
}

/// `ALL`, or one tool by name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ToolSelector {
    All,
    Selection(Tool),
}

impl ToolSelector {
    pub fn tools(&self) -> Vec<Tool> {
        match self {
            Self::All => Tool::iter().collect(),
            Self::Selection(selection) => vec![*selection],
        }
    }
}

impl std::str::FromStr for ToolSelector {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ALL" => Ok(Self::All),
            _ => Ok(Self::Selection(s.parse()?)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ToolSelectorParser;

impl TypedValueParser for ToolSelectorParser {
    type Value = ToolSelector;

    fn parse_ref(
        &self,
        cmd: &clap::Command,
        arg: Option<&clap::Arg>,
        value: &std::ffi::OsStr,
    ) -> Result<Self::Value, clap::Error> {
        let value = value
            .to_str()
            .ok_or_else(|| clap::Error::new(clap::error::ErrorKind::InvalidUtf8))?;

        value.parse().map_err(|_| {
            let mut error = clap::Error::new(clap::error::ErrorKind::ValueValidation).with_cmd(cmd);
            if let Some(arg) = arg {
                error.insert(
                    clap::error::ContextKind::InvalidArg,
                    clap::error::ContextValue::String(arg.to_string()),
                );
            }
            error.insert(
                clap::error::ContextKind::InvalidValue,
                clap::error::ContextValue::String(value.to_string()),
            );
            error
        })
    }

    fn possible_values(&self) -> Option<Box<dyn Iterator<Item = PossibleValue> + '_>> {
        Some(Box::new(
            std::iter::once(PossibleValue::new("ALL").help("all tools")).chain(Tool::iter().map(
                |tool| {
                    let help = if tool.has_fix() { "fixable" } else { "highlight only" };
                    PossibleValue::new(tool.to_string()).help(help)
                },
            )),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(args: &[&str]) -> CheckCommand {
        let args = Args::try_parse_from(std::iter::once("lintfix").chain(args.iter().copied()))
            .unwrap();
        match args.command {
            Command::Check(check) => check,
            command => panic!("unexpected command {command:?}"),
        }
    }

    #[test]
    fn select_and_ignore() {
        let command = check(&["check", "--select", "golint,unused,golint"]);
        assert_eq!(command.config(), vec![Tool::Unused, Tool::Golint]);
        assert_eq!(command.report, PathBuf::from("-"));

        let command = check(&["check", "--select", "ALL", "--ignore", "goconst,scopelint"]);
        assert!(!command.config().contains(&Tool::Goconst));
        assert_eq!(command.config().len(), Tool::iter().count() - 2);
    }

    #[test]
    fn unknown_tool() {
        let args = ["lintfix", "check", "--select", "staticcheck"];
        assert!(Args::try_parse_from(args).is_err());
    }
}
