//! The listing printed by `golangci-lint linters`.
//!
//! ```text
//! Enabled by your configuration linters:
//! errcheck: errcheck is a program for checking for unchecked errors [fast: false, auto-fix: false]
//! Disabled by your configuration linters:
//! golint [deprecated]: Golint differs from gofmt. [fast: false, auto-fix: false]
//! gosimple (megacheck): Linter for Go source code that specializes in simplifying code
//! ```
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LinterInfo {
    pub name: String,
    pub aliases: Vec<String>,
    pub enabled: bool,
    pub deprecated: bool,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Enabled,
    Disabled,
    /// Presets and anything else that does not list linters.
    Other,
}

impl Section {
    fn of_heading(heading: &str) -> Self {
        if heading.starts_with("Enabled") {
            Self::Enabled
        } else if heading.starts_with("Disabled") {
            Self::Disabled
        } else {
            Self::Other
        }
    }
}

fn is_linter_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '-' || ch == '_')
}

fn parse_line(line: &str, enabled: bool) -> Option<LinterInfo> {
    let (head, description) = line.split_once(": ")?;

    let deprecated = head.contains("[deprecated]");
    let head = head.replace("[deprecated]", "");
    let head = head.trim();
    let (name, aliases) = match head.split_once('(') {
        Some((name, rest)) => {
            let aliases = rest
                .trim_end()
                .strip_suffix(')')?
                .split(',')
                .map(|alias| alias.trim().to_string())
                .filter(|alias| !alias.is_empty())
                .collect();
            (name.trim(), aliases)
        }
        None => (head, Vec::new()),
    };
    if !is_linter_name(name) {
        return None;
    }

    let description = description
        .rfind(" [fast:")
        .and_then(|idx| description.get(..idx))
        .unwrap_or(description)
        .trim();

    Some(LinterInfo {
        name: name.to_string(),
        aliases,
        enabled,
        deprecated,
        description: description.to_string(),
    })
}

pub fn parse_linters(output: &str) -> Vec<LinterInfo> {
    let mut section = Section::Other;
    let mut linters = Vec::new();

    for line in output.lines().map(str::trim) {
        if line.is_empty() {
            continue;
        }
        if let Some(heading) = line.strip_suffix(':')
            && !heading.contains(": ")
        {
            section = Section::of_heading(heading);
            continue;
        }
        let enabled = match section {
            Section::Enabled => true,
            Section::Disabled => false,
            Section::Other => continue,
        };
        linters.extend(parse_line(line, enabled));
    }

    linters
}
