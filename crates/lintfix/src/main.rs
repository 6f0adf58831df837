use std::collections::HashMap;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::CommandFactory;
use clap::Parser;
use clap_complete::generate;
use colored::Colorize;
use itertools::Itertools;

use lintfix::cli::{Args, CheckCommand, Command};
use lintfix::linter::{Counter, fix, lint_only};
use lintfix::linters::parse_linters;
use lintfix::registry::{Tool, name_to_tool};
use lintfix::report::Report;
use lintfix::source::LineIndex;
use lintfix::text_diff::CodeDiff;
use lintfix::tracing_config::init_tracing;

#[derive(Copy, Clone)]
pub enum ExitStatus {
    Success,
    Failure,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => Self::from(0),
            ExitStatus::Failure => Self::from(1),
        }
    }
}

/// Read `path`, or stdin for `-`.
fn read_input(path: &Path) -> Result<String, ExitStatus> {
    if path == Path::new("-") {
        let mut input = String::new();
        return io::stdin()
            .read_to_string(&mut input)
            .map(|_| input)
            .map_err(|err| {
                eprintln!("Failed to read stdin: {err}");
                ExitStatus::Failure
            });
    }
    read_file(path)
}

fn read_file(path: &Path) -> Result<String, ExitStatus> {
    std::fs::read_to_string(path).map_err(|err| {
        eprintln!("Failed to read file {}: {err}", path.display());
        ExitStatus::Failure
    })
}

fn write_file(path: &Path, content: &str) -> Result<(), ExitStatus> {
    std::fs::write(path, content).map_err(|err| {
        eprintln!("Failed to write to file {}: {err}", path.display());
        ExitStatus::Failure
    })
}

fn time_it<T, F: FnOnce() -> T>(label: &str, f: F) -> T {
    let start = std::time::Instant::now();
    let result = f();
    eprintln!("{}: {:.2?}", label, start.elapsed());
    result
}

fn run() -> Result<ExitStatus, ExitStatus> {
    init_tracing();
    let args = Args::parse();

    match args.command {
        Command::Check(check_args) => time_it("Execution time", || run_check_command(&check_args)),
        Command::Linters { file } => run_linters_command(file),
        Command::GenerateCompletions { shell } => {
            // lintfix generate-completions fish > ~/.config/fish/completions/lintfix.fish
            let mut cmd = Args::command();
            let bin_name = cmd.get_name().to_string();
            generate(shell, &mut cmd, bin_name, &mut io::stdout());
            Ok(ExitStatus::Success)
        }
    }
}

fn run_linters_command(file: Option<PathBuf>) -> Result<ExitStatus, ExitStatus> {
    let output = read_input(file.as_deref().unwrap_or_else(|| Path::new("-")))?;
    let linters = parse_linters(&output);
    if linters.is_empty() {
        eprintln!("No linters found in the input.");
        return Err(ExitStatus::Failure);
    }

    let padding = linters.iter().map(|linter| linter.name.len()).max().unwrap_or(0);
    for linter in &linters {
        let marker = match name_to_tool(&linter.name) {
            Some(tool) if tool.has_fix() => "*".cyan().to_string(),
            Some(_) => "-".to_string(),
            None => " ".to_string(),
        };
        let name = if linter.enabled {
            linter.name.green()
        } else {
            linter.name.normal()
        };
        let deprecated = if linter.deprecated { " (deprecated)" } else { "" };
        println!("[{marker}] {name:padding$}  {}{deprecated}", linter.description);
    }
    Ok(ExitStatus::Success)
}

fn run_check_command(args: &CheckCommand) -> Result<ExitStatus, ExitStatus> {
    let config = args.config();
    let report = Report::parse(&read_input(&args.report)?).map_err(|err| {
        eprintln!("{err}");
        ExitStatus::Failure
    })?;

    eprintln!(
        "Config: [{}]",
        config
            .iter()
            .map(|tool| tool.to_string().green().to_string())
            .collect::<Vec<String>>()
            .join(", ")
    );

    let mut global_statistics_counter = Counter::new();

    for (filename, issues) in report.by_file() {
        let path = Path::new(filename);
        let text = read_file(path)?;
        let lines = LineIndex::new(&text);
        let diagnostics: Vec<_> = issues.iter().map(|issue| issue.diagnostic(&lines)).collect();

        let failed = |err: lintfix::source::SourceError| {
            eprintln!("Failed to process {filename}: {err}");
            ExitStatus::Failure
        };

        let statistics_counter = if args.diff {
            let (fixed, statistics_counter) = fix(&text, &diagnostics, &config).map_err(failed)?;
            let text_diff = CodeDiff::new(&text, &fixed).with_header(filename);
            print!("{text_diff}");
            statistics_counter
        } else if args.fix {
            let (fixed, statistics_counter) = fix(&text, &diagnostics, &config).map_err(failed)?;
            if fixed != text {
                write_file(path, &fixed)?;
            }
            statistics_counter
        } else {
            let (messages, statistics_counter) =
                lint_only(&text, &diagnostics, &config).map_err(failed)?;
            if !args.statistics && !messages.is_empty() {
                println!("{}", filename.purple());
                println!("{}", messages.join("\n"));
            }
            statistics_counter
        };

        for (key, value) in statistics_counter {
            *global_statistics_counter.entry(key).or_insert(0) += value;
        }
    }

    if args.statistics {
        print_statistics(&global_statistics_counter);
    }

    let n_issues = global_statistics_counter.values().sum::<usize>();
    let n_fixable_issues = global_statistics_counter
        .iter()
        .filter_map(|(tool, cnt)| if tool.has_fix() { Some(cnt) } else { None })
        .sum::<usize>();

    if n_issues == 0 {
        println!("No issues!");
    } else if args.fix {
        println!("Fixed {n_issues} issues.");
    } else if !args.diff {
        println!(
            "Found {} issues.\n[{}] {} possibly fixable with the `--fix` option.",
            n_issues,
            "*".to_string().cyan(),
            n_fixable_issues,
        );
    }

    Ok(ExitStatus::Success)
}

fn print_statistics(counter: &HashMap<Tool, usize>) {
    let padding = counter
        .values()
        .map(|k| k.to_string().len())
        .max()
        .unwrap_or(0);

    counter
        .iter()
        .sorted_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)))
        .for_each(|(k, v)| {
            println!(
                "{:padding$}    {:<11}   [{}]",
                v,
                format!("{k}").red().bold(),
                (if k.has_fix() { "*" } else { " " }).to_string().cyan(),
            );
        });
}

fn main() -> ExitCode {
    run().unwrap_or_else(Into::into).into()
}
