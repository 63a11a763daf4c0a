use std::fs;
use std::process::ExitCode;

use anyhow::Context;
use colored::Colorize;
use flowcheck_diff::{diff_lines_with, DiffHunk, HunkKind};
use flowcheck_expr::{substitute, substitute_with_fallback, unresolved_paths};
use flowcheck_verify::{ComparisonResult, Status, Verifier};

use crate::cli::*;
use crate::load::{case_name, load_config, load_values, read_document};

pub fn run_command(cli: Cli) -> anyhow::Result<ExitCode> {
    let Cli { command, format, .. } = cli;
    match command {
        Command::Compare(args) => cmd_compare(args, format),
        Command::Substitute(args) => cmd_substitute(args),
        Command::Diff(args) => cmd_diff(args, format),
    }
}

fn cmd_compare(args: CompareArgs, format: OutputFormat) -> anyhow::Result<ExitCode> {
    let config = load_config(args.config.as_deref())?;
    let values = load_values(args.values.as_deref())?;
    let expected = read_document(&args.expected)?;
    let actual = read_document(&args.actual)?;
    let case = args.case.unwrap_or_else(|| case_name(&args.expected));

    let result = Verifier::new(config).verify(&case, expected.as_deref(), actual.as_deref(), &values);

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
        OutputFormat::Text => print_result(&case, &result),
    }

    Ok(if result.is_passed() { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

fn print_result(case: &str, result: &ComparisonResult) {
    match result.status {
        Status::Passed => println!("{} {}: {}", "✓".green().bold(), case.bold(), result.message),
        Status::Failed => println!("{} {}: {}", "✗".red().bold(), case.bold(), result.message.red()),
        Status::Errored => println!("{} {}: {}", "!".yellow().bold(), case.bold(), result.message.yellow()),
    }

    let ignored = result.regions.iter().filter(|r| r.is_ignored()).count();
    if ignored > 0 {
        println!("  {} ignorable difference(s)", ignored.to_string().dimmed());
    }

    if let Some(report) = &result.diff_report {
        for line in report.lines() {
            if line.starts_with("- ") {
                println!("{}", line.red());
            } else if line.starts_with("+ ") {
                println!("{}", line.green());
            } else {
                println!("{}", line.cyan());
            }
        }
    }
}

fn cmd_substitute(args: SubstituteArgs) -> anyhow::Result<ExitCode> {
    let template = fs::read_to_string(&args.template)
        .with_context(|| format!("failed to read {}", args.template.display()))?;
    let values = load_values(Some(args.values.as_path()))?;

    for path in unresolved_paths(&template, &values) {
        tracing::warn!(%path, "unresolved placeholder");
    }

    let output = match &args.fallback {
        Some(fallback) => substitute_with_fallback(&template, &values, fallback),
        None => substitute(&template, &values),
    };
    print!("{output}");
    Ok(ExitCode::SUCCESS)
}

fn cmd_diff(args: DiffArgs, format: OutputFormat) -> anyhow::Result<ExitCode> {
    let expected = fs::read_to_string(&args.expected)
        .with_context(|| format!("failed to read {}", args.expected.display()))?;
    let actual = fs::read_to_string(&args.actual)
        .with_context(|| format!("failed to read {}", args.actual.display()))?;

    let hunks = diff_lines_with(&expected, &actual, args.algorithm.into());

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&hunks)?),
        OutputFormat::Text => hunks.iter().for_each(print_hunk),
    }
    Ok(ExitCode::SUCCESS)
}

fn print_hunk(hunk: &DiffHunk) {
    for line in hunk.lines() {
        match hunk.kind {
            HunkKind::Unchanged => println!("  {line}"),
            HunkKind::Removed => println!("{}", format!("- {line}").red()),
            HunkKind::Added => println!("{}", format!("+ {line}").green()),
        }
    }
}
