use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use flowcheck_diff::DiffAlgorithm;

#[derive(Parser)]
#[command(
    name = "flowcheck",
    about = "flowcheck: compare expected and actual request results",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum AlgorithmArg {
    Myers,
    Patience,
    Lcs,
}

impl From<AlgorithmArg> for DiffAlgorithm {
    fn from(arg: AlgorithmArg) -> Self {
        match arg {
            AlgorithmArg::Myers => DiffAlgorithm::Myers,
            AlgorithmArg::Patience => DiffAlgorithm::Patience,
            AlgorithmArg::Lcs => DiffAlgorithm::Lcs,
        }
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Verify an actual result against its expected baseline
    Compare(CompareArgs),
    /// Resolve ${path} placeholders in a file
    Substitute(SubstituteArgs),
    /// Show the raw line diff between two documents
    Diff(DiffArgs),
}

#[derive(Args)]
pub struct CompareArgs {
    pub expected: PathBuf,
    pub actual: PathBuf,
    /// JSON or YAML file with values for ${path} placeholders
    #[arg(long)]
    pub values: Option<PathBuf>,
    /// TOML file with comparison settings
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Case name used in messages (defaults to the expected file's stem)
    #[arg(long)]
    pub case: Option<String>,
}

#[derive(Args)]
pub struct SubstituteArgs {
    pub template: PathBuf,
    #[arg(long)]
    pub values: PathBuf,
    /// Text used for placeholders that cannot be resolved
    #[arg(long)]
    pub fallback: Option<String>,
}

#[derive(Args)]
pub struct DiffArgs {
    pub expected: PathBuf,
    pub actual: PathBuf,
    #[arg(long, default_value = "myers")]
    pub algorithm: AlgorithmArg,
}
