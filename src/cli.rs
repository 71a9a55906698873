use clap::Parser;
use std::path::PathBuf;

/// Positional argument grammar, shown when the arguments cannot be resolved
pub const USAGE: &str = "{ file.csv | file1.csv ... filen.csv } out.xml [ destfile.csv ]";

#[derive(Parser, Debug, Clone)]
#[command(name = "check-matrix")]
#[command(about = "Combine per-run validation result files into a test check matrix")]
#[command(override_usage = "check-matrix [OPTIONS] { file.csv | file1.csv ... filen.csv } out.xml [ destfile.csv ]")]
#[command(version)]
pub struct CliArgs {
    /// Result files, then the XML status path, then an optional CSV destination.
    /// Arguments ending in ".csv" before the first other argument are inputs;
    /// any other argument is the XML path; ".csv" arguments after it name the
    /// summary destination (default: results_final.csv)
    #[arg(value_name = "ARGS", num_args = 0..)]
    pub args: Vec<String>,

    /// Also read every results.csv / results_*.csv found in this directory
    #[arg(long, value_name = "DIR")]
    pub input_dir: Option<PathBuf>,

    /// Additionally export the rollup as JSON to this path
    #[arg(long, value_name = "PATH")]
    pub json: Option<PathBuf>,

    /// Don't print the summary at the end of the run
    #[arg(long, short = 'q')]
    pub quiet: bool,
}

impl CliArgs {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        CliArgs::parse()
    }
}
