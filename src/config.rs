/// Configuration resolution module
///
/// This module handles:
/// - Resolving the positional argument grammar into input/output paths
/// - Discovering result files in an input directory
/// - Building the immutable `ReportPlan` the run works from
use crate::cli::CliArgs;
use crate::error::{Error, Result};
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

/// Summary destination used when no `.csv` follows the XML path
pub const DEFAULT_DEST_FILE: &str = "results_final.csv";

/// Everything a run needs, resolved up front
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportPlan {
    /// Result files, in processing order
    pub inputs: Vec<PathBuf>,
    /// XML status document destination
    pub xml_path: PathBuf,
    /// CSV summary destination
    pub csv_path: PathBuf,
    /// Optional JSON export destination
    pub json_path: Option<PathBuf>,
    pub quiet: bool,
}

/// Build a complete ReportPlan from CLI arguments
///
/// Returns `Error::Usage` when no XML path is given, or when a lone
/// positional argument is all there is. An XML path with no inputs is a
/// valid plan; the run then fails for lack of input data.
pub fn build_report_plan(args: &CliArgs) -> Result<ReportPlan> {
    debug!("Building report plan from CLI args");

    if args.args.len() < 2 && args.input_dir.is_none() {
        return Err(Error::Usage);
    }

    let (positional_inputs, xml_path, csv_path) = split_positionals(&args.args);
    let xml_path = xml_path.ok_or(Error::Usage)?;

    let mut inputs = Vec::new();
    if let Some(ref dir) = args.input_dir {
        let discovered = discover_result_files(dir)?;
        debug!("Discovered {} result files in {:?}", discovered.len(), dir);
        inputs.extend(discovered.into_iter().filter(|p| !same_file(p, &csv_path)));
    }
    inputs.extend(positional_inputs);

    debug!("Inputs: {:?}, XML: {:?}, CSV: {:?}", inputs, xml_path, csv_path);

    Ok(ReportPlan { inputs, xml_path, csv_path, json_path: args.json.clone(), quiet: args.quiet })
}

/// Split positional arguments into (inputs, xml path, csv destination).
///
/// `.csv` arguments seen before any other argument are inputs. Every other
/// argument sets the XML path; `.csv` arguments after that set the
/// destination. For both outputs the last one wins.
fn split_positionals(args: &[String]) -> (Vec<PathBuf>, Option<PathBuf>, PathBuf) {
    let mut inputs = Vec::new();
    let mut xml_path: Option<PathBuf> = None;
    let mut dest_path = PathBuf::from(DEFAULT_DEST_FILE);

    for arg in args {
        if is_csv(arg) {
            if xml_path.is_none() {
                inputs.push(PathBuf::from(arg));
            } else {
                dest_path = PathBuf::from(arg);
            }
        } else {
            xml_path = Some(PathBuf::from(arg));
        }
    }

    (inputs, xml_path, dest_path)
}

fn is_csv(arg: &str) -> bool {
    arg.ends_with(".csv")
}

/// Whether `name` is a per-run result file name (`results.csv`, `results_*.csv`)
pub fn is_result_file_name(name: &str) -> bool {
    name == "results.csv" || (name.starts_with("results_") && name.len() > "results_.csv".len() && is_csv(name))
}

/// List the result files directly inside `dir`, sorted by file name
pub fn discover_result_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let to_error = |source| Error::InputDir { path: dir.to_path_buf(), source };

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(to_error)? {
        let entry = entry.map_err(to_error)?;
        let path = entry.path();
        let matches = path.file_name().and_then(|n| n.to_str()).map(is_result_file_name).unwrap_or(false);
        if matches && path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Compare two paths by identity on disk, falling back to textual equality
fn same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;
