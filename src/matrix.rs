/// Check matrix construction
///
/// This module handles:
/// - Reading per-run result files in the order given
/// - Validating the three-line preamble of each file
/// - Creating and extending one `Check` per check name
/// - Keeping every check aligned with the global run column list
/// - Collecting recoverable problems as `BuildWarning`s
use crate::error::{Error, Result};
use crate::types::{Cell, Check, LegacyTally};
use lazy_static::lazy_static;
use log::debug;
use regex::Regex;
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Field separator used by result files and the summary report
pub const DELIMITER: char = ',';

/// Prefix identifying the check-data header (third line of a result file)
pub const CHECK_HEADER_PREFIX: &str = "Check,Component,";

lazy_static! {
    static ref SUMMARY_LINE: Regex =
        Regex::new(r"Test Pass/Fail/Error,(\d+),(\d+),(\d+)").expect("summary line pattern is valid");
}

/// Parse the harness summary line (`Test Pass/Fail/Error,<p>,<f>,<e>`) of `path`
pub fn parse_summary_line(path: &Path, line: &str) -> Result<LegacyTally> {
    let caps = SUMMARY_LINE
        .captures(line)
        .ok_or_else(|| Error::SummaryLine { path: path.to_path_buf(), line: line.to_string() })?;
    let count = |i: usize| {
        caps[i].parse::<u64>().map_err(|_| Error::SummaryCount { path: path.to_path_buf(), value: caps[i].to_string() })
    };
    Ok(LegacyTally { passes: count(1)?, fails: count(2)?, errors: count(3)? })
}

/// A recoverable problem found while reading the inputs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildWarning {
    /// Input file does not exist
    Missing { path: PathBuf },
    /// Input file has zero length
    Empty { path: PathBuf },
    /// Input file exists but could not be read
    Unreadable { path: PathBuf, reason: String },
    /// Third line is not a `Check,Component,...` header; file rejected
    MalformedHeader { path: PathBuf, line: String },
    /// Run-name line and check header disagree on the column count
    RunNameMismatch { path: PathBuf, expected: usize, found: usize },
    /// Data row with fewer than three fields; row skipped
    MalformedRow { path: PathBuf, line_no: usize, line: String },
    /// Data row carries more values than the file has run columns; extras dropped
    ExtraValues { path: PathBuf, check: String, expected: usize, found: usize },
    /// Non-blank value that is not a non-negative integer; counted nowhere
    InvalidValue { path: PathBuf, check: String, value: String },
    /// Same check listed twice in one file; later row skipped
    DuplicateCheck { path: PathBuf, check: String },
    /// Check already known under another component; first component kept
    ComponentMismatch { path: PathBuf, check: String, kept: String, found: String },
}

impl fmt::Display for BuildWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildWarning::Missing { path } => write!(f, "{} can not be found - skipping file", path.display()),
            BuildWarning::Empty { path } => write!(f, "{} is empty - skipping file", path.display()),
            BuildWarning::Unreadable { path, reason } => {
                write!(f, "{} could not be read ({}) - skipping file", path.display(), reason)
            }
            BuildWarning::MalformedHeader { path, line } => {
                write!(f, "Malformed header, rejecting file {} (saw: {})", path.display(), line)
            }
            BuildWarning::RunNameMismatch { path, expected, found } => write!(
                f,
                "{}: {} run names for {} header columns - run names realigned",
                path.display(),
                found,
                expected
            ),
            BuildWarning::MalformedRow { path, line_no, line } => {
                write!(f, "{}:{}: ignoring malformed line - {}", path.display(), line_no, line)
            }
            BuildWarning::ExtraValues { path, check, expected, found } => write!(
                f,
                "{}: check {} has {} values but the header names {} runs - extra values dropped",
                path.display(),
                check,
                found,
                expected
            ),
            BuildWarning::InvalidValue { path, check, value } => {
                write!(f, "{}: check {} has non-numeric value '{}' - not counted", path.display(), check, value)
            }
            BuildWarning::DuplicateCheck { path, check } => {
                write!(f, "{}: check {} listed more than once - ignoring repeat", path.display(), check)
            }
            BuildWarning::ComponentMismatch { path, check, kept, found } => write!(
                f,
                "{}: component inconsistency for check {} ({} vs {}) - keeping {}",
                path.display(),
                check,
                found,
                kept,
                kept
            ),
        }
    }
}

/// What happened to one input file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileStatus {
    /// File contributed this many run columns
    Accepted { columns: usize },
    /// File was skipped or rejected; see the builder warnings
    Skipped,
}

/// All checks and run columns gathered from the input files
#[derive(Debug, Clone, Default)]
pub struct Matrix {
    /// Checks keyed by name; iteration order is the report order
    pub checks: BTreeMap<String, Check>,
    /// Test names from every accepted header, one per global column
    pub test_names: Vec<String>,
    /// Run names from the second line of every accepted file
    pub run_names: Vec<String>,
    /// Accepted input files, in processing order
    pub files: Vec<PathBuf>,
    /// Harness tally from the last accepted file
    pub legacy: Option<LegacyTally>,
}

impl Matrix {
    /// Number of global run columns
    pub fn column_count(&self) -> usize {
        self.test_names.len()
    }
}

/// Incrementally builds a `Matrix`, one file at a time
#[derive(Debug, Default)]
pub struct MatrixBuilder {
    matrix: Matrix,
    warnings: Vec<BuildWarning>,
}

impl MatrixBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read and merge one result file.
    ///
    /// Missing, empty and unreadable files are skipped with a warning. The
    /// file is read in one go, so no handle outlives this call.
    pub fn add_file(&mut self, path: &Path) -> Result<FileStatus> {
        debug!("Processing {:?}", path);

        let metadata = match fs::metadata(path) {
            Ok(m) => m,
            Err(_) => {
                self.warn(BuildWarning::Missing { path: path.to_path_buf() });
                return Ok(FileStatus::Skipped);
            }
        };
        if metadata.len() == 0 {
            self.warn(BuildWarning::Empty { path: path.to_path_buf() });
            return Ok(FileStatus::Skipped);
        }

        let bytes = match fs::read(path) {
            Ok(b) => b,
            Err(e) => {
                self.warn(BuildWarning::Unreadable { path: path.to_path_buf(), reason: e.to_string() });
                return Ok(FileStatus::Skipped);
            }
        };

        self.add_contents(path, &String::from_utf8_lossy(&bytes))
    }

    /// Merge the already-loaded contents of a result file.
    ///
    /// Fails only when the first line is not the harness summary line.
    pub fn add_contents(&mut self, path: &Path, contents: &str) -> Result<FileStatus> {
        let mut lines = contents.lines().map(str::trim);

        let summary = lines.next().unwrap_or_default();
        let legacy = parse_summary_line(path, summary)?;

        let run_line = lines.next().unwrap_or_default();
        let mut run_names: Vec<String> = run_line.split(DELIMITER).skip(2).map(str::to_string).collect();

        let header = lines.next().unwrap_or_default();
        if !header.starts_with(CHECK_HEADER_PREFIX) {
            self.warn(BuildWarning::MalformedHeader { path: path.to_path_buf(), line: header.to_string() });
            return Ok(FileStatus::Skipped);
        }
        let file_tests: Vec<String> = header.split(DELIMITER).skip(2).map(str::to_string).collect();

        let start_column = self.matrix.column_count();
        let width = file_tests.len();
        if run_names.len() != width {
            let found = run_names.len();
            self.warn(BuildWarning::RunNameMismatch { path: path.to_path_buf(), expected: width, found });
            run_names.resize(width, String::new());
        }
        debug!("{:?}: {} run columns starting at column {}", path, width, start_column);

        let mut seen: HashSet<&str> = HashSet::new();
        for (index, line) in lines.enumerate() {
            // Three preamble lines precede the first data row
            let line_no = index + 4;
            let fields: Vec<&str> = line.split(DELIMITER).collect();
            if fields.len() < 3 {
                self.warn(BuildWarning::MalformedRow { path: path.to_path_buf(), line_no, line: line.to_string() });
                continue;
            }

            let name = fields[0];
            let component = fields[1];
            if !seen.insert(name) {
                self.warn(BuildWarning::DuplicateCheck { path: path.to_path_buf(), check: name.to_string() });
                continue;
            }

            let mut values: Vec<Cell> = fields[2..].iter().map(|f| Cell::parse(f)).collect();
            if values.len() > width {
                self.warn(BuildWarning::ExtraValues {
                    path: path.to_path_buf(),
                    check: name.to_string(),
                    expected: width,
                    found: values.len(),
                });
                values.truncate(width);
            }
            values.resize(width, Cell::Blank);

            for value in &values {
                if let Cell::Invalid(raw) = value {
                    self.warn(BuildWarning::InvalidValue {
                        path: path.to_path_buf(),
                        check: name.to_string(),
                        value: raw.clone(),
                    });
                }
            }

            let check = self.matrix.checks.entry(name.to_string()).or_insert_with(|| {
                debug!("New check {} ({})", name, component);
                Check::new(name, component)
            });
            let mismatch = (check.component != component).then(|| BuildWarning::ComponentMismatch {
                path: path.to_path_buf(),
                check: name.to_string(),
                kept: check.component.clone(),
                found: component.to_string(),
            });
            check.extend(start_column, values);
            if let Some(warning) = mismatch {
                self.warn(warning);
            }
        }

        self.matrix.test_names.extend(file_tests);
        self.matrix.run_names.extend(run_names);
        self.matrix.files.push(path.to_path_buf());
        self.matrix.legacy = Some(legacy);

        Ok(FileStatus::Accepted { columns: width })
    }

    /// Finish building; fails when no file contributed a run column
    pub fn finish(self) -> Result<Matrix> {
        if self.matrix.column_count() == 0 {
            return Err(Error::NoValidInput);
        }
        debug!(
            "Matrix built: {} checks, {} columns from {} files",
            self.matrix.checks.len(),
            self.matrix.column_count(),
            self.matrix.files.len()
        );
        Ok(self.matrix)
    }

    /// Hand over the pending warnings, leaving none behind
    pub fn drain_warnings(&mut self) -> Vec<BuildWarning> {
        std::mem::take(&mut self.warnings)
    }

    fn warn(&mut self, warning: BuildWarning) {
        debug!("{}", warning);
        self.warnings.push(warning);
    }
}

/// Build the matrix from `paths`, processed in order.
///
/// Each recoverable problem is passed to `on_warning` as soon as the file
/// that caused it has been processed, including files processed before a
/// fatal error.
pub fn build_matrix<F>(paths: &[PathBuf], mut on_warning: F) -> Result<Matrix>
where
    F: FnMut(&BuildWarning),
{
    let mut builder = MatrixBuilder::new();
    for path in paths {
        let status = builder.add_file(path);
        if let Ok(FileStatus::Accepted { columns }) = &status {
            debug!("{:?} contributed {} run columns", path, columns);
        }
        for warning in builder.drain_warnings() {
            on_warning(&warning);
        }
        status?;
    }
    builder.finish()
}

#[cfg(test)]
#[path = "matrix_test.rs"]
mod matrix_test;
