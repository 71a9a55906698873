/// Errors that stop report generation
///
/// Per-file and per-row problems are not errors; they are collected as
/// `matrix::BuildWarning` values and the batch carries on.
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Arguments name no XML output or too few arguments; usage is printed instead
    #[error("No XML output path given")]
    Usage,

    /// First line of a result file is not the harness summary line
    #[error("{}: expecting to see test pass/fail/error line. Instead saw: {line}", .path.display())]
    SummaryLine { path: PathBuf, line: String },

    /// Harness summary line matched but a count does not fit in 64 bits
    #[error("{}: test pass/fail/error count {value} overflows a 64-bit counter", .path.display())]
    SummaryCount { path: PathBuf, value: String },

    /// No input file contributed a single run column
    #[error("No valid input data")]
    NoValidInput,

    #[error("Failed to read input directory {}: {source}", .path.display())]
    InputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize JSON export: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
