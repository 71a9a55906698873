/// Core data structures for check results
///
/// This module defines the values shared by the matrix builder, the rollup
/// engine and the report emitters: per-outcome counters, matrix cells, the
/// per-check row and the harness-level legacy tally.
use std::fmt;

/// Component name reserved for checks that exercise the test harness itself.
/// A positive count against such a check is a test error, not a product defect.
pub const TEST_COMPONENT: &str = "Test";

/// Classification of a single exercised cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Pass,
    Fail,
    Error,
}

/// Pass/fail/error counters with pass-rate derivation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResultCount {
    pub passes: u64,
    pub fails: u64,
    pub errors: u64,
}

impl ResultCount {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count_pass(&mut self) {
        self.passes += 1;
    }

    pub fn count_fail(&mut self) {
        self.fails += 1;
    }

    pub fn count_error(&mut self) {
        self.errors += 1;
    }

    /// Increment the counter matching `outcome`
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Pass => self.count_pass(),
            Outcome::Fail => self.count_fail(),
            Outcome::Error => self.count_error(),
        }
    }

    /// Fold another set of counts into this one, element-wise
    pub fn add(&mut self, other: &ResultCount) {
        self.passes += other.passes;
        self.fails += other.fails;
        self.errors += other.errors;
    }

    /// Number of classified observations
    pub fn total(&self) -> u64 {
        self.passes + self.fails + self.errors
    }

    /// Percentage of observations that passed; 0.0 when nothing was observed
    pub fn pass_rate(&self) -> f64 {
        let total = self.total();
        if total == 0 { 0.0 } else { self.passes as f64 / total as f64 * 100.0 }
    }
}

/// One cell of the check matrix
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    /// Check was not exercised in this run
    Blank,
    /// Check was exercised and triggered this many times (0 = passed)
    Count(u64),
    /// Non-blank value that is not a non-negative integer, kept verbatim
    Invalid(String),
}

impl Cell {
    /// Parse a raw field from a result file
    pub fn parse(raw: &str) -> Self {
        let value = raw.trim();
        if value.is_empty() {
            return Cell::Blank;
        }
        match value.parse::<u64>() {
            Ok(n) => Cell::Count(n),
            // Digit strings too long for u64 are still positive counts
            Err(_) if value.bytes().all(|b| b.is_ascii_digit()) => Cell::Count(u64::MAX),
            Err(_) => Cell::Invalid(value.to_string()),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Blank => Ok(()),
            Cell::Count(n) => write!(f, "{}", n),
            Cell::Invalid(raw) => f.write_str(raw),
        }
    }
}

/// A named check's row in the matrix
#[derive(Debug, Clone, PartialEq)]
pub struct Check {
    pub name: String,
    /// Owner of the check; fixed when the check is first seen
    pub component: String,
    /// One cell per global run column, index-aligned with the matrix columns
    pub values: Vec<Cell>,
    /// Summary of all classified cells, filled in by the rollup
    pub count: ResultCount,
}

impl Check {
    pub fn new(name: impl Into<String>, component: impl Into<String>) -> Self {
        Self { name: name.into(), component: component.into(), values: Vec::new(), count: ResultCount::new() }
    }

    /// Append `new_values` so that they start at column `start_column`.
    ///
    /// Columns contributed by earlier files that never mentioned this check
    /// are filled with `Cell::Blank` first.
    pub fn extend(&mut self, start_column: usize, new_values: impl IntoIterator<Item = Cell>) {
        if self.values.len() < start_column {
            self.values.resize(start_column, Cell::Blank);
        }
        self.values.extend(new_values);
    }

    /// Whether the check belongs to the test harness rather than the product
    pub fn is_test_component(&self) -> bool {
        self.component == TEST_COMPONENT
    }

    /// Classify one cell of this check; `None` for cells that count nowhere
    pub fn classify(&self, cell: &Cell) -> Option<Outcome> {
        match cell {
            Cell::Blank | Cell::Invalid(_) => None,
            Cell::Count(0) => Some(Outcome::Pass),
            Cell::Count(_) if self.is_test_component() => Some(Outcome::Error),
            Cell::Count(_) => Some(Outcome::Fail),
        }
    }
}

/// Harness-level pass/fail/error counts from a result file's first line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct LegacyTally {
    pub passes: u64,
    pub fails: u64,
    pub errors: u64,
}

impl LegacyTally {
    /// Overall verdict for the status document
    pub fn verdict(&self) -> Verdict {
        if self.fails > 0 {
            Verdict::Fail
        } else if self.passes > 0 {
            Verdict::Pass
        } else {
            Verdict::Error
        }
    }
}

/// Single-letter overall result written to the status document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Pass,
    Fail,
    Error,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Pass => "P",
            Verdict::Fail => "F",
            Verdict::Error => "E",
        }
    }
}

impl serde::Serialize for Verdict {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;
