//! CSV summary report.
//!
//! Layout, in order:
//! - grand total table
//! - per-component table, sorted by component name
//! - detailed check matrix with per-check totals, sorted by check name
//! - per-column Passes / Fails / Errors / Pass Rate footer rows

use super::format::format_percent;
use crate::error::{Error, Result};
use crate::matrix::DELIMITER;
use crate::rollup::Rollup;
use crate::types::ResultCount;
use log::debug;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

const TOTALS_HEADER: [&str; 4] = ["Passes", "Fails", "Errors", "Pass Rate"];

/// Write the CSV summary for `rollup` to `output_path`
pub fn export_csv_summary(rollup: &Rollup, output_path: &Path) -> Result<()> {
    debug!("Writing CSV summary to {:?}", output_path);
    let to_error = |source| Error::Write { path: output_path.to_path_buf(), source };

    let file = File::create(output_path).map_err(to_error)?;
    let mut writer = csv_writer(BufWriter::new(file));
    write_csv_summary(&mut writer, rollup).map_err(to_error)
}

/// Sections have different widths, so records are not length-checked
fn csv_writer<W: Write>(out: W) -> csv::Writer<W> {
    csv::WriterBuilder::new().delimiter(DELIMITER as u8).flexible(true).from_writer(out)
}

/// Write the CSV summary and flush it through to the underlying writer
fn write_csv_summary<W: Write>(out: &mut csv::Writer<W>, rollup: &Rollup) -> io::Result<()> {
    let matrix = &rollup.matrix;
    let width = matrix.column_count();

    // Grand total
    out.write_record(std::iter::once("Grand Total").chain(TOTALS_HEADER))?;
    out.write_record(std::iter::once("Total".to_string()).chain(totals_fields(&rollup.grand_total)))?;
    write_blank_line(out)?;

    // Components
    out.write_record(std::iter::once("Component").chain(TOTALS_HEADER))?;
    for (component, count) in &rollup.component_totals {
        out.write_record(std::iter::once(component.clone()).chain(totals_fields(count)))?;
    }
    write_blank_line(out)?;

    // Detailed matrix header: test names, then run names
    out.write_record(["Check Name", "Component"].into_iter().chain(matrix.test_names.iter().map(String::as_str)))?;
    out.write_record(
        ["", ""]
            .into_iter()
            .chain(matrix.run_names.iter().map(String::as_str))
            .chain(TOTALS_HEADER),
    )?;

    for check in matrix.checks.values() {
        let cells = (0..width).map(|i| check.values.get(i).map(ToString::to_string).unwrap_or_default());
        out.write_record(
            [check.name.clone(), check.component.clone()]
                .into_iter()
                .chain(cells)
                .chain(totals_fields(&check.count)),
        )?;
    }

    // Column totals
    let footers: [(&str, fn(&ResultCount) -> String); 4] = [
        ("Passes", |c| c.passes.to_string()),
        ("Fails", |c| c.fails.to_string()),
        ("Errors", |c| c.errors.to_string()),
        ("Pass Rate", |c| format_percent(c.pass_rate())),
    ];
    for (label, field) in footers {
        out.write_record([label.to_string(), String::new()].into_iter().chain(rollup.column_totals.iter().map(field)))?;
    }

    out.flush()
}

/// An empty record would be written as `""`; separators are bare newlines
fn write_blank_line<W: Write>(out: &mut csv::Writer<W>) -> io::Result<()> {
    out.flush()?;
    out.get_mut().write_all(b"\n")
}

/// passes, fails, errors, pass rate
fn totals_fields(count: &ResultCount) -> [String; 4] {
    [
        count.passes.to_string(),
        count.fails.to_string(),
        count.errors.to_string(),
        format_percent(count.pass_rate()),
    ]
}
