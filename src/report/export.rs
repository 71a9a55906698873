//! JSON export of a rollup.
//!
//! A machine-readable companion to the CSV summary: the same totals, plus
//! every check's raw cells, for dashboards and further scripting.

use crate::error::{Error, Result};
use crate::rollup::Rollup;
use crate::types::ResultCount;
use serde_json::{Value, json};
use std::fs::File;
use std::path::Path;

/// Export the rollup as pretty-printed JSON.
///
/// # Arguments
/// * `rollup` - Completed rollup
/// * `output_path` - Path to write the JSON file
pub fn export_json_report(rollup: &Rollup, output_path: &Path) -> Result<()> {
    let report = json_report(rollup);
    let file = File::create(output_path).map_err(|source| Error::Write { path: output_path.to_path_buf(), source })?;
    serde_json::to_writer_pretty(file, &report)?;
    Ok(())
}

/// Build the JSON document for a rollup
pub fn json_report(rollup: &Rollup) -> Value {
    let matrix = &rollup.matrix;

    let components: Vec<Value> = rollup
        .component_totals
        .iter()
        .map(|(name, count)| json!({ "component": name, "count": count_json(count) }))
        .collect();

    let columns: Vec<Value> = rollup
        .column_totals
        .iter()
        .enumerate()
        .map(|(i, count)| {
            json!({
                "test": matrix.test_names.get(i),
                "run": matrix.run_names.get(i),
                "count": count_json(count),
            })
        })
        .collect();

    let checks: Vec<Value> = matrix
        .checks
        .values()
        .map(|check| {
            let values: Vec<String> = check.values.iter().map(ToString::to_string).collect();
            json!({
                "name": check.name,
                "component": check.component,
                "values": values,
                "count": count_json(&check.count),
            })
        })
        .collect();

    let files: Vec<String> = matrix.files.iter().map(|p| p.display().to_string()).collect();

    json!({
        "files": files,
        "legacy": rollup.legacy(),
        "verdict": rollup.verdict(),
        "grand_total": count_json(&rollup.grand_total),
        "components": components,
        "columns": columns,
        "checks": checks,
    })
}

fn count_json(count: &ResultCount) -> Value {
    json!({
        "passes": count.passes,
        "fails": count.fails,
        "errors": count.errors,
        "pass_rate": count.pass_rate(),
    })
}
