//! End-of-run console summary.

use super::format::format_percent;
use crate::rollup::Rollup;

/// Format the end-of-run summary shown on stdout
pub fn format_summary(rollup: &Rollup) -> String {
    let total = &rollup.grand_total;
    let legacy = rollup.legacy();
    let matrix = &rollup.matrix;

    let mut out = String::new();
    out.push_str("\n=== Summary ===\n");
    out.push_str(&format!(
        "Files:       {} ({} run columns, {} checks)\n",
        matrix.files.len(),
        matrix.column_count(),
        matrix.checks.len()
    ));
    out.push_str(&format!("✓ Passed:    {}\n", total.passes));
    out.push_str(&format!("✗ Failed:    {}\n", total.fails));
    out.push_str(&format!("⚠ Errors:    {}\n", total.errors));
    out.push_str(&format!("Pass rate:   {}\n", format_percent(total.pass_rate())));
    out.push_str(&format!(
        "Harness:     {} passed, {} failed, {} errored -> {}\n",
        legacy.passes,
        legacy.fails,
        legacy.errors,
        rollup.verdict().as_str()
    ));
    out
}

/// Print the end-of-run summary
pub fn print_summary(rollup: &Rollup) {
    print!("{}", format_summary(rollup));
}
