//! Report generation module.
//!
//! This module handles:
//! - The CSV summary (grand total, components, detailed check matrix)
//! - The XML status document with the overall verdict
//! - JSON export of the rollup
//! - The console summary printed at the end of a run
//!
//! # Module Organization
//!
//! - `format` - Pass-rate formatting shared by every output
//! - `summary` - CSV summary report
//! - `status` - XML status document
//! - `export` - JSON export
//! - `console` - Console summary

mod console;
mod export;
mod format;
mod status;
mod summary;

// Re-export writers
pub use export::export_json_report;
pub use status::export_xml_status;
pub use summary::export_csv_summary;

// Re-export console output
pub use console::print_summary;
