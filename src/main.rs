// Copyright 2015 The Rust Project Developers. See the COPYRIGHT
// file at the top-level directory of this distribution and at
// http://rust-lang.org/COPYRIGHT.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

mod cli;
mod config;
mod error;
mod matrix;
mod report;
mod rollup;
mod types;
mod ui;

use config::ReportPlan;
use error::Error;
use log::debug;
use rollup::Rollup;

fn main() {
    env_logger::init();

    // Parse CLI arguments
    let args = cli::CliArgs::parse_args();

    // Resolve inputs and outputs
    let plan = match config::build_report_plan(&args) {
        Ok(p) => p,
        Err(Error::Usage) => {
            ui::print_usage();
            std::process::exit(0);
        }
        Err(e) => {
            ui::print_error(&format!("Configuration error: {}", e));
            std::process::exit(1);
        }
    };

    if let Err(e) = run(&plan) {
        ui::print_error(&e.to_string());
        std::process::exit(1);
    }
}

/// Build the matrix, roll it up and write every report
fn run(plan: &ReportPlan) -> error::Result<()> {
    debug!("Processing {} input files", plan.inputs.len());

    // Warnings are printed as each file is processed
    let matrix = matrix::build_matrix(&plan.inputs, |warning| ui::print_warning(&warning.to_string()))?;

    let rollup = Rollup::compute(matrix);

    report::export_csv_summary(&rollup, &plan.csv_path)?;
    ui::status(&format!("CSV summary saved to: {}", plan.csv_path.display()));

    report::export_xml_status(&rollup, &plan.xml_path)?;
    ui::status(&format!("XML status saved to: {}", plan.xml_path.display()));

    if let Some(ref json_path) = plan.json_path {
        report::export_json_report(&rollup, json_path)?;
        ui::status(&format!("JSON report saved to: {}", json_path.display()));
    }

    if !plan.quiet {
        report::print_summary(&rollup);
    }

    Ok(())
}
