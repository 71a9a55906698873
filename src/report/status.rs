//! XML status document.
//!
//! Carries the harness tally from the input files, the cumulative check
//! totals and a single-letter verdict (`P`, `F` or `E`).

use super::format::format_rate;
use crate::error::{Error, Result};
use crate::rollup::Rollup;
use log::debug;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use std::io::{self, Write};
use std::path::Path;

const DESCRIPTION: &str = "Overall Test Result, Individual Test Results and Cumulative Totals";

/// Write the status document for `rollup` to `output_path`
pub fn export_xml_status(rollup: &Rollup, output_path: &Path) -> Result<()> {
    debug!("Writing XML status to {:?}", output_path);
    let xml = format_xml_status(rollup).map_err(|source| Error::Write { path: output_path.to_path_buf(), source })?;
    std::fs::write(output_path, xml).map_err(|source| Error::Write { path: output_path.to_path_buf(), source })
}

/// Render the status document into a string
pub fn format_xml_status(rollup: &Rollup) -> io::Result<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    write_xml_status(&mut writer, rollup)?;
    let mut xml = String::from_utf8_lossy(&writer.into_inner()).into_owned();
    xml.push('\n');
    Ok(xml)
}

fn write_xml_status<W: Write>(writer: &mut Writer<W>, rollup: &Rollup) -> io::Result<()> {
    let legacy = rollup.legacy();
    let total = &rollup.grand_total;

    let measurements = [
        ("Test Passed", legacy.passes.to_string()),
        ("Test Failed", legacy.fails.to_string()),
        ("Test Errored", legacy.errors.to_string()),
        ("Cumulative: Checks Passed", total.passes.to_string()),
        ("Failed", total.fails.to_string()),
        ("Errors", total.errors.to_string()),
        ("Cumulative Pass Rate", format!("{} %", format_rate(total.pass_rate()))),
    ];

    write_event(writer, Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    write_event(writer, Event::Start(BytesStart::new("TestResult")))?;

    write_text_element(writer, BytesStart::new("Description"), DESCRIPTION)?;

    write_event(writer, Event::Start(BytesStart::new("Measurements")))?;
    for (name, value) in &measurements {
        let mut element = BytesStart::new("Measurement");
        element.push_attribute(("name", *name));
        write_text_element(writer, element, value)?;
    }
    write_event(writer, Event::End(BytesEnd::new("Measurements")))?;

    write_event(writer, Event::Empty(BytesStart::new("FilePathList")))?;
    write_text_element(writer, BytesStart::new("RebootRequired"), "1")?;
    write_text_element(writer, BytesStart::new("FinalResult"), rollup.verdict().as_str())?;

    write_event(writer, Event::End(BytesEnd::new("TestResult")))
}

fn write_text_element<W: Write>(writer: &mut Writer<W>, start: BytesStart<'_>, text: &str) -> io::Result<()> {
    let end = start.to_end().into_owned();
    write_event(writer, Event::Start(start))?;
    write_event(writer, Event::Text(BytesText::new(text)))?;
    write_event(writer, Event::End(end))
}

fn write_event<W: Write>(writer: &mut Writer<W>, event: Event<'_>) -> io::Result<()> {
    writer.write_event(event).map_err(io::Error::other)
}
