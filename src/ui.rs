/// User interface and status output utilities
///
/// This module handles:
/// - Colored terminal text
/// - Status, warning and error message formatting
/// - The usage message
use crate::cli::USAGE;
use std::io::Write;

/// Print the "check-matrix: " prefix for status messages
fn print_status_header() {
    print!("check-matrix: ");
}

/// Print colored text to terminal, with fallback to plain text
fn print_color(s: &str, fg: term::color::Color) {
    if !really_print_color(s, fg) {
        print!("{}", s);
    }

    fn really_print_color(s: &str, fg: term::color::Color) -> bool {
        if let Some(ref mut t) = term::stdout() {
            if t.fg(fg).is_err() {
                return false;
            }
            let _ = t.attr(term::Attr::Bold);
            if write!(t, "{}", s).is_err() {
                return false;
            }
            let _ = t.reset();
            return true;
        }

        false
    }
}

/// Print a status message with "check-matrix: " prefix
pub fn status(s: &str) {
    print_status_header();
    println!("{}", s);
}

/// Print a recoverable problem with a colored "Warning" prefix
pub fn print_warning(msg: &str) {
    print_color("Warning", term::color::BRIGHT_YELLOW);
    println!(": {}", msg);
}

/// Print an error message with colored "error" prefix
pub fn print_error(msg: &str) {
    println!();
    print_color("error", term::color::BRIGHT_RED);
    println!(": {}", msg);
    println!();
}

/// Print the usage message to stderr
pub fn print_usage() {
    let program = std::env::args().next().unwrap_or_else(|| "check-matrix".to_string());
    eprintln!("Usage: {} {}", program, USAGE);
}
