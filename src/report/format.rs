//! Number formatting shared by the report emitters.

/// Significant digits kept when a pass rate is not a whole number
const RATE_SIGNIFICANT_DIGITS: i32 = 12;

/// Render a pass rate without the percent sign.
///
/// Whole numbers keep a single decimal (`50.0`, `100.0`); other values keep
/// up to twelve significant digits with trailing zeros removed
/// (`33.3333333333`).
pub fn format_rate(rate: f64) -> String {
    if !rate.is_finite() {
        return "0.0".to_string();
    }
    if rate.fract() == 0.0 {
        return format!("{:.1}", rate);
    }

    let integer_digits = rate.abs().log10().floor() as i32 + 1;
    let decimals = (RATE_SIGNIFICANT_DIGITS - integer_digits).max(0) as usize;
    let mut text = format!("{:.*}", decimals, rate);

    if text.contains('.') {
        let trimmed = text.trim_end_matches('0').trim_end_matches('.').len();
        text.truncate(trimmed);
    }
    if !text.contains('.') {
        text.push_str(".0");
    }
    text
}

/// Render a pass rate with a trailing `%`, as used in the CSV summary
pub fn format_percent(rate: f64) -> String {
    format!("{}%", format_rate(rate))
}
