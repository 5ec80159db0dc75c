//! Plain-text rendering of cycle values.

use crate::cycle::Cycle;
use crate::forecast::Forecast;

const FILLED: char = '█';
const EMPTY: char = '·';
const MIDPOINT: char = '|';

/// Render `value` as a symmetric bar with `width` cells on each side of
/// the midpoint marker.
///
/// Positive values fill rightwards from the midpoint, negative values
/// leftwards. Values are clamped to `[-1, 1]`; NaN renders as empty.
pub fn render_mini_bar(value: f64, width: usize) -> String {
    let value = if value.is_nan() { 0.0 } else { value.clamp(-1.0, 1.0) };
    let filled = ((value.abs() * width as f64).round() as usize).min(width);
    let unfilled = width - filled;

    let mut bar = String::with_capacity((width * 2 + 1) * 3);
    if value < 0.0 {
        bar.extend(std::iter::repeat(EMPTY).take(unfilled));
        bar.extend(std::iter::repeat(FILLED).take(filled));
        bar.push(MIDPOINT);
        bar.extend(std::iter::repeat(EMPTY).take(width));
    } else {
        bar.extend(std::iter::repeat(EMPTY).take(width));
        bar.push(MIDPOINT);
        bar.extend(std::iter::repeat(FILLED).take(filled));
        bar.extend(std::iter::repeat(EMPTY).take(unfilled));
    }
    bar
}

/// Render a forecast as one line per day with a mini bar per cycle.
/// Critical days are flagged with `*`.
pub fn render_range_chart(forecast: &Forecast, width: usize) -> String {
    let mut output = String::new();
    let header: Vec<String> = Cycle::ALL
        .iter()
        .map(|c| format!("{:^w$}", c.label(), w = width * 2 + 1))
        .collect();
    output.push_str(&format!("{:<10}  {}\n", "Date", header.join("  ")));
    output.push_str(&"─".repeat(12 + (width * 2 + 3) * Cycle::ALL.len()));
    output.push('\n');

    for entry in &forecast.entries {
        let bars: Vec<String> = entry
            .rows
            .iter()
            .map(|row| render_mini_bar(row.value, width))
            .collect();
        output.push_str(&format!(
            "{}  {}{}\n",
            entry.date.format("%Y-%m-%d"),
            bars.join("  "),
            if entry.any_critical { " *" } else { "" }
        ));
    }

    output.push_str("* critical (transition) day\n");
    output
}
