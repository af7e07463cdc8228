//! Column-aligned text report for ranked function costs.
//!
//! Times are printed in seconds, memory in KB with one decimal. The
//! function-name column stretches to the longest name so the cost columns
//! stay aligned.

use crate::aggregator::SortKey;
use crate::parser::schema::FunctionEntry;
use crate::utils::config::MIN_NAME_COLUMN_WIDTH;

/// Render the ranked entries as a text table
///
/// **Public** - main entry point for text output
pub fn render_report(entries: &[FunctionEntry], sort_key: Option<SortKey>) -> String {
    let name_width = entries
        .iter()
        .map(|e| e.name.len())
        .max()
        .unwrap_or(0)
        .max(MIN_NAME_COLUMN_WIDTH);

    let mut lines = Vec::with_capacity(entries.len() + 4);

    match sort_key {
        Some(key) => lines.push(format!(
            "Showing the {} most costly calls sorted by '{}'.\n",
            entries.len(),
            key.as_str()
        )),
        None => lines.push(format!(
            "Showing {} calls in the order they were first observed.\n",
            entries.len()
        )),
    }

    lines.push(format!(
        "{:name_width$}          | Inclusive          | Own",
        ""
    ));
    lines.push(format!(
        "{:<name_width$}   #calls |    time     memory |    time     memory",
        "function"
    ));
    lines.push("-".repeat(name_width + 50));

    for entry in entries {
        lines.push(format!(
            "{:<name_width$} {:>8} | {:>7.3} {:>9}K | {:>7.3} {:>9}K",
            entry.name,
            group_thousands(entry.calls as i64),
            entry.time_inclusive,
            format_kb(entry.memory_inclusive),
            entry.time_own,
            format_kb(entry.memory_own),
        ));
    }

    lines.join("\n")
}

/// Format a byte count as KB with one decimal
///
/// **Private** - internal formatting helper
fn format_kb(bytes: i64) -> String {
    format!("{:.1}", bytes as f64 / 1024.0)
}

/// Group an integer with comma thousands separators
///
/// **Public** - locale-style number formatting for counts
pub fn group_thousands(value: i64) -> String {
    let negative = value < 0;
    let digits = value.unsigned_abs().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if negative {
        format!("-{}", grouped)
    } else {
        grouped
    }
}
