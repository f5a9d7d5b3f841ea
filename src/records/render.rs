use serde_json::Value;
use unicode_width::UnicodeWidthStr;

use crate::fetch::decode::value_to_string;

use super::{Normalized, Table};

const COLUMN_GAP: &str = "  ";

/// Plain-text rendering for terminal output.
pub fn render(result: &Normalized) -> String {
    match result {
        Normalized::Table(table) => render_table(table),
        Normalized::Record(record) => render_pairs(
            &record
                .iter()
                .map(|(label, value)| (label.as_str(), value))
                .collect::<Vec<_>>(),
        ),
        Normalized::Series(series) => render_pairs(&series.iter().collect::<Vec<_>>()),
        Normalized::Raw(value) => {
            serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
        }
    }
}

pub fn render_table(table: &Table) -> String {
    let cells: Vec<Vec<String>> = table
        .rows()
        .iter()
        .map(|row| row.iter().map(value_to_string).collect())
        .collect();

    let mut widths: Vec<usize> = table
        .columns()
        .iter()
        .map(|column| UnicodeWidthStr::width(column.as_str()))
        .collect();
    for row in &cells {
        for (idx, cell) in row.iter().enumerate() {
            widths[idx] = widths[idx].max(UnicodeWidthStr::width(cell.as_str()));
        }
    }

    let mut out = String::new();
    push_line(&mut out, table.columns().iter().map(String::as_str), &widths);
    let rule: Vec<String> = widths.iter().map(|width| "-".repeat(*width)).collect();
    push_line(&mut out, rule.iter().map(String::as_str), &widths);
    for row in &cells {
        push_line(&mut out, row.iter().map(String::as_str), &widths);
    }
    out
}

fn render_pairs(pairs: &[(&str, &Value)]) -> String {
    let label_width = pairs
        .iter()
        .map(|(label, _)| UnicodeWidthStr::width(*label))
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for (label, value) in pairs {
        let pad = label_width.saturating_sub(UnicodeWidthStr::width(*label));
        out.push_str(label);
        out.push_str(&" ".repeat(pad));
        out.push_str(COLUMN_GAP);
        out.push_str(&value_to_string(value));
        out.push('\n');
    }
    out
}

fn push_line<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>, widths: &[usize]) {
    let mut line = String::new();
    for (idx, cell) in cells.enumerate() {
        if idx > 0 {
            line.push_str(COLUMN_GAP);
        }
        line.push_str(cell);
        let pad = widths[idx].saturating_sub(UnicodeWidthStr::width(cell));
        line.push_str(&" ".repeat(pad));
    }
    out.push_str(line.trim_end());
    out.push('\n');
}
