use colored::Colorize;

use crate::catalog::Value;
use crate::error::DbError;
use crate::sql::QueryResult;

/// Text of one result, as printed by the shell.
pub fn format_result(result: &QueryResult) -> String {
    match (&result.columns, &result.rows) {
        (Some(columns), Some(rows)) => format!(
            "{}\n{}",
            format_table(columns, rows),
            result.message.dimmed()
        ),
        _ => result.message.green().to_string(),
    }
}

pub fn format_error(error: &DbError) -> String {
    format!("{} {}", "Error:".red().bold(), error)
}

fn format_value(value: &Value, width: usize) -> String {
    let text = format!("{:<width$}", value.to_string(), width = width);
    match value {
        Value::Null => text.dimmed().to_string(),
        Value::String(_) => text,
    }
}

/// Aligned text table. Widths are measured before colouring.
pub fn format_table(columns: &[String], rows: &[Vec<Value>]) -> String {
    let mut widths: Vec<usize> = columns.iter().map(|c| c.chars().count()).collect();
    for row in rows {
        for (width, value) in widths.iter_mut().zip(row) {
            *width = (*width).max(value.to_string().chars().count());
        }
    }

    let separator = widths
        .iter()
        .map(|w| "-".repeat(w + 2))
        .collect::<Vec<_>>()
        .join("+");
    let separator = format!("+{}+", separator);

    let header = columns
        .iter()
        .zip(&widths)
        .map(|(c, w)| format!(" {} ", format!("{:<w$}", c, w = *w).cyan().bold()))
        .collect::<Vec<_>>()
        .join("|");

    let mut lines = vec![separator.clone(), format!("|{}|", header), separator.clone()];
    for row in rows {
        let cells = row
            .iter()
            .zip(&widths)
            .map(|(v, w)| format!(" {} ", format_value(v, *w)))
            .collect::<Vec<_>>()
            .join("|");
        lines.push(format!("|{}|", cells));
    }
    if !rows.is_empty() {
        lines.push(separator);
    }

    lines.join("\n")
}
