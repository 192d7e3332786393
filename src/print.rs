//! Fixed-width console rendering of tables
//!
//! ```text
//! +----+------+--------+
//! | id | name | amount |
//! +----+------+--------+
//! | k1 | Ann  |     99 |
//! +----+------+--------+
//! ```

use crate::table::{Table, KEY_MARKER};

/// Rendering options
#[derive(Debug, Clone, Default)]
pub struct PrintOptions {
    /// Cap on column width in characters; longer cells are truncated
    pub max_column_width: Option<usize>,
    /// Prefix the key column header with the key marker
    pub mark_key: bool,
}

/// Check if a string looks like a number (for right-alignment)
///
/// Needs at least one digit, so `inf` and `NaN` stay text.
pub fn is_number(s: &str) -> bool {
    s.bytes().any(|b| b.is_ascii_digit()) && s.parse::<f64>().is_ok()
}

/// Truncate text with ellipsis if too long
pub fn truncate_text(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else if max_chars <= 1 {
        s.chars().take(max_chars).collect()
    } else {
        let mut result: String = s.chars().take(max_chars - 1).collect();
        result.push('…');
        result
    }
}

fn header_text(table: &Table, col: usize, options: &PrintOptions) -> String {
    let column = &table.columns()[col];
    if options.mark_key && column.is_key {
        format!("{}{}", KEY_MARKER, column.name)
    } else {
        column.name.clone()
    }
}

/// Width of each column in characters: the widest of its header and fields
pub fn column_widths(table: &Table, options: &PrintOptions) -> Vec<usize> {
    let mut widths: Vec<usize> = (0..table.column_count())
        .map(|col| header_text(table, col, options).chars().count())
        .collect();

    for (_, record) in table.records() {
        for (col, field) in record.iter().enumerate() {
            if let Some(width) = widths.get_mut(col) {
                *width = (*width).max(field.chars().count());
            }
        }
    }

    if let Some(max) = options.max_column_width {
        for width in &mut widths {
            *width = (*width).min(max);
        }
    }
    widths
}

fn push_separator(output: &mut String, widths: &[usize]) {
    output.push('+');
    for width in widths {
        output.push_str(&"-".repeat(width + 2));
        output.push('+');
    }
    output.push('\n');
}

fn push_row<'a>(output: &mut String, widths: &[usize], cells: impl Iterator<Item = &'a str>) {
    output.push('|');
    for (cell, &width) in cells.zip(widths) {
        let text = truncate_text(cell, width);
        if is_number(cell) {
            output.push_str(&format!(" {:>width$} |", text, width = width));
        } else {
            output.push_str(&format!(" {:<width$} |", text, width = width));
        }
    }
    output.push('\n');
}

/// Render a table as an ASCII grid. A table without columns renders as "".
pub fn render(table: &Table, options: &PrintOptions) -> String {
    if table.column_count() == 0 {
        return String::new();
    }

    let widths = column_widths(table, options);
    let headers: Vec<String> = (0..table.column_count())
        .map(|col| header_text(table, col, options))
        .collect();

    let mut output = String::new();
    push_separator(&mut output, &widths);
    // Headers are never right-aligned, even when they look numeric
    output.push('|');
    for (header, &width) in headers.iter().zip(&widths) {
        output.push_str(&format!(" {:<width$} |", truncate_text(header, width), width = width));
    }
    output.push('\n');
    push_separator(&mut output, &widths);

    if !table.is_empty() {
        for (_, record) in table.records() {
            push_row(&mut output, &widths, record.iter());
        }
        push_separator(&mut output, &widths);
    }
    output
}
