//! Text serialization of tables
//!
//! ```text
//! <table-name>
//! <col1>\t<col2>\t...<colN>
//! <field1>\t<field2>\t...<fieldN>
//! ```
//!
//! The key column header is written with a leading `*`. Every line, the last
//! record line included, ends with `\n`.

use crate::table::{ColumnId, Record, Table, TableError, KEY_MARKER};

/// Separator between fields within a line
pub const FIELD_DELIMITER: char = '\t';

/// Separator between lines
pub const LINE_DELIMITER: char = '\n';

/// Errors from encoding or decoding the table format
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// Input has no table name line
    MissingName,
    /// Input has no header line
    MissingHeader,
    /// Table to encode has no schema
    MissingSchema,
    /// Text contains a tab or line break and cannot be written as one cell
    UnencodableText { context: String },
    /// Non-key column name starts with the key marker and would decode as the key
    AmbiguousHeader(String),
    /// Single-column record whose line would be blank and skipped on decode
    EmptyRecordLine(String),
    /// Schema or record rejected by the table (1-based line number)
    Table { line: usize, source: TableError },
}

impl std::fmt::Display for FormatError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingName => write!(f, "missing table name line"),
            Self::MissingHeader => write!(f, "missing column header line"),
            Self::MissingSchema => write!(f, "table has no columns"),
            Self::UnencodableText { context } => {
                write!(f, "{} contains a tab or line break", context)
            }
            Self::AmbiguousHeader(name) => write!(
                f,
                "column '{}' starts with '{}' but is not the key column",
                name, KEY_MARKER
            ),
            Self::EmptyRecordLine(key) => {
                write!(f, "record '{}' would be written as a blank line", key)
            }
            Self::Table { line, source } => write!(f, "line {}: {}", line, source),
        }
    }
}

impl std::error::Error for FormatError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Table { source, .. } => Some(source),
            _ => None,
        }
    }
}

fn check_cell(text: &str, context: impl FnOnce() -> String) -> Result<(), FormatError> {
    if text.contains([FIELD_DELIMITER, LINE_DELIMITER, '\r']) {
        return Err(FormatError::UnencodableText { context: context() });
    }
    Ok(())
}

fn push_line<'a>(output: &mut String, cells: impl Iterator<Item = &'a str>) {
    for (i, cell) in cells.enumerate() {
        if i > 0 {
            output.push(FIELD_DELIMITER);
        }
        output.push_str(cell);
    }
    output.push(LINE_DELIMITER);
}

/// Serialize a table: name line, header line, then records in key order
pub fn encode(table: &Table) -> Result<String, FormatError> {
    if table.column_count() == 0 {
        return Err(FormatError::MissingSchema);
    }

    check_cell(table.name(), || "table name".to_string())?;
    let mut headers = Vec::with_capacity(table.column_count());
    for column in table.columns() {
        check_cell(&column.name, || format!("column '{}'", column.name))?;
        if !column.is_key && column.name.starts_with(KEY_MARKER) {
            return Err(FormatError::AmbiguousHeader(column.name.clone()));
        }
        headers.push(column.header());
    }

    let mut output = String::new();
    output.push_str(table.name());
    output.push(LINE_DELIMITER);
    push_line(&mut output, headers.iter().map(String::as_str));

    for (key, record) in table.records() {
        for (i, field) in record.iter().enumerate() {
            check_cell(field, || format!("field {} of record '{}'", i, key))?;
        }
        if record.len() == 1 && key.is_empty() {
            return Err(FormatError::EmptyRecordLine(key.to_string()));
        }
        push_line(&mut output, record.iter());
    }

    tracing::debug!(
        table = %table.name(),
        records = table.len(),
        bytes = output.len(),
        "Encoded table"
    );
    Ok(output)
}

/// Parse the text format back into a table
///
/// Blank record lines are skipped. Both `\n` and `\r\n` line endings are
/// accepted.
pub fn decode(text: &str) -> Result<Table, FormatError> {
    let mut lines = text.lines().enumerate();

    let (_, name) = lines.next().ok_or(FormatError::MissingName)?;
    let (_, header) = lines.next().ok_or(FormatError::MissingHeader)?;

    let mut table = Table::new(name);
    table
        .set_columns(header.split(FIELD_DELIMITER).map(ColumnId::from_header))
        .map_err(|source| FormatError::Table { line: 2, source })?;

    for (index, line) in lines {
        if line.is_empty() {
            continue;
        }
        let record: Record = line.split(FIELD_DELIMITER).map(str::to_string).collect();
        table.add(record).map_err(|source| FormatError::Table {
            line: index + 1,
            source,
        })?;
    }

    tracing::debug!(
        table = %table.name(),
        records = table.len(),
        "Decoded table"
    );
    Ok(table)
}
