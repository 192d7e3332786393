//! CSV import/export using the csv crate
//!
//! RFC 4180 compliant, so fields may contain delimiters, quotes and line
//! breaks that the native table format cannot hold.

use std::io::Cursor;

use crate::table::{ColumnId, Record, Table, TableError};

/// Error type for CSV import/export
#[derive(Debug)]
pub enum InterchangeError {
    /// CSV reader/writer failure (line is 1-based when known)
    Csv {
        message: String,
        line: Option<usize>,
    },
    /// Input has no header row
    MissingHeader,
    /// Named key column is not in the header row
    UnknownKeyColumn(String),
    /// Table rejected a row (1-based line number)
    Table { line: usize, source: TableError },
}

impl std::fmt::Display for InterchangeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Csv {
                message,
                line: Some(line),
            } => write!(f, "CSV error at line {}: {}", line, message),
            Self::Csv {
                message,
                line: None,
            } => write!(f, "CSV error: {}", message),
            Self::MissingHeader => write!(f, "CSV input has no header row"),
            Self::UnknownKeyColumn(name) => write!(f, "no column named '{}' in CSV header", name),
            Self::Table { line, source } => write!(f, "CSV line {}: {}", line, source),
        }
    }
}

impl std::error::Error for InterchangeError {}

impl From<csv::Error> for InterchangeError {
    fn from(e: csv::Error) -> Self {
        let line = e.position().map(|p| p.line() as usize);
        Self::Csv {
            message: e.to_string(),
            line,
        }
    }
}

/// Write a table as CSV: a header row of column names, then one row per record
pub fn export_csv(table: &Table) -> Result<String, InterchangeError> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(table.columns().iter().map(|c| c.name.as_str()))?;
    for (_, record) in table.records() {
        writer.write_record(record.iter())?;
    }

    let bytes = writer.into_inner().map_err(|e| InterchangeError::Csv {
        message: e.to_string(),
        line: None,
    })?;
    String::from_utf8(bytes).map_err(|e| InterchangeError::Csv {
        message: e.to_string(),
        line: None,
    })
}

/// Build a table from CSV content, using `key_column` as the key
pub fn import_csv(name: &str, content: &str, key_column: &str) -> Result<Table, InterchangeError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(Cursor::new(content.as_bytes()));
    let mut rows = reader.records();

    let header = rows.next().ok_or(InterchangeError::MissingHeader)??;
    if !header.iter().any(|h| h == key_column) {
        return Err(InterchangeError::UnknownKeyColumn(key_column.to_string()));
    }

    let columns = header.iter().map(|h| {
        if h == key_column {
            ColumnId::key(h)
        } else {
            ColumnId::new(h)
        }
    });
    let mut table = Table::with_columns(name, columns)
        .map_err(|source| InterchangeError::Table { line: 1, source })?;

    for row in rows {
        let row = row?;
        let line = row.position().map(|p| p.line() as usize).unwrap_or(0);
        let record: Record = row.iter().map(str::to_string).collect();
        table
            .add(record)
            .map_err(|source| InterchangeError::Table { line, source })?;
    }

    tracing::debug!(
        table = %table.name(),
        records = table.len(),
        "Imported table from CSV"
    );
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> Table {
        let mut table =
            Table::with_columns("people", [ColumnId::key("id"), ColumnId::new("note")]).unwrap();
        table.add(["1", "hello, world"]).unwrap();
        table.add(["2", "with \"quotes\""]).unwrap();
        table
    }

    #[test]
    fn test_export_quotes_fields() {
        let csv = export_csv(&sample_table()).unwrap();
        assert_eq!(
            csv,
            "id,note\n1,\"hello, world\"\n2,\"with \"\"quotes\"\"\"\n"
        );
    }

    #[test]
    fn test_import_exported() {
        let table = sample_table();
        let imported = import_csv("people", &export_csv(&table).unwrap(), "id").unwrap();

        assert_eq!(imported.columns(), table.columns());
        assert_eq!(imported.get("2").unwrap().field(1), Some("with \"quotes\""));
        assert_eq!(imported.keys().collect::<Vec<_>>(), vec!["1", "2"]);
    }

    #[test]
    fn test_import_key_column_by_name() {
        let table = import_csv("t", "a,b\nx,1\ny,2\n", "b").unwrap();
        assert_eq!(table.key_column(), Some(1));
        assert_eq!(table.get("2").unwrap().field(0), Some("y"));
    }

    #[test]
    fn test_import_unknown_key_column() {
        assert!(matches!(
            import_csv("t", "a,b\n", "c"),
            Err(InterchangeError::UnknownKeyColumn(_))
        ));
    }

    #[test]
    fn test_import_empty() {
        assert!(matches!(
            import_csv("t", "", "id"),
            Err(InterchangeError::MissingHeader)
        ));
    }

    #[test]
    fn test_import_ragged_row() {
        let result = import_csv("t", "id,v\n1,2\n3\n", "id");
        assert!(matches!(
            result,
            Err(InterchangeError::Table {
                line: 3,
                source: TableError::SizeMismatch { .. }
            })
        ));
    }

    #[test]
    fn test_import_duplicate_key() {
        let result = import_csv("t", "id,v\n1,a\n1,b\n", "id");
        assert!(matches!(
            result,
            Err(InterchangeError::Table {
                source: TableError::DuplicateKey(_),
                ..
            })
        ));
    }
}
