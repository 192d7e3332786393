//! Errors raised by table and record operations

/// Errors that can occur when mutating or reading a table
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    /// Schema has no column marked as key
    NoKeyColumn,
    /// Schema has more than one column marked as key
    DuplicateKeyColumn,
    /// Record length does not match the table's column count
    SizeMismatch { expected: usize, actual: usize },
    /// Another record already uses this key
    DuplicateKey(String),
    /// No record with this key exists
    RecordNotFound(String),
    /// Column or field index outside `[0, len)`
    IndexOutOfRange { index: usize, len: usize },
}

impl std::fmt::Display for TableError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoKeyColumn => write!(f, "no key column specified in table"),
            Self::DuplicateKeyColumn => write!(f, "more than one key column specified in table"),
            Self::SizeMismatch { expected, actual } => write!(
                f,
                "record has {} fields but table has {} columns",
                actual, expected
            ),
            Self::DuplicateKey(key) => write!(f, "duplicate key '{}' exists in table", key),
            Self::RecordNotFound(key) => write!(f, "no record with key '{}' exists in table", key),
            Self::IndexOutOfRange { index, len } => {
                write!(f, "no column at index {} (table has {})", index, len)
            }
        }
    }
}

impl std::error::Error for TableError {}
