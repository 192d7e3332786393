//! Table type: schema plus key-addressed records

use indexmap::IndexMap;

use super::column::ColumnId;
use super::error::TableError;
use super::record::Record;

const DEFAULT_NAME: &str = "untitled";

/// A named table of records keyed by a single key column
///
/// Records are kept in insertion order. The map key of each record always
/// equals the record's field at [`Table::key_column`]. Two tables are equal
/// only when their records also appear in the same order.
#[derive(Debug, Clone)]
pub struct Table {
    name: String,
    columns: Vec<ColumnId>,
    /// Index of the key column, `None` while no schema is installed
    key_column: Option<usize>,
    records: IndexMap<String, Record>,
}

impl PartialEq for Table {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.columns == other.columns
            && self.key_column == other.key_column
            && self.records.iter().eq(other.records.iter())
    }
}

impl Eq for Table {}

impl Default for Table {
    fn default() -> Self {
        Self::new(DEFAULT_NAME)
    }
}

impl Table {
    /// Create an empty table with no schema
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
            key_column: None,
            records: IndexMap::new(),
        }
    }

    /// Create a table and install its schema in one step
    pub fn with_columns(
        name: impl Into<String>,
        columns: impl IntoIterator<Item = ColumnId>,
    ) -> Result<Self, TableError> {
        let mut table = Self::new(name);
        table.set_columns(columns)?;
        Ok(table)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Replace the schema
    ///
    /// Exactly one column must be the key. On failure the table is left with
    /// no schema at all. Existing records are dropped whenever the schema is
    /// replaced.
    pub fn set_columns(
        &mut self,
        columns: impl IntoIterator<Item = ColumnId>,
    ) -> Result<(), TableError> {
        let columns: Vec<ColumnId> = columns.into_iter().collect();

        self.columns.clear();
        self.key_column = None;
        if !self.records.is_empty() {
            tracing::debug!(
                table = %self.name,
                dropped = self.records.len(),
                "Schema replaced, dropping records"
            );
            self.records.clear();
        }

        let mut key_column = None;
        for (index, column) in columns.iter().enumerate() {
            if column.is_key {
                if key_column.is_some() {
                    return Err(TableError::DuplicateKeyColumn);
                }
                key_column = Some(index);
            }
        }
        let key_column = key_column.ok_or(TableError::NoKeyColumn)?;

        tracing::debug!(
            table = %self.name,
            columns = columns.len(),
            key_column,
            "Installed schema"
        );
        self.columns = columns;
        self.key_column = Some(key_column);
        Ok(())
    }

    pub fn columns(&self) -> &[ColumnId] {
        &self.columns
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn column_name(&self, index: usize) -> Result<&str, TableError> {
        self.columns
            .get(index)
            .map(|c| c.name.as_str())
            .ok_or(TableError::IndexOutOfRange {
                index,
                len: self.columns.len(),
            })
    }

    /// Position of a column by name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    pub fn key_column(&self) -> Option<usize> {
        self.key_column
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.records.contains_key(key)
    }

    /// Append a record, keyed by its key-column field
    pub fn add(&mut self, record: impl Into<Record>) -> Result<(), TableError> {
        let record = record.into();
        if record.len() != self.columns.len() {
            return Err(TableError::SizeMismatch {
                expected: self.columns.len(),
                actual: record.len(),
            });
        }
        let key_column = self.key_column.ok_or(TableError::NoKeyColumn)?;
        let key = record
            .field(key_column)
            .ok_or(TableError::IndexOutOfRange {
                index: key_column,
                len: record.len(),
            })?
            .to_string();

        if self.records.contains_key(&key) {
            return Err(TableError::DuplicateKey(key));
        }

        tracing::debug!(table = %self.name, key = %key, "Added record");
        self.records.insert(key, record);
        Ok(())
    }

    pub fn get(&self, key: &str) -> Result<&Record, TableError> {
        self.records
            .get(key)
            .ok_or_else(|| TableError::RecordNotFound(key.to_string()))
    }

    /// Overwrite one field of the record stored under `key`
    ///
    /// Writing a new value into the key column rekeys the record in place:
    /// it keeps its position in [`Table::keys`].
    pub fn update(
        &mut self,
        key: &str,
        field_index: usize,
        value: impl Into<String>,
    ) -> Result<(), TableError> {
        let value = value.into();
        if !self.records.contains_key(key) {
            return Err(TableError::RecordNotFound(key.to_string()));
        }
        if field_index >= self.columns.len() {
            return Err(TableError::IndexOutOfRange {
                index: field_index,
                len: self.columns.len(),
            });
        }

        let rekey = self.key_column == Some(field_index) && value != key;
        if rekey && self.records.contains_key(&value) {
            return Err(TableError::DuplicateKey(value));
        }

        if let Some(record) = self.records.get_mut(key) {
            record.set_field(field_index, value.clone())?;
        }

        if rekey {
            if let Some((index, _, record)) = self.records.shift_remove_full(key) {
                self.records.shift_insert(index, value.clone(), record);
            }
            tracing::debug!(table = %self.name, from = %key, to = %value, "Rekeyed record");
        } else {
            tracing::debug!(table = %self.name, key = %key, field_index, "Updated record");
        }
        Ok(())
    }

    /// Remove and return the record stored under `key`
    pub fn delete(&mut self, key: &str) -> Result<Record, TableError> {
        let record = self
            .records
            .shift_remove(key)
            .ok_or_else(|| TableError::RecordNotFound(key.to_string()))?;
        tracing::debug!(table = %self.name, key = %key, "Deleted record");
        Ok(record)
    }

    /// Record keys in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(String::as_str)
    }

    /// Records with their keys, in insertion order
    pub fn records(&self) -> impl Iterator<Item = (&str, &Record)> {
        self.records.iter().map(|(k, r)| (k.as_str(), r))
    }
}
