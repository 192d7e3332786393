//! Named collection of tables

use indexmap::IndexMap;

use crate::table::{Record, Table, TableError};

const DEFAULT_NAME: &str = "untitled";
const DEFAULT_FOLDER: &str = "databases";

/// Errors from database-level operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseError {
    /// A table with this name is already in the database
    DuplicateTable(String),
    /// No table with this name exists
    TableNotFound(String),
    /// Table rejected the operation
    Table(TableError),
}

impl std::fmt::Display for DatabaseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateTable(name) => write!(f, "duplicate table name '{}' in database", name),
            Self::TableNotFound(name) => write!(f, "no table named '{}' in database", name),
            Self::Table(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for DatabaseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Table(e) => Some(e),
            _ => None,
        }
    }
}

impl From<TableError> for DatabaseError {
    fn from(e: TableError) -> Self {
        Self::Table(e)
    }
}

/// Tables keyed by name, in insertion order
#[derive(Debug, Clone)]
pub struct Database {
    name: String,
    /// Directory (relative to the data dir) the database is stored under
    folder: String,
    tables: IndexMap<String, Table>,
}

impl Default for Database {
    fn default() -> Self {
        Self::new(DEFAULT_NAME)
    }
}

impl Database {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            folder: DEFAULT_FOLDER.to_string(),
            tables: IndexMap::new(),
        }
    }

    pub fn with_folder(name: impl Into<String>, folder: impl Into<String>) -> Self {
        Self {
            folder: folder.into(),
            ..Self::new(name)
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn folder(&self) -> &str {
        &self.folder
    }

    pub fn set_folder(&mut self, folder: impl Into<String>) {
        self.folder = folder.into();
    }

    /// Replace every table. A duplicate name leaves the database empty.
    pub fn set_tables(
        &mut self,
        tables: impl IntoIterator<Item = Table>,
    ) -> Result<(), DatabaseError> {
        self.tables.clear();
        for table in tables {
            if let Err(e) = self.add(table) {
                self.tables.clear();
                return Err(e);
            }
        }
        Ok(())
    }

    pub fn add(&mut self, table: Table) -> Result<(), DatabaseError> {
        if self.tables.contains_key(table.name()) {
            return Err(DatabaseError::DuplicateTable(table.name().to_string()));
        }
        tracing::debug!(database = %self.name, table = %table.name(), "Added table");
        self.tables.insert(table.name().to_string(), table);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Result<&Table, DatabaseError> {
        self.tables
            .get(name)
            .ok_or_else(|| DatabaseError::TableNotFound(name.to_string()))
    }

    /// Mutable access stays private so a table's name always matches its key
    fn table_mut(&mut self, name: &str) -> Result<&mut Table, DatabaseError> {
        self.tables
            .get_mut(name)
            .ok_or_else(|| DatabaseError::TableNotFound(name.to_string()))
    }

    /// Rename a table, keeping its position in [`Database::table_names`]
    pub fn rename_table(&mut self, name: &str, new_name: &str) -> Result<(), DatabaseError> {
        if !self.tables.contains_key(name) {
            return Err(DatabaseError::TableNotFound(name.to_string()));
        }
        if name == new_name {
            return Ok(());
        }
        if self.tables.contains_key(new_name) {
            return Err(DatabaseError::DuplicateTable(new_name.to_string()));
        }

        if let Some((index, _, mut table)) = self.tables.shift_remove_full(name) {
            table.set_name(new_name);
            self.tables.shift_insert(index, new_name.to_string(), table);
        }
        tracing::debug!(database = %self.name, from = %name, to = %new_name, "Renamed table");
        Ok(())
    }

    /// Append a record to the named table
    pub fn add_record(
        &mut self,
        table_name: &str,
        record: impl Into<Record>,
    ) -> Result<(), DatabaseError> {
        self.table_mut(table_name)?.add(record)?;
        Ok(())
    }

    /// Overwrite one field of a record, see [`Table::update`]
    pub fn update_record(
        &mut self,
        table_name: &str,
        key: &str,
        field_index: usize,
        value: impl Into<String>,
    ) -> Result<(), DatabaseError> {
        self.table_mut(table_name)?.update(key, field_index, value)?;
        Ok(())
    }

    /// Remove and return a record from the named table
    pub fn delete_record(&mut self, table_name: &str, key: &str) -> Result<Record, DatabaseError> {
        Ok(self.table_mut(table_name)?.delete(key)?)
    }

    pub fn remove(&mut self, name: &str) -> Result<Table, DatabaseError> {
        let table = self
            .tables
            .shift_remove(name)
            .ok_or_else(|| DatabaseError::TableNotFound(name.to_string()))?;
        tracing::debug!(database = %self.name, table = %name, "Removed table");
        Ok(table)
    }

    /// Overwrite every field of the record stored under `key`
    ///
    /// The replacement must have one field per column. A changed key is
    /// checked for uniqueness before anything is written.
    pub fn replace_record(
        &mut self,
        table_name: &str,
        key: &str,
        record: impl Into<Record>,
    ) -> Result<(), DatabaseError> {
        let record = record.into();
        let table = self.table_mut(table_name)?;
        let current = table.get(key)?;
        if current.len() != record.len() {
            return Err(TableError::SizeMismatch {
                expected: current.len(),
                actual: record.len(),
            }
            .into());
        }

        let key_column = table.key_column().ok_or(TableError::NoKeyColumn)?;
        let new_key = record.field(key_column).unwrap_or(key);
        if new_key != key && table.contains_key(new_key) {
            return Err(TableError::DuplicateKey(new_key.to_string()).into());
        }

        // Non-key fields first, so the record is still addressable by `key`
        for (index, value) in record.iter().enumerate() {
            if index != key_column {
                table.update(key, index, value)?;
            }
        }
        table.update(key, key_column, new_key)?;
        Ok(())
    }

    /// Table names in insertion order
    pub fn table_names(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }

    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.tables.values()
    }

    /// Tables with the names they are stored under, in insertion order
    pub fn entries(&self) -> impl Iterator<Item = (&str, &Table)> {
        self.tables.iter().map(|(name, table)| (name.as_str(), table))
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::ColumnId;

    fn make_table(name: &str) -> Table {
        let mut table = Table::with_columns(
            name,
            [ColumnId::key("key"), ColumnId::new("2"), ColumnId::new("3")],
        )
        .unwrap();
        table.add(["key1", "1", "1"]).unwrap();
        table.add(["key2", "1", "2"]).unwrap();
        table
    }

    #[test]
    fn test_default_database() {
        let mut db = Database::default();
        assert_eq!(db.name(), "untitled");
        assert_eq!(db.folder(), "databases");

        db.set_name("test_database");
        db.set_folder("test_folder");
        assert_eq!(db.name(), "test_database");
        assert_eq!(db.folder(), "test_folder");
    }

    #[test]
    fn test_add_and_list_tables() {
        let mut db = Database::new("db");
        db.add(make_table("test_table1")).unwrap();
        db.add(make_table("test_table2")).unwrap();

        assert_eq!(
            db.table_names().collect::<Vec<_>>(),
            vec!["test_table1", "test_table2"]
        );
        assert_eq!(db.get("test_table1").unwrap().len(), 2);
    }

    #[test]
    fn test_add_duplicate_table() {
        let mut db = Database::new("db");
        db.add(make_table("t")).unwrap();
        assert_eq!(
            db.add(make_table("t")),
            Err(DatabaseError::DuplicateTable("t".to_string()))
        );
        assert_eq!(db.len(), 1);
    }

    #[test]
    fn test_set_tables_duplicate_leaves_database_empty() {
        let mut db = Database::new("db");
        db.add(make_table("old")).unwrap();

        let result = db.set_tables([make_table("a"), make_table("b"), make_table("a")]);

        assert_eq!(result, Err(DatabaseError::DuplicateTable("a".to_string())));
        assert!(db.is_empty());
    }

    #[test]
    fn test_set_tables_replaces_all() {
        let mut db = Database::new("db");
        db.add(make_table("old")).unwrap();
        db.set_tables([make_table("a"), make_table("b")]).unwrap();

        assert_eq!(db.table_names().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn test_remove_table() {
        let mut db = Database::new("db");
        db.add(make_table("t1")).unwrap();
        db.add(make_table("t2")).unwrap();

        let removed = db.remove("t2").unwrap();
        assert_eq!(removed.name(), "t2");
        assert!(matches!(db.get("t2"), Err(DatabaseError::TableNotFound(_))));
        assert!(matches!(db.remove("t2"), Err(DatabaseError::TableNotFound(_))));
    }

    #[test]
    fn test_replace_record() {
        let mut db = Database::new("db");
        db.add(make_table("t")).unwrap();

        db.replace_record("t", "key1", ["key1", "3", "3"]).unwrap();

        let record = db.get("t").unwrap().get("key1").unwrap();
        assert_eq!(record.fields(), ["key1", "3", "3"]);
    }

    #[test]
    fn test_replace_record_with_new_key_keeps_position() {
        let mut db = Database::new("db");
        db.add(make_table("t")).unwrap();

        db.replace_record("t", "key1", ["key9", "x", "y"]).unwrap();

        let table = db.get("t").unwrap();
        assert_eq!(table.keys().collect::<Vec<_>>(), vec!["key9", "key2"]);
        assert_eq!(table.get("key9").unwrap().fields(), ["key9", "x", "y"]);
    }

    #[test]
    fn test_replace_record_size_mismatch_is_untouched() {
        let mut db = Database::new("db");
        db.add(make_table("t")).unwrap();

        let result = db.replace_record("t", "key1", ["key1", "3"]);
        assert!(matches!(
            result,
            Err(DatabaseError::Table(TableError::SizeMismatch { .. }))
        ));
        assert_eq!(
            db.get("t").unwrap().get("key1").unwrap().fields(),
            ["key1", "1", "1"]
        );
    }

    #[test]
    fn test_replace_record_duplicate_key_is_untouched() {
        let mut db = Database::new("db");
        db.add(make_table("t")).unwrap();

        let result = db.replace_record("t", "key1", ["key2", "9", "9"]);
        assert_eq!(
            result,
            Err(DatabaseError::Table(TableError::DuplicateKey(
                "key2".to_string()
            )))
        );
        assert_eq!(
            db.get("t").unwrap().get("key1").unwrap().fields(),
            ["key1", "1", "1"]
        );
    }

    #[test]
    fn test_rename_table_keeps_position() {
        let mut db = Database::new("db");
        db.add(make_table("a")).unwrap();
        db.add(make_table("b")).unwrap();
        db.add(make_table("c")).unwrap();

        db.rename_table("b", "z").unwrap();

        assert_eq!(db.table_names().collect::<Vec<_>>(), vec!["a", "z", "c"]);
        assert_eq!(db.get("z").unwrap().name(), "z");
        assert!(matches!(db.get("b"), Err(DatabaseError::TableNotFound(_))));
    }

    #[test]
    fn test_rename_table_onto_existing_name_fails() {
        let mut db = Database::new("db");
        db.add(make_table("a")).unwrap();
        db.add(make_table("b")).unwrap();

        assert_eq!(
            db.rename_table("a", "b"),
            Err(DatabaseError::DuplicateTable("b".to_string()))
        );
        assert_eq!(db.table_names().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(db.get("a").unwrap().name(), "a");
        assert!(matches!(
            db.rename_table("missing", "x"),
            Err(DatabaseError::TableNotFound(_))
        ));
    }

    #[test]
    fn test_record_operations_through_database() {
        let mut db = Database::new("db");
        db.add(make_table("t")).unwrap();

        db.add_record("t", ["key3", "5", "6"]).unwrap();
        db.update_record("t", "key3", 0, "key4").unwrap();
        let removed = db.delete_record("t", "key1").unwrap();

        assert_eq!(removed.fields(), ["key1", "1", "1"]);
        let table = db.get("t").unwrap();
        assert_eq!(table.keys().collect::<Vec<_>>(), vec!["key2", "key4"]);
        assert!(matches!(
            db.add_record("t", ["key2", "0", "0"]),
            Err(DatabaseError::Table(TableError::DuplicateKey(_)))
        ));
    }

    #[test]
    fn test_replace_record_missing_table() {
        let mut db = Database::new("db");
        assert_eq!(
            db.replace_record("nope", "k", ["k"]),
            Err(DatabaseError::TableNotFound("nope".to_string()))
        );
    }
}
