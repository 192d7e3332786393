//! Filesystem persistence for tables and databases
//!
//! A table is stored as one `<name>.mdb` file in the text format of
//! [`crate::codec`]. A database is a directory of table files plus a
//! `database.json` manifest that records the database name and table order,
//! under `<root>/<folder>/<name>/`.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::codec::{self, FormatError};
use crate::database::{Database, DatabaseError};
use crate::table::Table;

/// Extension for table files
pub const TABLE_EXTENSION: &str = "mdb";

/// Manifest file name inside a database directory
pub const MANIFEST_FILE: &str = "database.json";

/// Errors from reading or writing tables on disk
#[derive(Debug)]
pub enum StorageError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Format {
        path: PathBuf,
        source: FormatError,
    },
    Manifest {
        path: PathBuf,
        source: serde_json::Error,
    },
    /// Table file holds a table whose name differs from its manifest entry
    NameMismatch {
        path: PathBuf,
        expected: String,
        found: String,
    },
    Database(DatabaseError),
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "{}: {}", path.display(), source),
            Self::Format { path, source } => write!(f, "{}: {}", path.display(), source),
            Self::Manifest { path, source } => {
                write!(f, "{}: invalid manifest: {}", path.display(), source)
            }
            Self::NameMismatch {
                path,
                expected,
                found,
            } => write!(
                f,
                "{}: expected table '{}', found '{}'",
                path.display(),
                expected,
                found
            ),
            Self::Database(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Format { source, .. } => Some(source),
            Self::Manifest { source, .. } => Some(source),
            Self::NameMismatch { .. } => None,
            Self::Database(e) => Some(e),
        }
    }
}

impl From<DatabaseError> for StorageError {
    fn from(e: DatabaseError) -> Self {
        Self::Database(e)
    }
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> StorageError + '_ {
    move |source| StorageError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Database manifest stored as `database.json`
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Manifest {
    name: String,
    #[serde(default)]
    tables: Vec<String>,
}

/// `<dir>/<name>.mdb`
pub fn table_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{}.{}", name, TABLE_EXTENSION))
}

/// Add the table extension to paths that have none
pub fn with_table_extension(path: &Path) -> PathBuf {
    if path.extension().is_some() {
        path.to_path_buf()
    } else {
        path.with_extension(TABLE_EXTENSION)
    }
}

/// Write `table` to `path`, creating parent directories as needed
pub fn write_table(path: &Path, table: &Table) -> Result<(), StorageError> {
    let content = codec::encode(table).map_err(|source| StorageError::Format {
        path: path.to_path_buf(),
        source,
    })?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(io_error(parent))?;
        }
    }
    fs::write(path, content).map_err(io_error(path))?;

    tracing::info!("Saved table '{}' to {}", table.name(), path.display());
    Ok(())
}

/// Write `table` into `dir` as `<name>.mdb`, returning the file path
pub fn save_table(dir: &Path, table: &Table) -> Result<PathBuf, StorageError> {
    let path = table_path(dir, table.name());
    write_table(&path, table)?;
    Ok(path)
}

/// Read a table file
pub fn load_table(path: &Path) -> Result<Table, StorageError> {
    let content = fs::read_to_string(path).map_err(io_error(path))?;
    let table = codec::decode(&content).map_err(|source| StorageError::Format {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!("Loaded table '{}' from {}", table.name(), path.display());
    Ok(table)
}

/// `<root>/<folder>/<name>/`
pub fn database_dir(root: &Path, database: &Database) -> PathBuf {
    root.join(database.folder()).join(database.name())
}

/// Write `database` to [`database_dir`], returning that directory
pub fn save_database(root: &Path, database: &Database) -> Result<PathBuf, StorageError> {
    let dir = database_dir(root, database);
    fs::create_dir_all(&dir).map_err(io_error(&dir))?;

    for (name, table) in database.entries() {
        write_table(&table_path(&dir, name), table)?;
    }

    let manifest = Manifest {
        name: database.name().to_string(),
        tables: database.table_names().map(str::to_string).collect(),
    };
    let manifest_path = dir.join(MANIFEST_FILE);
    let json = serde_json::to_string_pretty(&manifest).map_err(|source| {
        StorageError::Manifest {
            path: manifest_path.clone(),
            source,
        }
    })?;
    fs::write(&manifest_path, json).map_err(io_error(&manifest_path))?;

    tracing::info!(
        "Saved database '{}' ({} tables) to {}",
        database.name(),
        database.len(),
        dir.display()
    );
    Ok(dir)
}

/// Read a database directory written by [`save_database`]
pub fn load_database(dir: &Path) -> Result<Database, StorageError> {
    let manifest_path = dir.join(MANIFEST_FILE);
    let json = fs::read_to_string(&manifest_path).map_err(io_error(&manifest_path))?;
    let manifest: Manifest =
        serde_json::from_str(&json).map_err(|source| StorageError::Manifest {
            path: manifest_path.clone(),
            source,
        })?;

    let mut database = Database::new(manifest.name);
    if let Some(parent) = dir.parent().and_then(|p| p.file_name()) {
        database.set_folder(parent.to_string_lossy());
    }
    for name in &manifest.tables {
        let path = table_path(dir, name);
        let table = load_table(&path)?;
        if table.name() != name {
            return Err(StorageError::NameMismatch {
                path,
                expected: name.clone(),
                found: table.name().to_string(),
            });
        }
        database.add(table)?;
    }

    tracing::debug!(
        "Loaded database '{}' ({} tables) from {}",
        database.name(),
        database.len(),
        dir.display()
    );
    Ok(database)
}
