//! flatdb - a minimal flat-file table store
//!
//! Named tables of string records, each addressed by a single key column,
//! persisted in a tab-delimited text format and grouped into databases.

pub mod cli;
pub mod codec;
pub mod commands;
pub mod config;
pub mod config_paths;
pub mod database;
pub mod interchange;
pub mod print;
pub mod storage;
pub mod table;
pub mod tracing;

// Re-export commonly used types
pub use codec::{decode, encode, FormatError};
pub use config::FlatDbConfig;
pub use database::{Database, DatabaseError};
pub use table::{ColumnId, Record, Table, TableError};
