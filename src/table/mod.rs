//! Table storage model
//!
//! A table is a schema (ordered [`ColumnId`]s, exactly one marked as key)
//! plus records addressed by the value of their key field.
//!
//! # Architecture
//!
//! ```text
//! Table
//! ├── name
//! ├── columns: Vec<ColumnId>      (field positions)
//! ├── key_column: Option<usize>   (cached index of the key column)
//! └── records: IndexMap<String, Record>
//!         └── key == record.fields[key_column]
//! ```
//!
//! Iteration order is insertion order, and rekeying a record keeps its slot.

mod column;
mod error;
mod model;
mod record;

pub use column::{ColumnId, KEY_MARKER};
pub use error::TableError;
pub use model::Table;
pub use record::Record;
