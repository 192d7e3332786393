//! Command-line argument parsing
//!
//! Supports:
//! - Creating tables and printing them
//! - Inserting, updating and deleting records
//! - CSV export/import

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::table::{ColumnId, Table};

/// A minimal flat-file table store
#[derive(Parser, Debug)]
#[command(name = "flatdb", version, about = "A minimal flat-file table store")]
pub struct CliArgs {
    /// Directory that relative table paths resolve against (overrides config)
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Create an empty table. Prefix the key column with '*', e.g. `*id name`
    Create {
        file: PathBuf,
        /// Table name (defaults to the file stem)
        #[arg(long)]
        name: Option<String>,
        #[arg(required = true, value_name = "COLUMNS")]
        columns: Vec<String>,
    },
    /// Print a table as a grid
    Show { file: PathBuf },
    /// Append a record
    Insert {
        file: PathBuf,
        #[arg(required = true, value_name = "FIELDS")]
        fields: Vec<String>,
    },
    /// Set one field of a record. COLUMN is a column name or index
    Update {
        file: PathBuf,
        key: String,
        column: String,
        value: String,
    },
    /// Delete a record
    Delete { file: PathBuf, key: String },
    /// Print a table as CSV
    Export { file: PathBuf },
    /// Create a table from a CSV file
    Import {
        csv: PathBuf,
        /// Name of the key column in the CSV header
        #[arg(long)]
        key: String,
        /// Table name (defaults to the CSV file stem)
        #[arg(long)]
        name: Option<String>,
        /// Output table file (defaults to `<name>.mdb`)
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

/// Parse `*id name amount` style column arguments
pub fn parse_columns(args: &[String]) -> Vec<ColumnId> {
    args.iter().map(|a| ColumnId::from_header(a)).collect()
}

/// Resolve a column argument by exact name first, then by index
pub fn resolve_column(table: &Table, column: &str) -> Result<usize, String> {
    if let Some(index) = table.column_index(column) {
        return Ok(index);
    }
    match column.parse::<usize>() {
        Ok(index) if index < table.column_count() => Ok(index),
        _ => Err(format!(
            "No column '{}' in table '{}'",
            column,
            table.name()
        )),
    }
}
