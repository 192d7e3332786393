//! Execution of CLI commands against table files

use anyhow::{bail, Context, Result};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::cli::{parse_columns, resolve_column, Command};
use crate::config::FlatDbConfig;
use crate::table::Table;
use crate::{interchange, print, storage};

fn file_stem(path: &Path) -> Result<String> {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .with_context(|| format!("Cannot derive a table name from {}", path.display()))
}

fn load(path: &Path) -> Result<Table> {
    storage::load_table(path).with_context(|| format!("Failed to load table {}", path.display()))
}

fn save(path: &Path, table: &Table) -> Result<()> {
    storage::write_table(path, table)
        .with_context(|| format!("Failed to save table {}", path.display()))
}

/// Run one command, writing any user-facing output to `out`
pub fn run(command: Command, config: &FlatDbConfig, out: &mut dyn Write) -> Result<()> {
    let resolve = |path: &PathBuf| config.resolve_table_path(path);

    match command {
        Command::Create {
            file,
            name,
            columns,
        } => {
            let path = resolve(&file);
            if path.exists() {
                bail!("Table file {} already exists", path.display());
            }
            let name = match name {
                Some(name) => name,
                None => file_stem(&path)?,
            };
            let table = Table::with_columns(name, parse_columns(&columns))?;
            save(&path, &table)?;
            writeln!(out, "Created {}", path.display())?;
        }
        Command::Show { file } => {
            let table = load(&resolve(&file))?;
            writeln!(out, "{}", table.name())?;
            write!(out, "{}", print::render(&table, &config.print_options()))?;
        }
        Command::Insert { file, fields } => {
            let path = resolve(&file);
            let mut table = load(&path)?;
            table.add(fields)?;
            save(&path, &table)?;
        }
        Command::Update {
            file,
            key,
            column,
            value,
        } => {
            let path = resolve(&file);
            let mut table = load(&path)?;
            let index = resolve_column(&table, &column).map_err(anyhow::Error::msg)?;
            table.update(&key, index, value)?;
            save(&path, &table)?;
        }
        Command::Delete { file, key } => {
            let path = resolve(&file);
            let mut table = load(&path)?;
            table.delete(&key)?;
            save(&path, &table)?;
        }
        Command::Export { file } => {
            let table = load(&resolve(&file))?;
            write!(out, "{}", interchange::export_csv(&table)?)?;
        }
        Command::Import {
            csv,
            key,
            name,
            out: target,
        } => {
            let content = std::fs::read_to_string(&csv)
                .with_context(|| format!("Failed to read {}", csv.display()))?;
            let name = match name {
                Some(name) => name,
                None => file_stem(&csv)?,
            };
            let table = interchange::import_csv(&name, &content, &key)?;
            let path = resolve(&target.unwrap_or_else(|| PathBuf::from(&name)));
            save(&path, &table)?;
            writeln!(
                out,
                "Imported {} records into {}",
                table.len(),
                path.display()
            )?;
        }
    }
    Ok(())
}
