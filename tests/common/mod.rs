//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use flatdb::{ColumnId, Table};

/// `[*id, name, amount]` with no records
pub fn ledger_table(name: &str) -> Table {
    Table::with_columns(
        name,
        [
            ColumnId::key("id"),
            ColumnId::new("name"),
            ColumnId::new("amount"),
        ],
    )
    .unwrap()
}

/// Ledger table holding `k1/Ann/10` and `k2/Bo/20`
pub fn sample_table() -> Table {
    let mut table = ledger_table("T");
    table.add(["k1", "Ann", "10"]).unwrap();
    table.add(["k2", "Bo", "20"]).unwrap();
    table
}

/// Keys of a table as owned strings, in iteration order
pub fn keys(table: &Table) -> Vec<String> {
    table.keys().map(str::to_string).collect()
}

/// Assert two tables match in name, schema and record order
pub fn assert_same_table(actual: &Table, expected: &Table) {
    assert_eq!(actual.name(), expected.name());
    assert_eq!(actual.columns(), expected.columns());
    assert_eq!(keys(actual), keys(expected));
    for (key, record) in expected.records() {
        assert_eq!(actual.get(key).unwrap(), record, "record {}", key);
    }
}
