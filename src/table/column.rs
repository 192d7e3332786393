//! Column descriptors

/// Prefix marking the key column in serialized headers (`*id`)
pub const KEY_MARKER: char = '*';

/// A single schema column: its name and whether it holds the table's keys
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColumnId {
    pub name: String,
    pub is_key: bool,
}

impl ColumnId {
    /// Create a non-key column
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_key: false,
        }
    }

    /// Create the key column
    pub fn key(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_key: true,
        }
    }

    /// Parse a header cell, stripping one leading [`KEY_MARKER`] if present
    pub fn from_header(header: &str) -> Self {
        match header.strip_prefix(KEY_MARKER) {
            Some(name) => Self::key(name),
            None => Self::new(header),
        }
    }

    /// Header cell for this column, with the key marker when it is the key
    pub fn header(&self) -> String {
        if self.is_key {
            format!("{}{}", KEY_MARKER, self.name)
        } else {
            self.name.clone()
        }
    }
}
