//! Fixed-length records of string fields

use super::error::TableError;

/// An ordered row of string fields, addressed by zero-based position
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    fields: Vec<String>,
}

impl Record {
    pub fn new(fields: Vec<String>) -> Self {
        Self { fields }
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Field at `index`, or `None` past the end
    pub fn field(&self, index: usize) -> Option<&str> {
        self.fields.get(index).map(String::as_str)
    }

    /// Overwrite the field at `index` without changing the record length
    pub fn set_field(&mut self, index: usize, value: impl Into<String>) -> Result<(), TableError> {
        let len = self.fields.len();
        let slot = self
            .fields
            .get_mut(index)
            .ok_or(TableError::IndexOutOfRange { index, len })?;
        *slot = value.into();
        Ok(())
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(String::as_str)
    }

    pub fn into_fields(self) -> Vec<String> {
        self.fields
    }
}

impl From<Vec<String>> for Record {
    fn from(fields: Vec<String>) -> Self {
        Self::new(fields)
    }
}

impl<const N: usize> From<[&str; N]> for Record {
    fn from(fields: [&str; N]) -> Self {
        Self::new(fields.iter().map(|s| s.to_string()).collect())
    }
}

impl FromIterator<String> for Record {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
