//! In-memory tables: named, typed columns and ordered rows.

mod column;
pub use column::Column;

mod row;
pub use row::Row;

use crate::stmt::Value;
use crate::{Error, Result};

use indexmap::IndexMap;

/// A named table of typed columns and ordered rows.
///
/// Besides its columns, a table may name one column as its key. The
/// converter sets this when populating a table from records that have a key
/// field, and merging checks it against the mapping.
#[derive(Debug, Clone, Default)]
pub struct Table {
    /// Name of the table
    name: String,

    /// Columns in insertion order
    columns: IndexMap<String, Column>,

    rows: Vec<Row>,

    /// Column designated as the table's key, if any
    key_column: Option<String>,
}

impl Table {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Appends a column. Existing rows get `Null` in the new column.
    pub fn add_column(&mut self, column: Column) -> Result<&Column> {
        if self.columns.contains_key(&column.name) {
            return Err(Error::invalid_table(
                &self.name,
                format!("duplicate column `{}`", column.name),
            ));
        }

        for row in &mut self.rows {
            row.set(column.name.clone(), Value::Null);
        }

        let (index, _) = self.columns.insert_full(column.name.clone(), column);
        Ok(&self.columns[index])
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.get(name)
    }

    pub fn columns(&self) -> impl ExactSizeIterator<Item = &Column> + '_ {
        self.columns.values()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    /// Returns an empty row with a `Null` cell for every column.
    pub fn new_row(&self) -> Row {
        let mut row = Row::new();
        for name in self.columns.keys() {
            row.set(name.clone(), Value::Null);
        }
        row
    }

    /// Appends `row` and returns its index.
    ///
    /// Cells are reordered to match the columns and missing cells become
    /// `Null`. A cell for a column the table does not have is an error.
    pub fn push_row(&mut self, mut row: Row) -> Result<usize> {
        if let Some(name) = row.columns().find(|name| !self.columns.contains_key(*name)) {
            return Err(Error::invalid_table(
                &self.name,
                format!("row has a cell for unknown column `{name}`"),
            ));
        }

        let mut normalized = Row::new();
        for name in self.columns.keys() {
            normalized.set(name.clone(), row.take(name));
        }

        self.rows.push(normalized);
        Ok(self.rows.len() - 1)
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn rows_mut(&mut self) -> &mut [Row] {
        &mut self.rows
    }

    pub fn row(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn key_column(&self) -> Option<&str> {
        self.key_column.as_deref()
    }

    /// Designates `name` as the key column. The column must exist.
    pub fn set_key_column(&mut self, name: impl Into<String>) -> Result<()> {
        let name = name.into();
        if !self.columns.contains_key(&name) {
            return Err(Error::invalid_table(
                &self.name,
                format!("key column `{name}` does not exist"),
            ));
        }

        self.key_column = Some(name);
        Ok(())
    }
}
