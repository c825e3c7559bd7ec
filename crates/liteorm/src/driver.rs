//! Execution collaborator interface and the row shapes that cross it.
//!
//! The engine never executes SQL itself: finished statements are handed to a
//! [`Driver`], which returns flat [`Row`]s or an [`ExecResult`]. Drivers map
//! their own failures into [`LiteError::Driver`]; the engine passes them
//! through without interpretation or retries.

use std::future::Future;

use crate::error::LiteResult;
use crate::value::Value;

/// Summary of a write statement execution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExecResult {
    pub insert_id: i64,
    pub rows_affected: u64,
}

/// A flat result row: ordered column name / value pairs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    cells: Vec<(String, Value)>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append or replace a cell, keeping insertion order.
    pub fn set(&mut self, column: impl Into<String>, value: impl Into<Value>) {
        let column = column.into();
        let value = value.into();
        if let Some(cell) = self.cells.iter_mut().find(|(c, _)| *c == column) {
            cell.1 = value;
        } else {
            self.cells.push((column, value));
        }
    }

    /// Builder-style [`set`](Row::set).
    pub fn with(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(column, value);
        self
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.cells
            .iter()
            .find(|(c, _)| c == column)
            .map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.cells.iter().map(|(c, v)| (c.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub(crate) fn into_cells(self) -> Vec<(String, Value)> {
        self.cells
    }

    pub(crate) fn from_cells(cells: Vec<(String, Value)>) -> Self {
        Self { cells }
    }
}

/// Ordered field set used as INSERT/UPDATE input.
#[derive(Debug, Clone, Default)]
pub struct Record {
    fields: Vec<(String, Value)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field value, keeping insertion order.
    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        let field = field.into();
        let value = value.into();
        if let Some(slot) = self.fields.iter_mut().find(|(f, _)| *f == field) {
            slot.1 = value;
        } else {
            self.fields.push((field, value));
        }
        self
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(f, _)| f == field)
            .map(|(_, v)| v)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(f, v)| (f.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Storage execution collaborator.
///
/// The engine only requires that a driver eventually resolves with rows or a
/// failure; scheduling, transactions, and cancellation are the driver's
/// concern.
pub trait Driver: Send + Sync {
    /// Execute a write statement and return its affected-row summary.
    fn execute(&self, sql: &str) -> impl Future<Output = LiteResult<ExecResult>> + Send;

    /// Execute a query and return all rows.
    fn query_rows(&self, sql: &str) -> impl Future<Output = LiteResult<Vec<Row>>> + Send;

    /// Execute a query and return the first row, if any.
    fn query_single(&self, sql: &str) -> impl Future<Output = LiteResult<Option<Row>>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_preserves_insertion_order() {
        let row = Row::new().with("b", 1).with("a", 2);
        let cols: Vec<&str> = row.iter().map(|(c, _)| c).collect();
        assert_eq!(cols, ["b", "a"]);
    }

    #[test]
    fn row_set_replaces_in_place() {
        let mut row = Row::new().with("a", 1).with("b", 2);
        row.set("a", 9);
        assert_eq!(row.get("a"), Some(&Value::Integer(9)));
        assert_eq!(row.len(), 2);
    }

    #[test]
    fn record_set_replaces_in_place() {
        let rec = Record::new().set("name", "Foo").set("name", "Bar");
        assert_eq!(rec.len(), 1);
        assert_eq!(rec.get("name"), Some(&Value::Text("Bar".into())));
    }
}
