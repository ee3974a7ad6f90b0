use crate::{Command, Result, Value};
use std::sync::Arc;

/// Shared reference-counted column name list.
pub type RowNames = Arc<[String]>;
/// Owned row value slice matching `RowNames` length.
pub type Row = Box<[Value]>;

/// A result row with its corresponding column labels.
#[derive(Debug, Clone, PartialEq)]
pub struct RowLabeled {
    /// Column names.
    pub labels: RowNames,
    /// Data values (aligned by index with `labels`).
    pub values: Row,
}

impl RowLabeled {
    pub fn new(labels: RowNames, values: Row) -> Self {
        Self { labels, values }
    }
    pub fn names(&self) -> &[String] {
        &self.labels
    }
    pub fn values(&self) -> &[Value] {
        &self.values
    }
    /// Value of the column, names compare ignoring case.
    pub fn get_column(&self, name: &str) -> Option<&Value> {
        self.labels
            .iter()
            .position(|v| v.eq_ignore_ascii_case(name))
            .map(|i| &self.values[i])
    }
    /// Iterates `(label, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.labels
            .iter()
            .map(String::as_str)
            .zip(self.values.iter())
    }
}

impl From<RowLabeled> for Row {
    fn from(value: RowLabeled) -> Self {
        value.values
    }
}

/// The connection to a database, as seen by a session.
///
/// Keel builds the commands, the executor only runs them. Calls block the current thread.
pub trait Executor: Send {
    /// Runs a command returning no rows, the result is the number of rows affected.
    fn execute(&mut self, command: &Command) -> Result<u64>;

    /// Runs a command and returns the first column of the first row, null if there is none.
    fn execute_scalar(&mut self, command: &Command) -> Result<Value>;

    /// Runs a command and returns all the rows.
    fn fetch(&mut self, command: &Command) -> Result<Vec<RowLabeled>>;

    fn begin(&mut self) -> Result<()>;

    fn commit(&mut self) -> Result<()>;

    fn rollback(&mut self) -> Result<()>;
}

impl<E: Executor + ?Sized> Executor for &mut E {
    fn execute(&mut self, command: &Command) -> Result<u64> {
        (**self).execute(command)
    }
    fn execute_scalar(&mut self, command: &Command) -> Result<Value> {
        (**self).execute_scalar(command)
    }
    fn fetch(&mut self, command: &Command) -> Result<Vec<RowLabeled>> {
        (**self).fetch(command)
    }
    fn begin(&mut self) -> Result<()> {
        (**self).begin()
    }
    fn commit(&mut self) -> Result<()> {
        (**self).commit()
    }
    fn rollback(&mut self) -> Result<()> {
        (**self).rollback()
    }
}
