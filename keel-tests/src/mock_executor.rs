use keel::{Command, Executor, Result, RowLabeled, Value};
use std::collections::VecDeque;

/// Records the commands and answers with the queued results.
///
/// When a queue is empty: scalars are null, fetches return no rows and every command affects one
/// row.
#[derive(Debug, Default)]
pub struct MockExecutor {
    pub commands: Vec<Command>,
    pub scalars: VecDeque<Value>,
    pub rows: VecDeque<Vec<RowLabeled>>,
    pub affected: VecDeque<u64>,
    pub transactions: Vec<&'static str>,
}

impl MockExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_scalar(mut self, value: impl Into<Value>) -> Self {
        self.scalars.push_back(value.into());
        self
    }

    pub fn with_rows(mut self, rows: Vec<RowLabeled>) -> Self {
        self.rows.push_back(rows);
        self
    }

    pub fn with_affected(mut self, rows: u64) -> Self {
        self.affected.push_back(rows);
        self
    }

    pub fn last_command(&self) -> Option<&Command> {
        self.commands.last()
    }
}

impl Executor for MockExecutor {
    fn execute(&mut self, command: &Command) -> Result<u64> {
        self.commands.push(command.clone());
        Ok(self.affected.pop_front().unwrap_or(1))
    }

    fn execute_scalar(&mut self, command: &Command) -> Result<Value> {
        self.commands.push(command.clone());
        Ok(self.scalars.pop_front().unwrap_or(Value::Null))
    }

    fn fetch(&mut self, command: &Command) -> Result<Vec<RowLabeled>> {
        self.commands.push(command.clone());
        Ok(self.rows.pop_front().unwrap_or_default())
    }

    fn begin(&mut self) -> Result<()> {
        self.transactions.push("begin");
        Ok(())
    }

    fn commit(&mut self) -> Result<()> {
        self.transactions.push("commit");
        Ok(())
    }

    fn rollback(&mut self) -> Result<()> {
        self.transactions.push("rollback");
        Ok(())
    }
}

/// A labeled row, `row(&["Id", "Name"], [1.into(), "Bob".into()])`.
pub fn row<const N: usize>(labels: &[&str; N], values: [Value; N]) -> RowLabeled {
    RowLabeled::new(
        labels.iter().map(|v| v.to_string()).collect(),
        values.into_iter().collect(),
    )
}
