use super::SqlBuilderBase;
use crate::{KeelError, Result, SqlQuery, Value};

/// `INSERT INTO` waiting for its table.
#[derive(Debug)]
pub struct InsertInto<'c>(pub(super) SqlBuilderBase<'c>);

/// `INSERT INTO table` waiting for the column list.
#[derive(Debug)]
pub struct InsertColumns<'c>(SqlBuilderBase<'c>);

/// `INSERT INTO table (columns)` waiting for as many values as columns.
#[derive(Debug)]
pub struct InsertValues<'c> {
    base: SqlBuilderBase<'c>,
    columns: usize,
}

/// Complete `INSERT` statement.
#[derive(Debug)]
pub struct InsertReady<'c>(SqlBuilderBase<'c>);

impl<'c> InsertInto<'c> {
    pub fn into_table(mut self, table: &str) -> Result<InsertColumns<'c>> {
        self.0.push_identifier("table", table)?;
        Ok(InsertColumns(self.0))
    }
}

impl<'c> InsertColumns<'c> {
    pub fn columns<I, S>(mut self, columns: I) -> Result<InsertValues<'c>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.0.buffer.push_str(" (");
        let columns = self.0.push_column_list(columns)?;
        if columns == 0 {
            return Err(KeelError::invalid_argument("columns", "must not be empty").into());
        }
        self.0.buffer.push(')');
        Ok(InsertValues {
            base: self.0,
            columns,
        })
    }
}

impl<'c> InsertValues<'c> {
    pub fn values<I, V>(mut self, values: I) -> Result<InsertReady<'c>>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let values = values.into_iter().map(Into::into).collect::<Vec<_>>();
        if values.len() != self.columns {
            return Err(KeelError::invalid_argument(
                "values",
                format!(
                    "{} values supplied for {} columns",
                    values.len(),
                    self.columns
                ),
            )
            .into());
        }
        self.base.buffer.push_str(" VALUES (");
        self.base.push_arguments(values);
        self.base.buffer.push(')');
        Ok(InsertReady(self.base))
    }

    /// `VALUES` taken from a query, `INSERT INTO table (columns) SELECT ..`.
    pub fn select(mut self, query: SqlQuery) -> Result<InsertReady<'c>> {
        self.base.buffer.push(' ');
        self.base.push_sub_query(query)?;
        Ok(InsertReady(self.base))
    }
}

impl<'c> InsertReady<'c> {
    pub fn to_sql_query(self) -> SqlQuery {
        self.0.into_query()
    }
}
