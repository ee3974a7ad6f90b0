use super::{
    SqlBuilderBase, impl_stage, impl_to_sql_query, impl_where_continue, impl_where_start,
};
use crate::{Result, Value};

/// `UPDATE table SET` waiting for the first assignment.
#[derive(Debug)]
pub struct UpdateTable<'c>(pub(super) SqlBuilderBase<'c>);

/// `UPDATE table SET column = value, ..`.
#[derive(Debug)]
pub struct UpdateSet<'c>(SqlBuilderBase<'c>);

/// `UPDATE .. WHERE ..`.
#[derive(Debug)]
pub struct UpdateWhere<'c>(SqlBuilderBase<'c>);

impl_stage!(UpdateWhere);
impl_to_sql_query!(UpdateSet, UpdateWhere);
impl_where_start!(UpdateSet => UpdateWhere);
impl_where_continue!(UpdateWhere);

impl<'c> SqlBuilderBase<'c> {
    fn set_column_value(&mut self, column: &str, value: Value) -> Result<()> {
        if self.list_started {
            self.buffer.push(',');
        }
        self.push_identifier("column", column)?;
        self.list_started = true;
        self.buffer.push_str(" = ");
        self.push_argument(value);
        Ok(())
    }
}

impl<'c> UpdateTable<'c> {
    pub fn set_column_value(mut self, column: &str, value: impl Into<Value>) -> Result<UpdateSet<'c>> {
        self.0.set_column_value(column, value.into())?;
        Ok(UpdateSet(self.0))
    }
}

impl<'c> UpdateSet<'c> {
    pub fn set_column_value(mut self, column: &str, value: impl Into<Value>) -> Result<Self> {
        self.0.set_column_value(column, value.into())?;
        Ok(self)
    }
}
