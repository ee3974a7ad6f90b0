use super::{
    SqlBuilderBase, impl_stage, impl_to_sql_query, impl_where_continue, impl_where_start,
};
use crate::{Result, TableInfo};

/// `DELETE FROM` waiting for its table.
#[derive(Debug)]
pub struct DeleteFrom<'c>(pub(super) SqlBuilderBase<'c>);

/// `DELETE FROM table`, deletes every row unless a predicate follows.
#[derive(Debug)]
pub struct DeleteTable<'c>(SqlBuilderBase<'c>);

/// `DELETE FROM table WHERE ..`.
#[derive(Debug)]
pub struct DeleteWhere<'c>(SqlBuilderBase<'c>);

impl_stage!(DeleteWhere);
impl_to_sql_query!(DeleteTable, DeleteWhere);
impl_where_start!(DeleteTable => DeleteWhere);
impl_where_continue!(DeleteWhere);

impl<'c> DeleteFrom<'c> {
    pub fn from(mut self, table: &str) -> Result<DeleteTable<'c>> {
        self.0.push_identifier("table", table)?;
        Ok(DeleteTable(self.0))
    }

    pub fn from_table(mut self, table: &TableInfo) -> DeleteTable<'c> {
        table.write_qualified_name(self.0.chars, &mut self.0.buffer);
        DeleteTable(self.0)
    }
}
