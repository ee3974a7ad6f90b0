use super::{
    SqlBuilderBase, impl_stage, impl_to_sql_query, impl_where_continue, impl_where_start,
};
use crate::{Result, TableInfo, Value, error::require_not_empty, separated_by};

/// `SELECT *` waiting for its table.
#[derive(Debug)]
pub struct SelectAll<'c>(pub(super) SqlBuilderBase<'c>);

/// `SELECT` with a column list, aggregates can still be appended.
#[derive(Debug)]
pub struct SelectList<'c>(pub(super) SqlBuilderBase<'c>);

/// `SELECT .. FROM ..`.
#[derive(Debug)]
pub struct SelectFrom<'c>(pub(super) SqlBuilderBase<'c>);

/// `SELECT .. FROM .. WHERE ..`.
#[derive(Debug)]
pub struct SelectWhere<'c>(pub(super) SqlBuilderBase<'c>);

/// `SELECT .. GROUP BY ..`.
#[derive(Debug)]
pub struct SelectGroupBy<'c>(pub(super) SqlBuilderBase<'c>);

/// `SELECT .. GROUP BY .. HAVING ..`.
#[derive(Debug)]
pub struct SelectHaving<'c>(pub(super) SqlBuilderBase<'c>);

/// `SELECT .. ORDER BY ..`.
#[derive(Debug)]
pub struct SelectOrderBy<'c>(pub(super) SqlBuilderBase<'c>);

impl_stage!(SelectWhere);
impl_to_sql_query!(SelectFrom, SelectWhere, SelectGroupBy, SelectHaving, SelectOrderBy);
impl_where_start!(SelectFrom => SelectWhere);
impl_where_continue!(SelectWhere);

impl<'c> SqlBuilderBase<'c> {
    fn from_table_name(mut self, table: &str) -> Result<SelectFrom<'c>> {
        self.buffer.push_str(" FROM ");
        self.push_identifier("table", table)?;
        Ok(SelectFrom(self))
    }
}

impl<'c> SelectAll<'c> {
    pub fn from(self, table: &str) -> Result<SelectFrom<'c>> {
        self.0.from_table_name(table)
    }

    /// `FROM` a mapped table, the wildcard becomes the escaped list of its columns.
    pub fn from_table(mut self, table: &TableInfo) -> SelectFrom<'c> {
        let base = &mut self.0;
        if base.wildcard_pending {
            let len = base.buffer.len() - base.chars.select_wildcard.len();
            base.buffer.truncate(len);
            base.wildcard_pending = false;
            let chars = base.chars;
            separated_by(
                &mut base.buffer,
                table.columns(),
                |out, v| chars.write_escaped(out, &v.column_name),
                ",",
            );
        }
        base.buffer.push_str(" FROM ");
        table.write_qualified_name(base.chars, &mut base.buffer);
        SelectFrom(self.0)
    }
}

macro_rules! aggregate {
    ($name:ident, $name_as:ident, $function:literal) => {
        #[doc = concat!("`", $function, "(column) AS column`.")]
        pub fn $name(self, column: &str) -> Result<Self> {
            self.function($function, column, None)
        }
        #[doc = concat!("`", $function, "(column) AS alias`.")]
        pub fn $name_as(self, column: &str, alias: &str) -> Result<Self> {
            self.function($function, column, Some(alias))
        }
    };
}

impl<'c> SelectList<'c> {
    fn function(mut self, function: &str, column: &str, alias: Option<&str>) -> Result<Self> {
        require_not_empty("column", column)?;
        let alias = alias.unwrap_or(column);
        require_not_empty("alias", alias)?;
        let base = &mut self.0;
        if base.list_started {
            base.buffer.push(',');
        }
        base.list_started = true;
        base.buffer.push_str(function);
        base.buffer.push('(');
        base.chars.write_escaped(&mut base.buffer, column.trim());
        base.buffer.push_str(") AS ");
        base.chars.write_escaped(&mut base.buffer, alias.trim());
        Ok(self)
    }

    aggregate!(average, average_as, "AVG");
    aggregate!(count, count_as, "COUNT");
    aggregate!(max, max_as, "MAX");
    aggregate!(min, min_as, "MIN");
    aggregate!(sum, sum_as, "SUM");

    /// `COUNT(*)`.
    pub fn count_all(mut self) -> Self {
        let base = &mut self.0;
        if base.list_started {
            base.buffer.push(',');
        }
        base.list_started = true;
        base.buffer.push_str("COUNT(*)");
        self
    }

    pub fn count_all_as(self, alias: &str) -> Result<Self> {
        require_not_empty("alias", alias)?;
        let mut result = self.count_all();
        let base = &mut result.0;
        base.buffer.push_str(" AS ");
        base.chars.write_escaped(&mut base.buffer, alias.trim());
        Ok(result)
    }

    /// `DISTINCT column`.
    pub fn distinct(mut self, column: &str) -> Result<Self> {
        require_not_empty("column", column)?;
        let base = &mut self.0;
        if base.list_started {
            base.buffer.push(',');
        }
        base.list_started = true;
        base.buffer.push_str("DISTINCT ");
        base.chars.write_escaped(&mut base.buffer, column.trim());
        Ok(self)
    }

    pub fn from(self, table: &str) -> Result<SelectFrom<'c>> {
        self.0.from_table_name(table)
    }

    pub fn from_table(mut self, table: &TableInfo) -> SelectFrom<'c> {
        let base = &mut self.0;
        base.buffer.push_str(" FROM ");
        table.write_qualified_name(base.chars, &mut base.buffer);
        SelectFrom(self.0)
    }
}

macro_rules! impl_grouping {
    ($($stage:ident),+) => {
        $(
            impl<'c> $stage<'c> {
                pub fn group_by<I, S>(mut self, columns: I) -> Result<SelectGroupBy<'c>>
                where
                    I: IntoIterator<Item = S>,
                    S: AsRef<str>,
                {
                    self.0.group_by(columns)?;
                    Ok(SelectGroupBy(self.0))
                }
            }
        )+
    };
}

macro_rules! impl_ordering {
    ($($stage:ident),+) => {
        $(
            impl<'c> $stage<'c> {
                pub fn order_by_ascending<I, S>(mut self, columns: I) -> Result<SelectOrderBy<'c>>
                where
                    I: IntoIterator<Item = S>,
                    S: AsRef<str>,
                {
                    self.0.order_by(columns, " ASC")?;
                    Ok(SelectOrderBy(self.0))
                }

                pub fn order_by_descending<I, S>(mut self, columns: I) -> Result<SelectOrderBy<'c>>
                where
                    I: IntoIterator<Item = S>,
                    S: AsRef<str>,
                {
                    self.0.order_by(columns, " DESC")?;
                    Ok(SelectOrderBy(self.0))
                }
            }
        )+
    };
}

impl_grouping!(SelectFrom, SelectWhere, SelectGroupBy);
impl_ordering!(SelectFrom, SelectWhere, SelectGroupBy, SelectHaving, SelectOrderBy);

impl<'c> SelectGroupBy<'c> {
    /// Predicate on the groups, `having("SUM(Total) > @p0", [1000])`.
    pub fn having<I, V>(mut self, predicate: &str, arguments: I) -> Result<SelectHaving<'c>>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.0.buffer.push_str(" HAVING ");
        self.0.push_fragment("predicate", predicate, arguments)?;
        Ok(SelectHaving(self.0))
    }
}
