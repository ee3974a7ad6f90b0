mod delete;
mod insert;
mod procedure;
mod select;
mod update;
mod where_column;

pub use delete::*;
pub use insert::*;
pub use procedure::*;
pub use select::*;
pub use update::*;
pub use where_column::*;

use crate::{
    KeelError, Result, SqlArgument, SqlCharacters, SqlQuery, Value, error::require_not_empty,
    renumber_parameters, separated_by,
};

/// Entry points of the fluent SQL builder.
///
/// Every statement starts from the characters of the target product. Each call consumes the
/// current stage and returns the next one, so only the calls legal at that point are available:
///
/// ```rust
/// use keel_core::{SqlBuilder, SqlCharacters};
/// # fn main() -> keel_core::Result<()> {
/// let query = SqlBuilder::select(&SqlCharacters::EMPTY, ["Id", "Name"])?
///     .from("Customers")?
///     .where_column("StatusId")?
///     .is_equal_to(1)
///     .order_by_ascending(["Name"])?
///     .to_sql_query();
/// assert_eq!(
///     query.command_text(),
///     "SELECT Id,Name FROM Customers WHERE (StatusId = ?) ORDER BY Name ASC"
/// );
/// # Ok(())
/// # }
/// ```
pub struct SqlBuilder;

impl SqlBuilder {
    /// `SELECT` with an explicit column list, possibly empty when only aggregates follow.
    pub fn select<'c, I, S>(chars: &'c SqlCharacters, columns: I) -> Result<SelectList<'c>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut base = SqlBuilderBase::new(chars, "SELECT ");
        base.push_column_list(columns)?;
        Ok(SelectList(base))
    }

    /// `SELECT *`, expanded into the mapped column list by [`SelectAll::from_table`].
    pub fn select_all(chars: &SqlCharacters) -> SelectAll<'_> {
        let mut base = SqlBuilderBase::new(chars, "SELECT ");
        base.buffer.push_str(chars.select_wildcard);
        base.wildcard_pending = true;
        SelectAll(base)
    }

    pub fn insert(chars: &SqlCharacters) -> InsertInto<'_> {
        InsertInto(SqlBuilderBase::new(chars, "INSERT INTO "))
    }

    pub fn update<'c>(chars: &'c SqlCharacters, table: &str) -> Result<UpdateTable<'c>> {
        let mut base = SqlBuilderBase::new(chars, "UPDATE ");
        base.push_identifier("table", table)?;
        base.buffer.push_str(" SET ");
        Ok(UpdateTable(base))
    }

    pub fn delete(chars: &SqlCharacters) -> DeleteFrom<'_> {
        DeleteFrom(SqlBuilderBase::new(chars, "DELETE FROM "))
    }

    /// Stored procedure invocation, fails if the product has no procedures.
    pub fn execute<'c>(chars: &'c SqlCharacters, procedure: &str) -> Result<ExecuteProcedure<'c>> {
        require_not_empty("procedure", procedure)?;
        let Some(command) = chars.stored_procedure_invocation_command else {
            return Err(KeelError::invalid_argument(
                "procedure",
                format!("stored procedures are not supported, cannot invoke `{}`", procedure),
            )
            .into());
        };
        let mut base = SqlBuilderBase::new(chars, command);
        base.buffer.push(' ');
        base.buffer.push_str(procedure.trim());
        Ok(ExecuteProcedure(base))
    }
}

/// State shared by all the builder stages.
#[derive(Debug, Clone)]
pub struct SqlBuilderBase<'c> {
    chars: &'c SqlCharacters,
    buffer: String,
    arguments: Vec<SqlArgument>,
    where_started: bool,
    operand: Option<&'static str>,
    column: Option<String>,
    order_added: bool,
    group_added: bool,
    wildcard_pending: bool,
    list_started: bool,
}

/// A builder stage, constructed by the builder itself when a transition completes.
pub trait BuilderStage<'c>: Sized {
    #[doc(hidden)]
    fn from_base(base: SqlBuilderBase<'c>) -> Self;
}

impl<'c> SqlBuilderBase<'c> {
    fn new(chars: &'c SqlCharacters, start: &str) -> Self {
        let mut buffer = String::with_capacity(128);
        buffer.push_str(start);
        Self {
            chars,
            buffer,
            arguments: Vec::new(),
            where_started: false,
            operand: None,
            column: None,
            order_added: false,
            group_added: false,
            wildcard_pending: false,
            list_started: false,
        }
    }

    fn push_identifier(&mut self, argument: &str, identifier: &str) -> Result<()> {
        require_not_empty(argument, identifier)?;
        self.chars.write_escaped(&mut self.buffer, identifier.trim());
        Ok(())
    }

    /// Comma separated escaped identifiers, continuing a list already started.
    fn push_column_list<I, S>(&mut self, columns: I) -> Result<usize>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let columns = columns.into_iter().collect::<Vec<_>>();
        if let Some(empty) = columns.iter().find(|v| v.as_ref().trim().is_empty()) {
            require_not_empty("columns", empty.as_ref())?;
        }
        for column in &columns {
            if self.list_started {
                self.buffer.push(',');
            }
            self.list_started = true;
            self.chars.write_escaped(&mut self.buffer, column.as_ref().trim());
        }
        Ok(columns.len())
    }

    fn push_argument(&mut self, value: Value) {
        self.chars
            .write_parameter_name(&mut self.buffer, self.arguments.len());
        self.arguments.push(SqlArgument::new(value));
    }

    fn push_arguments(&mut self, values: Vec<Value>) {
        let start = self.arguments.len();
        let chars = self.chars;
        separated_by(
            &mut self.buffer,
            start..start + values.len(),
            |out, i| chars.write_parameter_name(out, i),
            ",",
        );
        self.arguments.extend(values.into_iter().map(SqlArgument::new));
    }

    /// Splices text carrying its own zero based placeholders after the arguments collected so far.
    fn push_fragment<I, V>(&mut self, argument: &str, fragment: &str, arguments: I) -> Result<()>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        require_not_empty(argument, fragment)?;
        let text = renumber_parameters(fragment.trim(), self.arguments.len(), self.chars);
        self.buffer.push_str(&text);
        self.arguments
            .extend(arguments.into_iter().map(SqlArgument::new));
        Ok(())
    }

    fn push_sub_query(&mut self, query: SqlQuery) -> Result<()> {
        let (text, arguments, _) = query.into_parts();
        require_not_empty("sub_query", &text)?;
        let text = renumber_parameters(&text, self.arguments.len(), self.chars);
        self.buffer.push_str(&text);
        self.arguments.extend(arguments);
        Ok(())
    }

    fn start_predicate(&mut self) {
        if self.where_started {
            self.buffer.push_str(self.operand.take().unwrap_or(" AND "));
        } else {
            self.buffer.push_str(" WHERE ");
            self.where_started = true;
            self.operand = None;
        }
    }

    fn set_column(&mut self, column: &str) -> Result<()> {
        require_not_empty("column", column)?;
        self.column = Some(self.chars.escape_sql(column.trim()));
        Ok(())
    }

    /// Opens `(column` for a comparison on the pending column.
    fn start_comparison(&mut self) {
        self.start_predicate();
        self.buffer.push('(');
        if let Some(column) = self.column.take() {
            self.buffer.push_str(&column);
        }
    }

    fn where_predicate<I, V>(&mut self, operand: &'static str, predicate: &str, arguments: I) -> Result<()>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        require_not_empty("predicate", predicate)?;
        self.operand = Some(operand);
        self.start_predicate();
        self.buffer.push('(');
        self.push_fragment("predicate", predicate, arguments)?;
        self.buffer.push(')');
        Ok(())
    }

    fn exists(&mut self, operand: &'static str, negate: bool, query: SqlQuery) -> Result<()> {
        self.operand = Some(operand);
        self.start_predicate();
        if negate {
            self.buffer.push_str("NOT ");
        }
        self.buffer.push_str("EXISTS (");
        self.push_sub_query(query)?;
        self.buffer.push(')');
        Ok(())
    }

    fn clause_list<I, S>(&mut self, keyword: &str, columns: I, suffix: &str, ordering: bool) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let columns = columns.into_iter().collect::<Vec<_>>();
        if columns.is_empty() {
            return Err(KeelError::invalid_argument("columns", "must not be empty").into());
        }
        if let Some(empty) = columns.iter().find(|v| v.as_ref().trim().is_empty()) {
            require_not_empty("columns", empty.as_ref())?;
        }
        let added = if ordering {
            &mut self.order_added
        } else {
            &mut self.group_added
        };
        if *added {
            self.buffer.push(',');
        } else {
            self.buffer.push_str(keyword);
        }
        *added = true;
        let chars = self.chars;
        separated_by(
            &mut self.buffer,
            columns.iter(),
            |out, v| {
                chars.write_escaped(out, v.as_ref().trim());
                out.push_str(suffix);
            },
            ",",
        );
        Ok(())
    }

    fn order_by<I, S>(&mut self, columns: I, direction: &str) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.clause_list(" ORDER BY ", columns, direction, true)
    }

    fn group_by<I, S>(&mut self, columns: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.clause_list(" GROUP BY ", columns, "", false)
    }

    fn into_query(self) -> SqlQuery {
        SqlQuery::with_arguments(self.buffer, self.arguments)
    }
}

macro_rules! impl_stage {
    ($($stage:ident),+ $(,)?) => {
        $(
            impl<'c> $crate::BuilderStage<'c> for $stage<'c> {
                fn from_base(base: $crate::SqlBuilderBase<'c>) -> Self {
                    Self(base)
                }
            }
        )+
    };
}
pub(crate) use impl_stage;

macro_rules! impl_to_sql_query {
    ($($stage:ident),+ $(,)?) => {
        $(
            impl<'c> $stage<'c> {
                /// Snapshot of the text and arguments collected so far.
                pub fn to_sql_query(self) -> $crate::SqlQuery {
                    self.0.into_query()
                }
            }
        )+
    };
}
pub(crate) use impl_to_sql_query;

/// `where_column`, `where_`, `where_exists` and `where_not_exists` on a stage allowed to start a
/// `WHERE` clause, continuing in `$next`.
macro_rules! impl_where_start {
    ($stage:ident => $next:ident) => {
        impl<'c> $stage<'c> {
            pub fn where_column(
                mut self,
                column: &str,
            ) -> $crate::Result<$crate::WhereColumn<'c, $next<'c>>> {
                self.0.set_column(column)?;
                Ok($crate::WhereColumn::new(self.0))
            }

            /// Predicate text with zero based placeholders, `where_("Total > @p0", [100])`.
            pub fn where_<I, V>(mut self, predicate: &str, arguments: I) -> $crate::Result<$next<'c>>
            where
                I: IntoIterator<Item = V>,
                V: Into<$crate::Value>,
            {
                self.0.where_predicate(" AND ", predicate, arguments)?;
                Ok($next(self.0))
            }

            pub fn where_exists(mut self, query: $crate::SqlQuery) -> $crate::Result<$next<'c>> {
                self.0.exists(" AND ", false, query)?;
                Ok($next(self.0))
            }

            pub fn where_not_exists(mut self, query: $crate::SqlQuery) -> $crate::Result<$next<'c>> {
                self.0.exists(" AND ", true, query)?;
                Ok($next(self.0))
            }
        }
    };
}
pub(crate) use impl_where_start;

/// `and`, `or`, `and_where` and `or_where` on a stage following a predicate.
macro_rules! impl_where_continue {
    ($stage:ident) => {
        impl<'c> $stage<'c> {
            pub fn and(mut self, column: &str) -> $crate::Result<$crate::WhereColumn<'c, $stage<'c>>> {
                self.0.set_column(column)?;
                self.0.operand = Some(" AND ");
                Ok($crate::WhereColumn::new(self.0))
            }

            pub fn or(mut self, column: &str) -> $crate::Result<$crate::WhereColumn<'c, $stage<'c>>> {
                self.0.set_column(column)?;
                self.0.operand = Some(" OR ");
                Ok($crate::WhereColumn::new(self.0))
            }

            pub fn and_where<I, V>(mut self, predicate: &str, arguments: I) -> $crate::Result<Self>
            where
                I: IntoIterator<Item = V>,
                V: Into<$crate::Value>,
            {
                self.0.where_predicate(" AND ", predicate, arguments)?;
                Ok(self)
            }

            pub fn or_where<I, V>(mut self, predicate: &str, arguments: I) -> $crate::Result<Self>
            where
                I: IntoIterator<Item = V>,
                V: Into<$crate::Value>,
            {
                self.0.where_predicate(" OR ", predicate, arguments)?;
                Ok(self)
            }

            pub fn and_exists(mut self, query: $crate::SqlQuery) -> $crate::Result<Self> {
                self.0.exists(" AND ", false, query)?;
                Ok(self)
            }

            pub fn and_not_exists(mut self, query: $crate::SqlQuery) -> $crate::Result<Self> {
                self.0.exists(" AND ", true, query)?;
                Ok(self)
            }
        }
    };
}
pub(crate) use impl_where_continue;
