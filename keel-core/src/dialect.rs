use crate::{
    Clause, DbType, Entity, IdentifierStrategy, KeelError, ObjectDelta, Result, SqlArgument,
    SqlCharacters, SqlQuery, SqlString, TableInfo, Value, renumber_parameters, separated_by,
};
use log::debug;

/// Rows to skip and rows to return.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PagingOptions {
    pub offset: u64,
    pub count: u64,
}

impl PagingOptions {
    /// Page `page` (starting from 1) of `results_per_page` rows.
    pub fn for_page(page: u64, results_per_page: u64) -> Result<Self> {
        if page < 1 {
            return Err(KeelError::invalid_argument("page", "pages start from 1").into());
        }
        if results_per_page < 1 {
            return Err(KeelError::invalid_argument(
                "results_per_page",
                "at least one result per page is required",
            )
            .into());
        }
        let offset = (page - 1).checked_mul(results_per_page).ok_or_else(|| {
            KeelError::invalid_argument(
                "page",
                format!("page {} of {} results overflows the row offset", page, results_per_page),
            )
        })?;
        Ok(Self {
            offset,
            count: results_per_page,
        })
    }

    pub fn skip_take(skip: u64, take: u64) -> Self {
        Self {
            offset: skip,
            count: take,
        }
    }

    /// One based number of the first row.
    pub fn first_row(&self) -> Result<u64> {
        self.offset.checked_add(1).ok_or_else(|| self.overflow())
    }

    /// One based number of the last row.
    pub fn last_row(&self) -> Result<u64> {
        self.offset
            .checked_add(self.count)
            .ok_or_else(|| self.overflow())
    }

    fn overflow(&self) -> crate::Error {
        KeelError::invalid_argument(
            "paging",
            format!("skipping {} and taking {} rows overflows the row number", self.offset, self.count),
        )
        .into()
    }
}

/// Paging bound as a query argument.
pub fn paging_value(value: u64) -> Result<Value> {
    i64::try_from(value)
        .map(|v| Value::Int64(Some(v)))
        .map_err(|_| KeelError::invalid_argument("paging", format!("{} is too large", value)).into())
}

/// Statement text plus arguments, written by the dialects.
#[derive(Debug)]
pub struct StatementWriter<'c> {
    pub chars: &'c SqlCharacters,
    pub text: String,
    pub arguments: Vec<SqlArgument>,
}

impl<'c> StatementWriter<'c> {
    pub fn new(chars: &'c SqlCharacters) -> Self {
        Self {
            chars,
            text: String::with_capacity(128),
            arguments: Vec::new(),
        }
    }

    /// Starts from the arguments of `query`, new placeholders follow them.
    pub fn with_arguments_of(chars: &'c SqlCharacters, query: &SqlQuery) -> Self {
        Self {
            chars,
            text: String::with_capacity(query.command_text().len() + 64),
            arguments: query.arguments().to_vec(),
        }
    }

    pub fn push_str(&mut self, value: &str) -> &mut Self {
        self.text.push_str(value);
        self
    }

    pub fn push_identifier(&mut self, value: &str) -> &mut Self {
        self.chars.write_escaped(&mut self.text, value);
        self
    }

    pub fn push_argument(&mut self, value: Value, db_type: Option<DbType>) -> &mut Self {
        self.chars
            .write_parameter_name(&mut self.text, self.arguments.len());
        self.arguments.push(SqlArgument { value, db_type });
        self
    }

    pub fn into_query(self) -> SqlQuery {
        let query = SqlQuery::with_arguments(self.text, self.arguments);
        debug!("Generated: {}", query);
        query
    }
}

/// `INSERT INTO table (columns) VALUES (arguments)`.
///
/// `identifier_expression`, when present, is written as the value of the identifier column ahead
/// of the other columns (a sequence call or a variable).
pub fn write_insert<'c>(
    chars: &'c SqlCharacters,
    table: &TableInfo,
    entity: &dyn Entity,
    identifier_expression: Option<&str>,
) -> Result<StatementWriter<'c>> {
    let identifier = table.require_identifier()?;
    let mut columns = Vec::new();
    if identifier_expression.is_some() {
        columns.push(identifier);
    }
    columns.extend(table.insert_columns());
    if columns.is_empty() {
        return Err(KeelError::mapping(table.type_name(), "no column can be inserted").into());
    }
    let mut out = StatementWriter::new(chars);
    out.push_str("INSERT INTO ");
    table.write_qualified_name(chars, &mut out.text);
    out.push_str(" (");
    separated_by(
        &mut out.text,
        &columns,
        |out, v| chars.write_escaped(out, &v.column_name),
        ",",
    );
    out.push_str(") VALUES (");
    let mut first = true;
    for column in columns {
        if !first {
            out.push_str(",");
        }
        first = false;
        match identifier_expression {
            Some(expression) if column.is_identifier => {
                out.push_str(expression);
            }
            _ => {
                let value = entity.get_value(column.property_name)?;
                out.push_argument(value, column.db_type);
            }
        }
    }
    out.push_str(")");
    Ok(out)
}

/// Insert returning the identifier generated by the database in the same statement.
///
/// `sequence_call` formats the sequence name into the expression producing the next value, used
/// for the sequence strategy.
pub fn write_insert_returning(
    chars: &SqlCharacters,
    table: &TableInfo,
    entity: &dyn Entity,
    sequence_call: impl FnOnce(&str) -> String,
) -> Result<SqlQuery> {
    let identifier = table.require_identifier()?;
    let expression = match (table.identifier_strategy(), &identifier.sequence_name) {
        (IdentifierStrategy::Sequence, Some(sequence)) => Some(sequence_call(sequence)),
        _ => None,
    };
    let mut out = write_insert(chars, table, entity, expression.as_deref())?;
    if table.identifier_strategy().is_generated_by_database() {
        out.push_str(" RETURNING ")
            .push_identifier(&identifier.column_name);
    }
    Ok(out.into_query())
}

fn write_where_identifier(
    out: &mut StatementWriter,
    table: &TableInfo,
    identifier: Value,
) -> Result<()> {
    let column = table.require_identifier()?;
    out.push_str(" WHERE ")
        .push_identifier(&column.column_name)
        .push_str(" = ")
        .push_argument(identifier, column.db_type);
    Ok(())
}

/// Parses the query, failing unless it is a single select.
pub fn require_select<'q>(
    query: &'q SqlQuery,
    chars: &SqlCharacters,
    action: &str,
) -> Result<SqlString<'q>> {
    let sql = SqlString::parse(query.command_text(), chars);
    let text = query.command_text();
    if sql.keyword_position(Clause::Select) != Some(text.len() - text.trim_start().len()) {
        return Err(KeelError::invalid_argument(
            "query",
            format!("only select statements can be {}", action),
        )
        .into());
    }
    Ok(sql)
}

/// The statement without trailing whitespace and separator.
pub fn statement_text<'s>(sql: &SqlString<'s>) -> &'s str {
    sql.text().trim().trim_end_matches(';').trim_end()
}

fn sequences_not_supported(dialect: &str, table: &TableInfo) -> crate::Error {
    KeelError::mapping(
        table.type_name(),
        format!("{} does not support sequence identifiers", dialect),
    )
    .into()
}

/// SQL generation of a database product.
///
/// Defaults produce ANSI text with `LIMIT`/`OFFSET` paging, products override what differs.
pub trait SqlDialect: Send + Sync {
    /// Product name, as accepted by the configuration.
    fn name(&self) -> &'static str;

    fn characters(&self) -> &'static SqlCharacters;

    /// Whether several statements can run in a single command.
    fn supports_batched_queries(&self) -> bool {
        true
    }

    /// Restricts a select to `paging.count` rows after `paging.offset`.
    fn page_query(&self, query: &SqlQuery, paging: PagingOptions) -> Result<SqlQuery> {
        let chars = self.characters();
        let sql = require_select(query, chars, "paged")?;
        let mut out = StatementWriter::with_arguments_of(chars, query);
        out.push_str(statement_text(&sql))
            .push_str(" LIMIT ")
            .push_argument(paging_value(paging.count)?, None)
            .push_str(" OFFSET ")
            .push_argument(paging_value(paging.offset)?, None);
        Ok(out.into_query().with_timeout_of(query))
    }

    /// Counts the rows a select returns, grouped and distinct selects are wrapped.
    fn count_query(&self, query: &SqlQuery) -> Result<SqlQuery> {
        let chars = self.characters();
        let sql = require_select(query, chars, "counted")?;
        let (Some(select), Some(from)) = (sql.clause(Clause::Select), sql.keyword_position(Clause::From))
        else {
            return Err(KeelError::invalid_argument("query", "a select without FROM cannot be counted").into());
        };
        let body = sql.before(Clause::OrderBy);
        let mut out = StatementWriter::with_arguments_of(chars, query);
        if sql.has(Clause::GroupBy) || crate::util::starts_with_keyword(select, "DISTINCT") {
            out.push_str("SELECT COUNT(*) FROM (")
                .push_str(body)
                .push_str(") AS CountedResults");
        } else {
            out.push_str("SELECT COUNT(*) ").push_str(&body[from..]);
        }
        Ok(out.into_query().with_timeout_of(query))
    }

    /// One command running all the queries in order.
    ///
    /// Placeholders of each query are shifted after the arguments of the queries before it,
    /// stored procedure invocations keep their names. The timeout is the longest one.
    fn combine(&self, queries: &[SqlQuery]) -> Result<SqlQuery> {
        let chars = self.characters();
        let Some(first) = queries.first() else {
            return Err(KeelError::invalid_argument("queries", "nothing to combine").into());
        };
        if queries.len() == 1 {
            return Ok(first.clone());
        }
        let mut out = StatementWriter::new(chars);
        let mut timeout = None;
        for query in queries {
            if !out.text.is_empty() {
                out.push_str(chars.statement_separator);
            }
            let text = query.command_text().trim().trim_end_matches(';');
            if chars.is_stored_procedure_call(text) {
                out.push_str(text);
            } else {
                out.text
                    .push_str(&renumber_parameters(text, out.arguments.len(), chars));
            }
            out.arguments.extend_from_slice(query.arguments());
            timeout = timeout.max(query.timeout());
        }
        let mut result = out.into_query();
        result.set_timeout(timeout);
        Ok(result)
    }

    fn build_insert_sql_query(&self, table: &TableInfo, entity: &dyn Entity) -> Result<SqlQuery> {
        if table.identifier_strategy() == IdentifierStrategy::Sequence {
            return Err(sequences_not_supported(self.name(), table));
        }
        Ok(write_insert(self.characters(), table, entity, None)?.into_query())
    }

    /// Query returning the identifier generated by the last insert, `None` when the insert
    /// itself returns it or nothing is generated.
    fn build_select_insert_id_sql_query(&self, _table: &TableInfo) -> Result<Option<SqlQuery>> {
        Ok(None)
    }

    fn build_select_sql_query(&self, table: &TableInfo, identifier: Value) -> Result<SqlQuery> {
        let chars = self.characters();
        let mut out = StatementWriter::new(chars);
        out.push_str("SELECT ");
        separated_by(
            &mut out.text,
            table.columns(),
            |out, v| chars.write_escaped(out, &v.column_name),
            ",",
        );
        out.push_str(" FROM ");
        table.write_qualified_name(chars, &mut out.text);
        write_where_identifier(&mut out, table, identifier)?;
        Ok(out.into_query())
    }

    /// Updates every updatable column, the version column (if any) guards the row.
    fn build_update_sql_query(&self, table: &TableInfo, entity: &dyn Entity) -> Result<SqlQuery> {
        let chars = self.characters();
        let identifier = table.require_identifier()?;
        let columns = table.update_columns().collect::<Vec<_>>();
        if columns.is_empty() {
            return Err(KeelError::mapping(table.type_name(), "no column can be updated").into());
        }
        let mut out = StatementWriter::new(chars);
        out.push_str("UPDATE ");
        table.write_qualified_name(chars, &mut out.text);
        out.push_str(" SET ");
        for (i, column) in columns.iter().enumerate() {
            if i > 0 {
                out.push_str(",");
            }
            let value = entity.get_value(column.property_name)?;
            out.push_identifier(&column.column_name)
                .push_str(" = ")
                .push_argument(value, column.db_type);
        }
        write_where_identifier(&mut out, table, entity.get_value(identifier.property_name)?)?;
        if let Some(version) = table.version_column() {
            let value = entity.get_value(version.property_name)?;
            out.push_str(" AND ")
                .push_identifier(&version.column_name)
                .push_str(" = ")
                .push_argument(value, version.db_type);
        }
        Ok(out.into_query())
    }

    /// Updates only the columns changed in the delta.
    fn build_update_delta_sql_query(&self, table: &TableInfo, delta: &ObjectDelta) -> Result<SqlQuery> {
        let chars = self.characters();
        if delta.change_count() == 0 {
            return Err(KeelError::invalid_argument("delta", "there are no changes to apply").into());
        }
        let mut out = StatementWriter::new(chars);
        out.push_str("UPDATE ");
        table.write_qualified_name(chars, &mut out.text);
        out.push_str(" SET ");
        for (i, (name, value)) in delta.changes().iter().enumerate() {
            let Some(column) = table
                .column(name)
                .or_else(|| table.column_for_property(name))
            else {
                return Err(KeelError::invalid_argument(
                    "delta",
                    format!("`{}` is not a column of `{}`", name, table.type_name()),
                )
                .into());
            };
            if !column.allow_update {
                return Err(KeelError::invalid_argument(
                    "delta",
                    format!("column `{}` of `{}` cannot be updated", column.column_name, table.type_name()),
                )
                .into());
            }
            if i > 0 {
                out.push_str(",");
            }
            out.push_identifier(&column.column_name)
                .push_str(" = ")
                .push_argument(value.clone(), column.db_type);
        }
        write_where_identifier(&mut out, table, delta.identifier().clone())?;
        Ok(out.into_query())
    }

    fn build_delete_sql_query(&self, table: &TableInfo, identifier: Value) -> Result<SqlQuery> {
        let mut out = StatementWriter::new(self.characters());
        out.push_str("DELETE FROM ");
        table.write_qualified_name(self.characters(), &mut out.text);
        write_where_identifier(&mut out, table, identifier)?;
        Ok(out.into_query())
    }
}

/// Product neutral dialect: no delimiters, positional parameters.
#[derive(Debug, Default, Clone, Copy)]
pub struct GenericDialect;

impl SqlDialect for GenericDialect {
    fn name(&self) -> &'static str {
        "Generic"
    }

    fn characters(&self) -> &'static SqlCharacters {
        &SqlCharacters::EMPTY
    }
}
