use keel_core::{
    IdentifierStrategy, PagingOptions, Result, SqlCharacters, SqlDialect, SqlQuery,
    StatementWriter, TableInfo, paging_value, require_select, statement_text,
};

pub const MYSQL_CHARACTERS: SqlCharacters = SqlCharacters {
    left_delimiter: "`",
    right_delimiter: "`",
    sql_parameter: "@",
    supports_named_parameters: true,
    select_wildcard: "*",
    like_wildcard: "%",
    statement_separator: ";",
    stored_procedure_invocation_command: Some("CALL"),
    parenthesized_procedure_parameters: true,
};

/// MySQL 5 and later, MariaDB.
#[derive(Debug, Default, Clone, Copy)]
pub struct MySqlDialect;

impl SqlDialect for MySqlDialect {
    fn name(&self) -> &'static str {
        "MySql"
    }

    fn characters(&self) -> &'static SqlCharacters {
        &MYSQL_CHARACTERS
    }

    /// `LIMIT offset,count`.
    fn page_query(&self, query: &SqlQuery, paging: PagingOptions) -> Result<SqlQuery> {
        let chars = self.characters();
        let sql = require_select(query, chars, "paged")?;
        let mut out = StatementWriter::with_arguments_of(chars, query);
        out.push_str(statement_text(&sql))
            .push_str(" LIMIT ")
            .push_argument(paging_value(paging.offset)?, None)
            .push_str(",")
            .push_argument(paging_value(paging.count)?, None);
        Ok(out.into_query().with_timeout_of(query))
    }

    fn build_select_insert_id_sql_query(&self, table: &TableInfo) -> Result<Option<SqlQuery>> {
        Ok((table.identifier_strategy() == IdentifierStrategy::DbGenerated)
            .then(|| SqlQuery::text("SELECT LAST_INSERT_ID()")))
    }
}
