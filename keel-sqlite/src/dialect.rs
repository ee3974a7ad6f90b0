use keel_core::{IdentifierStrategy, Result, SqlCharacters, SqlDialect, SqlQuery, TableInfo};

pub const SQLITE_CHARACTERS: SqlCharacters = SqlCharacters {
    left_delimiter: "\"",
    right_delimiter: "\"",
    sql_parameter: "@",
    supports_named_parameters: true,
    select_wildcard: "*",
    like_wildcard: "%",
    statement_separator: ";",
    stored_procedure_invocation_command: None,
    parenthesized_procedure_parameters: false,
};

/// SQLite 3. Paging uses the default `LIMIT count OFFSET offset`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SQLiteDialect;

impl SqlDialect for SQLiteDialect {
    fn name(&self) -> &'static str {
        "SQLite"
    }

    fn characters(&self) -> &'static SqlCharacters {
        &SQLITE_CHARACTERS
    }

    fn build_select_insert_id_sql_query(&self, table: &TableInfo) -> Result<Option<SqlQuery>> {
        Ok((table.identifier_strategy() == IdentifierStrategy::DbGenerated)
            .then(|| SqlQuery::text("SELECT last_insert_rowid()")))
    }
}
