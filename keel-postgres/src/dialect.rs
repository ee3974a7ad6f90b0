use keel_core::{
    Entity, Result, SqlCharacters, SqlDialect, SqlQuery, TableInfo, write_insert_returning,
};

pub const POSTGRESQL_CHARACTERS: SqlCharacters = SqlCharacters {
    left_delimiter: "\"",
    right_delimiter: "\"",
    sql_parameter: ":",
    supports_named_parameters: true,
    select_wildcard: "*",
    like_wildcard: "%",
    statement_separator: ";",
    stored_procedure_invocation_command: Some("CALL"),
    parenthesized_procedure_parameters: true,
};

/// PostgreSQL 9 and later. Paging uses the default `LIMIT count OFFSET offset`.
#[derive(Debug, Default, Clone, Copy)]
pub struct PostgreSqlDialect;

impl SqlDialect for PostgreSqlDialect {
    fn name(&self) -> &'static str {
        "PostgreSql"
    }

    fn characters(&self) -> &'static SqlCharacters {
        &POSTGRESQL_CHARACTERS
    }

    /// Generated identifiers come back through `RETURNING`, sequences are read with `nextval`.
    fn build_insert_sql_query(&self, table: &TableInfo, entity: &dyn Entity) -> Result<SqlQuery> {
        write_insert_returning(self.characters(), table, entity, |sequence| {
            format!("nextval('{}')", sequence)
        })
    }
}
