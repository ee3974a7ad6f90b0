use keel_core::{
    Entity, PagingOptions, Result, SqlCharacters, SqlDialect, SqlQuery, StatementWriter,
    TableInfo, paging_value, require_select, statement_text, write_insert_returning,
};

pub const FIREBIRD_CHARACTERS: SqlCharacters = SqlCharacters {
    left_delimiter: "\"",
    right_delimiter: "\"",
    sql_parameter: "@",
    supports_named_parameters: true,
    select_wildcard: "*",
    like_wildcard: "%",
    statement_separator: ";",
    stored_procedure_invocation_command: Some("EXECUTE PROCEDURE"),
    parenthesized_procedure_parameters: true,
};

/// Firebird 2.5 and later.
#[derive(Debug, Default, Clone, Copy)]
pub struct FirebirdDialect;

impl SqlDialect for FirebirdDialect {
    fn name(&self) -> &'static str {
        "Firebird"
    }

    fn characters(&self) -> &'static SqlCharacters {
        &FIREBIRD_CHARACTERS
    }

    /// A command runs a single statement.
    fn supports_batched_queries(&self) -> bool {
        false
    }

    /// `ROWS first TO last`, both one based and inclusive.
    fn page_query(&self, query: &SqlQuery, paging: PagingOptions) -> Result<SqlQuery> {
        let chars = self.characters();
        let sql = require_select(query, chars, "paged")?;
        let mut out = StatementWriter::with_arguments_of(chars, query);
        out.push_str(statement_text(&sql))
            .push_str(" ROWS ")
            .push_argument(paging_value(paging.first_row()?)?, None)
            .push_str(" TO ")
            .push_argument(paging_value(paging.last_row()?)?, None);
        Ok(out.into_query().with_timeout_of(query))
    }

    fn build_insert_sql_query(&self, table: &TableInfo, entity: &dyn Entity) -> Result<SqlQuery> {
        let chars = self.characters();
        write_insert_returning(chars, table, entity, |sequence| {
            format!("NEXT VALUE FOR {}", chars.escape_sql(sequence))
        })
    }
}
