use crate::paging::{offset_fetch_page_query, row_number_page_query};
use keel_core::{
    DbType, Entity, IdentifierStrategy, KeelError, PagingOptions, Result, SqlCharacters,
    SqlDialect, SqlQuery, TableInfo, TypeMappings, write_insert,
};

pub const MSSQL_CHARACTERS: SqlCharacters = SqlCharacters {
    left_delimiter: "[",
    right_delimiter: "]",
    sql_parameter: "@",
    supports_named_parameters: true,
    select_wildcard: "*",
    like_wildcard: "%",
    statement_separator: ";",
    stored_procedure_invocation_command: Some("EXEC"),
    parenthesized_procedure_parameters: false,
};

fn select_scope_identity(table: &TableInfo) -> Option<SqlQuery> {
    (table.identifier_strategy() == IdentifierStrategy::DbGenerated)
        .then(|| SqlQuery::text("SELECT SCOPE_IDENTITY()"))
}

/// SQL Server 2005 to 2008 R2.
#[derive(Debug, Default, Clone, Copy)]
pub struct MsSql2005Dialect;

impl SqlDialect for MsSql2005Dialect {
    fn name(&self) -> &'static str {
        "MsSql2005"
    }

    fn characters(&self) -> &'static SqlCharacters {
        &MSSQL_CHARACTERS
    }

    fn page_query(&self, query: &SqlQuery, paging: PagingOptions) -> Result<SqlQuery> {
        row_number_page_query(self.characters(), query, paging)
    }

    fn build_select_insert_id_sql_query(&self, table: &TableInfo) -> Result<Option<SqlQuery>> {
        Ok(select_scope_identity(table))
    }
}

/// SQL Server 2012 and later.
#[derive(Debug, Default, Clone, Copy)]
pub struct MsSql2012Dialect;

impl MsSql2012Dialect {
    /// Type of the variable receiving the next sequence value.
    fn variable_type(table: &TableInfo) -> Result<&'static str> {
        let column = table.require_identifier()?;
        let db_type = column
            .db_type
            .unwrap_or_else(|| TypeMappings::default().db_type(&column.value));
        Ok(match db_type {
            DbType::Int16 => "SMALLINT",
            DbType::Int32 => "INT",
            DbType::Int64 => "BIGINT",
            DbType::Decimal => "DECIMAL",
            _ => {
                return Err(KeelError::mapping(
                    table.type_name(),
                    format!(
                        "a sequence cannot generate the identifier `{}` of type {:?}",
                        column.property_name, db_type
                    ),
                )
                .into());
            }
        })
    }
}

impl SqlDialect for MsSql2012Dialect {
    fn name(&self) -> &'static str {
        "MsSql2012"
    }

    fn characters(&self) -> &'static SqlCharacters {
        &MSSQL_CHARACTERS
    }

    fn page_query(&self, query: &SqlQuery, paging: PagingOptions) -> Result<SqlQuery> {
        offset_fetch_page_query(self.characters(), query, paging)
    }

    /// Sequence identifiers are read into a variable first, inserted explicitly and returned by
    /// the same command.
    fn build_insert_sql_query(&self, table: &TableInfo, entity: &dyn Entity) -> Result<SqlQuery> {
        let chars = self.characters();
        if table.identifier_strategy() != IdentifierStrategy::Sequence {
            return Ok(write_insert(chars, table, entity, None)?.into_query());
        }
        let sequence = table
            .require_identifier()?
            .sequence_name
            .as_deref()
            .ok_or_else(|| KeelError::mapping(table.type_name(), "the sequence name is missing"))?;
        let insert = write_insert(chars, table, entity, Some("@id"))?;
        let mut text = String::with_capacity(insert.text.len() + 96);
        text.push_str("DECLARE @id ");
        text.push_str(Self::variable_type(table)?);
        text.push_str(";SELECT @id = NEXT VALUE FOR ");
        chars.write_escaped(&mut text, sequence);
        text.push(';');
        text.push_str(&insert.text);
        text.push_str(";SELECT @id");
        Ok(SqlQuery::with_arguments(text, insert.arguments))
    }

    fn build_select_insert_id_sql_query(&self, table: &TableInfo) -> Result<Option<SqlQuery>> {
        Ok(select_scope_identity(table))
    }
}
