use crate::{DbType, KeelError, Result, SqlCharacters, Value};
use std::collections::HashSet;

/// How the identifier of a row is produced.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdentifierStrategy {
    /// Set by the caller before insert.
    Assigned,
    /// Identity or auto increment column, read back after insert.
    #[default]
    DbGenerated,
    /// Random UUID generated before insert.
    Guid,
    /// UUID ending with the current time, generated before insert.
    GuidComb,
    /// Taken from a database sequence by the insert statement itself.
    Sequence,
}

impl IdentifierStrategy {
    /// The database produces the value, the insert statement must not carry it.
    pub fn is_generated_by_database(self) -> bool {
        matches!(self, Self::DbGenerated | Self::Sequence)
    }
}

/// A mapped column.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnInfo {
    pub column_name: String,
    pub property_name: &'static str,
    /// Type prototype of the property.
    pub value: Value,
    pub nullable: bool,
    /// Explicit wire type, overrides the type mappings.
    pub db_type: Option<DbType>,
    pub is_identifier: bool,
    pub is_version: bool,
    pub allow_insert: bool,
    pub allow_update: bool,
    pub sequence_name: Option<String>,
}

impl ColumnInfo {
    pub fn new(column_name: impl Into<String>, property_name: &'static str, value: Value) -> Self {
        Self {
            column_name: column_name.into(),
            property_name,
            value,
            nullable: false,
            db_type: None,
            is_identifier: false,
            is_version: false,
            allow_insert: true,
            allow_update: true,
            sequence_name: None,
        }
    }
}

/// Table level metadata of a mapped type.
#[derive(Debug, Clone, PartialEq)]
pub struct TableInfo {
    type_name: &'static str,
    name: String,
    schema: Option<String>,
    identifier_strategy: IdentifierStrategy,
    columns: Vec<ColumnInfo>,
    identifier: Option<usize>,
}

impl TableInfo {
    /// Validates the columns: names must be unique and at most one column is the identifier.
    ///
    /// The identifier is never updatable and version columns are neither inserted nor updated.
    pub fn new(
        type_name: &'static str,
        name: impl Into<String>,
        schema: Option<String>,
        identifier_strategy: IdentifierStrategy,
        mut columns: Vec<ColumnInfo>,
    ) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(KeelError::mapping(type_name, "the table name is empty").into());
        }
        if columns.is_empty() {
            return Err(KeelError::mapping(type_name, "no property is mapped to a column").into());
        }
        let mut names = HashSet::new();
        for column in &columns {
            if column.column_name.trim().is_empty() {
                return Err(KeelError::mapping(
                    type_name,
                    format!("the column of property `{}` has no name", column.property_name),
                )
                .into());
            }
            if !names.insert(column.column_name.to_ascii_lowercase()) {
                return Err(KeelError::mapping(
                    type_name,
                    format!("column `{}` is mapped more than once", column.column_name),
                )
                .into());
            }
        }
        let identifiers = columns
            .iter()
            .enumerate()
            .filter(|(_, v)| v.is_identifier)
            .map(|(i, _)| i)
            .collect::<Vec<_>>();
        if identifiers.len() > 1 {
            return Err(KeelError::mapping(
                type_name,
                format!(
                    "more than one property is marked as identifier: {}",
                    identifiers
                        .iter()
                        .map(|i| columns[*i].property_name)
                        .collect::<Vec<_>>()
                        .join(", ")
                ),
            )
            .into());
        }
        let identifier = identifiers.first().copied();
        if let Some(i) = identifier {
            let column = &mut columns[i];
            column.allow_update = false;
            column.allow_insert = !identifier_strategy.is_generated_by_database();
            if identifier_strategy == IdentifierStrategy::Sequence
                && column.sequence_name.as_deref().is_none_or(|v| v.trim().is_empty())
            {
                return Err(KeelError::mapping(
                    type_name,
                    format!(
                        "identifier `{}` uses the sequence strategy without a sequence name",
                        column.property_name
                    ),
                )
                .into());
            }
        }
        for column in columns.iter_mut().filter(|v| v.is_version) {
            column.allow_insert = false;
            column.allow_update = false;
        }
        Ok(Self {
            type_name,
            name,
            schema: schema.filter(|v| !v.trim().is_empty()),
            identifier_strategy,
            columns,
            identifier,
        })
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn schema(&self) -> Option<&str> {
        self.schema.as_deref()
    }

    pub fn identifier_strategy(&self) -> IdentifierStrategy {
        self.identifier_strategy
    }

    pub fn columns(&self) -> &[ColumnInfo] {
        &self.columns
    }

    pub fn identifier_column(&self) -> Option<&ColumnInfo> {
        self.identifier.map(|i| &self.columns[i])
    }

    /// The identifier column, types without one are read only.
    pub fn require_identifier(&self) -> Result<&ColumnInfo> {
        self.identifier_column().ok_or_else(|| {
            KeelError::mapping(
                self.type_name,
                "the type has no identifier column, it can only be read",
            )
            .into()
        })
    }

    pub fn version_column(&self) -> Option<&ColumnInfo> {
        self.columns.iter().find(|v| v.is_version)
    }

    /// Column by name, case insensitive.
    pub fn column(&self, column_name: &str) -> Option<&ColumnInfo> {
        self.columns
            .iter()
            .find(|v| v.column_name.eq_ignore_ascii_case(column_name))
    }

    pub fn column_for_property(&self, property_name: &str) -> Option<&ColumnInfo> {
        self.columns
            .iter()
            .find(|v| v.property_name == property_name)
    }

    /// Columns written by an insert statement.
    pub fn insert_columns(&self) -> impl Iterator<Item = &ColumnInfo> {
        self.columns.iter().filter(|v| v.allow_insert)
    }

    /// Columns written by an update statement.
    pub fn update_columns(&self) -> impl Iterator<Item = &ColumnInfo> {
        self.columns.iter().filter(|v| v.allow_update)
    }

    pub fn write_qualified_name(&self, chars: &SqlCharacters, out: &mut String) {
        if let Some(schema) = &self.schema {
            chars.write_escaped(out, schema);
            out.push('.');
        }
        chars.write_escaped(out, &self.name);
    }

    /// `[schema].[table]` escaped for the product.
    pub fn qualified_name(&self, chars: &SqlCharacters) -> String {
        let mut out = String::with_capacity(self.name.len() + 8);
        self.write_qualified_name(chars, &mut out);
        out
    }
}
