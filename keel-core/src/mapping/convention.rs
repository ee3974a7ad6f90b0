use crate::{
    ColumnInfo, IdentifierStrategy, KeelError, PropertyShape, Result, TableInfo, TypeShape,
};
use log::trace;

/// Strategy turning the declared shape of a type into its table metadata.
pub trait MappingConvention: Send + Sync {
    fn derive_table_info(&self, shape: &TypeShape) -> Result<TableInfo>;
}

fn column_info(property: &PropertyShape, column_name: String) -> ColumnInfo {
    let mut column = ColumnInfo::new(column_name, property.name, property.value.clone());
    column.nullable = property.nullable;
    if let Some(attribute) = &property.column {
        column.allow_insert = attribute.allow_insert;
        column.allow_update = attribute.allow_update;
        column.is_version = attribute.version;
        column.db_type = attribute.db_type;
    }
    if let Some(identifier) = &property.identifier {
        column.is_identifier = true;
        column.sequence_name = identifier.sequence.map(Into::into);
    }
    column
}

/// Maps only what is explicitly annotated.
///
/// The type needs a table attribute and every mapped property a column attribute, unannotated
/// properties are ignored.
#[derive(Debug, Default, Clone, Copy)]
pub struct AttributeMappingConvention;

impl MappingConvention for AttributeMappingConvention {
    fn derive_table_info(&self, shape: &TypeShape) -> Result<TableInfo> {
        let Some(table) = &shape.table else {
            return Err(KeelError::mapping(
                shape.type_name,
                "the type has no table attribute, add #[keel(table = \"..\")]",
            )
            .into());
        };
        let mut strategy = IdentifierStrategy::default();
        let columns = shape
            .properties
            .iter()
            .filter_map(|property| {
                let attribute = property.column.as_ref()?;
                if let Some(identifier) = &property.identifier {
                    strategy = identifier.strategy;
                }
                Some(column_info(
                    property,
                    attribute.name.unwrap_or(property.name).to_string(),
                ))
            })
            .collect::<Vec<_>>();
        trace!(
            "Mapped `{}` to `{}` by attributes ({} columns)",
            shape.type_name,
            table.name,
            columns.len()
        );
        TableInfo::new(
            shape.type_name,
            table.name,
            table.schema.map(Into::into),
            strategy,
            columns,
        )
    }
}

/// Settings of [`ConventionMappingConvention`].
#[derive(Debug, Clone)]
pub struct ConventionMappingSettings {
    pub schema: Option<String>,
    /// Strategy of identifiers found by name.
    pub identifier_strategy: IdentifierStrategy,
    /// Type name to table name.
    pub table_name: fn(&str) -> String,
    /// Property name to column name.
    pub column_name: fn(&str) -> String,
}

impl Default for ConventionMappingSettings {
    fn default() -> Self {
        Self {
            schema: None,
            identifier_strategy: IdentifierStrategy::DbGenerated,
            table_name: str::to_string,
            column_name: str::to_string,
        }
    }
}

/// Maps every property by name.
///
/// The table is named after the type, the identifier is the property called `id` or
/// `<type>_id` (`CustomerId` also matches, the comparison ignores case and underscores).
/// Attributes, when present, still override names and flags.
#[derive(Debug, Default, Clone)]
pub struct ConventionMappingConvention {
    settings: ConventionMappingSettings,
}

impl ConventionMappingConvention {
    pub fn new(settings: ConventionMappingSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &ConventionMappingSettings {
        &self.settings
    }

    fn is_identifier(type_name: &str, property: &str) -> bool {
        let normalized = property.replace('_', "");
        normalized.eq_ignore_ascii_case("id")
            || normalized.eq_ignore_ascii_case(&format!("{}id", type_name.replace('_', "")))
    }
}

impl MappingConvention for ConventionMappingConvention {
    fn derive_table_info(&self, shape: &TypeShape) -> Result<TableInfo> {
        let explicit = shape.properties.iter().any(|v| v.identifier.is_some());
        let mut strategy = self.settings.identifier_strategy;
        let columns = shape
            .properties
            .iter()
            .map(|property| {
                let name = property
                    .column
                    .as_ref()
                    .and_then(|v| v.name)
                    .map(str::to_string)
                    .unwrap_or_else(|| (self.settings.column_name)(property.name));
                let mut column = column_info(property, name);
                if let Some(identifier) = &property.identifier {
                    strategy = identifier.strategy;
                } else if !explicit && Self::is_identifier(shape.type_name, property.name) {
                    column.is_identifier = true;
                }
                column
            })
            .collect::<Vec<_>>();
        let (name, schema) = match &shape.table {
            Some(table) => (
                table.name.to_string(),
                table.schema.map(Into::into).or(self.settings.schema.clone()),
            ),
            None => (
                (self.settings.table_name)(shape.type_name),
                self.settings.schema.clone(),
            ),
        };
        trace!(
            "Mapped `{}` to `{}` by convention ({} columns)",
            shape.type_name,
            name,
            columns.len()
        );
        TableInfo::new(shape.type_name, name, schema, strategy, columns)
    }
}
