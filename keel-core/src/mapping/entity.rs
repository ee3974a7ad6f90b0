use crate::{DbType, IdentifierStrategy, Result, Value};

/// Declared shape of a mapped type: what `#[derive(Entity)]` knows about the struct.
///
/// A [`crate::MappingConvention`] turns it into a [`crate::TableInfo`].
#[derive(Debug, Clone, PartialEq)]
pub struct TypeShape {
    /// Short name of the type, `Customer`.
    pub type_name: &'static str,
    pub table: Option<TableAttribute>,
    pub properties: Vec<PropertyShape>,
}

/// `#[keel(table = "..", schema = "..")]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableAttribute {
    pub name: &'static str,
    pub schema: Option<&'static str>,
}

/// A field of the mapped type.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyShape {
    pub name: &'static str,
    /// Type prototype, the empty variant of the property type.
    pub value: Value,
    pub nullable: bool,
    pub column: Option<ColumnAttribute>,
    pub identifier: Option<IdentifierAttribute>,
}

/// `#[keel(column = "..", insert = false, update = false, version, db_type = "..")]`
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnAttribute {
    pub name: Option<&'static str>,
    pub allow_insert: bool,
    pub allow_update: bool,
    pub version: bool,
    pub db_type: Option<DbType>,
}

impl Default for ColumnAttribute {
    fn default() -> Self {
        Self {
            name: None,
            allow_insert: true,
            allow_update: true,
            version: false,
            db_type: None,
        }
    }
}

/// `#[keel(identifier = "..", sequence = "..")]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentifierAttribute {
    pub strategy: IdentifierStrategy,
    pub sequence: Option<&'static str>,
}

/// A type mapped to a table.
///
/// Usually derived:
/// ```ignore
/// #[derive(Default, Entity)]
/// #[keel(table = "Customers", schema = "Sales")]
/// struct Customer {
///     #[keel(column = "CustomerId", identifier = "DbGenerated")]
///     id: i32,
///     #[keel(column = "Name")]
///     name: String,
/// }
/// ```
pub trait Entity {
    fn type_shape() -> &'static TypeShape
    where
        Self: Sized;

    /// Current value of a property.
    fn get_value(&self, property: &str) -> Result<Value>;

    /// Assigns a property, the value must be convertible to the property type.
    fn set_value(&mut self, property: &str, value: Value) -> Result<()>;
}
