mod encrypted_string;
mod enum_value;
mod object;
mod time_span;
mod uri;
mod xml;

pub use encrypted_string::*;
pub use enum_value::*;
pub use object::*;
pub use time_span::*;
pub use uri::*;
pub use xml::*;

use crate::{DbType, Result, Value};
use std::{collections::HashMap, fmt::Debug, mem::Discriminant};

/// Conversion between an in-memory value and its wire representation.
///
/// `prototype` is the empty variant of the in-memory type. A null wire value converts to the
/// prototype itself (the typed `None`), never to a placeholder value.
pub trait TypeConverter: Debug + Send + Sync {
    fn can_convert(&self, prototype: &Value) -> bool;
    fn to_wire(&self, value: Value, prototype: &Value) -> Result<Value>;
    fn from_wire(&self, value: Value, prototype: &Value) -> Result<Value>;
}

/// Ordered converter registry.
///
/// Resolution returns the first registered converter accepting the type. The
/// [`ObjectTypeConverter`] fallback accepts everything and stays last regardless of the
/// registration order.
#[derive(Debug, Default)]
pub struct TypeConverters {
    converters: Vec<Box<dyn TypeConverter>>,
    fallback: ObjectTypeConverter,
}

impl TypeConverters {
    /// Only the fallback.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enum, URI, XML and time span converters, registering their wire types in `mappings`.
    ///
    /// The encrypted string converter needs a key and is added separately.
    pub fn with_defaults(mappings: &mut TypeMappings) -> Self {
        let mut result = Self::new();
        result
            .add(EnumTypeConverter)
            .add(UriTypeConverter::new(mappings))
            .add(XmlTypeConverter)
            .add(TimeSpanTypeConverter::new(mappings));
        result
    }

    /// Appends the converter after the ones already registered, ahead of the fallback.
    pub fn add(&mut self, converter: impl TypeConverter + 'static) -> &mut Self {
        self.converters.push(Box::new(converter));
        self
    }

    pub fn resolve(&self, prototype: &Value) -> &dyn TypeConverter {
        match self.converters.iter().find(|v| v.can_convert(prototype)) {
            Some(converter) => &**converter,
            None => &self.fallback,
        }
    }

    pub fn to_wire(&self, value: Value) -> Result<Value> {
        let prototype = value.prototype();
        self.resolve(&prototype).to_wire(value, &prototype)
    }

    pub fn from_wire(&self, value: Value, prototype: &Value) -> Result<Value> {
        self.resolve(prototype).from_wire(value, prototype)
    }

    /// Registered converters, the fallback excluded.
    pub fn len(&self) -> usize {
        self.converters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.converters.is_empty()
    }
}

/// In-memory type to wire type registry.
///
/// Built once while configuring, converters whose wire type differs from the in-memory one
/// register it at construction.
#[derive(Debug, Clone)]
pub struct TypeMappings {
    mappings: HashMap<Discriminant<Value>, DbType>,
}

impl Default for TypeMappings {
    fn default() -> Self {
        let mut result = Self {
            mappings: HashMap::new(),
        };
        for (prototype, db_type) in [
            (Value::Boolean(None), DbType::Boolean),
            (Value::Int8(None), DbType::SByte),
            (Value::Int16(None), DbType::Int16),
            (Value::Int32(None), DbType::Int32),
            (Value::Int64(None), DbType::Int64),
            (Value::UInt8(None), DbType::Byte),
            (Value::UInt16(None), DbType::UInt16),
            (Value::UInt32(None), DbType::UInt32),
            (Value::UInt64(None), DbType::UInt64),
            (Value::Float32(None), DbType::Single),
            (Value::Float64(None), DbType::Double),
            (Value::Decimal(None), DbType::Decimal),
            (Value::Char(None), DbType::StringFixedLength),
            (Value::Varchar(None), DbType::String),
            (Value::Blob(None), DbType::Binary),
            (Value::Date(None), DbType::Date),
            (Value::Time(None), DbType::Time),
            (Value::Timestamp(None), DbType::DateTime),
            (Value::TimestampWithTimezone(None), DbType::DateTimeOffset),
            (Value::Uuid(None), DbType::Guid),
            (Value::Xml(None), DbType::Xml),
            (Value::Encrypted(None), DbType::String),
        ] {
            result.register(&prototype, db_type);
        }
        result
    }
}

impl TypeMappings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, prototype: &Value, db_type: DbType) -> &mut Self {
        self.mappings
            .insert(std::mem::discriminant(prototype), db_type);
        self
    }

    /// Wire type of the values shaped like `prototype`, enums use their underlying integer type.
    pub fn db_type(&self, prototype: &Value) -> DbType {
        if let Value::Enum(_, underlying) = prototype {
            return *underlying;
        }
        self.mappings
            .get(&std::mem::discriminant(prototype))
            .copied()
            .unwrap_or_default()
    }
}
