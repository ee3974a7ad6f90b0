use crate::{EncryptedString, XmlDocument};
use rust_decimal::Decimal;
use std::mem;
use time::{Date, Duration, OffsetDateTime, PrimitiveDateTime, Time};
use url::Url;
use uuid::Uuid;

/// Wire data type hint attached to command parameters.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DbType {
    AnsiString,
    Binary,
    Boolean,
    Byte,
    Date,
    DateTime,
    DateTimeOffset,
    Decimal,
    Double,
    Guid,
    Int16,
    Int32,
    Int64,
    #[default]
    Object,
    SByte,
    Single,
    String,
    StringFixedLength,
    Time,
    UInt16,
    UInt32,
    UInt64,
    Xml,
}

/// Dynamically typed value, used both for in-memory property values and for wire values.
///
/// Every variant carries an optional payload, the `None` form of a variant is the type
/// prototype used throughout the metadata model (see [`Value::prototype`]). `Duration`, `Url`,
/// `Xml`, `Enum` and `Encrypted` only exist in memory, the converters turn them into scalar
/// wire variants.
#[derive(Default, Debug, Clone, PartialEq)]
pub enum Value {
    #[default]
    Null,
    Boolean(Option<bool>),
    Int8(Option<i8>),
    Int16(Option<i16>),
    Int32(Option<i32>),
    Int64(Option<i64>),
    UInt8(Option<u8>),
    UInt16(Option<u16>),
    UInt32(Option<u32>),
    UInt64(Option<u64>),
    Float32(Option<f32>),
    Float64(Option<f64>),
    Decimal(Option<Decimal>),
    Char(Option<char>),
    Varchar(Option<String>),
    Blob(Option<Box<[u8]>>),
    Date(Option<Date>),
    Time(Option<Time>),
    Timestamp(Option<PrimitiveDateTime>),
    TimestampWithTimezone(Option<OffsetDateTime>),
    Uuid(Option<Uuid>),
    Duration(Option<Duration>),
    Url(Option<Url>),
    Xml(Option<XmlDocument>),
    Enum(Option<i64>, /* underlying: */ DbType),
    Encrypted(Option<EncryptedString>),
}

impl Value {
    pub fn is_null(&self) -> bool {
        match self {
            Value::Null
            | Value::Boolean(None)
            | Value::Int8(None)
            | Value::Int16(None)
            | Value::Int32(None)
            | Value::Int64(None)
            | Value::UInt8(None)
            | Value::UInt16(None)
            | Value::UInt32(None)
            | Value::UInt64(None)
            | Value::Float32(None)
            | Value::Float64(None)
            | Value::Decimal(None)
            | Value::Char(None)
            | Value::Varchar(None)
            | Value::Blob(None)
            | Value::Date(None)
            | Value::Time(None)
            | Value::Timestamp(None)
            | Value::TimestampWithTimezone(None)
            | Value::Uuid(None)
            | Value::Duration(None)
            | Value::Url(None)
            | Value::Xml(None)
            | Value::Enum(None, ..)
            | Value::Encrypted(None) => true,
            _ => false,
        }
    }

    /// The same variant without payload.
    pub fn prototype(&self) -> Value {
        match self {
            Value::Null => Value::Null,
            Value::Boolean(..) => Value::Boolean(None),
            Value::Int8(..) => Value::Int8(None),
            Value::Int16(..) => Value::Int16(None),
            Value::Int32(..) => Value::Int32(None),
            Value::Int64(..) => Value::Int64(None),
            Value::UInt8(..) => Value::UInt8(None),
            Value::UInt16(..) => Value::UInt16(None),
            Value::UInt32(..) => Value::UInt32(None),
            Value::UInt64(..) => Value::UInt64(None),
            Value::Float32(..) => Value::Float32(None),
            Value::Float64(..) => Value::Float64(None),
            Value::Decimal(..) => Value::Decimal(None),
            Value::Char(..) => Value::Char(None),
            Value::Varchar(..) => Value::Varchar(None),
            Value::Blob(..) => Value::Blob(None),
            Value::Date(..) => Value::Date(None),
            Value::Time(..) => Value::Time(None),
            Value::Timestamp(..) => Value::Timestamp(None),
            Value::TimestampWithTimezone(..) => Value::TimestampWithTimezone(None),
            Value::Uuid(..) => Value::Uuid(None),
            Value::Duration(..) => Value::Duration(None),
            Value::Url(..) => Value::Url(None),
            Value::Xml(..) => Value::Xml(None),
            Value::Enum(_, underlying) => Value::Enum(None, *underlying),
            Value::Encrypted(..) => Value::Encrypted(None),
        }
    }

    pub fn same_type(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Enum(_, l), Value::Enum(_, r)) => l == r,
            _ => mem::discriminant(self) == mem::discriminant(other),
        }
    }

    /// True when the value equals what a freshly defaulted property of its type holds.
    ///
    /// Identifier checks rely on it: zero numbers, nil uuids, empty strings and nulls are all
    /// "not assigned".
    pub fn is_default(&self) -> bool {
        match self {
            v if v.is_null() => true,
            Value::Boolean(Some(v)) => !v,
            Value::Int8(Some(v)) => *v == 0,
            Value::Int16(Some(v)) => *v == 0,
            Value::Int32(Some(v)) => *v == 0,
            Value::Int64(Some(v)) => *v == 0,
            Value::UInt8(Some(v)) => *v == 0,
            Value::UInt16(Some(v)) => *v == 0,
            Value::UInt32(Some(v)) => *v == 0,
            Value::UInt64(Some(v)) => *v == 0,
            Value::Float32(Some(v)) => *v == 0.0,
            Value::Float64(Some(v)) => *v == 0.0,
            Value::Decimal(Some(v)) => v.is_zero(),
            Value::Char(Some(v)) => *v == '\0',
            Value::Varchar(Some(v)) => v.is_empty(),
            Value::Blob(Some(v)) => v.is_empty(),
            Value::Uuid(Some(v)) => v.is_nil(),
            Value::Duration(Some(v)) => v.is_zero(),
            Value::Enum(Some(v), ..) => *v == 0,
            Value::Encrypted(Some(v)) => v.is_empty(),
            _ => false,
        }
    }

    /// The integer payload widened to `i128`, for range checked conversions.
    pub fn as_i128(&self) -> Option<i128> {
        Some(match self {
            Value::Int8(Some(v)) => *v as i128,
            Value::Int16(Some(v)) => *v as i128,
            Value::Int32(Some(v)) => *v as i128,
            Value::Int64(Some(v)) => *v as i128,
            Value::UInt8(Some(v)) => *v as i128,
            Value::UInt16(Some(v)) => *v as i128,
            Value::UInt32(Some(v)) => *v as i128,
            Value::UInt64(Some(v)) => *v as i128,
            Value::Enum(Some(v), ..) => *v as i128,
            _ => return None,
        })
    }

    /// Short name of the variant, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "Null",
            Value::Boolean(..) => "Boolean",
            Value::Int8(..) => "Int8",
            Value::Int16(..) => "Int16",
            Value::Int32(..) => "Int32",
            Value::Int64(..) => "Int64",
            Value::UInt8(..) => "UInt8",
            Value::UInt16(..) => "UInt16",
            Value::UInt32(..) => "UInt32",
            Value::UInt64(..) => "UInt64",
            Value::Float32(..) => "Float32",
            Value::Float64(..) => "Float64",
            Value::Decimal(..) => "Decimal",
            Value::Char(..) => "Char",
            Value::Varchar(..) => "Varchar",
            Value::Blob(..) => "Blob",
            Value::Date(..) => "Date",
            Value::Time(..) => "Time",
            Value::Timestamp(..) => "Timestamp",
            Value::TimestampWithTimezone(..) => "TimestampWithTimezone",
            Value::Uuid(..) => "Uuid",
            Value::Duration(..) => "Duration",
            Value::Url(..) => "Url",
            Value::Xml(..) => "Xml",
            Value::Enum(..) => "Enum",
            Value::Encrypted(..) => "Encrypted",
        }
    }
}
