use crate::{
    AsValue, EncryptedString, KeelError, Result, TypeConverter, Value, XmlDocument,
};
use log::error;
use rust_decimal::Decimal;
use time::{Date, Duration, OffsetDateTime, PrimitiveDateTime, Time};
use url::Url;
use uuid::Uuid;

/// Fallback converter, accepts every type.
///
/// Scalar values go to the wire unchanged, wire values are coerced into the prototype variant
/// (an `Int64` read for an `i32` property becomes `Int32` after a range check).
#[derive(Debug, Default, Clone, Copy)]
pub struct ObjectTypeConverter;

macro_rules! coerce {
    ($value:expr, $type:ty) => {
        <$type>::try_from_value($value).map(AsValue::as_value)
    };
}

/// Coerces a scalar into the variant of `prototype`.
pub fn coerce_value(value: Value, prototype: &Value) -> Result<Value> {
    if value.is_null() {
        return Ok(prototype.clone());
    }
    if value.same_type(prototype) {
        return Ok(value);
    }
    match prototype {
        Value::Null => Ok(value),
        Value::Boolean(..) => coerce!(value, bool),
        Value::Int8(..) => coerce!(value, i8),
        Value::Int16(..) => coerce!(value, i16),
        Value::Int32(..) => coerce!(value, i32),
        Value::Int64(..) => coerce!(value, i64),
        Value::UInt8(..) => coerce!(value, u8),
        Value::UInt16(..) => coerce!(value, u16),
        Value::UInt32(..) => coerce!(value, u32),
        Value::UInt64(..) => coerce!(value, u64),
        Value::Float32(..) => coerce!(value, f32),
        Value::Float64(..) => coerce!(value, f64),
        Value::Decimal(..) => coerce!(value, Decimal),
        Value::Char(..) => coerce!(value, char),
        Value::Varchar(..) => coerce!(value, String),
        Value::Blob(..) => coerce!(value, Box<[u8]>),
        Value::Date(..) => coerce!(value, Date),
        Value::Time(..) => coerce!(value, Time),
        Value::Timestamp(..) => coerce!(value, PrimitiveDateTime),
        Value::TimestampWithTimezone(..) => coerce!(value, OffsetDateTime),
        Value::Uuid(..) => coerce!(value, Uuid),
        Value::Duration(..) => coerce!(value, Duration),
        Value::Url(..) => coerce!(value, Url),
        Value::Xml(..) => coerce!(value, XmlDocument),
        Value::Encrypted(..) => coerce!(value, EncryptedString),
        Value::Enum(_, underlying) => {
            i64::try_from_value(value).map(|v| Value::Enum(Some(v), *underlying))
        }
    }
}

impl TypeConverter for ObjectTypeConverter {
    fn can_convert(&self, _prototype: &Value) -> bool {
        true
    }

    fn to_wire(&self, value: Value, _prototype: &Value) -> Result<Value> {
        match value {
            Value::Duration(..)
            | Value::Url(..)
            | Value::Xml(..)
            | Value::Enum(..)
            | Value::Encrypted(..) => {
                let error = KeelError::conversion(
                    value.type_name(),
                    "no converter is registered for this type",
                );
                error!("{:#}", error);
                Err(error.into())
            }
            v => Ok(v),
        }
    }

    fn from_wire(&self, value: Value, prototype: &Value) -> Result<Value> {
        coerce_value(value, prototype)
    }
}
