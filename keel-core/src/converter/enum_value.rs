use crate::{DbType, KeelError, Result, TypeConverter, Value};

/// Enums travel as their discriminant, in the integer width declared by their `repr`.
#[derive(Debug, Default, Clone, Copy)]
pub struct EnumTypeConverter;

fn out_of_range(value: i128, underlying: DbType) -> crate::Error {
    KeelError::conversion(
        "Enum",
        format!("discriminant {} does not fit in {:?}", value, underlying),
    )
    .into()
}

/// Integer variant matching `underlying`, range checked.
fn integer(value: Option<i128>, underlying: DbType) -> Result<Value> {
    macro_rules! narrow {
        ($variant:path) => {
            match value {
                Some(v) => v
                    .try_into()
                    .map(|v| $variant(Some(v)))
                    .map_err(|_| out_of_range(v, underlying)),
                None => Ok($variant(None)),
            }
        };
    }
    match underlying {
        DbType::SByte => narrow!(Value::Int8),
        DbType::Byte => narrow!(Value::UInt8),
        DbType::Int16 => narrow!(Value::Int16),
        DbType::UInt16 => narrow!(Value::UInt16),
        DbType::Int32 => narrow!(Value::Int32),
        DbType::UInt32 => narrow!(Value::UInt32),
        DbType::Int64 => narrow!(Value::Int64),
        DbType::UInt64 => narrow!(Value::UInt64),
        v => Err(KeelError::conversion(
            "Enum",
            format!("{:?} is not an integer type", v),
        )
        .into()),
    }
}

impl TypeConverter for EnumTypeConverter {
    fn can_convert(&self, prototype: &Value) -> bool {
        matches!(prototype, Value::Enum(..))
    }

    fn to_wire(&self, value: Value, _prototype: &Value) -> Result<Value> {
        match value {
            Value::Enum(v, underlying) => integer(v.map(Into::into), underlying),
            v => Err(KeelError::conversion(v.type_name(), "expected an enum value").into()),
        }
    }

    fn from_wire(&self, value: Value, prototype: &Value) -> Result<Value> {
        let Value::Enum(_, underlying) = prototype else {
            return Err(KeelError::conversion(prototype.type_name(), "expected an enum type").into());
        };
        if value.is_null() {
            return Ok(prototype.clone());
        }
        let Some(discriminant) = value.as_i128() else {
            return Err(KeelError::conversion(
                value.type_name(),
                "an enum can only be read from an integer",
            )
            .into());
        };
        integer(Some(discriminant), *underlying)?;
        let discriminant = i64::try_from(discriminant).map_err(|_| out_of_range(discriminant, *underlying))?;
        Ok(Value::Enum(Some(discriminant), *underlying))
    }
}
