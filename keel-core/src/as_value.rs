use crate::{DbType, EncryptedString, Error, KeelError, Result, Value, XmlDocument};
use rust_decimal::{
    Decimal,
    prelude::{FromPrimitive, ToPrimitive},
};
use std::any;
use time::{Date, Duration, OffsetDateTime, PrimitiveDateTime, Time};
use url::Url;
use uuid::Uuid;

/// Conversion between native Rust types and the dynamically typed [`Value`].
///
/// It backs the property accessors generated by `#[derive(Entity)]`: reading a property calls
/// [`AsValue::as_value`], hydrating one calls [`AsValue::try_from_value`] on the value produced by
/// the converter registry.
///
/// # Implementing `AsValue` for custom types
/// Pick the variant the type travels as, return its empty form from `as_empty_value` and accept
/// it back in `try_from_value`:
///
/// ```rust
/// use keel_core::{AsValue, Result, Value};
/// struct Cents(i64);
/// impl AsValue for Cents {
///     fn as_empty_value() -> Value {
///         Value::Int64(None)
///     }
///     fn as_value(self) -> Value {
///         Value::Int64(Some(self.0))
///     }
///     fn try_from_value(value: Value) -> Result<Self> {
///         i64::try_from_value(value).map(Cents)
///     }
/// }
/// ```
///
/// # Error semantics
/// Numeric conversions accept any integer variant (and integral decimals, as returned by
/// identity functions of some products) after a range check. Null values only convert into
/// `Option<T>`.
pub trait AsValue {
    /// Whether the type admits the absence of a value.
    const NULLABLE: bool = false;
    /// The type prototype: its variant without payload.
    fn as_empty_value() -> Value;
    /// Wraps the value into its variant.
    fn as_value(self) -> Value;
    /// Unwraps a value, accepting compatible variants.
    fn try_from_value(value: Value) -> Result<Self>
    where
        Self: Sized;
}

impl<T: AsValue> From<T> for Value {
    fn from(value: T) -> Self {
        value.as_value()
    }
}

impl From<&'static str> for Value {
    fn from(value: &'static str) -> Self {
        Value::Varchar(Some(value.into()))
    }
}

fn mismatch<T>(value: &Value) -> Error {
    let message = if value.is_null() {
        "null cannot be assigned to a non optional type".to_string()
    } else {
        format!("unexpected {} value {:?}", value.type_name(), value)
    };
    KeelError::conversion(any::type_name::<T>(), message).into()
}

fn out_of_range<T>(value: impl std::fmt::Display) -> Error {
    KeelError::conversion(
        any::type_name::<T>(),
        format!("value {} is out of range", value),
    )
    .into()
}

macro_rules! impl_as_value_integer {
    ($source:ty, $variant:path) => {
        impl AsValue for $source {
            fn as_empty_value() -> Value {
                $variant(None)
            }
            fn as_value(self) -> Value {
                $variant(Some(self))
            }
            fn try_from_value(value: Value) -> Result<Self> {
                match value {
                    $variant(Some(v)) => Ok(v),
                    Value::Decimal(Some(v)) => {
                        if !v.fract().is_zero() {
                            return Err(out_of_range::<Self>(v));
                        }
                        v.to_i128()
                            .and_then(|v| <$source>::try_from(v).ok())
                            .ok_or_else(|| out_of_range::<Self>(v))
                    }
                    ref v => match v.as_i128() {
                        Some(i) => <$source>::try_from(i).map_err(|_| out_of_range::<Self>(i)),
                        None => Err(mismatch::<Self>(v)),
                    },
                }
            }
        }
    };
}

impl_as_value_integer!(i8, Value::Int8);
impl_as_value_integer!(i16, Value::Int16);
impl_as_value_integer!(i32, Value::Int32);
impl_as_value_integer!(i64, Value::Int64);
impl_as_value_integer!(u8, Value::UInt8);
impl_as_value_integer!(u16, Value::UInt16);
impl_as_value_integer!(u32, Value::UInt32);
impl_as_value_integer!(u64, Value::UInt64);

macro_rules! impl_as_value_float {
    ($source:ty, $variant:path) => {
        impl AsValue for $source {
            fn as_empty_value() -> Value {
                $variant(None)
            }
            fn as_value(self) -> Value {
                $variant(Some(self))
            }
            #[allow(unreachable_patterns)]
            fn try_from_value(value: Value) -> Result<Self> {
                match value {
                    $variant(Some(v)) => Ok(v),
                    Value::Float32(Some(v)) => Ok(v as _),
                    Value::Float64(Some(v)) => Ok(v as _),
                    Value::Decimal(Some(v)) => v.to_f64().map(|v| v as _).ok_or_else(|| out_of_range::<Self>(v)),
                    ref v => v.as_i128().map(|v| v as _).ok_or_else(|| mismatch::<Self>(v)),
                }
            }
        }
    };
}

impl_as_value_float!(f32, Value::Float32);
impl_as_value_float!(f64, Value::Float64);

macro_rules! impl_as_value {
    ($source:ty, $variant:path $(, $pat_rest:pat $(if $guard:expr)? => $expr_rest:expr)* $(,)?) => {
        impl AsValue for $source {
            fn as_empty_value() -> Value {
                $variant(None)
            }
            fn as_value(self) -> Value {
                $variant(Some(self.into()))
            }
            fn try_from_value(value: Value) -> Result<Self> {
                match value {
                    $variant(Some(v)) => Ok(v.into()),
                    $($pat_rest $(if $guard)? => $expr_rest,)*
                    #[allow(unreachable_patterns)]
                    v => Err(mismatch::<Self>(&v)),
                }
            }
        }
    };
}

impl_as_value!(
    bool,
    Value::Boolean,
    ref v if v.as_i128().is_some() => Ok(v.as_i128() != Some(0)),
);
impl_as_value!(
    char,
    Value::Char,
    Value::Varchar(Some(v)) if v.chars().count() == 1 => v.chars().next().ok_or_else(|| mismatch::<char>(&Value::Null)),
);
impl_as_value!(
    String,
    Value::Varchar,
    Value::Char(Some(v)) => Ok(v.into()),
    Value::Xml(Some(v)) => Ok(v.into_inner()),
    Value::Encrypted(Some(v)) => Ok(v.into_inner()),
);
impl_as_value!(
    Decimal,
    Value::Decimal,
    Value::Float32(Some(v)) => Decimal::from_f32(v).ok_or_else(|| out_of_range::<Decimal>(v)),
    Value::Float64(Some(v)) => Decimal::from_f64(v).ok_or_else(|| out_of_range::<Decimal>(v)),
    ref v if v.as_i128().is_some() => Decimal::from_i128(v.as_i128().unwrap_or_default()).ok_or_else(|| mismatch::<Decimal>(v)),
);
impl_as_value!(Box<[u8]>, Value::Blob);
impl_as_value!(Vec<u8>, Value::Blob);
impl_as_value!(Date, Value::Date, Value::Timestamp(Some(v)) => Ok(v.date()));
impl_as_value!(Time, Value::Time);
impl_as_value!(
    PrimitiveDateTime,
    Value::Timestamp,
    Value::TimestampWithTimezone(Some(v)) => Ok(PrimitiveDateTime::new(v.date(), v.time())),
    Value::Date(Some(v)) => Ok(v.midnight()),
);
impl_as_value!(
    OffsetDateTime,
    Value::TimestampWithTimezone,
    Value::Timestamp(Some(v)) => Ok(v.assume_utc()),
);
impl_as_value!(
    Uuid,
    Value::Uuid,
    Value::Varchar(Some(v)) => Uuid::parse_str(&v).map_err(|e| KeelError::conversion("uuid::Uuid", e.to_string()).into()),
    Value::Blob(Some(v)) => Uuid::from_slice(&v).map_err(|e| KeelError::conversion("uuid::Uuid", e.to_string()).into()),
);
impl_as_value!(Duration, Value::Duration);
impl_as_value!(Url, Value::Url);
impl_as_value!(
    XmlDocument,
    Value::Xml,
    Value::Varchar(Some(v)) => XmlDocument::parse(v),
);
impl_as_value!(
    EncryptedString,
    Value::Encrypted,
    Value::Varchar(Some(v)) => Ok(v.into()),
);

impl<T: AsValue> AsValue for Option<T> {
    const NULLABLE: bool = true;
    fn as_empty_value() -> Value {
        T::as_empty_value()
    }
    fn as_value(self) -> Value {
        match self {
            Some(v) => v.as_value(),
            None => T::as_empty_value(),
        }
    }
    fn try_from_value(value: Value) -> Result<Self> {
        if value.is_null() {
            Ok(None)
        } else {
            T::try_from_value(value).map(Some)
        }
    }
}

impl<T: AsValue> AsValue for Box<T> {
    const NULLABLE: bool = T::NULLABLE;
    fn as_empty_value() -> Value {
        T::as_empty_value()
    }
    fn as_value(self) -> Value {
        (*self).as_value()
    }
    fn try_from_value(value: Value) -> Result<Self> {
        T::try_from_value(value).map(Box::new)
    }
}

/// Wire type of the integer representation used by `#[derive(DbEnum)]` for a given `repr`.
pub fn enum_underlying_type(repr: &str) -> DbType {
    match repr {
        "i8" => DbType::SByte,
        "u8" => DbType::Byte,
        "i16" => DbType::Int16,
        "u16" => DbType::UInt16,
        "u32" => DbType::UInt32,
        "i64" => DbType::Int64,
        "u64" => DbType::UInt64,
        _ => DbType::Int32,
    }
}
