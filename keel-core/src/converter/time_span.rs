use crate::{AsValue, DbType, KeelError, Result, TypeConverter, TypeMappings, Value};
use time::Duration;

/// Durations travel as whole nanoseconds in a `BIGINT`.
///
/// Durations beyond about 292 years do not fit and fail to convert.
#[derive(Debug, Clone, Copy)]
pub struct TimeSpanTypeConverter(());

impl TimeSpanTypeConverter {
    pub fn new(mappings: &mut TypeMappings) -> Self {
        mappings.register(&Value::Duration(None), DbType::Int64);
        Self(())
    }
}

impl TypeConverter for TimeSpanTypeConverter {
    fn can_convert(&self, prototype: &Value) -> bool {
        matches!(prototype, Value::Duration(..))
    }

    fn to_wire(&self, value: Value, _prototype: &Value) -> Result<Value> {
        match value {
            Value::Duration(Some(v)) => i64::try_from(v.whole_nanoseconds())
                .map(|v| Value::Int64(Some(v)))
                .map_err(|_| {
                    KeelError::conversion("Duration", format!("{} overflows 64 bit nanoseconds", v))
                        .into()
                }),
            Value::Duration(None) => Ok(Value::Int64(None)),
            v => Err(KeelError::conversion(v.type_name(), "expected a duration").into()),
        }
    }

    fn from_wire(&self, value: Value, prototype: &Value) -> Result<Value> {
        match value {
            v if v.is_null() => Ok(prototype.clone()),
            Value::Duration(v) => Ok(Value::Duration(v)),
            v => i64::try_from_value(v).map(|v| Value::Duration(Some(Duration::nanoseconds(v)))),
        }
    }
}
