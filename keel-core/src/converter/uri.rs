use crate::{KeelError, Result, TypeConverter, TypeMappings, Value};
use url::Url;

/// URLs travel as strings.
#[derive(Debug, Clone, Copy)]
pub struct UriTypeConverter(());

impl UriTypeConverter {
    pub fn new(mappings: &mut TypeMappings) -> Self {
        mappings.register(&Value::Url(None), crate::DbType::String);
        Self(())
    }
}

impl TypeConverter for UriTypeConverter {
    fn can_convert(&self, prototype: &Value) -> bool {
        matches!(prototype, Value::Url(..))
    }

    fn to_wire(&self, value: Value, _prototype: &Value) -> Result<Value> {
        match value {
            Value::Url(v) => Ok(Value::Varchar(v.map(Into::into))),
            v => Err(KeelError::conversion(v.type_name(), "expected a url").into()),
        }
    }

    fn from_wire(&self, value: Value, prototype: &Value) -> Result<Value> {
        match value {
            v if v.is_null() => Ok(prototype.clone()),
            Value::Varchar(Some(v)) => Url::parse(&v)
                .map(|v| Value::Url(Some(v)))
                .map_err(|e| KeelError::conversion("Url", format!("`{}`: {}", v, e)).into()),
            Value::Url(v) => Ok(Value::Url(v)),
            v => Err(KeelError::conversion(v.type_name(), "a url can only be read from a string").into()),
        }
    }
}
